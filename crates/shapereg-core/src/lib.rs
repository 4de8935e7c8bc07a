//! # ShapeReg Core
//!
//! Core types, errors, and configuration shared by every ShapeReg crate.
//! Provides the point/curve data model the engine operates on, the
//! per-curve error taxonomy, and the tunable heuristic thresholds.

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    RegularizationConfig, DEFAULT_CIRCLE_CV_THRESHOLD, DEFAULT_LINE_RESIDUAL_THRESHOLD,
    DEFAULT_RECTANGLE_HULL_VERTICES, DEFAULT_SAMPLE_COUNT, DEFAULT_SMOOTHING_FACTOR,
};
pub use error::{ConfigError, DecodeError, Error, RegularizeError, Result, Solver};
pub use types::{Curve, Document, Path, Point};
