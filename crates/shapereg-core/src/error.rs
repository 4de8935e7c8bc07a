//! Error handling for ShapeReg
//!
//! Provides the error types for every layer:
//! - Per-curve regularization errors (recoverable, reported alongside results)
//! - Decoding errors for tabular curve input
//! - Configuration errors
//!
//! All error types use `thiserror` for ergonomic error handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Iterative solver identifier used in convergence reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solver {
    /// Levenberg-Marquardt refinement of the radial-residual objective
    CircleFit,
    /// Penalty search of the parametric smoothing spline
    SmoothingSpline,
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CircleFit => write!(f, "circle fit"),
            Self::SmoothingSpline => write!(f, "smoothing spline"),
        }
    }
}

/// Regularization error type
///
/// Local to a single curve. None of these abort a batch: the pipeline
/// resolves the curve to a best-effort shape and reports the error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegularizeError {
    /// Too few points for the stage that was reached
    #[error("Degenerate input: {stage} needs at least {required} points, got {actual}")]
    DegenerateInput {
        /// The stage that rejected the curve.
        stage: &'static str,
        /// Minimum number of points the stage accepts.
        required: usize,
        /// Number of points the curve actually had.
        actual: usize,
    },

    /// An iterative solver hit its iteration cap
    #[error("{solver} did not converge within {iterations} iterations")]
    FitNonConvergence {
        /// The solver that ran out of iterations.
        solver: Solver,
        /// The iteration cap that was reached.
        iterations: usize,
    },

    /// Geometry too degenerate for the requested computation
    #[error("Numeric instability: {reason}")]
    NumericInstability {
        /// What made the geometry unusable.
        reason: String,
    },
}

impl RegularizeError {
    pub fn degenerate(stage: &'static str, required: usize, actual: usize) -> Self {
        Self::DegenerateInput {
            stage,
            required,
            actual,
        }
    }

    pub fn instability(reason: impl Into<String>) -> Self {
        Self::NumericInstability {
            reason: reason.into(),
        }
    }

    /// Check if this is a degenerate-input error
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateInput { .. })
    }

    /// Check if this is a solver convergence error
    pub fn is_non_convergence(&self) -> bool {
        matches!(self, Self::FitNonConvergence { .. })
    }
}

/// Decoding error type
///
/// Raised while grouping `path_id,segment_id,x,y` rows into curves.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Row has the wrong number of columns
    #[error("Line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        /// 1-based line number.
        line: usize,
        /// Required column count.
        expected: usize,
        /// Column count on the line.
        found: usize,
    },

    /// A field could not be parsed as a number
    #[error("Line {line}: invalid number '{value}' in column {column}")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        column: usize,
        /// The offending text.
        value: String,
    },

    /// Path or segment identifier is not a whole number
    #[error("Line {line}: identifier {value} is not a non-negative integer")]
    InvalidIdentifier {
        /// 1-based line number.
        line: usize,
        /// The identifier as parsed.
        value: f64,
    },
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// File extension is neither `.json` nor `.toml`
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// File contents could not be parsed
    #[error("Invalid config file: {0}")]
    Parse(String),

    /// Configuration could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    /// A value is out of its valid range
    #[error("Invalid setting '{key}': {reason}")]
    InvalidValue {
        /// The setting name.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Main error type for ShapeReg
///
/// A unified error type for the outer surfaces (file I/O, decoding,
/// configuration). Curve-level problems stay in [`RegularizeError`].
#[derive(Error, Debug)]
pub enum Error {
    /// Regularization error
    #[error(transparent)]
    Regularize(#[from] RegularizeError),

    /// Decoding error
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a decoding error
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Error::Decode(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
