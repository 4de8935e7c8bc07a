//! # ShapeReg Engine
//!
//! Classifies hand- or machine-drawn curves as canonical primitives and
//! regenerates them in idealized form.
//!
//! ## Core Components
//!
//! - **Line fitter**: least-squares residual test, endpoint-preserving output
//! - **Circle fitter**: centroid spread test, Levenberg-Marquardt refinement,
//!   resampled output
//! - **Convex hull**: shared by the rectangle and polygon tests
//! - **Smoothing fallback**: parametric smoothing spline, resampled and
//!   re-tested once
//! - **Pipeline**: per-curve classification across a whole document
//!
//! ## Architecture
//!
//! ```text
//! ShapeRegularizationPipeline
//!   └── ShapeRegularizer::classify
//!         ├── Line      (fit::line)
//!         ├── Circle    (fit::circle)
//!         ├── Rectangle (hull, 4 vertices)
//!         ├── Polygon   (hull, > 4 vertices)
//!         └── Fallback  (smoothing → classify_primitive, once)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use shapereg_core::{Curve, RegularizationConfig};
//! use shapereg_engine::{ShapeRegularizationPipeline, ShapeKind};
//!
//! let line = Curve::from_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
//! let document = vec![vec![line]];
//!
//! let pipeline = ShapeRegularizationPipeline::new(RegularizationConfig::default());
//! let result = pipeline.regularize(&document);
//! assert_eq!(result.paths[0][0].kind, ShapeKind::Line);
//! ```

pub mod classifier;
pub mod fit;
pub mod hull;
pub mod pipeline;
pub mod shapes;
pub mod smoothing;

pub use classifier::{Classification, ShapeRegularizer};
pub use hull::convex_hull;
pub use pipeline::{
    regularize, CurveReport, RegularizedDocument, ShapeRegularizationPipeline, ShapeSummary,
};
pub use shapes::{CanonicalShape, ShapeKind};
pub use smoothing::{SmoothingSpline, SplineFit};
