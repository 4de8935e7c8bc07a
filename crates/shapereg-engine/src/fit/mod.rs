//! Primitive fitters used by the classifier.

pub mod circle;
pub mod line;

pub use circle::{estimate_circle, fit_circle, is_circle, CircleEstimate, CircleFit};
pub use line::{fit_line, is_straight_line, regularize_line, LineFit};
