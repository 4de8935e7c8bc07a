//! Ordered shape classifier.
//!
//! Tests run in a fixed priority order and the first match wins:
//!
//! ```text
//! Line → Circle → Rectangle (hull == 4) → Polygon (hull > 4) → Fallback
//! ```
//!
//! The fallback smooths the curve once and re-runs the four primitive tests
//! on the result. It calls [`ShapeRegularizer::classify_primitive`], never
//! [`ShapeRegularizer::classify`], so a curve is smoothed at most once.
//!
//! Note that the rectangle test accepts any convex quadrilateral hull; right
//! angles are not checked.

use crate::fit::{circle, line};
use crate::hull::convex_hull;
use crate::shapes::{CanonicalShape, ShapeKind};
use crate::smoothing::SmoothingSpline;
use shapereg_core::{Curve, RegularizationConfig, RegularizeError, Solver};
use tracing::debug;

/// Minimum number of points the rectangle test accepts.
pub const MIN_RECTANGLE_POINTS: usize = 4;

/// Minimum number of points the polygon test accepts.
pub const MIN_POLYGON_POINTS: usize = 5;

/// Outcome of classifying one curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub shape: CanonicalShape,
    pub kind: ShapeKind,
    /// Whether the shape came from the smoothed curve.
    pub smoothed: bool,
    /// Recoverable problems met on the way. Never silently dropped.
    pub issues: Vec<RegularizeError>,
}

impl Classification {
    fn new(shape: CanonicalShape, kind: ShapeKind) -> Self {
        Self {
            shape,
            kind,
            smoothed: false,
            issues: Vec::new(),
        }
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Classifies curves and regenerates them as canonical shapes.
#[derive(Debug, Clone, Default)]
pub struct ShapeRegularizer {
    config: RegularizationConfig,
}

impl ShapeRegularizer {
    pub fn new(config: RegularizationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegularizationConfig {
        &self.config
    }

    /// Classifies a curve, falling back to smoothing when no primitive matches.
    pub fn classify(&self, curve: &Curve) -> Classification {
        if let Some(found) = self.classify_primitive(curve) {
            return found;
        }
        self.smooth_and_reclassify(curve)
    }

    /// Runs the line, circle, rectangle, and polygon tests only.
    pub fn classify_primitive(&self, curve: &Curve) -> Option<Classification> {
        if line::is_straight_line(curve, self.config.line_residual_threshold) {
            debug!("Curve of {} points classified as line", curve.len());
            return line::regularize_line(curve).map(|s| Classification::new(s, ShapeKind::Line));
        }

        if let Some(estimate) = circle::estimate_circle(curve) {
            if estimate.coefficient_of_variation < self.config.circle_cv_threshold {
                debug!(
                    "Curve of {} points classified as circle (cv={:.4})",
                    curve.len(),
                    estimate.coefficient_of_variation
                );
                return Some(self.regularize_circle(curve, estimate));
            }
        }

        if curve.len() < MIN_RECTANGLE_POINTS {
            return None;
        }

        let hull = match convex_hull(curve) {
            Ok(hull) => hull,
            Err(err) => {
                debug!("No hull for curve of {} points: {}", curve.len(), err);
                return None;
            }
        };

        let rectangle_vertices = self.config.rectangle_hull_vertices;
        if hull.len() == rectangle_vertices {
            debug!("Curve of {} points classified as rectangle", curve.len());
            return Some(Classification::new(
                CanonicalShape::Polygon { vertices: hull },
                ShapeKind::Rectangle,
            ));
        }

        if curve.len() >= MIN_POLYGON_POINTS && hull.len() > rectangle_vertices {
            debug!(
                "Curve of {} points classified as polygon with {} vertices",
                curve.len(),
                hull.len()
            );
            return Some(Classification::new(
                CanonicalShape::Polygon { vertices: hull },
                ShapeKind::Polygon,
            ));
        }

        None
    }

    /// Smooths the curve and runs the primitive tests on it exactly once.
    ///
    /// Curves too short for the spline pass through unchanged as `Raw`.
    pub fn smooth_and_reclassify(&self, curve: &Curve) -> Classification {
        let mut issues = Vec::new();

        let fit = match SmoothingSpline::fit(
            curve,
            self.config.smoothing_factor,
            self.config.smoothing_max_iterations,
        ) {
            Ok(fit) => fit,
            Err(err) => {
                debug!("Smoothing skipped: {}", err);
                let mut raw = Classification::new(
                    CanonicalShape::Raw {
                        curve: curve.clone(),
                    },
                    ShapeKind::Raw,
                );
                raw.issues.push(err);
                return raw;
            }
        };

        if !fit.converged {
            issues.push(RegularizeError::FitNonConvergence {
                solver: Solver::SmoothingSpline,
                iterations: fit.iterations,
            });
        }

        let smoothed = fit.spline.sample(self.config.smoothing_samples);

        let mut result = self.classify_primitive(&smoothed).unwrap_or_else(|| {
            debug!("Smoothed curve matched no primitive, keeping it raw");
            Classification::new(CanonicalShape::Raw { curve: smoothed }, ShapeKind::Raw)
        });
        result.smoothed = true;
        issues.append(&mut result.issues);
        result.issues = issues;
        result
    }

    fn regularize_circle(&self, curve: &Curve, estimate: circle::CircleEstimate) -> Classification {
        let fit = circle::fit_circle(
            curve,
            estimate.center,
            estimate.mean_radius,
            self.config.circle_max_iterations,
            self.config.circle_tolerance,
        );

        let mut result = Classification::new(
            CanonicalShape::Circle {
                center: fit.center,
                radius: fit.radius,
                samples: fit.sample(self.config.circle_samples),
            },
            ShapeKind::Circle,
        );
        if !fit.converged {
            result.issues.push(RegularizeError::FitNonConvergence {
                solver: Solver::CircleFit,
                iterations: fit.iterations,
            });
        }
        result
    }
}
