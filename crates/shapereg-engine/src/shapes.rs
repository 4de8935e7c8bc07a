//! Canonical shapes produced by regularization.
//!
//! Every input curve resolves to exactly one [`CanonicalShape`]. The
//! [`ShapeKind`] records which classifier stage produced it, which is how the
//! rectangle case of [`CanonicalShape::Polygon`] stays observable.

use serde::{Deserialize, Serialize};
use shapereg_core::{Curve, Point};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CanonicalShape {
    /// Straight line through the first and last input points.
    Line { p0: Point, p1: Point },
    /// Least-squares circle with a regenerated polyline.
    Circle {
        center: Point,
        radius: f64,
        samples: Curve,
    },
    /// Convex hull vertices, in hull order. Rectangles and general polygons.
    Polygon { vertices: Curve },
    /// Fallback: the smoothed curve, or the untouched input.
    Raw { curve: Curve },
}

impl CanonicalShape {
    /// Point sequence handed to renderers and writers.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Self::Line { p0, p1 } => vec![*p0, *p1],
            Self::Circle { samples, .. } => samples.points().to_vec(),
            Self::Polygon { vertices } => vertices.points().to_vec(),
            Self::Raw { curve } => curve.points().to_vec(),
        }
    }

    /// Renderable sequence as a curve.
    pub fn to_curve(&self) -> Curve {
        Curve::new(self.points())
    }

    /// Number of renderable points.
    pub fn len(&self) -> usize {
        match self {
            Self::Line { .. } => 2,
            Self::Circle { samples, .. } => samples.len(),
            Self::Polygon { vertices } => vertices.len(),
            Self::Raw { curve } => curve.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classifier stage that produced a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Circle,
    Rectangle,
    Polygon,
    Raw,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::Circle => write!(f, "circle"),
            Self::Rectangle => write!(f, "rectangle"),
            Self::Polygon => write!(f, "polygon"),
            Self::Raw => write!(f, "raw"),
        }
    }
}
