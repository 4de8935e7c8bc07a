//! Document-level regularization.
//!
//! Every curve of every path is classified independently; a problem with
//! one curve is reported and never affects its siblings. With the `parallel`
//! feature curves are dispatched through rayon, and results are collected
//! back in input order.

use crate::classifier::{Classification, ShapeRegularizer};
use crate::shapes::{CanonicalShape, ShapeKind};
use serde::Serialize;
use shapereg_core::{Curve, Path, RegularizationConfig, RegularizeError};
use tracing::{info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A recoverable problem tied to one input curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveReport {
    /// Index of the path in the document.
    pub path: usize,
    /// Index of the curve within its path.
    pub curve: usize,
    pub error: RegularizeError,
}

/// Shape counts for a regularized document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShapeSummary {
    pub lines: usize,
    pub circles: usize,
    pub rectangles: usize,
    pub polygons: usize,
    pub raw: usize,
    /// Curves that went through the smoothing fallback.
    pub smoothed: usize,
}

impl ShapeSummary {
    pub fn total(&self) -> usize {
        self.lines + self.circles + self.rectangles + self.polygons + self.raw
    }
}

/// Regularized shapes, in the same path/curve layout as the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegularizedDocument {
    pub paths: Vec<Vec<Classification>>,
    pub reports: Vec<CurveReport>,
}

impl RegularizedDocument {
    /// Shapes per path, dropping classification metadata.
    pub fn shapes(&self) -> Vec<Vec<CanonicalShape>> {
        self.paths
            .iter()
            .map(|path| path.iter().map(|c| c.shape.clone()).collect())
            .collect()
    }

    /// Renderable point sequences per path.
    pub fn curves(&self) -> Vec<Vec<Curve>> {
        self.paths
            .iter()
            .map(|path| path.iter().map(|c| c.shape.to_curve()).collect())
            .collect()
    }

    pub fn summary(&self) -> ShapeSummary {
        let mut summary = ShapeSummary::default();
        for classification in self.paths.iter().flatten() {
            match classification.kind {
                ShapeKind::Line => summary.lines += 1,
                ShapeKind::Circle => summary.circles += 1,
                ShapeKind::Rectangle => summary.rectangles += 1,
                ShapeKind::Polygon => summary.polygons += 1,
                ShapeKind::Raw => summary.raw += 1,
            }
            if classification.smoothed {
                summary.smoothed += 1;
            }
        }
        summary
    }
}

/// Applies a [`ShapeRegularizer`] across a whole document.
#[derive(Debug, Clone, Default)]
pub struct ShapeRegularizationPipeline {
    regularizer: ShapeRegularizer,
}

impl ShapeRegularizationPipeline {
    pub fn new(config: RegularizationConfig) -> Self {
        Self {
            regularizer: ShapeRegularizer::new(config),
        }
    }

    pub fn regularizer(&self) -> &ShapeRegularizer {
        &self.regularizer
    }

    /// Classifies every curve of every path.
    pub fn regularize(&self, document: &[Path]) -> RegularizedDocument {
        let paths = self.classify_all(document);

        let mut reports = Vec::new();
        for (path_index, path) in paths.iter().enumerate() {
            let flagged = path.iter().enumerate().filter(|(_, c)| c.has_issues());
            for (curve_index, classification) in flagged {
                for error in &classification.issues {
                    warn!("Path {} curve {}: {}", path_index, curve_index, error);
                    reports.push(CurveReport {
                        path: path_index,
                        curve: curve_index,
                        error: error.clone(),
                    });
                }
            }
        }

        let result = RegularizedDocument { paths, reports };
        let summary = result.summary();
        info!(
            "Regularized {} curves in {} paths: {} lines, {} circles, {} rectangles, {} polygons, {} raw ({} smoothed, {} issues)",
            summary.total(),
            result.paths.len(),
            summary.lines,
            summary.circles,
            summary.rectangles,
            summary.polygons,
            summary.raw,
            summary.smoothed,
            result.reports.len()
        );
        result
    }

    #[cfg(feature = "parallel")]
    fn classify_all(&self, document: &[Path]) -> Vec<Vec<Classification>> {
        document
            .par_iter()
            .map(|path| {
                path.par_iter()
                    .map(|curve| self.regularizer.classify(curve))
                    .collect()
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn classify_all(&self, document: &[Path]) -> Vec<Vec<Classification>> {
        document
            .iter()
            .map(|path| {
                path.iter()
                    .map(|curve| self.regularizer.classify(curve))
                    .collect()
            })
            .collect()
    }
}

/// Regularizes a document with the given configuration.
pub fn regularize(document: &[Path], config: &RegularizationConfig) -> RegularizedDocument {
    ShapeRegularizationPipeline::new(config.clone()).regularize(document)
}
