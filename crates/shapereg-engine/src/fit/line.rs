//! Straight-line test and regularization.
//!
//! The test regresses y on x by ordinary least squares and compares the
//! residual sum of squares against an absolute threshold. The regularized
//! line keeps the curve's own endpoints rather than the regression line.

use crate::shapes::CanonicalShape;
use shapereg_core::Curve;

/// Minimum number of points the line test accepts.
pub const MIN_LINE_POINTS: usize = 2;

/// Degree-1 least-squares fit of y against x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    /// Sum of squared differences between fitted and actual y.
    pub residual: f64,
}

/// Fits `y = slope * x + intercept`.
///
/// When every x is identical the design matrix is rank deficient; the
/// least-squares projection is then the mean of y, so the residual is the
/// spread of y about its mean and `slope` is zero.
pub fn fit_line(curve: &Curve) -> Option<LineFit> {
    if curve.len() < MIN_LINE_POINTS {
        return None;
    }

    let n = curve.len() as f64;
    let mean_x = curve.xs().sum::<f64>() / n;
    let mean_y = curve.ys().sum::<f64>() / n;

    let (sxx, sxy) = curve.iter().fold((0.0, 0.0), |(sxx, sxy), p| {
        let dx = p.x - mean_x;
        (sxx + dx * dx, sxy + dx * (p.y - mean_y))
    });

    let (slope, intercept) = if sxx > f64::MIN_POSITIVE {
        let slope = sxy / sxx;
        (slope, mean_y - slope * mean_x)
    } else {
        (0.0, mean_y)
    };

    let residual = curve
        .iter()
        .map(|p| {
            let err = p.y - (slope * p.x + intercept);
            err * err
        })
        .sum();

    Some(LineFit {
        slope,
        intercept,
        residual,
    })
}

/// True when the least-squares residual is below `threshold`.
pub fn is_straight_line(curve: &Curve, threshold: f64) -> bool {
    fit_line(curve).is_some_and(|fit| fit.residual < threshold)
}

/// Line through the first and last points of the curve.
pub fn regularize_line(curve: &Curve) -> Option<CanonicalShape> {
    Some(CanonicalShape::Line {
        p0: curve.first()?,
        p1: curve.last()?,
    })
}
