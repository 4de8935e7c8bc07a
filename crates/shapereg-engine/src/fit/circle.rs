//! Circle test and least-squares circle refinement.
//!
//! The test uses the centroid of the points as a centre estimate and
//! accepts the curve when the distances to it are nearly constant. The
//! refinement minimizes the radial-residual objective
//!
//! ```text
//! F(cx, cy, r) = sum_i (|p_i - c| - r)^2
//! ```
//!
//! with Levenberg-Marquardt, starting from the centroid and mean radius.
//! The solver is capped at a fixed iteration count; if the cap is hit the
//! best iterate seen so far is returned and flagged as not converged.

use nalgebra::{Matrix3, Vector3};
use shapereg_core::{Curve, Point};
use std::f64::consts::PI;
use tracing::debug;

/// Minimum number of points the circle test accepts.
pub const MIN_CIRCLE_POINTS: usize = 3;

const EPS: f64 = 1e-12;
const INITIAL_DAMPING: f64 = 1e-3;
const MAX_DAMPING: f64 = 1e16;

/// Centroid-based circle estimate used by the classification test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleEstimate {
    pub center: Point,
    pub mean_radius: f64,
    /// Population standard deviation of the radii divided by their mean.
    pub coefficient_of_variation: f64,
}

/// Computes the centroid, mean radius, and radius spread of a curve.
///
/// Returns `None` below [`MIN_CIRCLE_POINTS`] or when every point sits on
/// the centroid (zero mean radius).
pub fn estimate_circle(curve: &Curve) -> Option<CircleEstimate> {
    if curve.len() < MIN_CIRCLE_POINTS {
        return None;
    }
    let center = curve.centroid()?;
    let radii: Vec<f64> = curve.iter().map(|p| p.distance_to(&center)).collect();
    let n = radii.len() as f64;
    let mean_radius = radii.iter().sum::<f64>() / n;
    if !(mean_radius > EPS) {
        return None;
    }
    let variance = radii
        .iter()
        .map(|r| (r - mean_radius) * (r - mean_radius))
        .sum::<f64>()
        / n;

    Some(CircleEstimate {
        center,
        mean_radius,
        coefficient_of_variation: variance.sqrt() / mean_radius,
    })
}

/// True when the radius coefficient of variation is below `threshold`.
pub fn is_circle(curve: &Curve, threshold: f64) -> bool {
    estimate_circle(curve).is_some_and(|est| est.coefficient_of_variation < threshold)
}

/// Result of the radial-residual refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleFit {
    pub center: Point,
    pub radius: f64,
    /// Objective value at the returned parameters.
    pub cost: f64,
    pub iterations: usize,
    pub converged: bool,
}

impl CircleFit {
    /// `count` points evenly spaced in angle over `[0, 2π]`, both ends included.
    pub fn sample(&self, count: usize) -> Curve {
        let steps = count.saturating_sub(1).max(1) as f64;
        (0..count)
            .map(|i| {
                let theta = 2.0 * PI * (i as f64) / steps;
                Point::new(
                    self.center.x + self.radius * theta.cos(),
                    self.center.y + self.radius * theta.sin(),
                )
            })
            .collect()
    }
}

fn radial_cost(points: &[Point], params: &Vector3<f64>) -> f64 {
    points
        .iter()
        .map(|p| {
            let d = ((p.x - params[0]).powi(2) + (p.y - params[1]).powi(2)).sqrt();
            (d - params[2]).powi(2)
        })
        .sum()
}

/// Gauss-Newton normal equations `(JᵀJ, Jᵀr)` at `params`.
fn normal_equations(points: &[Point], params: &Vector3<f64>) -> (Matrix3<f64>, Vector3<f64>) {
    let mut jtj = Matrix3::zeros();
    let mut jtr = Vector3::zeros();
    for p in points {
        let dx = p.x - params[0];
        let dy = p.y - params[1];
        let d = (dx * dx + dy * dy).sqrt();
        let residual = d - params[2];
        let row = if d > EPS {
            Vector3::new(-dx / d, -dy / d, -1.0)
        } else {
            Vector3::new(0.0, 0.0, -1.0)
        };
        jtj += row * row.transpose();
        jtr += row * residual;
    }
    (jtj, jtr)
}

/// Refines a circle from an initial centre and radius.
pub fn fit_circle(
    curve: &Curve,
    initial_center: Point,
    initial_radius: f64,
    max_iterations: usize,
    tolerance: f64,
) -> CircleFit {
    let points = curve.points();
    let mut params = Vector3::new(initial_center.x, initial_center.y, initial_radius);
    let mut cost = radial_cost(points, &params);
    let mut damping = INITIAL_DAMPING;
    let mut converged = false;
    let mut iterations = 0;

    while iterations < max_iterations {
        iterations += 1;

        let (jtj, jtr) = normal_equations(points, &params);
        if jtr.norm() <= tolerance * (1.0 + cost) {
            converged = true;
            break;
        }

        let mut damped = jtj;
        for i in 0..3 {
            damped[(i, i)] += damping * jtj[(i, i)].max(EPS);
        }

        let Some(cholesky) = damped.cholesky() else {
            damping *= 10.0;
            if damping > MAX_DAMPING {
                break;
            }
            continue;
        };
        let step = cholesky.solve(&(-jtr));
        let candidate = params + step;
        let candidate_cost = radial_cost(points, &candidate);

        if candidate_cost.is_finite() && candidate_cost < cost {
            let improvement = cost - candidate_cost;
            params = candidate;
            cost = candidate_cost;
            damping = (damping / 10.0).max(EPS);
            if step.norm() <= tolerance * (params.norm() + tolerance)
                || improvement <= tolerance * cost
            {
                converged = true;
                break;
            }
        } else {
            damping *= 10.0;
            // No descent direction left at any damping: we sit at a minimum.
            if damping > MAX_DAMPING {
                converged = true;
                break;
            }
        }
    }

    debug!(
        "Circle fit: center=({:.6}, {:.6}) radius={:.6} cost={:.3e} iterations={} converged={}",
        params[0], params[1], params[2], cost, iterations, converged
    );

    CircleFit {
        center: Point::new(params[0], params[1]),
        radius: params[2].abs(),
        cost,
        iterations,
        converged,
    }
}
