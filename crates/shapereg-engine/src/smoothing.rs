//! Parametric cubic smoothing spline for the fallback path.
//!
//! Each coordinate is fitted by a natural cubic smoothing spline over the
//! normalized cumulative chord length `u ∈ [0, 1]`, with one penalty weight
//! `α` shared by x and y. For a fixed `α` the fit minimizes
//!
//! ```text
//! Σ (x_i - gx(u_i))² + Σ (y_i - gy(u_i))² + α (∫ gx''² + ∫ gy''²)
//! ```
//!
//! and is obtained in Reinsch form: `(R + α QᵀQ) γ = Qᵀy`, `g = y - α Q γ`,
//! where `γ` are the second derivatives at the interior knots. The system is
//! symmetric positive definite and pentadiagonal.
//!
//! The combined residual grows monotonically with `α`, from zero
//! (interpolation) to the straight-line least-squares residual. `α` is
//! chosen so that the residual equals the smoothing factor, by bracketing in
//! decades and then bisecting in log space. If even the straight line leaves
//! less residual than the smoothing factor, the straight line is used.
//! FITPACK's `splprep` differs here: it returns the least-squares cubic with
//! no interior knots, which is not in general a straight line.

use shapereg_core::{Curve, Point, RegularizeError};
use tracing::debug;

/// Minimum number of distinct points the spline accepts.
pub const MIN_SPLINE_POINTS: usize = 4;

/// Accept `α` once the residual is within this fraction of the target.
const RESIDUAL_TOLERANCE: f64 = 1e-3;

/// Values and second derivatives of one coordinate at the knots.
#[derive(Debug, Clone, PartialEq)]
struct Component {
    values: Vec<f64>,
    second: Vec<f64>,
}

impl Component {
    fn evaluate(&self, knots: &[f64], k: usize, t: f64) -> f64 {
        let h = knots[k + 1] - knots[k];
        let a = t - knots[k];
        let b = knots[k + 1] - t;
        (a * self.values[k + 1] + b * self.values[k]) / h
            - a * b / 6.0
                * ((1.0 + a / h) * self.second[k + 1] + (1.0 + b / h) * self.second[k])
    }

    fn residual(&self, data: &[f64]) -> f64 {
        data.iter()
            .zip(&self.values)
            .map(|(d, g)| (d - g) * (d - g))
            .sum()
    }
}

/// A fitted parametric smoothing spline.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingSpline {
    knots: Vec<f64>,
    x: Component,
    y: Component,
}

/// Outcome of [`SmoothingSpline::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct SplineFit {
    pub spline: SmoothingSpline,
    /// Combined squared residual of x and y at the chosen penalty.
    pub residual: f64,
    /// Penalty weight; infinite for the straight-line limit.
    pub penalty: f64,
    pub iterations: usize,
    pub converged: bool,
}

impl SmoothingSpline {
    /// Fits the spline so the combined residual matches `smoothing`.
    ///
    /// Consecutive duplicate points are collapsed first. Fewer than
    /// [`MIN_SPLINE_POINTS`] distinct points is `DegenerateInput`.
    pub fn fit(
        curve: &Curve,
        smoothing: f64,
        max_iterations: usize,
    ) -> Result<SplineFit, RegularizeError> {
        let mut points: Vec<Point> = curve.points().to_vec();
        points.dedup();
        if points.len() < MIN_SPLINE_POINTS {
            return Err(RegularizeError::degenerate(
                "smoothing spline",
                MIN_SPLINE_POINTS,
                points.len(),
            ));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(RegularizeError::instability("non-finite coordinate"));
        }

        let knots = chord_length_parameters(&points);
        let system = ReinschSystem::new(&knots)?;
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

        let linear = Self {
            x: linear_component(&knots, &xs),
            y: linear_component(&knots, &ys),
            knots: knots.clone(),
        };
        let linear_residual = linear.x.residual(&xs) + linear.y.residual(&ys);
        if linear_residual <= smoothing {
            debug!(
                "Smoothing spline: straight-line residual {:.3e} within factor {}",
                linear_residual, smoothing
            );
            return Ok(SplineFit {
                spline: linear,
                residual: linear_residual,
                penalty: f64::INFINITY,
                iterations: 0,
                converged: true,
            });
        }

        let evaluate = |alpha: f64| -> Result<(Self, f64), RegularizeError> {
            let x = system.solve(&xs, alpha)?;
            let y = system.solve(&ys, alpha)?;
            let residual = x.residual(&xs) + y.residual(&ys);
            Ok((
                Self {
                    knots: knots.clone(),
                    x,
                    y,
                },
                residual,
            ))
        };
        let within = |residual: f64| (residual - smoothing).abs() <= RESIDUAL_TOLERANCE * smoothing;

        // Natural scale of α: the penalty term carries 1/h³ relative to the
        // residual term.
        let mean_h = 1.0 / (points.len() - 1) as f64;
        let mut alpha = mean_h.powi(3);
        let (mut spline, mut residual) = evaluate(alpha)?;
        let mut iterations = 1;
        let mut best = (spline.clone(), residual, alpha);

        let mut lo = 0.0;
        let mut hi = f64::INFINITY;
        let mut converged = within(residual);

        while !converged && iterations < max_iterations {
            if residual < smoothing {
                lo = alpha;
            } else {
                hi = alpha;
            }
            alpha = if hi.is_infinite() {
                alpha * 10.0
            } else if lo == 0.0 {
                alpha / 10.0
            } else {
                (lo * hi).sqrt()
            };

            (spline, residual) = evaluate(alpha)?;
            iterations += 1;
            if (residual - smoothing).abs() < (best.1 - smoothing).abs() {
                best = (spline.clone(), residual, alpha);
            }
            converged = within(residual);
        }

        let (spline, residual, penalty) = best;
        debug!(
            "Smoothing spline: penalty={:.3e} residual={:.3e} target={} iterations={} converged={}",
            penalty, residual, smoothing, iterations, converged
        );

        Ok(SplineFit {
            spline,
            residual,
            penalty,
            iterations,
            converged,
        })
    }

    /// Point at parameter `t`, clamped to `[0, 1]`.
    pub fn evaluate(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let last = self.knots.len() - 2;
        let k = self
            .knots
            .partition_point(|&u| u <= t)
            .saturating_sub(1)
            .min(last);
        Point::new(
            self.x.evaluate(&self.knots, k, t),
            self.y.evaluate(&self.knots, k, t),
        )
    }

    /// `count` points at evenly spaced parameters over `[0, 1]`.
    pub fn sample(&self, count: usize) -> Curve {
        let steps = count.saturating_sub(1).max(1) as f64;
        (0..count)
            .map(|i| self.evaluate(i as f64 / steps))
            .collect()
    }

    /// Fitted values at the knots.
    pub fn knot_points(&self) -> Curve {
        self.x
            .values
            .iter()
            .zip(&self.y.values)
            .map(|(&x, &y)| Point::new(x, y))
            .collect()
    }
}

/// Cumulative chord length scaled to `[0, 1]`. Points must be distinct
/// from their predecessors.
fn chord_length_parameters(points: &[Point]) -> Vec<f64> {
    let mut params = Vec::with_capacity(points.len());
    let mut total = 0.0;
    params.push(0.0);
    for pair in points.windows(2) {
        total += pair[0].distance_to(&pair[1]);
        params.push(total);
    }
    for u in params.iter_mut() {
        *u /= total;
    }
    if let Some(last) = params.last_mut() {
        *last = 1.0;
    }
    params
}

/// Least-squares straight line in `u`, expressed as a spline component
/// with zero curvature.
fn linear_component(knots: &[f64], data: &[f64]) -> Component {
    let n = knots.len() as f64;
    let mean_u = knots.iter().sum::<f64>() / n;
    let mean_d = data.iter().sum::<f64>() / n;
    let (suu, sud) = knots
        .iter()
        .zip(data)
        .fold((0.0, 0.0), |(suu, sud), (u, d)| {
            let du = u - mean_u;
            (suu + du * du, sud + du * (d - mean_d))
        });
    let slope = sud / suu;
    Component {
        values: knots.iter().map(|u| mean_d + slope * (u - mean_u)).collect(),
        second: vec![0.0; knots.len()],
    }
}

/// Banded matrices of the Reinsch formulation for a fixed knot vector.
///
/// Column `i` of `Q` (interior knot `i + 1`) has entries `q0[i]`, `q1[i]`,
/// `q2[i]` on rows `i`, `i + 1`, `i + 2`. `R` is tridiagonal.
struct ReinschSystem {
    q0: Vec<f64>,
    q1: Vec<f64>,
    q2: Vec<f64>,
    r_diag: Vec<f64>,
    r_off: Vec<f64>,
    qtq_diag: Vec<f64>,
    qtq_off1: Vec<f64>,
    qtq_off2: Vec<f64>,
}

impl ReinschSystem {
    fn new(knots: &[f64]) -> Result<Self, RegularizeError> {
        let h: Vec<f64> = knots.windows(2).map(|w| w[1] - w[0]).collect();
        if h.iter().any(|&step| !(step > 0.0)) {
            return Err(RegularizeError::instability(
                "spline parameters are not strictly increasing",
            ));
        }

        let m = knots.len() - 2;
        let mut q0 = Vec::with_capacity(m);
        let mut q1 = Vec::with_capacity(m);
        let mut q2 = Vec::with_capacity(m);
        let mut r_diag = Vec::with_capacity(m);
        let mut r_off = Vec::with_capacity(m.saturating_sub(1));
        for i in 0..m {
            q0.push(1.0 / h[i]);
            q1.push(-1.0 / h[i] - 1.0 / h[i + 1]);
            q2.push(1.0 / h[i + 1]);
            r_diag.push((h[i] + h[i + 1]) / 3.0);
            if i + 1 < m {
                r_off.push(h[i + 1] / 6.0);
            }
        }

        let mut qtq_diag = Vec::with_capacity(m);
        let mut qtq_off1 = Vec::with_capacity(m.saturating_sub(1));
        let mut qtq_off2 = Vec::with_capacity(m.saturating_sub(2));
        for i in 0..m {
            qtq_diag.push(q0[i] * q0[i] + q1[i] * q1[i] + q2[i] * q2[i]);
            if i + 1 < m {
                qtq_off1.push(q1[i] * q0[i + 1] + q2[i] * q1[i + 1]);
            }
            if i + 2 < m {
                qtq_off2.push(q2[i] * q0[i + 2]);
            }
        }

        Ok(Self {
            q0,
            q1,
            q2,
            r_diag,
            r_off,
            qtq_diag,
            qtq_off1,
            qtq_off2,
        })
    }

    fn size(&self) -> usize {
        self.r_diag.len()
    }

    /// Smoothing spline component of `data` for penalty `alpha`.
    fn solve(&self, data: &[f64], alpha: f64) -> Result<Component, RegularizeError> {
        let m = self.size();
        let rhs: Vec<f64> = (0..m)
            .map(|i| self.q0[i] * data[i] + self.q1[i] * data[i + 1] + self.q2[i] * data[i + 2])
            .collect();

        let diag: Vec<f64> = (0..m)
            .map(|i| self.r_diag[i] + alpha * self.qtq_diag[i])
            .collect();
        let off1: Vec<f64> = (0..m.saturating_sub(1))
            .map(|i| self.r_off[i] + alpha * self.qtq_off1[i])
            .collect();
        let off2: Vec<f64> = self.qtq_off2.iter().map(|v| alpha * v).collect();

        let gamma = solve_pentadiagonal(&diag, &off1, &off2, &rhs).ok_or_else(|| {
            RegularizeError::instability(format!(
                "smoothing system not positive definite at penalty {:e}",
                alpha
            ))
        })?;

        let mut values = data.to_vec();
        for i in 0..m {
            values[i] -= alpha * self.q0[i] * gamma[i];
            values[i + 1] -= alpha * self.q1[i] * gamma[i];
            values[i + 2] -= alpha * self.q2[i] * gamma[i];
        }

        let mut second = Vec::with_capacity(m + 2);
        second.push(0.0);
        second.extend_from_slice(&gamma);
        second.push(0.0);

        Ok(Component { values, second })
    }
}

/// Solves a symmetric positive definite pentadiagonal system by banded
/// Cholesky. `off1[i]` is `A[i][i+1]`, `off2[i]` is `A[i][i+2]`.
fn solve_pentadiagonal(diag: &[f64], off1: &[f64], off2: &[f64], rhs: &[f64]) -> Option<Vec<f64>> {
    let m = diag.len();
    // L[i][i], L[i][i-1], L[i][i-2]
    let mut l0 = vec![0.0; m];
    let mut l1 = vec![0.0; m];
    let mut l2 = vec![0.0; m];

    for i in 0..m {
        if i >= 2 {
            l2[i] = off2[i - 2] / l0[i - 2];
        }
        if i >= 1 {
            l1[i] = (off1[i - 1] - l2[i] * l1[i - 1]) / l0[i - 1];
        }
        let pivot = diag[i] - l1[i] * l1[i] - l2[i] * l2[i];
        if !(pivot > 0.0) || !pivot.is_finite() {
            return None;
        }
        l0[i] = pivot.sqrt();
    }

    let mut z = vec![0.0; m];
    for i in 0..m {
        let mut acc = rhs[i];
        if i >= 1 {
            acc -= l1[i] * z[i - 1];
        }
        if i >= 2 {
            acc -= l2[i] * z[i - 2];
        }
        z[i] = acc / l0[i];
    }

    let mut x = vec![0.0; m];
    for i in (0..m).rev() {
        let mut acc = z[i];
        if i + 1 < m {
            acc -= l1[i + 1] * x[i + 1];
        }
        if i + 2 < m {
            acc -= l2[i + 2] * x[i + 2];
        }
        x[i] = acc / l0[i];
    }

    Some(x)
}
