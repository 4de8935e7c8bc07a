use shapereg_core::{Curve, Point, RegularizeError};
use shapereg_engine::SmoothingSpline;

fn noisy_wave() -> Curve {
    (0..30)
        .map(|i| {
            let x = i as f64 * 0.25;
            let noise = 0.15 * (13.0 * i as f64).sin();
            Point::new(x, 2.0 * x.sin() + noise)
        })
        .collect()
}

#[test]
fn test_residual_matches_smoothing_factor() {
    let fit = SmoothingSpline::fit(&noisy_wave(), 0.5, 100).unwrap();
    assert!(fit.converged, "stopped after {} iterations", fit.iterations);
    assert!((fit.residual - 0.5).abs() <= 5e-4, "residual {}", fit.residual);
    assert!(fit.penalty.is_finite() && fit.penalty > 0.0);
}

#[test]
fn test_larger_factor_is_smoother() {
    let curve = noisy_wave();
    let tight = SmoothingSpline::fit(&curve, 0.1, 100).unwrap();
    let loose = SmoothingSpline::fit(&curve, 2.0, 100).unwrap();
    assert!(loose.penalty > tight.penalty);
}

#[test]
fn test_sample_spans_the_curve() {
    let curve = noisy_wave();
    let fit = SmoothingSpline::fit(&curve, 0.5, 100).unwrap();
    let samples = fit.spline.sample(100);
    assert_eq!(samples.len(), 100);

    let knots = fit.spline.knot_points();
    assert_eq!(knots.len(), curve.len());
    let first = samples.first().unwrap();
    let last = samples.last().unwrap();
    assert!(first.distance_to(&knots.first().unwrap()) < 1e-9);
    assert!(last.distance_to(&knots.last().unwrap()) < 1e-9);
}

#[test]
fn test_straight_data_uses_linear_limit() {
    let curve: Curve = (0..6).map(|i| Point::new(i as f64, 2.0 * i as f64)).collect();
    let fit = SmoothingSpline::fit(&curve, 0.5, 100).unwrap();
    assert!(fit.converged);
    assert_eq!(fit.iterations, 0);
    assert!(fit.penalty.is_infinite());
    let mid = fit.spline.evaluate(0.5);
    assert!(mid.distance_to(&Point::new(2.5, 5.0)) < 1e-9);
}

#[test]
fn test_duplicates_count_once() {
    let curve = Curve::from_xy(&[(0.0, 0.0), (0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (2.0, 0.0)]);
    assert!(matches!(
        SmoothingSpline::fit(&curve, 0.5, 100),
        Err(RegularizeError::DegenerateInput { actual: 3, .. })
    ));
}
