use super::common::wobbly_circle;
use shapereg_core::{Point, RegularizationConfig, RegularizeError, Solver};
use shapereg_engine::fit::{estimate_circle, fit_circle, is_circle};
use shapereg_engine::{CanonicalShape, ShapeKind, ShapeRegularizer};

#[test]
fn test_circle_recovery() {
    let curve = wobbly_circle(2.0, -3.0, 5.0, 32, 0.02);
    let result = ShapeRegularizer::default().classify(&curve);
    assert_eq!(result.kind, ShapeKind::Circle);
    assert!(result.issues.is_empty());

    match result.shape {
        CanonicalShape::Circle {
            center,
            radius,
            samples,
        } => {
            assert!((radius - 5.0).abs() < 0.05, "radius {}", radius);
            assert!(center.distance_to(&Point::new(2.0, -3.0)) < 0.05);
            assert_eq!(samples.len(), 100);
            for p in samples.iter() {
                assert!((p.distance_to(&center) - radius).abs() < 1e-9);
            }
        }
        other => panic!("expected circle, got {:?}", other),
    }
}

#[test]
fn test_refinement_does_not_worsen_the_estimate() {
    let curve = wobbly_circle(0.0, 0.0, 3.0, 16, 0.1);
    let estimate = estimate_circle(&curve).unwrap();
    let fit = fit_circle(&curve, estimate.center, estimate.mean_radius, 100, 1e-12);

    let cost = |c: Point, r: f64| -> f64 {
        curve
            .iter()
            .map(|p| (p.distance_to(&c) - r).powi(2))
            .sum()
    };
    assert!(fit.converged);
    assert!(fit.cost <= cost(estimate.center, estimate.mean_radius) + 1e-15);
    assert!((fit.cost - cost(fit.center, fit.radius)).abs() < 1e-12);
}

#[test]
fn test_spread_radii_are_not_a_circle() {
    let curve = wobbly_circle(0.0, 0.0, 1.0, 32, 0.3);
    assert!(!is_circle(&curve, 0.1));
}

#[test]
fn test_sample_count_follows_config() {
    let regularizer = ShapeRegularizer::new(RegularizationConfig {
        circle_samples: 12,
        ..Default::default()
    });
    let result = regularizer.classify(&wobbly_circle(0.0, 0.0, 1.0, 20, 0.0));
    assert_eq!(result.kind, ShapeKind::Circle);
    assert_eq!(result.shape.len(), 12);
}

#[test]
fn test_capped_refinement_is_reported() {
    let regularizer = ShapeRegularizer::new(RegularizationConfig {
        circle_max_iterations: 1,
        ..Default::default()
    });
    let result = regularizer.classify(&wobbly_circle(0.0, 0.0, 3.0, 16, 0.1));

    assert_eq!(result.kind, ShapeKind::Circle);
    assert!(!result.smoothed);
    assert_eq!(result.shape.len(), 100);
    assert_eq!(
        result.issues,
        vec![RegularizeError::FitNonConvergence {
            solver: Solver::CircleFit,
            iterations: 1,
        }]
    );
}
