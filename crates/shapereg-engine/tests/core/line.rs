use shapereg_core::{Curve, Point};
use shapereg_engine::fit::{fit_line, is_straight_line, regularize_line};
use shapereg_engine::{CanonicalShape, ShapeKind, ShapeRegularizer};

#[test]
fn test_noisy_line_keeps_input_endpoints() {
    let points: Vec<Point> = (0..20)
        .map(|i| {
            let x = i as f64 * 0.5;
            let noise = 1e-4 * (3.0 * i as f64).sin();
            Point::new(x, 0.5 * x + 2.0 + noise)
        })
        .collect();
    let curve = Curve::new(points.clone());

    let result = ShapeRegularizer::default().classify(&curve);
    assert_eq!(result.kind, ShapeKind::Line);
    assert_eq!(
        result.shape,
        CanonicalShape::Line {
            p0: points[0],
            p1: points[19],
        }
    );
}

#[test]
fn test_residual_threshold_is_strict() {
    let curve = Curve::from_xy(&[(0.0, 0.0), (1.0, 0.01), (2.0, 0.0)]);
    let fit = fit_line(&curve).unwrap();
    assert!(fit.residual > 0.0);
    assert!(!is_straight_line(&curve, fit.residual));
    assert!(is_straight_line(&curve, fit.residual * 1.01));
}

#[test]
fn test_regularize_line_uses_curve_order() {
    let curve = Curve::from_xy(&[(3.0, 3.0), (2.0, 2.0), (1.0, 1.0)]);
    let shape = regularize_line(&curve).unwrap();
    assert_eq!(shape.points(), vec![Point::new(3.0, 3.0), Point::new(1.0, 1.0)]);
}

#[test]
fn test_regularize_line_requires_points() {
    assert!(regularize_line(&Curve::default()).is_none());
}
