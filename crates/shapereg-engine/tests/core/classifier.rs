use super::common::{pentagon_with_midpoints, unit_square_with_midpoints};
use shapereg_core::{Curve, Point};
use shapereg_engine::{CanonicalShape, ShapeKind, ShapeRegularizer};

#[test]
fn test_square_is_rectangle() {
    let result = ShapeRegularizer::default().classify(&unit_square_with_midpoints());
    assert_eq!(result.kind, ShapeKind::Rectangle);
    assert!(!result.smoothed);
    match result.shape {
        CanonicalShape::Polygon { vertices } => assert_eq!(vertices.len(), 4),
        other => panic!("expected polygon vertices, got {:?}", other),
    }
}

#[test]
fn test_rotated_rectangle_is_rectangle() {
    let (s, c) = (0.3f64.sin(), 0.3f64.cos());
    let corners = [(1.0, 0.5), (-1.0, 0.5), (-1.0, -0.5), (1.0, -0.5)];
    let mut traced = Vec::new();
    for i in 0..4 {
        let (ax, ay) = corners[i];
        let (bx, by) = corners[(i + 1) % 4];
        for (x, y) in [(ax, ay), ((ax + bx) / 2.0, (ay + by) / 2.0)] {
            traced.push(Point::new(c * x - s * y + 10.0, s * x + c * y - 3.0));
        }
    }
    let result = ShapeRegularizer::default().classify(&Curve::new(traced));
    assert_eq!(result.kind, ShapeKind::Rectangle);
    assert_eq!(result.shape.len(), 4);
}

#[test]
fn test_any_convex_quadrilateral_is_rectangle() {
    let trapezoid = Curve::from_xy(&[
        (0.0, 0.0),
        (2.0, 0.0),
        (4.0, 0.0),
        (3.5, 1.0),
        (3.0, 2.0),
        (2.0, 2.0),
        (1.0, 2.0),
        (0.5, 1.0),
    ]);
    let result = ShapeRegularizer::default().classify(&trapezoid);
    assert_eq!(result.kind, ShapeKind::Rectangle);
}

#[test]
fn test_pentagon_is_polygon() {
    let (vertices, traced) = pentagon_with_midpoints();
    let result = ShapeRegularizer::default().classify(&traced);
    assert_eq!(result.kind, ShapeKind::Polygon);
    let shape = result.shape.points();
    assert_eq!(shape.len(), 5);
    for v in &shape {
        assert!(vertices.contains(v));
    }
}

#[test]
fn test_circle_wins_over_rectangle() {
    // A square's corners are equidistant from its centroid, so the
    // circle test claims them before the hull is ever computed.
    let corners = Curve::from_xy(&[(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)]);
    let result = ShapeRegularizer::default().classify(&corners);
    assert_eq!(result.kind, ShapeKind::Circle);
    assert_eq!(result.shape.len(), 100);
}

#[test]
fn test_line_wins_over_everything() {
    let curve = Curve::from_xy(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0), (4.0, 5.0)]);
    let result = ShapeRegularizer::default().classify(&curve);
    assert_eq!(result.kind, ShapeKind::Line);
    assert!(result.issues.is_empty());
}
