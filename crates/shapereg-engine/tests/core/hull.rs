use super::common::{pentagon_with_midpoints, unit_square_with_midpoints};
use shapereg_core::{Curve, Point};
use shapereg_engine::convex_hull;
use shapereg_engine::hull::signed_area;

#[test]
fn test_edge_points_are_not_vertices() {
    let hull = convex_hull(&unit_square_with_midpoints()).unwrap();
    assert_eq!(
        hull.points(),
        &[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    );
}

#[test]
fn test_rotated_edges_tolerate_rounding() {
    let (vertices, traced) = pentagon_with_midpoints();
    let hull = convex_hull(&traced).unwrap();
    assert_eq!(hull.len(), 5);
    for v in hull.iter() {
        assert!(vertices.contains(v));
    }
    assert!(signed_area(&hull) > 0.0);
}

#[test]
fn test_hull_starts_at_lowest_x() {
    let curve = Curve::from_xy(&[(3.0, 1.0), (1.0, 2.0), (-2.0, 0.5), (0.0, -4.0), (0.5, 0.5)]);
    let hull = convex_hull(&curve).unwrap();
    assert_eq!(hull.first(), Some(Point::new(-2.0, 0.5)));
    assert!(!hull.points().contains(&Point::new(0.5, 0.5)));
}
