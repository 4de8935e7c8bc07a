//! Planar convex hull shared by the rectangle and polygon tests.
//!
//! Andrew's monotone chain, O(n log n). Vertices come back counter-clockwise
//! starting from the lowest-x (then lowest-y) point. Points lying on a hull
//! edge are not vertices, so a square sampled along its sides still has a
//! four-vertex hull.

use shapereg_core::{Curve, Point, RegularizeError};

/// Minimum number of points a hull can be computed from.
pub const MIN_HULL_POINTS: usize = 3;

/// Turns flatter than this, relative to the edge lengths, count as collinear.
const COLLINEAR_EPS: f64 = 1e-12;

fn cross(o: &Point, a: &Point, b: &Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn is_left_turn(o: &Point, a: &Point, b: &Point) -> bool {
    let scale = o.distance_to(a) * o.distance_to(b);
    cross(o, a, b) > COLLINEAR_EPS * scale
}

/// Convex hull vertices of `curve`, a subset of its points.
///
/// Fails with `DegenerateInput` below three points and with
/// `NumericInstability` when the points do not span a 2D region.
pub fn convex_hull(curve: &Curve) -> Result<Curve, RegularizeError> {
    if curve.len() < MIN_HULL_POINTS {
        return Err(RegularizeError::degenerate(
            "convex hull",
            MIN_HULL_POINTS,
            curve.len(),
        ));
    }
    if curve.iter().any(|p| !p.is_finite()) {
        return Err(RegularizeError::instability("non-finite coordinate"));
    }

    let mut points: Vec<Point> = curve.points().to_vec();
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points.dedup();

    if points.len() < MIN_HULL_POINTS {
        return Err(RegularizeError::instability(format!(
            "only {} distinct points",
            points.len()
        )));
    }

    let mut lower: Vec<Point> = Vec::with_capacity(points.len());
    for p in &points {
        while lower.len() >= 2 && !is_left_turn(&lower[lower.len() - 2], &lower[lower.len() - 1], p) {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(points.len());
    for p in points.iter().rev() {
        while upper.len() >= 2 && !is_left_turn(&upper[upper.len() - 2], &upper[upper.len() - 1], p) {
            upper.pop();
        }
        upper.push(*p);
    }

    // Each chain ends where the other begins.
    lower.pop();
    upper.pop();
    lower.extend(upper);

    if lower.len() < MIN_HULL_POINTS {
        return Err(RegularizeError::instability("all points collinear"));
    }

    Ok(Curve::new(lower))
}

/// Signed area of a closed polygon; positive for counter-clockwise order.
pub fn signed_area(vertices: &Curve) -> f64 {
    let pts = vertices.points();
    if pts.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..pts.len() {
        let a = pts[i];
        let b = pts[(i + 1) % pts.len()];
        area += a.x * b.y - b.x * a.y;
    }
    area / 2.0
}
