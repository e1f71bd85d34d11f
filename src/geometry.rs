//! Small vector helpers shared by movement, targeting and explosions.

pub type Point = (f32, f32);

/// Straight-line distance between two points.
pub fn distance(a: Point, b: Point) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

/// Unit vector pointing from `from` to `to`.
///
/// Returns `None` when the points coincide, so callers skip the move or shot
/// instead of propagating NaN.
pub fn unit_toward(from: Point, to: Point) -> Option<Point> {
    let len = distance(from, to);
    if len <= f32::EPSILON {
        return None;
    }
    Some(((to.0 - from.0) / len, (to.1 - from.1) / len))
}

/// Unit vector for an angle in radians.
pub fn unit_from_angle(angle: f32) -> Point {
    (angle.cos(), angle.sin())
}

/// True when two circles overlap (strictly closer than the sum of radii).
pub fn circles_overlap(a: Point, ra: f32, b: Point, rb: f32) -> bool {
    distance(a, b) < ra + rb
}
