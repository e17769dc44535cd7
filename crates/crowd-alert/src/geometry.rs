//! Barycentric point-in-triangle test for the cone query.

use crowd_core::Vec2;

/// Denominator magnitudes below this mark a degenerate (zero-area) cone.
const DEGENERATE_DENOM: f32 = 1e-9;

/// `true` if `point` lies inside the triangle `(apex, left, right)`.
///
/// Boundary handling is asymmetric and load-bearing: the two apex edges are
/// inclusive (`u >= 0`, `v >= 0`) while the far edge between `left` and
/// `right` is exclusive (`u + v < 1`).  Degenerate triangles (collinear or
/// coincident corners) contain nothing.
pub fn in_cone(point: Vec2, apex: Vec2, left: Vec2, right: Vec2) -> bool {
    let v0 = right - apex;
    let v1 = left - apex;
    let v2 = point - apex;

    let dot00 = v0.dot(v0);
    let dot01 = v0.dot(v1);
    let dot02 = v0.dot(v2);
    let dot11 = v1.dot(v1);
    let dot12 = v1.dot(v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom.abs() <= DEGENERATE_DENOM {
        return false;
    }

    let inv_denom = 1.0 / denom;
    let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
    let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

    u >= 0.0 && v >= 0.0 && u + v < 1.0
}
