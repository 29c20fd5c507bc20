//! Offset and intersection routines shared by every mesh builder.
//!
//! All functions work in the horizontal plane. For 3D points that plane is
//! `(x, z)`; the vertical `y` coordinate is averaged, never offset.

use glam::{Vec2, Vec3};

/// Determinant magnitude below which two lines are treated as parallel
pub const PARALLEL_EPSILON: f32 = 1.0;

/// Offset `p1` perpendicular to the direction `p1 -> p2` by `length`
///
/// Positive lengths offset to the left of the direction (counter-clockwise
/// rotation), negative lengths to the right. A zero-length direction yields
/// `p1` unchanged.
pub fn perpendicular_2d(p1: Vec2, p2: Vec2, length: f32) -> Vec2 {
    let v = p2 - p1;
    let p = Vec2::new(-v.y, v.x).normalize_or_zero() * length;
    p1 + p
}

/// 3D form of [`perpendicular_2d`]: offsets in `(x, z)`, averages `y`
pub fn perpendicular(p1: Vec3, p2: Vec3, length: f32) -> Vec3 {
    let v = perpendicular_2d(horizontal(p1), horizontal(p2), length);
    Vec3::new(v.x, (p1.y + p2.y) / 2.0, v.y)
}

/// Intersection of the infinite lines through `(a1, a2)` and `(b1, b2)`
///
/// Near-parallel lines (|det| < [`PARALLEL_EPSILON`]) fall back to the
/// midpoint of `a2` and `b2`.
pub fn intersect_2d(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Vec2 {
    let da = a2 - a1;
    let db = b2 - b1;
    let d = db.x * da.y - db.y * da.x;
    if d.abs() < PARALLEL_EPSILON {
        return a2 * 0.5 + b2 * 0.5;
    }
    let m = ((a1.x - b1.x) * da.y - (a1.y - b1.y) * da.x) / d;
    b1 + db * m
}

/// 3D form of [`intersect_2d`]: intersects in `(x, z)`, `y` is the mean of all four inputs
pub fn intersect(a1: Vec3, a2: Vec3, b1: Vec3, b2: Vec3) -> Vec3 {
    let v = intersect_2d(horizontal(a1), horizontal(a2), horizontal(b1), horizontal(b2));
    Vec3::new(v.x, (a1.y + a2.y + b1.y + b2.y) / 4.0, v.y)
}

/// Project a 3D point onto the horizontal plane
pub fn horizontal(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.z)
}

/// Lift a planar point to 3D at the given height
pub fn lift(p: Vec2, height: f32) -> Vec3 {
    Vec3::new(p.x, height, p.y)
}
