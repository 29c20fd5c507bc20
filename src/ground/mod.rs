//! Terrain height queries used to seat generated objects on the ground.
//!
//! The mesh builders never own terrain. They ask a [`GroundQuery`] for the
//! height under a horizontal position (in the recentered frame) and fall
//! back to their own computed height when the query misses.

use glam::{Vec2, Vec3};

use crate::geometry::lift;

/// Height of the ground under a horizontal `(x, z)` position
pub trait GroundQuery {
    /// Returns None when there is no surface under `at`
    fn ground_height(&self, at: Vec2) -> Option<f32>;
}

/// Terrain that never answers; objects keep their computed height
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGround;

impl GroundQuery for NoGround {
    fn ground_height(&self, _at: Vec2) -> Option<f32> {
        None
    }
}

/// Infinite horizontal plane at a fixed height
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatGround {
    pub height: f32,
}

impl GroundQuery for FlatGround {
    fn ground_height(&self, _at: Vec2) -> Option<f32> {
        Some(self.height)
    }
}

impl<F> GroundQuery for F
where
    F: Fn(Vec2) -> Option<f32>,
{
    fn ground_height(&self, at: Vec2) -> Option<f32> {
        self(at)
    }
}

/// Ground height under `at` plus a caller-chosen vertical bias
pub fn place(ground: &dyn GroundQuery, at: Vec2, bias: f32) -> Option<f32> {
    ground.ground_height(at).map(|h| h + bias)
}

/// Seat a local origin on the ground, or at height 0 when the query misses
pub fn place_origin(ground: &dyn GroundQuery, origin: Vec2, bias: f32) -> Vec3 {
    lift(origin, place(ground, origin, bias).unwrap_or(0.0))
}
