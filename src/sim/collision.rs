//! Reflection response on the integer grid
//!
//! The ball velocity lives on the integer grid, but the reflection is worked
//! out in reals and only truncated back at the end.

use glam::{DVec2, IVec2};

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: DVec2, normal: DVec2) -> DVec2 {
    let n_factor = -2.0 * velocity.dot(normal);
    velocity + n_factor * normal
}

/// Truncate each component toward zero (integer cast semantics, not rounding)
#[inline]
pub fn truncate_toward_zero(v: DVec2) -> IVec2 {
    IVec2::new(v.x as i32, v.y as i32)
}

/// Reflect a grid velocity and truncate the result back onto the grid.
///
/// A zero normal leaves the velocity exactly as it was.
pub fn reflect_velocity(velocity: IVec2, normal: DVec2) -> IVec2 {
    truncate_toward_zero(reflect(velocity.as_dvec2(), normal))
}
