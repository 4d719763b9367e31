//! Swing direction with radial drift correction.

use bevy::prelude::*;

/// Direction of travel for a player swinging around `pivot` at `radius`.
///
/// The tangent alone would let the rope stretch a little every tick under
/// discrete integration. Instead the tangent step is projected back onto the
/// circle of `radius` around `pivot`, and the result points from the player to
/// that corrected point. Its length is roughly one unit; callers scale it by
/// the swing speed.
///
/// `swing_dir` is +1 to move right when hanging below the pivot, -1 for left.
pub fn swing_vector(player: Vec2, pivot: Vec2, radius: f32, swing_dir: f32) -> Vec2 {
    let tangent = ((pivot - player).perp() * -swing_dir).normalize_or_zero();
    let stepped = player + tangent;
    let corrected = pivot + (stepped - pivot).normalize_or_zero() * radius;
    corrected - player
}
