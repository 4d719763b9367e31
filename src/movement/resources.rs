//! Movement domain: per-tick input resource.

use bevy::prelude::*;

/// Input for one simulation tick.
///
/// Edge flags (`*_pressed`) are latched by the frame-rate input system and
/// cleared by [`InputSnapshot::consume_edges`] once a fixed tick has seen them,
/// so a press landing between two fixed ticks is never lost.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub ability_pressed: bool,
    pub jump_pressed: bool,
    pub jump_held: bool,
    /// -1, 0 or 1.
    pub horizontal: f32,
    /// Unit vector from the player toward the pointer, zero if undefined.
    pub aim: Vec2,
    /// Pointer position in world space.
    pub pointer: Vec2,
}

impl InputSnapshot {
    /// Recompute `aim` for a player standing at `position`.
    pub fn aimed_from(mut self, position: Vec2) -> Self {
        self.aim = (self.pointer - position).normalize_or_zero();
        self
    }

    pub fn consume_edges(&mut self) {
        self.ability_pressed = false;
        self.jump_pressed = false;
    }
}
