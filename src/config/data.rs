//! Tuning definitions mirrored by `assets/config/tuning.ron`.
//!
//! Every struct is `#[serde(default)]`, so a config file only needs to list
//! the values it overrides.

use bevy::prelude::*;
use serde::Deserialize;

/// All tuning for the player controller, abilities, and time control.
#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub body: BodyTuning,
    pub motor: MotorTuning,
    pub grapple: GrappleTuning,
    pub dash: DashTuning,
    pub cloud: CloudTuning,
    pub slow_motion: SlowMotionTuning,
    pub simulation: SimulationTuning,
}

/// Collision box and ray layout for the kinematic body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BodyTuning {
    pub width: f32,
    pub height: f32,
    /// Rays cast from the leading vertical edge. Must be at least 2.
    pub horizontal_rays: u32,
    /// Rays cast from the leading horizontal edge. Must be at least 2.
    pub vertical_rays: u32,
    /// Total inset removed from the ray fan so edge rays do not catch corners.
    pub ray_inset: f32,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            horizontal_rays: 5,
            vertical_rays: 5,
            ray_inset: 0.1,
        }
    }
}

impl BodyTuning {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotorTuning {
    /// Vertical acceleration, negative is down.
    pub gravity: f32,
    pub max_speed: f32,
    /// Lerp rate toward target speed while grounded.
    pub ground_damping: f32,
    /// Lerp rate toward target speed while airborne.
    pub air_damping: f32,
    /// Horizontal slowdown per second with no input.
    pub deceleration: f32,
    /// Vertical velocity set on takeoff.
    pub initial_jump_velocity: f32,
    /// Scale of the held-jump boost, multiplied by the remaining ascend time.
    pub jump_force: f32,
    pub max_jump_time: f32,
}

impl Default for MotorTuning {
    fn default() -> Self {
        Self {
            gravity: -20.0,
            max_speed: 8.0,
            ground_damping: 20.0,
            air_damping: 6.0,
            deceleration: 40.0,
            initial_jump_velocity: 5.0,
            jump_force: 400.0,
            max_jump_time: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GrappleTuning {
    pub max_distance: f32,
    pub swing_speed: f32,
    pub throw_time: f32,
    pub cooldown: f32,
    /// Line-cast hits closer than this to the current pivot are the pivot itself.
    pub pivot_tolerance: f32,
}

impl Default for GrappleTuning {
    fn default() -> Self {
        Self {
            max_distance: 10.0,
            swing_speed: 20.0,
            throw_time: 0.2,
            cooldown: 0.2,
            pivot_tolerance: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashTuning {
    pub speed: f32,
    pub length: f32,
    pub cooldown: f32,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            speed: 10.0,
            length: 0.2,
            cooldown: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CloudTuning {
    pub lifetime: f32,
    pub cooldown: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for CloudTuning {
    fn default() -> Self {
        Self {
            lifetime: 3.0,
            cooldown: 1.0,
            width: 3.0,
            height: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SlowMotionTuning {
    /// Virtual clock speed while slowed.
    pub factor: f32,
    /// Seconds of slow motion available from a full charge.
    pub budget: f32,
}

impl Default for SlowMotionTuning {
    fn default() -> Self {
        Self {
            factor: 0.4,
            budget: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationTuning {
    /// Fixed ticks per second.
    pub tick_rate: f64,
}

impl Default for SimulationTuning {
    fn default() -> Self {
        Self { tick_rate: 50.0 }
    }
}
