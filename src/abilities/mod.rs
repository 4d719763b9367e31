//! Abilities domain: the swappable player ability slot and its variants.
//!
//! Every variant exposes the same five operations:
//! - `enter` / `exit` when the slot becomes active or inactive
//! - `activate` once per tick while active
//! - `ground_check` once per tick for every ability, active or not
//! - `death_reset` when the player respawns

mod cloud;
mod dash;
mod grapple;
mod loadout;

pub use cloud::{CloudState, HazardCloud};
pub use dash::{Dash, DashState};
pub use grapple::{Grapple, GrappleState, Pivot, PivotStack, WrapState, swing_vector};
pub use loadout::AbilityLoadout;

use crate::geometry::Geometry;
use crate::movement::{InputSnapshot, KinematicBody};

/// Timers within this distance of zero count as expired, absorbing the drift
/// of repeatedly subtracting a fixed tick length.
const TIMER_EPSILON: f32 = 1e-4;

/// Count `timer` down by `dt`. Returns true once it has run out.
pub(crate) fn tick_down(timer: &mut f32, dt: f32) -> bool {
    *timer -= dt;
    *timer <= TIMER_EPSILON
}

/// Everything an ability may read or write during its tick.
pub struct AbilityContext<'a> {
    pub body: &'a mut KinematicBody,
    pub input: &'a InputSnapshot,
    pub geometry: &'a dyn Geometry,
    pub dt: f32,
}

#[derive(Debug, Clone, Default)]
pub enum Ability {
    /// Neutral slot. Every operation is a no-op.
    #[default]
    Empty,
    Dash(Dash),
    Grapple(Grapple),
    Cloud(HazardCloud),
}

impl Ability {
    pub fn enter(&mut self) {
        match self {
            Ability::Empty => {}
            Ability::Dash(dash) => dash.enter(),
            Ability::Grapple(grapple) => grapple.enter(),
            Ability::Cloud(cloud) => cloud.enter(),
        }
    }

    pub fn exit(&mut self) {
        match self {
            Ability::Empty => {}
            Ability::Dash(dash) => dash.exit(),
            Ability::Grapple(grapple) => grapple.exit(),
            Ability::Cloud(cloud) => cloud.exit(),
        }
    }

    pub fn activate(&mut self, ctx: &mut AbilityContext) {
        match self {
            Ability::Empty => {}
            Ability::Dash(dash) => dash.activate(ctx),
            Ability::Grapple(grapple) => grapple.activate(ctx),
            Ability::Cloud(cloud) => cloud.activate(ctx),
        }
    }

    pub fn ground_check(&mut self, body: &KinematicBody, dt: f32) {
        match self {
            Ability::Empty | Ability::Grapple(_) => {}
            Ability::Dash(dash) => dash.ground_check(body),
            Ability::Cloud(cloud) => cloud.ground_check(body, dt),
        }
    }

    pub fn death_reset(&mut self) {
        match self {
            Ability::Empty | Ability::Dash(_) => {}
            Ability::Grapple(grapple) => grapple.death_reset(),
            Ability::Cloud(cloud) => cloud.death_reset(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Empty => "empty",
            Ability::Dash(_) => "dash",
            Ability::Grapple(_) => "grapple",
            Ability::Cloud(_) => "cloud",
        }
    }

    /// Remaining cooldown as a fraction of the full cooldown, for HUD gauges.
    pub fn cooldown_fraction(&self) -> f32 {
        match self {
            Ability::Empty => 0.0,
            Ability::Dash(dash) => dash.cooldown_fraction(),
            Ability::Grapple(grapple) => grapple.cooldown_fraction(),
            Ability::Cloud(cloud) => cloud.cooldown_fraction(),
        }
    }
}
