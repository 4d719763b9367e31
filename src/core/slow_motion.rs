//! Core domain: player-triggered slow motion on a rechargeable budget.

use bevy::prelude::*;

use crate::config::{MovementTuning, SlowMotionTuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlowState {
    #[default]
    Ready,
    Active,
    Charge,
}

/// Slow motion drains while active and refills at the same rate afterwards.
/// It can only be triggered again once fully recharged.
#[derive(Resource, Debug, Clone)]
pub struct SlowMotion {
    tuning: SlowMotionTuning,
    state: SlowState,
    remaining: f32,
}

impl SlowMotion {
    pub fn new(tuning: SlowMotionTuning) -> Self {
        Self {
            remaining: tuning.budget,
            tuning,
            state: SlowState::Ready,
        }
    }

    pub fn state(&self) -> SlowState {
        self.state
    }

    /// Seconds of slow motion left in the budget. Dips below zero when the
    /// budget runs out mid-tick.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn charge_fraction(&self) -> f32 {
        (self.remaining / self.tuning.budget).clamp(0.0, 1.0)
    }

    /// Advance by `dt` seconds of game time. Returns the clock speed to switch
    /// to when it changes.
    pub fn tick(&mut self, pressed: bool, released: bool, dt: f32) -> Option<f32> {
        match self.state {
            SlowState::Ready => {
                if pressed {
                    self.state = SlowState::Active;
                    return Some(self.tuning.factor);
                }
            }
            SlowState::Active => {
                self.remaining -= dt;
                if released || self.remaining < 0.0 {
                    self.state = SlowState::Charge;
                    return Some(1.0);
                }
            }
            SlowState::Charge => {
                self.remaining += dt;
                if self.remaining > self.tuning.budget {
                    self.remaining = self.tuning.budget;
                    self.state = SlowState::Ready;
                }
            }
        }
        None
    }
}

impl FromWorld for SlowMotion {
    fn from_world(world: &mut World) -> Self {
        let tuning = world
            .get_resource::<MovementTuning>()
            .map(|tuning| tuning.slow_motion.clone())
            .unwrap_or_default();
        Self::new(tuning)
    }
}

/// Right mouse button or left shift. Returns `(pressed, released)` edges.
pub(crate) fn slow_motion_edges(
    keyboard: &ButtonInput<KeyCode>,
    mouse: &ButtonInput<MouseButton>,
) -> (bool, bool) {
    let pressed = mouse.just_pressed(MouseButton::Right) || keyboard.just_pressed(KeyCode::ShiftLeft);
    let released =
        mouse.just_released(MouseButton::Right) || keyboard.just_released(KeyCode::ShiftLeft);
    (pressed, released)
}

pub(crate) fn update_slow_motion(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut slow_motion: ResMut<SlowMotion>,
    mut time: ResMut<Time<Virtual>>,
) {
    let (pressed, released) = slow_motion_edges(&keyboard, &mouse);

    if let Some(speed) = slow_motion.tick(pressed, released, time.delta_secs()) {
        time.set_relative_speed(speed);
        debug!(
            "Slow motion: {:?}, clock speed {}",
            slow_motion.state(),
            speed
        );
    }
}
