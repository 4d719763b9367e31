//! Short burst of speed toward the pointer.

use bevy::prelude::*;

use super::{AbilityContext, tick_down};
use crate::config::DashTuning;
use crate::movement::KinematicBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashState {
    #[default]
    Ready,
    Dashing,
    Cooldown,
}

#[derive(Debug, Clone)]
pub struct Dash {
    tuning: DashTuning,
    state: DashState,
    timer: f32,
    direction: Vec2,
    carried_horizontal: f32,
    /// Set by touching the ground, spent by dashing.
    ground_reset: bool,
}

impl Dash {
    pub fn new(tuning: DashTuning) -> Self {
        Self {
            timer: tuning.length,
            tuning,
            state: DashState::Ready,
            direction: Vec2::ZERO,
            carried_horizontal: 0.0,
            ground_reset: false,
        }
    }

    pub fn state(&self) -> DashState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.ground_reset
    }

    pub fn cooldown_fraction(&self) -> f32 {
        match self.state {
            DashState::Cooldown => (self.timer / self.tuning.cooldown).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    pub fn enter(&mut self) {
        self.state = DashState::Ready;
        self.timer = self.tuning.length;
        self.direction = Vec2::ZERO;
    }

    pub fn exit(&mut self) {
        self.state = DashState::Ready;
        self.timer = self.tuning.length;
    }

    pub fn activate(&mut self, ctx: &mut AbilityContext) {
        let body = &mut *ctx.body;

        match self.state {
            DashState::Ready => {
                if self.ground_reset && ctx.input.ability_pressed {
                    if body.velocity.y < 0.0 {
                        body.set_vertical_velocity(0.0);
                    }
                    self.carried_horizontal = body.velocity.x;
                    self.direction = ctx.input.aim;
                    self.timer = self.tuning.length;
                    self.ground_reset = false;
                    self.state = DashState::Dashing;
                    debug!("Dash: start toward {:?}", self.direction);
                }
            }
            DashState::Dashing => {
                let dash = self.direction * self.tuning.speed;
                body.set_vertical_velocity(dash.y);
                body.set_horizontal_velocity(dash.x + self.carried_horizontal);

                if tick_down(&mut self.timer, ctx.dt) {
                    self.timer = self.tuning.cooldown;
                    self.state = DashState::Cooldown;
                    debug!("Dash: cooldown");
                }
            }
            DashState::Cooldown => {
                if tick_down(&mut self.timer, ctx.dt) {
                    self.timer = self.tuning.length;
                    self.state = DashState::Ready;
                }
            }
        }
    }

    pub fn ground_check(&mut self, body: &KinematicBody) {
        if body.flags().grounded {
            self.ground_reset = true;
        }
    }
}
