//! Deployable hazard cloud that expires on its own.
//!
//! Placement happens while the cloud is the active ability. Once deployed, its
//! lifetime and cooldown keep running from `ground_check`, so switching to
//! another ability does not freeze it.

use bevy::prelude::*;

use super::{AbilityContext, tick_down};
use crate::config::CloudTuning;
use crate::movement::KinematicBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloudState {
    #[default]
    Ready,
    Active,
    Cooldown,
}

#[derive(Debug, Clone)]
pub struct HazardCloud {
    tuning: CloudTuning,
    state: CloudState,
    timer: f32,
    position: Vec2,
    preview_visible: bool,
    ground_reset: bool,
}

impl HazardCloud {
    pub fn new(tuning: CloudTuning) -> Self {
        Self {
            timer: tuning.lifetime,
            tuning,
            state: CloudState::Ready,
            position: Vec2::ZERO,
            preview_visible: false,
            ground_reset: false,
        }
    }

    pub fn state(&self) -> CloudState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn preview_visible(&self) -> bool {
        self.preview_visible
    }

    /// Whether the player has touched the ground since this cloud was created.
    pub fn ground_touched(&self) -> bool {
        self.ground_reset
    }

    /// Area covered by the deployed cloud.
    pub fn deployed_region(&self) -> Option<Rect> {
        (self.state == CloudState::Active).then(|| {
            Rect::from_center_size(
                self.position,
                Vec2::new(self.tuning.width, self.tuning.height),
            )
        })
    }

    /// Fades from 1 to 0 over the cloud's lifetime.
    pub fn opacity(&self) -> f32 {
        match self.state {
            CloudState::Active => (self.timer / self.tuning.lifetime).clamp(0.0, 1.0),
            CloudState::Ready => 0.5,
            CloudState::Cooldown => 0.0,
        }
    }

    pub fn cooldown_fraction(&self) -> f32 {
        match self.state {
            CloudState::Cooldown => (self.timer / self.tuning.cooldown).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    pub fn enter(&mut self) {}

    /// A deployed cloud stays out; only the placement preview is hidden.
    pub fn exit(&mut self) {
        if self.state == CloudState::Ready {
            self.preview_visible = false;
        }
    }

    pub fn activate(&mut self, ctx: &mut AbilityContext) {
        if self.state != CloudState::Ready {
            return;
        }

        self.position = ctx.input.pointer;
        self.preview_visible = true;

        if ctx.input.ability_pressed {
            self.timer = self.tuning.lifetime;
            self.state = CloudState::Active;
            debug!("Cloud: deployed at {:?}", self.position);
        }
    }

    pub fn ground_check(&mut self, body: &KinematicBody, dt: f32) {
        if body.flags().grounded {
            self.ground_reset = true;
        }

        match self.state {
            CloudState::Ready => {}
            CloudState::Active => {
                if tick_down(&mut self.timer, dt) {
                    self.timer = self.tuning.cooldown;
                    self.state = CloudState::Cooldown;
                    self.preview_visible = false;
                    debug!("Cloud: expired");
                }
            }
            CloudState::Cooldown => {
                if tick_down(&mut self.timer, dt) {
                    self.timer = self.tuning.lifetime;
                    self.state = CloudState::Ready;
                }
            }
        }
    }

    pub fn death_reset(&mut self) {
        self.preview_visible = false;
        self.timer = self.tuning.lifetime;
        self.state = CloudState::Ready;
    }
}
