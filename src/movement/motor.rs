//! Movement domain: per-tick player orchestration and the jump state machine.

use bevy::prelude::*;

use crate::abilities::{AbilityContext, AbilityLoadout};
use crate::config::MotorTuning;
use crate::geometry::Geometry;
use crate::movement::{CollisionFlags, Facing, InputSnapshot, KinematicBody};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpPhase {
    #[default]
    Wait,
    Ascend,
    Descend,
}

/// Drives one player's body from input.
#[derive(Component, Debug, Clone)]
pub struct PlayerMotor {
    tuning: MotorTuning,
    jump: JumpPhase,
    jump_time: f32,
    facing: Facing,
}

impl PlayerMotor {
    pub fn new(tuning: MotorTuning) -> Self {
        Self {
            tuning,
            jump: JumpPhase::Wait,
            jump_time: 0.0,
            facing: Facing::Right,
        }
    }

    pub fn jump_phase(&self) -> JumpPhase {
        self.jump
    }

    /// Seconds spent ascending in the current jump.
    pub fn jump_time(&self) -> f32 {
        self.jump_time
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Drop any jump in progress. Used on respawn.
    pub fn reset(&mut self) {
        self.jump = JumpPhase::Wait;
        self.jump_time = 0.0;
    }

    /// Run one simulation tick.
    ///
    /// Order matters: later steps read velocity and flags written by earlier
    /// ones. Jump, horizontal control, gravity, the active ability, then the
    /// body sweep. Every ability's ground check sees the fresh flags.
    pub fn tick(
        &mut self,
        body: &mut KinematicBody,
        loadout: &mut AbilityLoadout,
        input: &InputSnapshot,
        geometry: &dyn Geometry,
        dt: f32,
    ) -> CollisionFlags {
        self.update_jump(body, input, dt);
        self.update_horizontal(body, input, dt);
        body.apply_gravity(self.tuning.gravity, dt);

        loadout.activate(&mut AbilityContext {
            body: &mut *body,
            input,
            geometry,
            dt,
        });

        let flags = body.move_and_collide(geometry, dt);
        loadout.ground_check(body, dt);
        self.update_facing(input);

        flags
    }

    fn update_jump(&mut self, body: &mut KinematicBody, input: &InputSnapshot, dt: f32) {
        match self.jump {
            JumpPhase::Wait => {
                if input.jump_pressed && body.flags().grounded {
                    self.jump_time = 0.0;
                    body.set_vertical_velocity(self.tuning.initial_jump_velocity);
                    self.jump = JumpPhase::Ascend;
                    debug!("Jump: takeoff at {:?}", body.position);
                }
            }
            JumpPhase::Ascend => {
                if self.jump_time < self.tuning.max_jump_time && input.jump_held {
                    self.jump_time = (self.jump_time + dt).min(self.tuning.max_jump_time);
                    let remaining = self.tuning.max_jump_time - self.jump_time;
                    body.add_vertical_force(self.tuning.jump_force * remaining, dt);
                } else {
                    self.jump = JumpPhase::Descend;
                    debug!("Jump: descending after {:.3}s", self.jump_time);
                }
            }
            JumpPhase::Descend => {
                if body.flags().grounded {
                    self.jump = JumpPhase::Wait;
                }
            }
        }
    }

    fn update_horizontal(&mut self, body: &mut KinematicBody, input: &InputSnapshot, dt: f32) {
        if input.horizontal != 0.0 {
            let smoothing = if body.flags().grounded {
                self.tuning.ground_damping
            } else {
                self.tuning.air_damping
            };
            let target = input.horizontal * self.tuning.max_speed;
            let t = (dt * smoothing).clamp(0.0, 1.0);
            let vx = body.velocity.x;
            body.set_horizontal_velocity(vx + (target - vx) * t);
        } else {
            body.decelerate_horizontal(self.tuning.deceleration, dt);
        }
    }

    fn update_facing(&mut self, input: &InputSnapshot) {
        if input.horizontal < 0.0 {
            self.facing = Facing::Left;
        } else if input.horizontal > 0.0 {
            self.facing = Facing::Right;
        }
    }
}
