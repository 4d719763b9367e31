//! Rope swing that wraps around level corners.
//!
//! Outer lifecycle: `Ready -> Firing -> Connected -> Cooldown -> Ready`. A
//! failed throw (miss, hazard surface, or grounded when the rope lands) goes
//! straight back to `Ready` through the same reset as cooldown expiry.
//!
//! While connected, a second machine decides how the rope behaves:
//! - `Wrap`: swing around the current pivot and pick up new corners
//! - `UnWrap`: swing around the current pivot and drop corners swung back past
//! - `Float`: the player is above the pivot; only the horizontal reach is limited

mod pivot;
mod swing;
#[cfg(test)]
mod tests;

pub use pivot::{Pivot, PivotStack};
pub use swing::swing_vector;

use avian2d::prelude::*;
use bevy::prelude::*;

use super::{AbilityContext, tick_down};
use crate::config::GrappleTuning;
use crate::geometry::Geometry;
use crate::movement::KinematicBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrappleState {
    #[default]
    Ready,
    Firing,
    Connected,
    Cooldown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapState {
    #[default]
    Wrap,
    UnWrap,
    Float,
}

#[derive(Debug, Clone)]
pub struct Grapple {
    tuning: GrappleTuning,
    mask: LayerMask,
    state: GrappleState,
    wrap: WrapState,
    pivots: PivotStack,
    anchor: Vec2,
    /// +1 swings right under the pivot, -1 left.
    swing_dir: f32,
    /// Throw countdown while firing, cooldown countdown afterwards.
    timer: f32,
    success: bool,
    /// The first float exit of a swing that started above its anchor re-enters `Wrap`.
    special_float_exit: bool,
    tip: Option<Vec2>,
    tip_velocity: Vec2,
    preview: Option<Vec2>,
    indicator_visible: bool,
}

impl Grapple {
    /// `mask` selects the geometry the rope can attach to and wrap around.
    pub fn new(tuning: GrappleTuning, mask: impl Into<LayerMask>) -> Self {
        Self {
            timer: tuning.throw_time,
            tuning,
            mask: mask.into(),
            state: GrappleState::Ready,
            wrap: WrapState::Wrap,
            pivots: PivotStack::new(),
            anchor: Vec2::ZERO,
            swing_dir: 1.0,
            success: false,
            special_float_exit: false,
            tip: None,
            tip_velocity: Vec2::ZERO,
            preview: None,
            indicator_visible: false,
        }
    }

    // Read-only queries for rendering and tests.

    pub fn state(&self) -> GrappleState {
        self.state
    }

    /// Only meaningful while [`GrappleState::Connected`].
    pub fn wrap_state(&self) -> WrapState {
        self.wrap
    }

    pub fn pivots(&self) -> &PivotStack {
        &self.pivots
    }

    pub fn current_pivot(&self) -> Option<Pivot> {
        self.pivots.current().copied()
    }

    /// Where the last throw was aimed, whether or not it attached.
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn swing_dir(&self) -> f32 {
        self.swing_dir
    }

    pub fn last_throw_succeeded(&self) -> bool {
        self.success
    }

    /// Rope polyline from the anchor through every wrap point to `player`.
    pub fn rope_points(&self, player: Vec2) -> Vec<Vec2> {
        self.pivots.rope_points(player)
    }

    /// Flying rope end while firing, the anchor while connected.
    pub fn rope_tip(&self) -> Option<Vec2> {
        self.tip
    }

    /// Surface under the aim ray while ready.
    pub fn aim_preview(&self) -> Option<Vec2> {
        self.preview
    }

    pub fn indicator_visible(&self) -> bool {
        self.indicator_visible
    }

    pub fn cooldown_fraction(&self) -> f32 {
        match self.state {
            GrappleState::Cooldown => (self.timer / self.tuning.cooldown).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    // Ability contract.

    pub fn enter(&mut self) {
        self.reset();
        self.success = false;
    }

    pub fn exit(&mut self) {
        self.pivots.clear();
        self.tip = None;
        self.preview = None;
        self.state = GrappleState::Ready;
        self.indicator_visible = false;
    }

    pub fn death_reset(&mut self) {
        self.reset();
    }

    pub fn activate(&mut self, ctx: &mut AbilityContext) {
        match self.state {
            GrappleState::Ready => self.ready(ctx),
            GrappleState::Firing => self.firing(ctx),
            GrappleState::Connected => self.connected(ctx),
            GrappleState::Cooldown => {
                if tick_down(&mut self.timer, ctx.dt) {
                    self.reset();
                }
            }
        }
    }

    fn ready(&mut self, ctx: &mut AbilityContext) {
        let origin = ctx.body.position;
        let aim = ctx.input.aim.normalize_or_zero();
        let hit = Dir2::new(aim)
            .ok()
            .and_then(|dir| {
                ctx.geometry
                    .cast_ray(origin, dir, self.tuning.max_distance, self.mask)
            });
        self.preview = hit.map(|h| h.point);

        if !ctx.input.ability_pressed {
            return;
        }

        self.indicator_visible = false;
        let reach;
        match hit {
            Some(hit) => {
                self.anchor = hit.point;
                self.success = !hit.hazard;
                reach = hit.distance;
                if hit.hazard {
                    debug!("Grapple: rejected hazard surface at {:?}", hit.point);
                }
            }
            None => {
                self.anchor = origin + aim * self.tuning.max_distance;
                self.success = false;
                reach = self.tuning.max_distance;
            }
        }

        self.swing_dir = if self.anchor.x >= origin.x { 1.0 } else { -1.0 };
        self.tip = Some(origin);
        self.tip_velocity = (self.anchor - origin).normalize_or_zero() * reach / self.tuning.throw_time;
        self.timer = self.tuning.throw_time;
        self.state = GrappleState::Firing;
        debug!(
            "Grapple: firing at {:?}, success={}",
            self.anchor, self.success
        );
    }

    fn firing(&mut self, ctx: &mut AbilityContext) {
        let landed = tick_down(&mut self.timer, ctx.dt);
        if let Some(tip) = self.tip.as_mut() {
            *tip += self.tip_velocity * ctx.dt;
        }
        if !landed {
            return;
        }

        if ctx.body.flags().grounded {
            self.success = false;
        }
        if !self.success {
            debug!("Grapple: throw failed");
            self.reset();
            return;
        }

        let player = ctx.body.position;
        if self.anchor.y >= player.y {
            self.wrap = WrapState::Wrap;
            self.special_float_exit = false;
        } else {
            // Anchored below the player: float until we drop under it, then
            // wrap in the direction that swings back toward the anchor.
            self.wrap = WrapState::Float;
            self.special_float_exit = true;
            self.swing_dir = -self.swing_dir;
        }

        self.pivots.clear();
        self.pivots.push(self.anchor, player.distance(self.anchor));
        self.tip = Some(self.anchor);
        self.timer = self.tuning.cooldown;
        self.state = GrappleState::Connected;
        debug!("Grapple: connected at {:?}, wrap={:?}", self.anchor, self.wrap);
    }

    fn connected(&mut self, ctx: &mut AbilityContext) {
        match self.wrap {
            WrapState::Wrap => self.wrap_tick(ctx.body, ctx.geometry),
            WrapState::UnWrap => self.unwrap_tick(ctx.body),
            WrapState::Float => self.float_tick(ctx.body, ctx.dt),
        }

        if self.state != GrappleState::Connected {
            return;
        }

        let flags = ctx.body.flags();
        if flags.grounded
            || flags.side
            || flags.ceiling
            || ctx.input.jump_pressed
            || ctx.input.ability_pressed
        {
            self.release();
        }
    }

    fn wrap_tick(&mut self, body: &mut KinematicBody, geometry: &dyn Geometry) {
        let Some(current) = self.pivots.current().copied() else {
            return;
        };
        let player = body.position;
        self.apply_swing(body, current);

        if let Some(hit) = geometry.linecast(player, current.point, self.mask)
            && hit.point.distance(current.point) > self.tuning.pivot_tolerance
        {
            let radius = player.distance(hit.point);
            self.pivots.push(hit.point, radius);
            debug!(
                "Grapple: wrapped corner at {:?} ({} pivots)",
                hit.point,
                self.pivots.len()
            );
        }

        if let Some(current) = self.pivots.current()
            && player.y > current.point.y
        {
            self.wrap = WrapState::Float;
        }
    }

    fn unwrap_tick(&mut self, body: &mut KinematicBody) {
        let Some(current) = self.pivots.current().copied() else {
            return;
        };
        let player = body.position;
        self.apply_swing(body, current);

        if let Some(previous) = self.pivots.previous().copied() {
            let pivot_dir = (current.point - previous.point).normalize_or_zero();
            let player_dir = (player - current.point).normalize_or_zero();
            let cross = pivot_dir.perp_dot(player_dir);

            if (cross > 0.0 && self.swing_dir > 0.0) || (cross < 0.0 && self.swing_dir < 0.0) {
                self.pivots.pop_wrap();
                debug!(
                    "Grapple: unwrapped corner at {:?} ({} pivots)",
                    current.point,
                    self.pivots.len()
                );
            }
        }

        if let Some(anchor) = self.pivots.anchor() {
            let passed = if self.swing_dir < 0.0 {
                player.x < anchor.point.x
            } else {
                player.x > anchor.point.x
            };
            if passed {
                self.wrap = WrapState::Wrap;
            }
        }
    }

    fn float_tick(&mut self, body: &mut KinematicBody, dt: f32) {
        let (Some(current), Some(anchor)) =
            (self.pivots.current().copied(), self.pivots.anchor().copied())
        else {
            return;
        };
        let player = body.position;

        let next_x = player.x + body.velocity.x * dt;
        if next_x < current.point.x - current.radius || next_x > current.point.x + current.radius {
            body.set_horizontal_velocity(0.0);
        }

        // Swinging back over the top of the anchor slackens the rope.
        let crossed = (self.swing_dir > 0.0 && player.x < anchor.point.x)
            || (self.swing_dir < 0.0 && player.x > anchor.point.x);
        if crossed {
            debug!("Grapple: rope slack over anchor");
            self.release();
            return;
        }

        if player.y < current.point.y {
            self.swing_dir = -self.swing_dir;
            self.wrap = if self.special_float_exit {
                self.special_float_exit = false;
                WrapState::Wrap
            } else {
                WrapState::UnWrap
            };
        }
    }

    fn apply_swing(&self, body: &mut KinematicBody, pivot: Pivot) {
        let swing = swing_vector(body.position, pivot.point, pivot.radius, self.swing_dir);
        body.set_velocity(swing * self.tuning.swing_speed);
    }

    fn release(&mut self) {
        self.pivots.clear();
        self.tip = None;
        self.timer = self.tuning.cooldown;
        self.state = GrappleState::Cooldown;
        debug!("Grapple: released");
    }

    fn reset(&mut self) {
        self.pivots.clear();
        self.tip = None;
        self.timer = self.tuning.throw_time;
        self.special_float_exit = false;
        self.indicator_visible = true;
        self.state = GrappleState::Ready;
    }
}
