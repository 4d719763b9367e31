//! Movement domain: ray-cast kinematic body.
//!
//! The body is an axis-aligned box that is moved by its own velocity once per
//! tick. Movement is resolved one axis at a time: a fan of parallel rays is
//! cast from the leading vertical edge to clamp the horizontal displacement,
//! then a second fan from the leading horizontal edge, shifted by the clamped
//! horizontal displacement, clamps the vertical one.
//!
//! The travel direction on each axis is chosen once per tick from the sign of
//! that axis's displacement. Geometry that would need resolving in both
//! directions within a single tick is not handled.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::config::BodyTuning;
use crate::geometry::Geometry;

/// Which directions were blocked during the most recent move.
///
/// Recomputed from scratch on every [`KinematicBody::move_and_collide`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionFlags {
    pub grounded: bool,
    pub ceiling: bool,
    pub side: bool,
    /// A blocking ray this tick hit hazard-tagged geometry.
    pub hazard: bool,
}

/// Ray fan layout for both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayLayout {
    pub horizontal: u32,
    pub vertical: u32,
    pub inset: f32,
}

#[derive(Component, Debug, Clone)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
    half_extents: Vec2,
    rays: RayLayout,
    mask: LayerMask,
    flags: CollisionFlags,
}

impl KinematicBody {
    pub fn new(position: Vec2, half_extents: Vec2, rays: RayLayout, mask: impl Into<LayerMask>) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            half_extents,
            rays,
            mask: mask.into(),
            flags: CollisionFlags::default(),
        }
    }

    pub fn from_tuning(position: Vec2, tuning: &BodyTuning, mask: impl Into<LayerMask>) -> Self {
        Self::new(
            position,
            tuning.half_extents(),
            RayLayout {
                horizontal: tuning.horizontal_rays,
                vertical: tuning.vertical_rays,
                inset: tuning.ray_inset,
            },
            mask,
        )
    }

    pub fn flags(&self) -> CollisionFlags {
        self.flags
    }

    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// Move by `velocity * dt`, stopping short of blocking geometry.
    pub fn move_and_collide(&mut self, geometry: &dyn Geometry, dt: f32) -> CollisionFlags {
        self.flags = CollisionFlags::default();

        let mut delta = self.velocity * dt;
        self.resolve_horizontal(geometry, &mut delta);
        self.resolve_vertical(geometry, &mut delta);

        self.position += delta;

        if self.flags.grounded {
            self.velocity.y = 0.0;
        }
        if self.flags.ceiling && self.velocity.y > 0.0 {
            self.velocity.y = 0.0;
        }

        self.flags
    }

    fn resolve_horizontal(&mut self, geometry: &dyn Geometry, delta: &mut Vec2) {
        if delta.x == 0.0 {
            return;
        }

        let moving_right = delta.x > 0.0;
        let direction = if moving_right { Dir2::X } else { Dir2::NEG_X };
        let edge_x = if moving_right {
            self.position.x + self.half_extents.x
        } else {
            self.position.x - self.half_extents.x
        };
        let bottom = self.position.y - self.half_extents.y + self.rays.inset * 0.5;
        let gap = ray_gap(self.half_extents.y * 2.0, self.rays.inset, self.rays.horizontal);

        let mut distance = delta.x.abs();
        for i in 0..self.rays.horizontal {
            let origin = Vec2::new(edge_x, bottom + i as f32 * gap);
            if let Some(hit) = geometry.cast_ray(origin, direction, distance, self.mask) {
                distance = hit.distance;
                delta.x = hit.distance * direction.x;
                self.flags.side = true;
                self.flags.hazard |= hit.hazard;
            }
        }
    }

    fn resolve_vertical(&mut self, geometry: &dyn Geometry, delta: &mut Vec2) {
        if delta.y == 0.0 {
            return;
        }

        let moving_up = delta.y > 0.0;
        let direction = if moving_up { Dir2::Y } else { Dir2::NEG_Y };
        let edge_y = if moving_up {
            self.position.y + self.half_extents.y
        } else {
            self.position.y - self.half_extents.y
        };
        // Cast from the column the body occupies after horizontal resolution.
        let right = self.position.x + self.half_extents.x - self.rays.inset * 0.5 + delta.x;
        let gap = ray_gap(self.half_extents.x * 2.0, self.rays.inset, self.rays.vertical);

        let mut distance = delta.y.abs();
        for i in 0..self.rays.vertical {
            let origin = Vec2::new(right - i as f32 * gap, edge_y);
            if let Some(hit) = geometry.cast_ray(origin, direction, distance, self.mask) {
                distance = hit.distance;
                delta.y = hit.distance * direction.y;
                self.flags.hazard |= hit.hazard;
                if moving_up {
                    self.flags.ceiling = true;
                } else {
                    self.flags.grounded = true;
                }
            }
        }
    }

    // Velocity mutators. All take effect immediately.

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn add_force(&mut self, force: Vec2, dt: f32) {
        self.velocity += force * dt;
    }

    pub fn set_horizontal_velocity(&mut self, vx: f32) {
        self.velocity.x = vx;
    }

    pub fn add_horizontal_force(&mut self, force: f32, dt: f32) {
        self.velocity.x += force * dt;
    }

    pub fn set_vertical_velocity(&mut self, vy: f32) {
        self.velocity.y = vy;
    }

    pub fn add_vertical_force(&mut self, force: f32, dt: f32) {
        self.velocity.y += force * dt;
    }

    pub fn apply_gravity(&mut self, gravity: f32, dt: f32) {
        self.velocity.y += gravity * dt;
    }

    /// Slow horizontal velocity toward zero by `rate` per second, never past it.
    pub fn decelerate_horizontal(&mut self, rate: f32, dt: f32) {
        let step = rate * dt;
        if self.velocity.x > 0.0 {
            self.velocity.x = (self.velocity.x - step).max(0.0);
        } else if self.velocity.x < 0.0 {
            self.velocity.x = (self.velocity.x + step).min(0.0);
        }
    }

    /// Place the body without sweeping. Flags are cleared.
    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.flags = CollisionFlags::default();
    }
}

/// Spacing between `count` rays spread over `span` minus the inset.
fn ray_gap(span: f32, inset: f32, count: u32) -> f32 {
    (span - inset) / (count as f32 - 1.0)
}
