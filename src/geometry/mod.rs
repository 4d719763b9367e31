//! Geometry domain: ray queries against static level geometry.
//!
//! The movement core never owns level geometry. It asks a [`Geometry`]
//! implementation for ray and line casts filtered by a layer mask, and learns
//! whether the surface that was hit carries the hazard tag.

mod box_world;
mod spatial;

pub use box_world::{BoxWorld, Solid};
pub use spatial::{Hazard, SpatialGeometry};

use avian2d::prelude::*;
use bevy::prelude::*;

/// First contact of a ray with blocking geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space contact point.
    pub point: Vec2,
    /// Distance travelled along the ray before contact.
    pub distance: f32,
    /// Outward surface normal at the contact point.
    pub normal: Vec2,
    /// Whether the surface is tagged as a hazard (kills the player, rejects grapples).
    pub hazard: bool,
}

/// Read-only ray query interface over level geometry.
pub trait Geometry {
    /// Cast a ray from `origin` along `direction`, stopping at `max_distance`.
    ///
    /// Only geometry whose layer membership intersects `mask` can be hit.
    /// An origin lying on a surface and pointing into it reports a hit at
    /// distance zero.
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;

    /// Cast along the segment `from -> to`.
    fn linecast(&self, from: Vec2, to: Vec2, mask: LayerMask) -> Option<RayHit> {
        let delta = to - from;
        let direction = Dir2::new(delta).ok()?;
        self.cast_ray(from, direction, delta.length(), mask)
    }
}

/// Geometry with nothing in it. Every cast misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyGeometry;

impl Geometry for EmptyGeometry {
    fn cast_ray(&self, _: Vec2, _: Dir2, _: f32, _: LayerMask) -> Option<RayHit> {
        None
    }
}

/// Returns true when two layer masks share at least one layer.
pub fn layers_overlap(a: LayerMask, b: LayerMask) -> bool {
    a.0 & b.0 != 0
}
