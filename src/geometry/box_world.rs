//! In-memory level made of axis-aligned solids.
//!
//! Used for headless simulation and tests, where spinning up the avian2d
//! spatial query pipeline would be overkill.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::{Geometry, RayHit, layers_overlap};

/// One axis-aligned block of level geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solid {
    pub min: Vec2,
    pub max: Vec2,
    pub layers: LayerMask,
    pub hazard: bool,
}

impl Solid {
    /// Block centered on `center` with full size `size`.
    pub fn from_center_size(center: Vec2, size: Vec2, layers: impl Into<LayerMask>) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
            layers: layers.into(),
            hazard: false,
        }
    }

    /// Block spanning two corners given in any order.
    pub fn from_corners(a: Vec2, b: Vec2, layers: impl Into<LayerMask>) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            layers: layers.into(),
            hazard: false,
        }
    }

    pub fn hazard(mut self) -> Self {
        self.hazard = true;
        self
    }

    /// Slab test. Returns the entry distance and the entry normal.
    fn intersect(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<(f32, Vec2)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = Vec2::ZERO;

        for axis in 0..2 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d == 0.0 {
                // Parallel rays only count when strictly inside the slab; grazing a face is not contact.
                if o <= lo || o >= hi {
                    return None;
                }
                continue;
            }

            let mut t_near = (lo - o) / d;
            let mut t_far = (hi - o) / d;
            let mut axis_normal = Vec2::ZERO;
            axis_normal[axis] = -d.signum();
            if t_near > t_far {
                std::mem::swap(&mut t_near, &mut t_far);
            }

            if t_near > t_enter {
                t_enter = t_near;
                normal = axis_normal;
            }
            t_exit = t_exit.min(t_far);
        }

        // Starting on a face and pointing away from the block is a miss.
        if t_exit <= 0.0 || t_enter > t_exit || t_enter > max_distance {
            return None;
        }

        if t_enter < 0.0 {
            Some((0.0, -direction))
        } else {
            Some((t_enter, normal))
        }
    }
}

/// A flat list of solids with brute-force ray queries.
#[derive(Debug, Clone, Default)]
pub struct BoxWorld {
    solids: Vec<Solid>,
}

impl BoxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, solid: Solid) -> Self {
        self.solids.push(solid);
        self
    }
}

impl Geometry for BoxWorld {
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let dir = direction.as_vec2();

        self.solids
            .iter()
            .filter(|solid| layers_overlap(solid.layers, mask))
            .filter_map(|solid| {
                solid
                    .intersect(origin, dir, max_distance)
                    .map(|(distance, normal)| RayHit {
                        point: origin + dir * distance,
                        distance,
                        normal,
                        hazard: solid.hazard,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
