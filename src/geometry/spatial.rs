//! [`Geometry`] backed by the avian2d spatial query pipeline.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::{Geometry, RayHit};

/// Marker for colliders that kill the player and cannot be grappled.
#[derive(Component, Debug, Default)]
pub struct Hazard;

/// Borrowed view over the physics world used by the live app.
pub struct SpatialGeometry<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    hazards: &'a Query<'w, 's, (), With<Hazard>>,
}

impl<'a, 'w, 's> SpatialGeometry<'a, 'w, 's> {
    pub fn new(
        spatial_query: &'a SpatialQuery<'w, 's>,
        hazards: &'a Query<'w, 's, (), With<Hazard>>,
    ) -> Self {
        Self {
            spatial_query,
            hazards,
        }
    }
}

impl Geometry for SpatialGeometry<'_, '_, '_> {
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let filter = SpatialQueryFilter::from_mask(mask);

        self.spatial_query
            .cast_ray(origin, direction, max_distance, true, &filter)
            .map(|hit| RayHit {
                point: origin + direction.as_vec2() * hit.distance,
                distance: hit.distance,
                normal: hit.normal,
                hazard: self.hazards.contains(hit.entity),
            })
    }
}
