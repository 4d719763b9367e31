//! Movement domain: the fixed-rate player tick.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::abilities::AbilityLoadout;
use crate::core::PlayerDied;
use crate::geometry::{Hazard, SpatialGeometry};
use crate::movement::{InputSnapshot, KinematicBody, Player, PlayerMotor};

/// Advance every player by one fixed tick against the physics world.
pub(crate) fn step_players(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    hazards: Query<(), With<Hazard>>,
    mut input: ResMut<InputSnapshot>,
    mut players: Query<
        (
            Entity,
            &mut KinematicBody,
            &mut PlayerMotor,
            &mut AbilityLoadout,
            &mut Transform,
        ),
        With<Player>,
    >,
    mut deaths: MessageWriter<PlayerDied>,
) {
    let dt = time.delta_secs();
    let geometry = SpatialGeometry::new(&spatial_query, &hazards);

    for (entity, mut body, mut motor, mut loadout, mut transform) in &mut players {
        let snapshot = input.aimed_from(body.position);
        let flags = motor.tick(&mut body, &mut loadout, &snapshot, &geometry, dt);

        transform.translation.x = body.position.x;
        transform.translation.y = body.position.y;

        if flags.hazard {
            debug!("Player {:?} touched a hazard at {:?}", entity, body.position);
            deaths.write(PlayerDied { entity });
        }
    }

    input.consume_edges();
}
