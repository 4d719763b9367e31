//! Movement domain: checkpoints and respawn after death.

use bevy::prelude::*;

use crate::abilities::AbilityLoadout;
use crate::core::PlayerDied;
use crate::movement::{Checkpoint, KinematicBody, Player, PlayerMotor, Respawn};

/// Move a player's respawn point to any checkpoint they are standing in.
pub(crate) fn update_checkpoints(
    checkpoints: Query<(&Checkpoint, &GlobalTransform)>,
    mut players: Query<(&KinematicBody, &mut Respawn), With<Player>>,
) {
    for (body, mut respawn) in &mut players {
        for (checkpoint, transform) in &checkpoints {
            let center = transform.translation().truncate();
            if respawn.point != center && checkpoint.contains(center, body.position) {
                respawn.point = center;
                info!("Checkpoint reached at {:?}", center);
            }
        }
    }
}

pub(crate) fn respawn_players(
    mut deaths: MessageReader<PlayerDied>,
    mut players: Query<
        (
            &mut KinematicBody,
            &mut PlayerMotor,
            &mut AbilityLoadout,
            &Respawn,
            &mut Transform,
        ),
        With<Player>,
    >,
) {
    for died in deaths.read() {
        let Ok((mut body, mut motor, mut loadout, respawn, mut transform)) = players.get_mut(died.entity)
        else {
            continue;
        };

        loadout.respawn_reset();
        motor.reset();
        body.set_velocity(Vec2::ZERO);
        body.teleport(respawn.point);
        transform.translation.x = respawn.point.x;
        transform.translation.y = respawn.point.y;

        info!("Player {:?} respawned at {:?}", died.entity, respawn.point);
    }
}
