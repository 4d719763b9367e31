//! Movement domain: player bootstrap from loaded tuning.

use bevy::prelude::*;

use crate::abilities::AbilityLoadout;
use crate::config::MovementTuning;
use crate::movement::{GameLayer, KinematicBody, Player, PlayerMotor, Respawn};

/// Where the player first appears. Also the initial respawn point.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerSpawn {
    pub position: Vec2,
}

impl Default for PlayerSpawn {
    fn default() -> Self {
        Self {
            position: Vec2::new(-12.0, 1.0),
        }
    }
}

pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    spawn: Res<PlayerSpawn>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let body = KinematicBody::from_tuning(spawn.position, &tuning.body, GameLayer::Level);
    let size = body.half_extents() * 2.0;

    info!(
        "Spawning player at {:?}: size={:?}, rays={}x{}, gravity={}",
        spawn.position,
        size,
        tuning.body.horizontal_rays,
        tuning.body.vertical_rays,
        tuning.motor.gravity
    );

    commands.spawn((
        (
            Player,
            body,
            PlayerMotor::new(tuning.motor.clone()),
            AbilityLoadout::from_tuning(&tuning, GameLayer::Level),
            Respawn {
                point: spawn.position,
            },
        ),
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(spawn.position.extend(1.0)),
    ));
}
