//! Movement domain: debug-only test room and rope gizmos.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::abilities::{Ability, AbilityLoadout, GrappleState};
use crate::geometry::Hazard;
use crate::movement::{Checkpoint, GameLayer, KinematicBody, Player};

pub(crate) struct DevToolsPlugin;

impl Plugin for DevToolsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_test_room)
            .add_systems(Update, (draw_ability_gizmos, draw_checkpoints));
    }
}

fn level_block(commands: &mut Commands, center: Vec2, size: Vec2, color: Color) -> Entity {
    commands
        .spawn((
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(GameLayer::Level, [GameLayer::Player]),
        ))
        .id()
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);
    let hazard_color = Color::srgb(0.8, 0.2, 0.2);

    // Ground, split by a hazard pit
    level_block(&mut commands, Vec2::new(-12.0, -1.0), Vec2::new(16.0, 1.0), ground_color);
    level_block(&mut commands, Vec2::new(12.0, -1.0), Vec2::new(16.0, 1.0), ground_color);
    let pit = level_block(&mut commands, Vec2::new(0.0, -1.5), Vec2::new(8.0, 0.5), hazard_color);
    commands.entity(pit).insert(Hazard);

    // Walls and ceiling
    level_block(&mut commands, Vec2::new(-20.5, 8.0), Vec2::new(1.0, 19.0), wall_color);
    level_block(&mut commands, Vec2::new(20.5, 8.0), Vec2::new(1.0, 19.0), wall_color);
    level_block(&mut commands, Vec2::new(0.0, 17.0), Vec2::new(42.0, 1.0), wall_color);

    // Overhang to swing from, with a pillar below it to wrap around
    level_block(&mut commands, Vec2::new(0.0, 10.0), Vec2::new(6.0, 0.6), platform_color);
    level_block(&mut commands, Vec2::new(-3.0, 5.0), Vec2::new(0.6, 3.0), wall_color);

    // Platforms either side of the pit
    level_block(&mut commands, Vec2::new(-9.0, 3.0), Vec2::new(4.0, 0.5), platform_color);
    level_block(&mut commands, Vec2::new(9.0, 4.0), Vec2::new(4.0, 0.5), platform_color);

    // Hazard strip under the ceiling; grapples aimed at it are rejected
    let spikes = level_block(&mut commands, Vec2::new(12.0, 16.25), Vec2::new(8.0, 0.5), hazard_color);
    commands.entity(spikes).insert(Hazard);

    commands.spawn((
        Checkpoint {
            half_size: Vec2::new(1.0, 1.5),
        },
        Transform::from_xyz(12.0, 1.0, 0.0),
    ));

    info!("Spawned dev test room");
}

fn draw_ability_gizmos(
    mut gizmos: Gizmos,
    players: Query<(&KinematicBody, &AbilityLoadout), With<Player>>,
) {
    let rope_color = Color::srgb(0.85, 0.75, 0.5);
    let aim_color = Color::srgba(1.0, 1.0, 1.0, 0.5);

    for (body, loadout) in &players {
        let player = body.position;

        for ability in loadout.slots() {
            let Ability::Cloud(cloud) = ability else {
                continue;
            };
            if let Some(region) = cloud.deployed_region() {
                gizmos.rect_2d(
                    Isometry2d::from_translation(region.center()),
                    region.size(),
                    Color::srgba(0.6, 0.2, 0.8, cloud.opacity()),
                );
            }
        }

        match loadout.active() {
            Ability::Grapple(grapple) => {
                match grapple.state() {
                    GrappleState::Ready => {
                        if let Some(preview) = grapple.aim_preview() {
                            gizmos.circle_2d(Isometry2d::from_translation(preview), 0.15, aim_color);
                        }
                    }
                    GrappleState::Firing => {
                        if let Some(tip) = grapple.rope_tip() {
                            gizmos.line_2d(player, tip, rope_color);
                        }
                    }
                    GrappleState::Connected => {
                        gizmos.linestrip_2d(grapple.rope_points(player), rope_color);
                    }
                    GrappleState::Cooldown => {}
                }
            }
            Ability::Cloud(cloud) if cloud.preview_visible() => {
                gizmos.circle_2d(
                    Isometry2d::from_translation(cloud.position()),
                    0.2,
                    aim_color,
                );
            }
            _ => {}
        }
    }
}

fn draw_checkpoints(mut gizmos: Gizmos, checkpoints: Query<(&Checkpoint, &GlobalTransform)>) {
    for (checkpoint, transform) in &checkpoints {
        gizmos.rect_2d(
            Isometry2d::from_translation(transform.translation().truncate()),
            checkpoint.half_size * 2.0,
            Color::srgb(0.3, 0.8, 0.9),
        );
    }
}
