//! Core domain: camera, cross-domain messages, and slow motion.

mod events;
mod slow_motion;

pub use events::PlayerDied;
pub use slow_motion::{SlowMotion, SlowState};

use bevy::prelude::*;

use crate::core::slow_motion::update_slow_motion;
use crate::movement::Player;

/// World units are tuning units; one unit spans this many pixels.
const PIXELS_PER_UNIT: f32 = 40.0;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayerDied>()
            .init_resource::<SlowMotion>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (update_slow_motion, follow_player));
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        }),
    ));
}

fn follow_player(
    players: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let Some(player) = players.iter().next() else {
        return;
    };
    for mut camera in &mut cameras {
        camera.translation.x = player.translation.x;
        camera.translation.y = player.translation.y;
    }
}
