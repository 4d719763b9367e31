use avian2d::prelude::*;
use bevy::prelude::*;

use grapple_core::config::ConfigPlugin;
use grapple_core::core::CorePlugin;
use grapple_core::movement::MovementPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Grapple".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(ConfigPlugin::default())
        .add_plugins((CorePlugin, MovementPlugin))
        .run();
}
