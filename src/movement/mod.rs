//! Movement domain: kinematic body, player motor, and the fixed-tick player pipeline.

mod body;
mod bootstrap;
mod components;
#[cfg(feature = "dev-tools")]
mod dev;
mod motor;
mod resources;
mod systems;

pub use body::{CollisionFlags, KinematicBody, RayLayout};
pub use bootstrap::PlayerSpawn;
pub use components::{Checkpoint, Facing, GameLayer, Player, Respawn};
pub use motor::{JumpPhase, PlayerMotor};
pub use resources::InputSnapshot;

use bevy::prelude::*;

use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{
    read_input, respawn_players, select_ability, step_players, update_checkpoints,
};

/// Input sampling, the fixed player tick, checkpoints and respawn.
///
/// Expects [`crate::config::ConfigPlugin`] to have inserted the tuning, and
/// [`crate::core::CorePlugin`] to have registered [`crate::core::PlayerDied`].
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputSnapshot>()
            .init_resource::<PlayerSpawn>()
            .add_systems(Startup, spawn_player)
            .add_systems(Update, (read_input, select_ability).chain())
            .add_systems(
                FixedUpdate,
                (step_players, update_checkpoints, respawn_players).chain(),
            );

        #[cfg(feature = "dev-tools")]
        app.add_plugins(dev::DevToolsPlugin);
    }
}
