//! Core domain: cross-domain messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// A player touched hazard geometry and should respawn.
#[derive(Debug, Clone, Copy)]
pub struct PlayerDied {
    pub entity: Entity,
}

impl Message for PlayerDied {}
