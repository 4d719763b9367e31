//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Level geometry that blocks movement and catches the grapple
    Level,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

/// Region that moves the player's respawn point when entered.
#[derive(Component, Debug, Clone, Copy)]
pub struct Checkpoint {
    pub half_size: Vec2,
}

impl Checkpoint {
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let offset = (point - center).abs();
        offset.x <= self.half_size.x && offset.y <= self.half_size.y
    }
}

/// Where the player reappears after dying.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Respawn {
    pub point: Vec2,
}
