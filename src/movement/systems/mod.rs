//! Movement domain: system modules for input, the fixed player tick, and respawn.

pub(crate) mod input;
pub(crate) mod movement;
pub(crate) mod respawn;
pub(crate) mod selection;

pub(crate) use input::read_input;
pub(crate) use movement::step_players;
pub(crate) use respawn::{respawn_players, update_checkpoints};
pub(crate) use selection::select_ability;
