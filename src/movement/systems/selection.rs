//! Movement domain: ability selection from number keys and the scroll wheel.

use bevy::input::mouse::AccumulatedMouseScroll;
use bevy::prelude::*;

use crate::abilities::AbilityLoadout;
use crate::movement::Player;

const SLOT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

pub(crate) fn select_ability(
    keyboard: Res<ButtonInput<KeyCode>>,
    scroll: Res<AccumulatedMouseScroll>,
    mut players: Query<&mut AbilityLoadout, With<Player>>,
) {
    let key_choice = SLOT_KEYS
        .iter()
        .position(|key| keyboard.just_pressed(*key));

    for mut loadout in &mut players {
        let changed = match key_choice {
            Some(index) => loadout.select(index),
            None if scroll.delta.y != 0.0 => loadout.scroll(scroll.delta.y),
            None => false,
        };

        if changed {
            info!(
                "Selected ability {} ({})",
                loadout.active_index() + 1,
                loadout.active().name()
            );
        }
    }
}
