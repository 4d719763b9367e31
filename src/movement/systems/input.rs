//! Movement domain: input sampling into the per-tick snapshot.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::movement::InputSnapshot;

/// Sample keyboard and pointer once per frame.
///
/// Held state and the pointer are overwritten every frame. Press edges are
/// OR-ed in and stay set until a fixed tick consumes them.
pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut input: ResMut<InputSnapshot>,
) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }
    input.horizontal = x;

    let jump_keys = [KeyCode::Space, KeyCode::KeyW, KeyCode::ArrowUp];
    input.jump_held = keyboard.any_pressed(jump_keys);
    input.jump_pressed |= keyboard.any_just_pressed(jump_keys);
    input.ability_pressed |=
        mouse.just_pressed(MouseButton::Left) || keyboard.just_pressed(KeyCode::KeyJ);

    if let Some(pointer) = pointer_world_position(&windows, &cameras) {
        input.pointer = pointer;
    }
}

fn pointer_world_position(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let cursor = windows.single().ok()?.cursor_position()?;
    let (camera, camera_transform) = cameras.iter().next()?;
    camera.viewport_to_world_2d(camera_transform, cursor).ok()
}
