//! Abilities domain: grapple lifecycle, wrapping and swing tests.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::{Grapple, GrappleState, PivotStack, WrapState, swing_vector};
use crate::abilities::AbilityContext;
use crate::config::{BodyTuning, GrappleTuning};
use crate::geometry::{BoxWorld, EmptyGeometry, Geometry, Solid};
use crate::movement::{InputSnapshot, KinematicBody};

const LEVEL: LayerMask = LayerMask(0b01);
const DT: f32 = 0.02;

fn grapple() -> Grapple {
    let mut grapple = Grapple::new(GrappleTuning::default(), LEVEL);
    grapple.enter();
    grapple
}

fn body_at(position: Vec2) -> KinematicBody {
    KinematicBody::from_tuning(position, &BodyTuning::default(), LEVEL)
}

fn ceiling() -> Solid {
    Solid::from_corners(Vec2::new(-20.0, 10.0), Vec2::new(20.0, 11.0), LEVEL)
}

fn tick(grapple: &mut Grapple, body: &mut KinematicBody, input: &InputSnapshot, geometry: &dyn Geometry) {
    grapple.activate(&mut AbilityContext {
        body,
        input,
        geometry,
        dt: DT,
    });
}

fn aim_at(body: &KinematicBody, target: Vec2) -> InputSnapshot {
    InputSnapshot {
        pointer: target,
        ..default()
    }
    .aimed_from(body.position)
}

fn press(input: InputSnapshot) -> InputSnapshot {
    InputSnapshot {
        ability_pressed: true,
        ..input
    }
}

/// Throw toward `target` in `launch`, then let the rope fly in `world`.
/// Returns whether the grapple was ever connected while firing resolved.
fn throw(
    grapple: &mut Grapple,
    body: &mut KinematicBody,
    target: Vec2,
    launch: &dyn Geometry,
    world: &dyn Geometry,
) -> bool {
    let aim = aim_at(body, target);
    tick(grapple, body, &press(aim), launch);
    assert_eq!(grapple.state(), GrappleState::Firing);

    for _ in 0..100 {
        tick(grapple, body, &aim, world);
        if grapple.state() != GrappleState::Firing {
            break;
        }
    }
    grapple.state() == GrappleState::Connected
}

fn assert_close(a: Vec2, b: Vec2) {
    assert!((a - b).length() < 1e-3, "{a:?} != {b:?}");
}

#[test]
fn test_ready_previews_aim_hit() {
    let world = BoxWorld::new().with(ceiling());
    let mut grapple = grapple();
    let mut body = body_at(Vec2::new(0.0, 2.0));

    let aim = aim_at(&body, Vec2::new(0.0, 20.0));
    tick(&mut grapple, &mut body, &aim, &world);

    assert_eq!(grapple.state(), GrappleState::Ready);
    assert_close(grapple.aim_preview().expect("preview"), Vec2::new(0.0, 10.0));
}

#[test]
fn test_anchor_directly_above_starts_wrap() {
    let world = BoxWorld::new().with(ceiling());
    let mut grapple = grapple();
    let mut body = body_at(Vec2::new(0.0, 2.0));

    assert!(throw(&mut grapple, &mut body, Vec2::new(0.0, 20.0), &world, &world));

    assert_eq!(grapple.wrap_state(), WrapState::Wrap);
    assert!(grapple.last_throw_succeeded());
    assert_eq!(grapple.swing_dir(), 1.0);
    assert_eq!(grapple.pivots().len(), 1);
    let anchor = grapple.current_pivot().expect("anchor pivot");
    assert_close(anchor.point, Vec2::new(0.0, 10.0));
    assert!((anchor.radius - 8.0).abs() < 1e-3);
    assert_eq!(grapple.rope_tip(), Some(anchor.point));
}

#[test]
fn test_throw_takes_throw_time() {
    let world = BoxWorld::new().with(ceiling());
    let mut grapple = grapple();
    let mut body = body_at(Vec2::new(0.0, 2.0));

    let aim = aim_at(&body, Vec2::new(0.0, 20.0));
    tick(&mut grapple, &mut body, &press(aim), &world);

    let mut firing_ticks = 0;
    while grapple.state() == GrappleState::Firing {
        tick(&mut grapple, &mut body, &aim, &world);
        firing_ticks += 1;
        assert!(firing_ticks <= 100);
    }
    assert_eq!(firing_ticks, 10);
}

#[test]
fn test_hazard_surface_rejects_grapple() {
    let world = BoxWorld::new().with(ceiling().hazard());
    let mut grapple = grapple();
    let mut body = body_at(Vec2::new(0.0, 2.0));

    assert!(!throw(&mut grapple, &mut body, Vec2::new(0.0, 20.0), &world, &world));

    assert_eq!(grapple.state(), GrappleState::Ready);
    assert!(!grapple.last_throw_succeeded());
    assert!(grapple.pivots().is_empty());
    assert_close(grapple.anchor(), Vec2::new(0.0, 10.0));
}

#[test]
fn test_miss_returns_to_ready() {
    let mut grapple = grapple();
    let mut body = body_at(Vec2::ZERO);

    assert!(!throw(&mut grapple, &mut body, Vec2::new(30.0, 0.0), &EmptyGeometry, &EmptyGeometry));

    assert_eq!(grapple.state(), GrappleState::Ready);
    assert!(!grapple.last_throw_succeeded());
    assert_close(grapple.anchor(), Vec2::new(10.0, 0.0));
}

#[test]
fn test_grounded_at_landing_fails() {
    let floor = Solid::from_corners(Vec2::new(-5.0, -1.0), Vec2::new(5.0, 0.0), LEVEL);
    let world = BoxWorld::new().with(floor).with(ceiling());
    let mut grapple = grapple();
    let mut body = body_at(Vec2::new(0.0, 0.5));
    body.set_velocity(Vec2::new(0.0, -1.0));
    assert!(body.move_and_collide(&world, DT).grounded);

    assert!(!throw(&mut grapple, &mut body, Vec2::new(0.0, 20.0), &world, &world));

    assert_eq!(grapple.state(), GrappleState::Ready);
    assert!(!grapple.last_throw_succeeded());
}

#[test]
fn test_anchor_below_starts_float_and_flips_swing() {
    let floor = Solid::from_corners(Vec2::new(-5.0, -1.0), Vec2::new(5.0, 0.0), LEVEL);
    let world = BoxWorld::new().with(floor);
    let mut grapple = grapple();
    let mut body = body_at(Vec2::new(2.0, 5.0));

    assert!(throw(&mut grapple, &mut body, Vec2::new(0.0, 0.0), &world, &world));

    assert_eq!(grapple.wrap_state(), WrapState::Float);
    assert!(grapple.special_float_exit);
    // Anchor is to the left, so the throw swung left before the flip.
    assert_eq!(grapple.swing_dir(), 1.0);
}

#[test]
fn test_wrap_pushes_new_pivot() {
    let ceiling_only = BoxWorld::new().with(ceiling());
    let block = Solid::from_corners(Vec2::new(-2.5, 7.0), Vec2::new(-1.5, 7.5), LEVEL);
    let world = BoxWorld::new().with(ceiling()).with(block);
    let mut grapple = grapple();
    let player = Vec2::new(-3.0, 6.0);
    let mut body = body_at(player);

    assert!(throw(&mut grapple, &mut body, Vec2::new(0.0, 10.0), &ceiling_only, &world));
    assert_eq!(grapple.wrap_state(), WrapState::Wrap);
    assert!((grapple.current_pivot().expect("anchor").radius - 5.0).abs() < 1e-3);

    tick(&mut grapple, &mut body, &InputSnapshot::default(), &world);

    assert_eq!(grapple.state(), GrappleState::Connected);
    assert_eq!(grapple.pivots().len(), 2);
    let wrapped = grapple.current_pivot().expect("wrap point");
    assert_close(wrapped.point, Vec2::new(-2.25, 7.0));
    assert!((wrapped.radius - 1.25).abs() < 1e-3);
    assert_eq!(grapple.rope_points(player).len(), grapple.pivots().radii().count() + 1);
}

#[test]
fn test_wrap_ignores_hit_at_current_pivot() {
    let world = BoxWorld::new().with(ceiling());
    let mut grapple = grapple();
    let mut body = body_at(Vec2::new(0.0, 2.0));
    assert!(throw(&mut grapple, &mut body, Vec2::new(0.0, 20.0), &world, &world));

    tick(&mut grapple, &mut body, &InputSnapshot::default(), &world);

    assert_eq!(grapple.pivots().len(), 1);
    // Hanging straight down and swinging right.
    assert!(body.velocity.x > 0.0);
}

fn connected(wrap: WrapState, swing_dir: f32, pivots: &[(Vec2, f32)]) -> Grapple {
    let mut grapple = grapple();
    let mut stack = PivotStack::new();
    for &(point, radius) in pivots {
        stack.push(point, radius);
    }
    grapple.anchor = pivots[0].0;
    grapple.pivots = stack;
    grapple.state = GrappleState::Connected;
    grapple.wrap = wrap;
    grapple.swing_dir = swing_dir;
    grapple
}

#[test]
fn test_unwrap_pops_pivot_when_swung_back() {
    let anchor = (Vec2::new(0.0, 10.0), 8.0);
    let corner = (Vec2::new(-3.5, 16.0 / 3.0), 2.5);
    let mut grapple = connected(WrapState::UnWrap, 1.0, &[anchor, corner]);
    let mut body = body_at(Vec2::new(-0.5, 16.0 / 3.0));

    tick(&mut grapple, &mut body, &InputSnapshot::default(), &EmptyGeometry);

    assert_eq!(grapple.pivots().len(), 1);
    assert_eq!(grapple.current_pivot().map(|p| p.radius), Some(8.0));
    assert_eq!(grapple.wrap_state(), WrapState::UnWrap);
}

#[test]
fn test_unwrap_keeps_pivot_on_wrapped_side() {
    let anchor = (Vec2::new(0.0, 10.0), 8.0);
    let corner = (Vec2::new(-3.5, 16.0 / 3.0), 2.5);
    let mut grapple = connected(WrapState::UnWrap, 1.0, &[anchor, corner]);
    let mut body = body_at(Vec2::new(-6.5, 16.0 / 3.0));

    tick(&mut grapple, &mut body, &InputSnapshot::default(), &EmptyGeometry);

    assert_eq!(grapple.pivots().len(), 2);
    assert_eq!(grapple.wrap_state(), WrapState::UnWrap);
}

#[test]
fn test_unwrap_returns_to_wrap_past_anchor() {
    let mut grapple = connected(WrapState::UnWrap, -1.0, &[(Vec2::new(0.0, 10.0), 7.0)]);
    let mut body = body_at(Vec2::new(-1.0, 3.0));

    tick(&mut grapple, &mut body, &InputSnapshot::default(), &EmptyGeometry);

    assert_eq!(grapple.wrap_state(), WrapState::Wrap);
    assert_eq!(grapple.state(), GrappleState::Connected);
}

#[test]
fn test_float_detaches_when_crossing_anchor() {
    let mut grapple = connected(WrapState::Float, 1.0, &[(Vec2::ZERO, 5.0)]);
    let mut body = body_at(Vec2::new(-1.0, 3.0));

    tick(&mut grapple, &mut body, &InputSnapshot::default(), &EmptyGeometry);

    assert_eq!(grapple.state(), GrappleState::Cooldown);
    assert!(grapple.pivots().is_empty());
}

#[test]
fn test_float_limits_horizontal_reach() {
    let mut grapple = connected(WrapState::Float, 1.0, &[(Vec2::ZERO, 5.0)]);
    let mut body = body_at(Vec2::new(4.0, 2.0));
    body.set_velocity(Vec2::new(120.0, 3.0));

    tick(&mut grapple, &mut body, &InputSnapshot::default(), &EmptyGeometry);

    assert_eq!(body.velocity, Vec2::new(0.0, 3.0));
    assert_eq!(grapple.wrap_state(), WrapState::Float);
}

#[test]
fn test_float_exit_below_pivot() {
    let mut grapple = connected(WrapState::Float, 1.0, &[(Vec2::ZERO, 5.0)]);
    let mut body = body_at(Vec2::new(2.0, -1.0));

    tick(&mut grapple, &mut body, &InputSnapshot::default(), &EmptyGeometry);
    assert_eq!(grapple.wrap_state(), WrapState::UnWrap);
    assert_eq!(grapple.swing_dir(), -1.0);

    let mut grapple = connected(WrapState::Float, 1.0, &[(Vec2::ZERO, 5.0)]);
    grapple.special_float_exit = true;
    tick(&mut grapple, &mut body, &InputSnapshot::default(), &EmptyGeometry);
    assert_eq!(grapple.wrap_state(), WrapState::Wrap);
    assert!(!grapple.special_float_exit);
}

#[test]
fn test_jump_releases_then_cooldown_returns_to_ready() {
    let world = BoxWorld::new().with(ceiling());
    let mut grapple = grapple();
    let mut body = body_at(Vec2::new(0.0, 2.0));
    assert!(throw(&mut grapple, &mut body, Vec2::new(0.0, 20.0), &world, &world));

    let jump = InputSnapshot {
        jump_pressed: true,
        ..default()
    };
    tick(&mut grapple, &mut body, &jump, &world);
    assert_eq!(grapple.state(), GrappleState::Cooldown);
    assert!(grapple.pivots().is_empty());
    assert!(grapple.cooldown_fraction() > 0.9);

    let mut cooldown_ticks = 0;
    while grapple.state() == GrappleState::Cooldown {
        tick(&mut grapple, &mut body, &InputSnapshot::default(), &world);
        cooldown_ticks += 1;
        assert!(cooldown_ticks <= 100);
    }
    assert_eq!(cooldown_ticks, 10);
    assert_eq!(grapple.state(), GrappleState::Ready);
}

#[test]
fn test_rope_points_match_radii_while_swinging() {
    let block = Solid::from_corners(Vec2::new(-1.0, 4.0), Vec2::new(1.0, 5.0), LEVEL);
    let world = BoxWorld::new().with(ceiling()).with(block);
    let ceiling_only = BoxWorld::new().with(ceiling());
    let mut grapple = grapple();
    let mut body = body_at(Vec2::new(-4.0, 4.0));

    assert!(throw(&mut grapple, &mut body, Vec2::new(0.0, 10.0), &ceiling_only, &world));

    let mut connected_ticks = 0;
    for _ in 0..240 {
        tick(&mut grapple, &mut body, &InputSnapshot::default(), &world);
        body.move_and_collide(&world, DT);
        if grapple.state() != GrappleState::Connected {
            break;
        }
        connected_ticks += 1;
        let player = body.position;
        assert_eq!(
            grapple.rope_points(player).len(),
            grapple.pivots().radii().count() + 1
        );
    }
    assert!(connected_ticks > 0);
}

#[test]
fn test_swing_correction_converges_to_radius() {
    let pivot = Vec2::ZERO;
    let radius = 5.0;
    let speed = GrappleTuning::default().swing_speed;
    let mut player = Vec2::new(0.0, -5.3);

    for _ in 0..400 {
        player += swing_vector(player, pivot, radius, 1.0) * speed * DT;
    }
    let distance = player.distance(pivot);
    assert!((distance - radius).abs() < 0.15, "distance {distance}");
}

#[test]
fn test_swing_direction_follows_swing_dir() {
    let pivot = Vec2::new(0.0, 5.0);
    let right = swing_vector(Vec2::ZERO, pivot, 5.0, 1.0);
    let left = swing_vector(Vec2::ZERO, pivot, 5.0, -1.0);
    assert!(right.x > 0.0);
    assert!(left.x < 0.0);
}

#[test]
fn test_exit_and_death_reset_clear_rope() {
    let mut grapple = connected(WrapState::Wrap, 1.0, &[(Vec2::ZERO, 5.0), (Vec2::X, 1.0)]);
    grapple.death_reset();
    assert_eq!(grapple.state(), GrappleState::Ready);
    assert!(grapple.pivots().is_empty());

    let mut grapple = connected(WrapState::Wrap, 1.0, &[(Vec2::ZERO, 5.0)]);
    grapple.exit();
    assert_eq!(grapple.state(), GrappleState::Ready);
    assert!(grapple.pivots().is_empty());
    assert!(!grapple.indicator_visible());
}

/// A grapple swinging from a pivot well above a body at the origin.
fn swinging() -> Grapple {
    connected(WrapState::Wrap, 1.0, &[(Vec2::new(0.0, 10.0), 10.0)])
}

fn assert_released(grapple: &Grapple) {
    assert_eq!(grapple.state(), GrappleState::Cooldown);
    assert!(grapple.pivots().is_empty());
}

#[test]
fn test_side_collision_releases_swing() {
    let mut body = body_at(Vec2::ZERO);
    let half = body.half_extents();
    let wall = BoxWorld::new().with(Solid::from_corners(
        Vec2::new(half.x + 0.1, -5.0),
        Vec2::new(half.x + 2.0, 5.0),
        LEVEL,
    ));
    body.set_velocity(Vec2::new(10.0, 0.0));
    assert!(body.move_and_collide(&wall, DT).side);

    let mut grapple = swinging();
    tick(&mut grapple, &mut body, &InputSnapshot::default(), &EmptyGeometry);
    assert_released(&grapple);
}

#[test]
fn test_ceiling_collision_releases_swing() {
    let mut body = body_at(Vec2::ZERO);
    let half = body.half_extents();
    let roof = BoxWorld::new().with(Solid::from_corners(
        Vec2::new(-5.0, half.y + 0.1),
        Vec2::new(5.0, half.y + 1.0),
        LEVEL,
    ));
    body.set_velocity(Vec2::new(0.0, 10.0));
    assert!(body.move_and_collide(&roof, DT).ceiling);

    let mut grapple = swinging();
    tick(&mut grapple, &mut body, &InputSnapshot::default(), &EmptyGeometry);
    assert_released(&grapple);
}

#[test]
fn test_grounded_releases_swing() {
    let mut body = body_at(Vec2::ZERO);
    let half = body.half_extents();
    let floor = BoxWorld::new().with(Solid::from_corners(
        Vec2::new(-5.0, -half.y - 1.0),
        Vec2::new(5.0, -half.y - 0.1),
        LEVEL,
    ));
    body.set_velocity(Vec2::new(0.0, -10.0));
    assert!(body.move_and_collide(&floor, DT).grounded);

    let mut grapple = swinging();
    tick(&mut grapple, &mut body, &InputSnapshot::default(), &EmptyGeometry);
    assert_released(&grapple);
}

#[test]
fn test_ability_press_releases_swing() {
    let mut body = body_at(Vec2::ZERO);
    let mut grapple = swinging();

    tick(&mut grapple, &mut body, &InputSnapshot::default(), &EmptyGeometry);
    assert_eq!(grapple.state(), GrappleState::Connected);

    tick(&mut grapple, &mut body, &press(InputSnapshot::default()), &EmptyGeometry);
    assert_released(&grapple);
}
