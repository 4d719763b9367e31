//! Ray-cast kinematic platformer movement with a corner-wrapping grapple.
//!
//! Domains:
//! - [`geometry`]: ray and line casts against static level geometry
//! - [`movement`]: the kinematic body, the player motor and the fixed tick
//! - [`abilities`]: the swappable ability slot (grapple, dash, hazard cloud)
//! - [`config`]: RON tuning with validation
//! - [`core`]: camera, cross-domain messages and slow motion

pub mod abilities;
pub mod config;
pub mod core;
pub mod geometry;
pub mod movement;
