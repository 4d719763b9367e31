//! Abilities domain: the player's ability slots and selection.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::{Ability, AbilityContext, Dash, Grapple, HazardCloud};
use crate::config::MovementTuning;
use crate::movement::KinematicBody;

/// Every ability the player carries, exactly one of which is active.
#[derive(Component, Debug, Clone)]
pub struct AbilityLoadout {
    slots: Vec<Ability>,
    active: usize,
    /// Fractional slot position driven by the scroll wheel.
    scroll_point: f32,
}

impl AbilityLoadout {
    /// Build a loadout and enter the first slot. An empty list gets a single
    /// [`Ability::Empty`] slot.
    pub fn new(mut slots: Vec<Ability>) -> Self {
        if slots.is_empty() {
            slots.push(Ability::Empty);
        }
        slots[0].enter();
        Self {
            slots,
            active: 0,
            scroll_point: 0.0,
        }
    }

    /// Grapple, dash and cloud, in that order.
    pub fn from_tuning(tuning: &MovementTuning, grapple_mask: impl Into<LayerMask>) -> Self {
        Self::new(vec![
            Ability::Grapple(Grapple::new(tuning.grapple.clone(), grapple_mask)),
            Ability::Dash(Dash::new(tuning.dash.clone())),
            Ability::Cloud(HazardCloud::new(tuning.cloud.clone())),
        ])
    }

    pub fn active(&self) -> &Ability {
        &self.slots[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn slots(&self) -> &[Ability] {
        &self.slots
    }

    /// Make `index` the active slot. Returns false if the index is out of
    /// range or already active.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.slots.len() {
            return false;
        }
        self.scroll_point = index as f32;
        self.switch_to(index)
    }

    /// Advance the scroll point by half of `delta` and select the slot under it.
    pub fn scroll(&mut self, delta: f32) -> bool {
        let max = self.slots.len() as f32 - 0.01;
        let mut point = self.scroll_point + delta * 0.5;
        if point < 0.0 {
            point = max;
        } else if point > max {
            point = 0.0;
        }
        self.scroll_point = point;
        self.switch_to(point.floor() as usize)
    }

    fn switch_to(&mut self, index: usize) -> bool {
        if index >= self.slots.len() || index == self.active {
            return false;
        }

        self.slots[self.active].exit();
        self.active = index;
        self.slots[self.active].enter();
        debug!("Loadout: selected {}", self.slots[self.active].name());
        true
    }

    pub fn activate(&mut self, ctx: &mut AbilityContext) {
        self.slots[self.active].activate(ctx);
    }

    /// Runs on every slot, selected or not.
    pub fn ground_check(&mut self, body: &KinematicBody, dt: f32) {
        for ability in &mut self.slots {
            ability.ground_check(body, dt);
        }
    }

    pub fn respawn_reset(&mut self) {
        let active = &mut self.slots[self.active];
        active.death_reset();
        active.exit();
        active.enter();
    }
}

impl Default for AbilityLoadout {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
