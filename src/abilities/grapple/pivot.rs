//! Ordered stack of the points a rope bends around.

use bevy::prelude::*;

/// A rope contact point and the swing radius used while it is the active pivot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    pub point: Vec2,
    /// Rope length between this pivot and the player when it was wrapped.
    pub radius: f32,
}

/// Pivots ordered oldest first. The bottom entry is the anchor and is never
/// unwrapped; the top entry is the pivot the player currently swings around.
///
/// The player end of the rope is implicit, so `n` pivots describe `n + 1`
/// rope points and `n` segment radii.
#[derive(Debug, Clone, Default)]
pub struct PivotStack {
    pivots: Vec<Pivot>,
}

impl PivotStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Vec2, radius: f32) {
        self.pivots.push(Pivot { point, radius });
    }

    /// Remove the most recent wrap point. The anchor is never removed.
    pub fn pop_wrap(&mut self) -> Option<Pivot> {
        debug_assert!(self.pivots.len() > 1, "pivot stack underflow");
        if self.pivots.len() > 1 {
            self.pivots.pop()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.pivots.clear();
    }

    pub fn len(&self) -> usize {
        self.pivots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pivots.is_empty()
    }

    pub fn anchor(&self) -> Option<&Pivot> {
        self.pivots.first()
    }

    pub fn current(&self) -> Option<&Pivot> {
        self.pivots.last()
    }

    /// The pivot wrapped just before the current one.
    pub fn previous(&self) -> Option<&Pivot> {
        self.pivots.len().checked_sub(2).map(|i| &self.pivots[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pivot> {
        self.pivots.iter()
    }

    pub fn radii(&self) -> impl Iterator<Item = f32> + '_ {
        self.pivots.iter().map(|p| p.radius)
    }

    /// Rope polyline from the anchor to `player`. Empty when nothing is attached.
    pub fn rope_points(&self, player: Vec2) -> Vec<Vec2> {
        if self.pivots.is_empty() {
            return Vec::new();
        }
        self.pivots
            .iter()
            .map(|p| p.point)
            .chain(std::iter::once(player))
            .collect()
    }
}
