//! Combatants and the unit registry
//!
//! Units are created at setup and never destroyed mid-battle. Death marks a
//! unit (hp 0) and removes it from the turn queue, but it stays addressable
//! in the registry for the event history and the renderer.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Position;
use crate::skill::{Affinity, Element, SkillId, StatusKind};

/// Unique, stable identifier for a combatant
pub type UnitId = String;

/// Which side a combatant fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "PLAYER"),
            Side::Enemy => write!(f, "ENEMY"),
        }
    }
}

/// A timed modifier applied to a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub value: i32,
    /// Remaining cycles of the owner's side
    pub duration: u32,
    /// Unit that applied the status
    pub source: UnitId,
}

/// A combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: UnitId,
    pub display_name: String,
    pub side: Side,
    /// None until placed; unplaced units sit out the battle
    pub position: Option<Position>,
    pub hit_points: i32,
    pub max_hit_points: i32,
    pub spirit_points: i32,
    pub max_spirit_points: i32,
    /// The unit's own attack element
    pub element: Element,
    /// Reactions to incoming elements; missing entries read as Normal
    pub affinities: BTreeMap<Element, Affinity>,
    pub statuses: Vec<StatusEffect>,
    /// Halves incoming damage until the side's next cycle start
    pub guarding: bool,
    /// Catalog skills this unit knows
    pub skills: Vec<SkillId>,
}

impl Unit {
    pub fn new(id: &str, display_name: &str, side: Side, hit_points: i32, element: Element) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            side,
            position: None,
            hit_points,
            max_hit_points: hit_points,
            spirit_points: 0,
            max_spirit_points: 0,
            element,
            affinities: BTreeMap::new(),
            statuses: Vec::new(),
            guarding: false,
            skills: Vec::new(),
        }
    }

    pub fn with_spirit(mut self, spirit_points: i32) -> Self {
        self.spirit_points = spirit_points;
        self.max_spirit_points = spirit_points;
        self
    }

    pub fn with_affinity(mut self, element: Element, affinity: Affinity) -> Self {
        self.affinities.insert(element, affinity);
        self
    }

    pub fn with_skills(mut self, skills: Vec<SkillId>) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    /// Placed and alive, so eligible for the turn queue and targeting
    pub fn is_active(&self) -> bool {
        self.is_alive() && self.position.is_some()
    }

    pub fn affinity_to(&self, element: Element) -> Affinity {
        self.affinities.get(&element).copied().unwrap_or(Affinity::Normal)
    }

    /// Subtract damage, flooring at zero
    pub fn take_damage(&mut self, amount: i32) {
        self.hit_points = (self.hit_points - amount).max(0);
    }

    /// Add hit points, capped at the maximum
    pub fn heal(&mut self, amount: i32) {
        self.hit_points = (self.hit_points + amount).min(self.max_hit_points);
    }

    pub fn spend_spirit(&mut self, amount: i32) {
        self.spirit_points = (self.spirit_points - amount).max(0);
    }

    pub fn restore_spirit(&mut self, amount: i32) {
        self.spirit_points = (self.spirit_points + amount).min(self.max_spirit_points);
    }

    /// Sum of a status kind's values on this unit
    pub fn status_total(&self, kind: StatusKind) -> i32 {
        self.statuses
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.value)
            .sum()
    }

    /// Apply a status, refreshing value and duration if the kind is present
    pub fn apply_status(&mut self, status: StatusEffect) {
        if let Some(existing) = self.statuses.iter_mut().find(|s| s.kind == status.kind) {
            *existing = status;
        } else {
            self.statuses.push(status);
        }
    }
}

/// Owns every combatant of a battle, in insertion order
///
/// Insertion order doubles as placement order, which makes the turn queue
/// deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitRegistry {
    units: Vec<Unit>,
}

impl UnitRegistry {
    pub fn new(units: Vec<Unit>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn get(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Living unit occupying the cell, if any
    pub fn occupant_at(&self, position: Position) -> Option<&Unit> {
        self.units
            .iter()
            .find(|u| u.is_alive() && u.position == Some(position))
    }

    /// Living units of a side, any placement
    pub fn living_of(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.units
            .iter()
            .filter(move |u| u.side == side && u.is_alive())
    }

    /// Placed living units of a side, in placement order
    pub fn active_of(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.units
            .iter()
            .filter(move |u| u.side == side && u.is_active())
    }

    pub fn active_count(&self, side: Side) -> usize {
        self.active_of(side).count()
    }

    /// True when the side has no living placed unit left
    pub fn side_defeated(&self, side: Side) -> bool {
        self.active_count(side) == 0
    }
}
