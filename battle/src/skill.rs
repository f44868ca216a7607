//! Skill catalog types and combat vocabulary
//!
//! Skills are immutable catalog entries loaded once per battle. Units refer
//! to them by id; nothing here is mutated while a battle runs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for catalog skills
pub type SkillId = u32;

/// Damage typing carried by units and skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Element {
    Physical,
    Fire,
    Ice,
    Wind,
    BlackMagic,
    Special,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Element::Physical => "PHYSICAL",
            Element::Fire => "FIRE",
            Element::Ice => "ICE",
            Element::Wind => "WIND",
            Element::BlackMagic => "BLACK_MAGIC",
            Element::Special => "SPECIAL",
        };
        write!(f, "{}", label)
    }
}

/// A unit's reaction to an incoming element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Affinity {
    /// Full damage
    Normal,
    /// Double damage, and the strike's point cost drops by one
    Weak,
    /// Half damage, floored
    Resist,
    /// No damage
    Null,
    /// The target heals the amount instead
    Drain,
    /// The attacker takes the amount instead
    Deflect,
}

/// Timed modifiers a unit can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusKind {
    /// Damages the owner at its side's cycle start
    Poison,
    /// Flat bonus to outgoing damage
    AttackUp,
    /// Flat penalty to outgoing damage
    AttackDown,
    /// Flat bonus to damage taken
    DefenseDown,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusKind::Poison => "POISON",
            StatusKind::AttackUp => "ATTACK_UP",
            StatusKind::AttackDown => "ATTACK_DOWN",
            StatusKind::DefenseDown => "DEFENSE_DOWN",
        };
        write!(f, "{}", label)
    }
}

/// What a skill does to each resolved target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SkillEffect {
    /// Elemental damage rolled against the target's affinity
    #[serde(rename_all = "camelCase")]
    Damage { amount: i32 },
    /// Restores hit points up to the target's maximum
    #[serde(rename_all = "camelCase")]
    Heal { amount: i32 },
    /// Applies or refreshes a timed status
    #[serde(rename_all = "camelCase")]
    ApplyStatus {
        kind: StatusKind,
        value: i32,
        duration: u32,
    },
}

/// How a skill's click input expands into the affected unit set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetingMode {
    /// One living opponent, chosen individually
    SingleEnemy,
    /// One living ally, chosen individually
    SingleAlly,
    /// Clicking any living opponent commits the whole opposing side
    AllEnemies,
    /// Clicking any living ally commits the caster's whole side
    AllAllies,
    /// The caster, regardless of what was clicked
    SelfOnly,
    /// Nearest unit ahead per row; a friendly unit blocks the lane
    Projectile,
    /// Opponents standing in the back column only
    Throwable,
}

/// An immutable skill catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub description: String,
    pub element: Element,
    pub effect: SkillEffect,
    pub targeting: TargetingMode,
    /// Action points consumed (before any weakness discount)
    pub point_cost: u32,
    /// Spirit points consumed by the caster
    pub sp_cost: i32,
    /// Optional Chebyshev range filter applied before mode expansion
    pub max_range: Option<u8>,
}

impl Skill {
    pub fn new(
        id: SkillId,
        name: &str,
        element: Element,
        effect: SkillEffect,
        targeting: TargetingMode,
        point_cost: u32,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: String::new(),
            element,
            effect,
            targeting,
            point_cost,
            sp_cost: 0,
            max_range: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_sp_cost(mut self, sp_cost: i32) -> Self {
        self.sp_cost = sp_cost;
        self
    }

    pub fn with_range(mut self, max_range: u8) -> Self {
        self.max_range = Some(max_range);
        self
    }

    /// True when the effect rolls the target's affinity table
    pub fn deals_damage(&self) -> bool {
        matches!(self.effect, SkillEffect::Damage { .. })
    }
}
