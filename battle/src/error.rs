//! Error types for battle commands
//!
//! Every command the controller exposes either applies a state change or
//! returns one of these variants. A rejected command is a no-op.

use serde::{Deserialize, Serialize};

use crate::grid::Position;
use crate::skill::SkillId;
use crate::unit::UnitId;

/// Battle errors that can occur while driving a battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BattleError {
    /// Command not allowed in the current phase
    WrongPhase,
    /// Actor is dead or sitting out the battle
    InvalidActor { unit: UnitId },
    /// Actor does not belong to the side whose turn it is
    NotYourTurn { unit: UnitId },
    /// Not enough action points left this cycle
    InsufficientPoints { have: u32, need: u32 },
    /// Not enough spirit points to cast the skill
    InsufficientSpirit { have: i32, need: i32 },
    /// Chosen target is not legal for the pending skill
    IllegalTarget,
    /// A resolution window is open; re-issue after it closes
    EngineBusy,
    /// Advance attempted while resolving or after battle end
    InvalidPhaseTransition,
    /// No unit with this id in the registry
    UnknownUnit { unit: UnitId },
    /// No skill with this id in the catalog
    UnknownSkill { skill: SkillId },
    /// The active actor does not know this skill
    UnknownTechnique { skill: SkillId },
    /// Battle cannot start without at least one placed player unit
    NoUnitsPlaced,
    /// Coordinate outside the board
    OutOfBounds { position: Position },
    /// Cell already holds a living unit
    CellOccupied { position: Position },
    /// Setup placement outside the unit's own zone
    WrongZone { position: Position },
    /// Target or cell chosen with no pending selection
    NoSelection,
    /// Move destination is not one orthogonal step away
    NotAdjacent { position: Position },
}

/// Result type alias for battle operations
pub type BattleResult<T> = Result<T, BattleError>;
