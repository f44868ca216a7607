//! Deterministic tactics battle engine
//!
//! A battle is a pure state machine: commands go in through
//! [`BattleController`], events and views come out, and time only advances
//! through [`BattleController::tick`].

mod controller;
mod error;
mod events;
mod executor;
mod grid;
mod ledger;
mod rng;
mod sequencer;
mod skill;
pub mod targeting;
mod unit;
mod view;

#[cfg(test)]
mod tests;

pub use controller::{ActionMenu, BattleController, MenuEntry, Selection, RESOLVE_WINDOW};
pub use error::{BattleError, BattleResult};
pub use events::BattleEvent;
pub use executor::SIMPLE_ACTION_COST;
pub use grid::{board_cells, GridCell, Position, Zone, COLS, ROWS};
pub use ledger::{ActionLedger, POINTS_PER_ACTOR};
pub use rng::{BattleRng, GameRng};
pub use sequencer::{Phase, TurnSequencer, PASSIVE_REGEN};
pub use skill::{Affinity, Element, Skill, SkillEffect, SkillId, StatusKind, TargetingMode};
pub use unit::{Side, StatusEffect, Unit, UnitId, UnitRegistry};
pub use view::{BattleView, LOG_TAIL};
