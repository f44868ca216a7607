//! Errors for campaign sessions
//!
//! Battle rejections pass through wrapped; the remaining variants belong
//! to the between-battle layer.

use hantu_battle::{BattleError, UnitId};
use hantu_assets::items::ItemId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionError {
    /// The battle engine refused the command
    #[serde(rename_all = "camelCase")]
    Battle { error: BattleError },
    /// Command does not belong to the current scene
    WrongScene,
    /// A battle is still in progress
    BattleStillRunning,
    /// No item with this id exists
    #[serde(rename_all = "camelCase")]
    UnknownItem { item: ItemId },
    /// The shop shelf for this item is empty
    #[serde(rename_all = "camelCase")]
    SoldOut { item: ItemId },
    /// The party does not carry this item
    #[serde(rename_all = "camelCase")]
    ItemNotOwned { item: ItemId },
    /// Not enough money
    #[serde(rename_all = "camelCase")]
    InsufficientFunds { have: u32, need: u32 },
    /// No party member with this id
    #[serde(rename_all = "camelCase")]
    UnknownUnit { unit: UnitId },
    /// Items cannot raise the fallen
    #[serde(rename_all = "camelCase")]
    UnitDown { unit: UnitId },
    /// No campaign level with this number
    #[serde(rename_all = "camelCase")]
    UnknownLevel { level: u32 },
}

impl From<BattleError> for SessionError {
    fn from(error: BattleError) -> Self {
        SessionError::Battle { error }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
