//! Action-point ledger
//!
//! One shared pool per turn-cycle. The budget is two points per living
//! placed actor of the side starting its cycle; only the turn sequencer
//! resets it.

use serde::{Deserialize, Serialize};

use crate::error::{BattleError, BattleResult};

/// Points granted per living actor at cycle start
pub const POINTS_PER_ACTOR: u32 = 2;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLedger {
    remaining: u32,
}

impl ActionLedger {
    pub fn new() -> Self {
        Self { remaining: 0 }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        cost <= self.remaining
    }

    /// Spend points, or fail leaving the balance untouched
    pub fn spend(&mut self, cost: u32) -> BattleResult<u32> {
        if cost > self.remaining {
            return Err(BattleError::InsufficientPoints {
                have: self.remaining,
                need: cost,
            });
        }
        self.remaining -= cost;
        Ok(self.remaining)
    }

    /// Reinitialize at cycle start
    pub fn reset(&mut self, budget: u32) {
        self.remaining = budget;
    }
}
