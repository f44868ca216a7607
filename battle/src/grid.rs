//! Board geometry
//!
//! The board is a fixed 4x5 grid. Columns 0-1 belong to the player, column
//! 2 is neutral ground, columns 3-4 belong to the enemy. Zones bind setup
//! placement only; units may move anywhere once the battle runs.

use serde::{Deserialize, Serialize};

/// Number of rows on the board
pub const ROWS: u8 = 4;
/// Number of columns on the board
pub const COLS: u8 = 5;

/// Zone a cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Zone {
    PlayerZone,
    EnemyZone,
    Neutral,
}

/// A cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// Zone membership, fixed by column
    pub fn zone(&self) -> Zone {
        if self.col < 2 {
            Zone::PlayerZone
        } else if self.col > 2 {
            Zone::EnemyZone
        } else {
            Zone::Neutral
        }
    }

    /// Chebyshev distance, the range metric for skills
    pub fn distance(&self, other: &Position) -> u8 {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr.max(dc)
    }

    /// True when `other` is exactly one orthogonal step away
    pub fn is_adjacent(&self, other: &Position) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr + dc == 1
    }
}

/// A cell with its zone tag, for renderers and placement checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub position: Position,
    pub zone: Zone,
}

/// Every cell of the board in row-major order
pub fn board_cells() -> Vec<GridCell> {
    let mut cells = Vec::with_capacity((ROWS as usize) * (COLS as usize));
    for row in 0..ROWS {
        for col in 0..COLS {
            let position = Position::new(row, col);
            cells.push(GridCell {
                position,
                zone: position.zone(),
            });
        }
    }
    cells
}
