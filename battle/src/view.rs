//! Read-only battle snapshots
//!
//! `BattleView` flattens the controller into one serializable value a UI
//! can render without further queries.

use serde::{Deserialize, Serialize};

use crate::controller::{ActionMenu, BattleController, Selection};
use crate::sequencer::Phase;
use crate::unit::{Side, Unit, UnitId};

/// How many log lines a view carries, newest first
pub const LOG_TAIL: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleView {
    pub phase: Phase,
    pub winner: Option<Side>,
    pub active_side: Side,
    pub action_points: u32,
    pub current_actor: Option<UnitId>,
    pub busy: bool,
    pub selection: Selection,
    pub units: Vec<Unit>,
    pub menu: Option<ActionMenu>,
    pub log: Vec<String>,
}

impl BattleView {
    pub fn from_controller(controller: &BattleController) -> Self {
        let log = controller
            .events()
            .iter()
            .rev()
            .take(LOG_TAIL)
            .map(|e| e.to_string())
            .collect();
        Self {
            phase: controller.phase(),
            winner: controller.winner(),
            active_side: controller.active_side(),
            action_points: controller.action_points(),
            current_actor: controller.current_actor().cloned(),
            busy: controller.is_busy(),
            selection: controller.selection().clone(),
            units: controller.registry().units().to_vec(),
            menu: controller.menu(),
            log,
        }
    }
}
