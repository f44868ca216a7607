//! Skirmish mode for custom battles
//!
//! Free battles outside the campaign. The page supplies a roster, then
//! either drives the fight with the usual commands or lets both sides
//! play themselves and replays the transcript.

use hantu_assets::{skills, units};
use hantu_battle::{
    board_cells, BattleController, BattleError, BattleView, Phase, Position, Side, Unit,
    RESOLVE_WINDOW,
};
use hantu_game::{CommandPolicy, RandomPolicy};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

const MAX_AUTO_TICKS: u32 = 10_000;

/// One requested combatant in a custom battle
#[derive(Debug, Clone, Deserialize)]
pub struct SkirmishUnit {
    pub template: String,
    pub side: Side,
    pub row: u8,
    pub col: u8,
}

/// All unit templates a custom battle can draw from
#[wasm_bindgen]
pub fn get_unit_templates() -> JsValue {
    let previews: Vec<Unit> = units::all_templates()
        .into_iter()
        .filter_map(|template| units::spawn(template, template, Side::Enemy))
        .collect();
    serde_wasm_bindgen::to_value(&previews).unwrap_or(JsValue::NULL)
}

/// The full skill catalog as JSON
#[wasm_bindgen]
pub fn get_skill_catalog() -> JsValue {
    serde_wasm_bindgen::to_value(&skills::catalog()).unwrap_or(JsValue::NULL)
}

/// The board cells with their deployment zones, for drawing the grid
#[wasm_bindgen]
pub fn get_board() -> JsValue {
    serde_wasm_bindgen::to_value(&board_cells()).unwrap_or(JsValue::NULL)
}

/// A single free battle exposed to WASM
#[wasm_bindgen]
pub struct SkirmishEngine {
    controller: BattleController,
    policy: RandomPolicy,
}

#[wasm_bindgen]
impl SkirmishEngine {
    /// Build a battle from a custom roster. Unknown templates are
    /// skipped with a warning; ids are handed out per side.
    #[wasm_bindgen(constructor)]
    pub fn new(units_js: JsValue, seed: u64) -> Result<SkirmishEngine, String> {
        let specs: Vec<SkirmishUnit> = serde_wasm_bindgen::from_value(units_js)
            .map_err(|e| format!("roster parse failed: {:?}", e))?;
        let mut roster = Vec::new();
        let mut players = 0;
        let mut enemies = 0;
        for spec in &specs {
            let id = match spec.side {
                Side::Player => {
                    players += 1;
                    format!("p{}", players)
                }
                Side::Enemy => {
                    enemies += 1;
                    format!("e{}", enemies)
                }
            };
            match units::spawn(&spec.template, &id, spec.side) {
                Some(unit) => {
                    roster.push(unit.with_position(Position::new(spec.row, spec.col)))
                }
                None => log::warn!("skirmish roster names unknown template {}", spec.template),
            }
        }
        Ok(SkirmishEngine {
            controller: BattleController::new(roster, skills::catalog()),
            policy: RandomPolicy::new(seed),
        })
    }

    /// The tutorial board: Raka and his tuyul against the starter spirits.
    #[wasm_bindgen]
    pub fn starter(seed: u64) -> SkirmishEngine {
        let mut roster = units::starter_party();
        roster.extend(units::starter_enemies());
        SkirmishEngine {
            controller: BattleController::new(roster, skills::catalog()),
            policy: RandomPolicy::new(seed),
        }
    }

    /// Advance animation time; the enemy side acts on idle turns.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f32) {
        self.controller.tick(dt);
        if self.controller.phase() == Phase::EnemyTurn && !self.controller.is_busy() {
            if let Err(error) = self.policy.act(&mut self.controller) {
                log::warn!("enemy policy stalled: {:?}", error);
            }
        }
    }

    #[wasm_bindgen]
    pub fn place_unit(&mut self, unit_id: &str, row: u8, col: u8) -> Result<(), String> {
        self.controller
            .place_unit(unit_id, Position::new(row, col))
            .map_err(reject)
    }

    #[wasm_bindgen]
    pub fn start_battle(&mut self) -> Result<(), String> {
        self.controller.start_battle().map_err(reject)
    }

    #[wasm_bindgen]
    pub fn select_actor(&mut self, unit_id: &str) -> Result<(), String> {
        self.controller.select_actor(unit_id).map_err(reject)
    }

    /// Pick a skill for the selected actor; returns the legal target ids.
    #[wasm_bindgen]
    pub fn choose_skill(&mut self, skill_id: u32) -> Result<JsValue, String> {
        let targets = self.controller.choose_skill(skill_id).map_err(reject)?;
        serde_wasm_bindgen::to_value(&targets)
            .map_err(|e| format!("target serialization failed: {:?}", e))
    }

    #[wasm_bindgen]
    pub fn choose_target(&mut self, unit_id: &str) -> Result<(), String> {
        self.controller.choose_target(unit_id).map_err(reject)
    }

    /// Enter move mode; returns the cells the actor may step to.
    #[wasm_bindgen]
    pub fn begin_move(&mut self) -> Result<JsValue, String> {
        let cells = self.controller.begin_move().map_err(reject)?;
        serde_wasm_bindgen::to_value(&cells)
            .map_err(|e| format!("cell serialization failed: {:?}", e))
    }

    #[wasm_bindgen]
    pub fn move_actor(&mut self, row: u8, col: u8) -> Result<(), String> {
        self.controller
            .move_actor(Position::new(row, col))
            .map_err(reject)
    }

    #[wasm_bindgen]
    pub fn guard(&mut self) -> Result<(), String> {
        self.controller.guard().map_err(reject)
    }

    #[wasm_bindgen]
    pub fn pass(&mut self) -> Result<(), String> {
        self.controller.pass().map_err(reject)
    }

    #[wasm_bindgen]
    pub fn cancel_action(&mut self) -> Result<(), String> {
        self.controller.cancel_action().map_err(reject)
    }

    /// Let both sides play themselves to the end and return the full
    /// event transcript for playback.
    #[wasm_bindgen]
    pub fn auto_resolve(&mut self) -> Result<JsValue, String> {
        if self.controller.phase() == Phase::Setup {
            self.controller.start_battle().map_err(reject)?;
        }
        let mut ticks = 0;
        while self.controller.phase() != Phase::BattleOver && ticks < MAX_AUTO_TICKS {
            if !self.controller.is_busy() {
                if let Err(error) = self.policy.act(&mut self.controller) {
                    log::warn!("auto-resolve stalled: {:?}", error);
                    break;
                }
            }
            self.controller.tick(RESOLVE_WINDOW);
            ticks += 1;
        }
        serde_wasm_bindgen::to_value(self.controller.events())
            .map_err(|e| format!("event serialization failed: {:?}", e))
    }

    /// The battle snapshot as JSON
    #[wasm_bindgen]
    pub fn get_view(&self) -> JsValue {
        let view = BattleView::from_controller(&self.controller);
        match serde_wasm_bindgen::to_value(&view) {
            Ok(value) => value,
            Err(error) => {
                log::error!("get_view serialization failed: {:?}", error);
                JsValue::NULL
            }
        }
    }

    /// Every event so far, oldest first
    #[wasm_bindgen]
    pub fn get_events(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.controller.events()).unwrap_or(JsValue::NULL)
    }
}

fn reject(error: BattleError) -> String {
    serde_json::to_string(&error).unwrap_or_else(|_| format!("{:?}", error))
}
