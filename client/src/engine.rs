//! Campaign engine for browser WASM builds
//!
//! This module provides the main game engine exposed to JavaScript via
//! wasm-bindgen. One instance owns a whole campaign run; JavaScript issues
//! the same commands a native caller would and polls JSON snapshots to
//! render from.

use hantu_battle::Position;
use hantu_game::{Session, SessionError, SessionView};
use wasm_bindgen::prelude::*;

const DEFAULT_SEED: u64 = 42;

/// The main game engine exposed to WASM
#[wasm_bindgen]
pub struct GameEngine {
    session: Session,
}

#[wasm_bindgen]
impl GameEngine {
    /// Create a new campaign run. Without a seed the enemy policy draws
    /// one from browser entropy.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> Self {
        log::info!("=== HANTU ENGINE INITIALIZED ===");
        GameEngine {
            session: Session::new(resolve_seed(seed)),
        }
    }

    /// Discard all progress and start over.
    #[wasm_bindgen]
    pub fn new_run(&mut self, seed: Option<u64>) {
        log::info!("starting a fresh run");
        self.session = Session::new(resolve_seed(seed));
    }

    /// Advance animation time. Settles the resolution window and gives
    /// the enemy side its turns.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f32) {
        self.session.tick(dt);
    }

    /// Place or re-place a party member during setup.
    #[wasm_bindgen]
    pub fn place_unit(&mut self, unit_id: &str, row: u8, col: u8) -> Result<(), String> {
        self.session
            .place_unit(unit_id, Position::new(row, col))
            .map_err(reject)
    }

    #[wasm_bindgen]
    pub fn start_battle(&mut self) -> Result<(), String> {
        self.session.start_battle().map_err(reject)
    }

    #[wasm_bindgen]
    pub fn select_actor(&mut self, unit_id: &str) -> Result<(), String> {
        self.session.select_actor(unit_id).map_err(reject)
    }

    /// Pick a skill for the selected actor; returns the legal target ids.
    #[wasm_bindgen]
    pub fn choose_skill(&mut self, skill_id: u32) -> Result<JsValue, String> {
        let targets = self.session.choose_skill(skill_id).map_err(reject)?;
        serde_wasm_bindgen::to_value(&targets)
            .map_err(|e| format!("target serialization failed: {:?}", e))
    }

    #[wasm_bindgen]
    pub fn choose_target(&mut self, unit_id: &str) -> Result<(), String> {
        self.session.choose_target(unit_id).map_err(reject)
    }

    /// Enter move mode; returns the cells the actor may step to.
    #[wasm_bindgen]
    pub fn begin_move(&mut self) -> Result<JsValue, String> {
        let cells = self.session.begin_move().map_err(reject)?;
        serde_wasm_bindgen::to_value(&cells)
            .map_err(|e| format!("cell serialization failed: {:?}", e))
    }

    #[wasm_bindgen]
    pub fn move_actor(&mut self, row: u8, col: u8) -> Result<(), String> {
        self.session
            .move_actor(Position::new(row, col))
            .map_err(reject)
    }

    #[wasm_bindgen]
    pub fn guard(&mut self) -> Result<(), String> {
        self.session.guard().map_err(reject)
    }

    #[wasm_bindgen]
    pub fn pass(&mut self) -> Result<(), String> {
        self.session.pass().map_err(reject)
    }

    #[wasm_bindgen]
    pub fn cancel_action(&mut self) -> Result<(), String> {
        self.session.cancel_action().map_err(reject)
    }

    /// Buy one copy of an item in the breaking room.
    #[wasm_bindgen]
    pub fn buy_item(&mut self, item_id: u32) -> Result<(), String> {
        self.session.buy_item(item_id).map_err(reject)
    }

    /// Use a carried item on a party member in the breaking room.
    #[wasm_bindgen]
    pub fn use_item(&mut self, item_id: u32, unit_id: &str) -> Result<(), String> {
        self.session.use_item(item_id, unit_id).map_err(reject)
    }

    /// Leave the breaking room for the next level.
    #[wasm_bindgen]
    pub fn continue_journey(&mut self) -> Result<(), String> {
        self.session.continue_journey().map_err(reject)
    }

    /// Jump to a level while no battle is running.
    #[wasm_bindgen]
    pub fn load_level(&mut self, number: u32) -> Result<(), String> {
        self.session.load_level(number).map_err(reject)
    }

    /// The full session snapshot as JSON
    #[wasm_bindgen]
    pub fn get_view(&self) -> JsValue {
        let view = SessionView::from_session(&self.session);
        match serde_wasm_bindgen::to_value(&view) {
            Ok(value) => value,
            Err(error) => {
                log::error!("get_view serialization failed: {:?}", error);
                JsValue::NULL
            }
        }
    }

    /// Every event the current battle has produced, oldest first
    #[wasm_bindgen]
    pub fn get_battle_events(&self) -> JsValue {
        match serde_wasm_bindgen::to_value(self.session.battle().events()) {
            Ok(value) => value,
            Err(error) => {
                log::error!("get_battle_events serialization failed: {:?}", error);
                JsValue::NULL
            }
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(Some(DEFAULT_SEED))
    }
}

/// Typed rejections cross the boundary as JSON so the page can branch on
/// the `type` tag instead of parsing prose.
fn reject(error: SessionError) -> String {
    serde_json::to_string(&error).unwrap_or_else(|_| format!("{:?}", error))
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(value) => value,
        None => {
            let mut bytes = [0u8; 8];
            match getrandom::getrandom(&mut bytes) {
                Ok(()) => u64::from_le_bytes(bytes),
                Err(error) => {
                    log::warn!("entropy unavailable ({:?}), seeding with default", error);
                    DEFAULT_SEED
                }
            }
        }
    }
}
