//! WebAssembly bindings for the Mancala game engine.
//!
//! This module exposes a human-versus-bot session to JavaScript through
//! wasm-bindgen. Everything crosses the boundary as JSON.

use wasm_bindgen::prelude::*;

use crate::bot::BotDifficulty;
use crate::config::GameConfig;
use crate::game::GameSession;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[wasm_bindgen]
pub struct WasmGame {
    session: GameSession,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game against the bot
    /// difficulty: "Easy" or "Medium"
    #[wasm_bindgen(constructor)]
    pub fn new(stones_per_pit: u32, difficulty: &str) -> Result<WasmGame, JsValue> {
        let difficulty: BotDifficulty = difficulty
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{}", e)))?;

        let config = GameConfig {
            stones_per_pit,
            difficulty,
            ..GameConfig::default()
        };

        GameSession::with_bot(config)
            .map(|session| WasmGame { session })
            .map_err(|e| JsValue::from_str(&format!("Could not start game: {}", e)))
    }

    /// Get the board snapshot as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the current phase as JSON
    #[wasm_bindgen(js_name = getPhase)]
    pub fn get_phase(&self) -> String {
        serde_json::to_string(self.session.phase()).unwrap_or_else(|_| "\"Unknown\"".to_string())
    }

    /// Get the human's legal pits as a JSON array
    #[wasm_bindgen(js_name = getValidMoves)]
    pub fn get_valid_moves(&self) -> String {
        let moves = self.session.legal_moves(self.session.human_side());
        serde_json::to_string(&moves).unwrap_or_else(|_| "[]".to_string())
    }

    /// Play a whole move for the human, returns events JSON or error
    #[wasm_bindgen(js_name = playMove)]
    pub fn play_move(&mut self, pit: usize) -> Result<String, JsValue> {
        let side = self.session.human_side();
        match self.session.play_move(side, pit) {
            Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
            Err(e) => Err(JsValue::from_str(&format!("Move failed: {}", e))),
        }
    }

    /// Start a human move without sowing it; pull events with `step`
    #[wasm_bindgen(js_name = beginMove)]
    pub fn begin_move(&mut self, pit: usize) -> Result<(), JsValue> {
        let side = self.session.human_side();
        self.session
            .begin_move(side, pit)
            .map_err(|e| JsValue::from_str(&format!("Move failed: {}", e)))
    }

    /// Next event JSON for animation, or "null" when waiting for input
    #[wasm_bindgen]
    pub fn step(&mut self) -> String {
        serde_json::to_string(&self.session.step()).unwrap_or_else(|_| "null".to_string())
    }

    /// Check if the game is finished
    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        !self.session.is_active()
    }

    /// Get the outcome as JSON (null while playing)
    #[wasm_bindgen(js_name = getOutcome)]
    pub fn get_outcome(&self) -> String {
        serde_json::to_string(&self.session.outcome()).unwrap_or_else(|_| "null".to_string())
    }
}
