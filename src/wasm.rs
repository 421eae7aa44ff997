use js_sys::Function;
use serde::Serialize;
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::config::GameOptions;
use crate::game::{FirstEmptyCellSelector, GameEngine, MoveSelector, SubscriptionId};
use crate::save::{self, SavedGame};
use crate::types::{GameEvent, MoveRecord, Position};

/// JS handle to one engine. The frontend redraws from the values returned
/// here or pushed to subscribers.
#[wasm_bindgen]
pub struct HexGame {
    engine: GameEngine,
    selector: Box<dyn MoveSelector>,
}

#[wasm_bindgen]
impl HexGame {
    /// `options` may be `undefined` or a partial `GameOptions` object.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<HexGame, JsError> {
        let options = parse_options(options)?;
        Ok(Self {
            engine: GameEngine::new(options)?,
            selector: Box::new(FirstEmptyCellSelector),
        })
    }

    #[wasm_bindgen(js_name = boardSize)]
    pub fn board_size(&self) -> usize {
        self.engine.board().size()
    }

    /// Row-major cells, 0=empty, 1=A, 2=B.
    pub fn board(&self) -> Vec<u8> {
        self.engine.board().to_array()
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.engine.snapshot())
    }

    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, q: i32, r: i32) -> Result<JsValue, JsError> {
        let snapshot = self.engine.apply_move(Position::new(q, r))?;
        to_js(&snapshot)
    }

    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsError> {
        let snapshot = self.engine.apply_selected_move(self.selector.as_ref())?;
        to_js(&snapshot)
    }

    #[wasm_bindgen(js_name = swapFirstMove)]
    pub fn swap_first_move(&mut self) -> Result<JsValue, JsError> {
        let snapshot = self.engine.swap_first_move()?;
        to_js(&snapshot)
    }

    #[wasm_bindgen(js_name = replayTo)]
    pub fn replay_to(&mut self, index: usize) -> Result<JsValue, JsError> {
        let snapshot = self.engine.replay_to(index)?;
        to_js(&snapshot)
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) -> Result<JsValue, JsError> {
        let snapshot = self.engine.new_game()?;
        to_js(&snapshot)
    }

    pub fn reconfigure(&mut self, options: JsValue) -> Result<JsValue, JsError> {
        let options = parse_options(options)?;
        let snapshot = self.engine.reconfigure(options)?;
        to_js(&snapshot)
    }

    /// Empty until the game is won.
    #[wasm_bindgen(js_name = winningPath)]
    pub fn winning_path(&self) -> Result<JsValue, JsError> {
        to_js(&self.engine.winning_path())
    }

    pub fn history(&self) -> Result<JsValue, JsError> {
        to_js(&self.engine.history().moves())
    }

    /// Display strings for the move list panel, e.g. `"1. A b2"`.
    #[wasm_bindgen(js_name = moveNotations)]
    pub fn move_notations(&self) -> Vec<String> {
        self.engine
            .history()
            .moves()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// `callback` receives every `GameEvent`. It must not call back into
    /// this object synchronously.
    pub fn subscribe(&mut self, callback: Function) -> SubscriptionId {
        self.engine.subscribe(move |event: &GameEvent| {
            let value = match serde_wasm_bindgen::to_value(event) {
                Ok(value) => value,
                Err(e) => {
                    warn!(error = %e, "failed to serialize game event");
                    return;
                }
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                warn!(error = ?e, "game event callback threw");
            }
        })
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.engine.unsubscribe(id)
    }

    /// Pretty-printed saved-game JSON.
    #[wasm_bindgen(js_name = saveGame)]
    pub fn save_game(&self) -> Result<String, JsError> {
        Ok(self.engine.to_saved_game()?.to_json()?)
    }

    /// Loads a saved-game JSON document. On an illegal record the moves
    /// before it stay applied and the error names how many were applied.
    #[wasm_bindgen(js_name = loadGame)]
    pub fn load_game(&mut self, json: &str) -> Result<JsValue, JsError> {
        let saved = SavedGame::from_json(json)?;
        let snapshot = self.engine.load_saved_game(&saved)?;
        to_js(&snapshot)
    }

    /// Replays a bare move list on the current board size.
    #[wasm_bindgen(js_name = loadMoves)]
    pub fn load_moves(&mut self, moves: JsValue) -> Result<JsValue, JsError> {
        let moves: Vec<MoveRecord> = serde_wasm_bindgen::from_value(moves)?;
        let snapshot = self.engine.load_moves(&moves)?;
        to_js(&snapshot)
    }

    #[wasm_bindgen(js_name = suggestedFileName)]
    pub fn suggested_file_name() -> String {
        save::suggested_file_name()
    }
}

fn parse_options(options: JsValue) -> Result<GameOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(GameOptions::default());
    }
    Ok(serde_wasm_bindgen::from_value(options)?)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}
