use serde::{Deserialize, Serialize};
use tracing::debug;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::config::{AiDifficulty, GameMode, GameOptions};
use crate::error::GameError;
use crate::game::GameEngine;
use crate::types::{GameSnapshot, MoveRecord, Player};

/// Saved-game document for the save/load dialog. Only `moves` drives a
/// load; `game_state` is recomputed by replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub board_size: usize,
    pub first_player: Player,
    #[serde(default)]
    pub game_mode: GameMode,
    #[serde(default)]
    pub ai_difficulty: AiDifficulty,
    pub moves: Vec<MoveRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<SavedGameState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGameState {
    pub current_player: Player,
    pub game_over: bool,
    pub winner: Option<Player>,
    pub move_count: u32,
    pub swap_rule: bool,
    pub swap_available: bool,
}

impl SavedGame {
    pub fn options(&self) -> GameOptions {
        GameOptions {
            board_size: self.board_size,
            first_player: self.first_player,
            game_mode: self.game_mode,
            ai_difficulty: self.ai_difficulty,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl GameEngine {
    /// Captures options, the full move list and the current state.
    pub fn to_saved_game(&self) -> Result<SavedGame, GameError> {
        if self.history().is_empty() {
            return Err(GameError::NothingToSave);
        }
        let options = self.options();
        Ok(SavedGame {
            board_size: options.board_size,
            first_player: options.first_player,
            game_mode: options.game_mode,
            ai_difficulty: options.ai_difficulty,
            moves: self.history().moves().to_vec(),
            game_state: Some(SavedGameState {
                current_player: self.current_player(),
                game_over: self.is_game_over(),
                winner: self.winner(),
                move_count: self.move_count(),
                swap_rule: self.swap_rule_used(),
                swap_available: self.swap_available(),
            }),
        })
    }

    /// Adopts the saved options and replays the saved moves.
    ///
    /// Invalid options leave the engine untouched. An illegal record stops
    /// the replay with [`GameError::InvalidRecord`] and keeps the moves
    /// applied before it.
    pub fn load_saved_game(&mut self, saved: &SavedGame) -> Result<GameSnapshot, GameError> {
        let options = saved.options();
        options.validate()?;
        self.set_options(options);
        debug!(size = options.board_size, moves = saved.moves.len(), "loading saved game");
        self.load_moves(&saved.moves)
    }
}

/// `hex_game_<unix-millis>.json`.
pub fn suggested_file_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("hex_game_{millis}.json")
}
