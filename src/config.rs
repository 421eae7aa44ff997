use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::types::Player;

pub const DEFAULT_BOARD_SIZE: usize = 11;
/// Largest board whose columns still fit the `a`..`z` notation.
pub const MAX_BOARD_SIZE: usize = 26;

/// Who plays the second side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    #[default]
    HumanHuman,
    HumanAi,
}

/// Carried through saves for the frontend; the engine itself does not
/// interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AiDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Options a game is created with. Missing fields fall back to defaults, so
/// the frontend may pass a partial object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameOptions {
    pub board_size: usize,
    pub first_player: Player,
    pub game_mode: GameMode,
    pub ai_difficulty: AiDifficulty,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            first_player: Player::A,
            game_mode: GameMode::default(),
            ai_difficulty: AiDifficulty::default(),
        }
    }
}

impl GameOptions {
    pub fn with_board_size(board_size: usize) -> Self {
        Self {
            board_size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.board_size == 0 {
            return Err(GameError::InvalidConfig("boardSize must be > 0".into()));
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "boardSize must be <= {MAX_BOARD_SIZE}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_board() {
        let options = GameOptions::default();

        assert_eq!(options.board_size, 11);
        assert_eq!(options.first_player, Player::A);
        assert_eq!(options.game_mode, GameMode::HumanHuman);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let options: GameOptions =
            serde_json::from_str(r#"{ "boardSize": 7, "gameMode": "human-ai" }"#).unwrap();

        assert_eq!(options.board_size, 7);
        assert_eq!(options.game_mode, GameMode::HumanAi);
        assert_eq!(options.first_player, Player::A);
        assert_eq!(options.ai_difficulty, AiDifficulty::Medium);
    }

    #[test]
    fn validate_rejects_zero_and_oversized_boards() {
        let err = GameOptions::with_board_size(0).validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration: boardSize must be > 0");

        assert!(GameOptions::with_board_size(27).validate().is_err());
        assert!(GameOptions::with_board_size(26).validate().is_ok());
    }
}
