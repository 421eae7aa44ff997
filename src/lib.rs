use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod game;
pub mod history;
pub mod save;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::{AiDifficulty, GameMode, GameOptions};
pub use error::{BoardError, GameError, HistoryError};
pub use game::{FirstEmptyCellSelector, GameEngine, MoveSelector, SubscriptionId};
pub use history::MoveHistory;
pub use save::SavedGame;
pub use types::{Cell, GameEvent, GameSnapshot, MoveRecord, Player, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
