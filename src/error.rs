use crate::types::Position;

/// Failures raised by [`crate::board::Board`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board size must be at least 1, got {0}")]
    InvalidSize(usize),

    #[error("position {pos} is outside a {size}x{size} board")]
    OutOfBounds { pos: Position, size: usize },

    #[error("cell {0} is already occupied")]
    CellOccupied(Position),
}

/// Failures raised by [`crate::history::MoveHistory`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("history index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("the opening move can no longer be marked as swapped")]
    SwapNotMarkable,
}

/// Failures raised by [`crate::game::GameEngine`] and the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("move rejected: {0}")]
    MoveRejected(#[source] BoardError),

    #[error("game is already over")]
    GameOver,

    #[error("swap rule is not available")]
    SwapNotAvailable,

    /// History navigation errors, `IndexOutOfRange` included, pass through
    /// unchanged.
    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("invalid move record #{index} ({applied} applied before it): {reason}")]
    InvalidRecord {
        index: usize,
        applied: usize,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("move selector returned no move")]
    NoMoveAvailable,

    #[error("no moves to save")]
    NothingToSave,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
