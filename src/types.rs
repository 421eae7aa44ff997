use std::fmt;

use serde::{Deserialize, Serialize};

/// A board coordinate. `q` is the column, `r` is the row.
///
/// Components are signed so that out-of-range values read from a saved
/// move list reach the legality checks instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub q: i32,
    pub r: i32,
}

impl Position {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Point reflection through the board center: `(size-1-q, size-1-r)`.
    pub fn reflected(self, size: usize) -> Self {
        let last = size as i32 - 1;
        Self {
            q: last - self.q,
            r: last - self.r,
        }
    }

    /// Column letter plus 1-based row, e.g. `a1`, `e5`.
    pub fn notation(self) -> String {
        match u8::try_from(self.q) {
            Ok(q) if q < 26 => format!("{}{}", (b'a' + q) as char, self.r + 1),
            _ => format!("({},{})", self.q, self.r),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// One of the two sides.
///
/// `A` connects the left and right columns (`q = 0` to `q = size-1`).
/// `B` connects the top and bottom rows (`r = 0` to `r = size-1`).
///
/// Older save files name the sides by color; those names are accepted on
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[serde(alias = "red")]
    A,
    #[serde(alias = "blue")]
    B,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Cell encoding used by [`crate::board::Board::to_array`].
    pub fn to_u8(self) -> u8 {
        match self {
            Player::A => 1,
            Player::B => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => f.write_str("A"),
            Player::B => f.write_str("B"),
        }
    }
}

/// Occupant of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Stone(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Stone(player) => player.to_u8(),
        }
    }
}

/// A single entry of the move list, also the persisted record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub player: Player,
    pub position: Position,
    /// 1-based.
    pub move_number: u32,
    #[serde(default)]
    pub swap_used: bool,
    #[serde(
        default,
        alias = "newPosition",
        skip_serializing_if = "Option::is_none"
    )]
    pub swap_new_position: Option<Position>,
}

impl MoveRecord {
    pub fn new(player: Player, position: Position, move_number: u32) -> Self {
        Self {
            player,
            position,
            move_number,
            swap_used: false,
            swap_new_position: None,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} {}",
            self.move_number,
            self.player,
            self.position.notation()
        )?;
        if let (true, Some(to)) = (self.swap_used, self.swap_new_position) {
            write!(f, " → {} (swap)", to.notation())?;
        }
        Ok(())
    }
}

/// Public game state handed to subscribers after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub current_player: Player,
    pub game_over: bool,
    pub winner: Option<Player>,
    pub move_count: u32,
    pub swap_available: bool,
    pub swap_rule_used: bool,
    pub history_len: usize,
    /// Contract:
    /// - `None` when the history is empty.
    /// - Otherwise the index of the move the board currently reflects.
    pub cursor: Option<usize>,
}

/// Notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    StateChanged(GameSnapshot),
    #[serde(rename_all = "camelCase")]
    MoveAdded { index: usize, record: MoveRecord },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflection_is_through_board_center() {
        assert_eq!(Position::new(1, 1).reflected(5), Position::new(3, 3));
        assert_eq!(Position::new(0, 4).reflected(5), Position::new(4, 0));
        assert_eq!(Position::new(2, 2).reflected(5), Position::new(2, 2));
    }

    #[test]
    fn notation_uses_column_letter_and_one_based_row() {
        assert_eq!(Position::new(0, 0).notation(), "a1");
        assert_eq!(Position::new(4, 10).notation(), "e11");
    }

    #[test]
    fn swapped_record_renders_both_positions() {
        let mut record = MoveRecord::new(Player::A, Position::new(1, 1), 1);
        assert_eq!(record.to_string(), "1. A b2");

        record.swap_used = true;
        record.swap_new_position = Some(Position::new(3, 3));
        assert_eq!(record.to_string(), "1. A b2 → d4 (swap)");
    }

    #[test]
    fn record_wire_shape_uses_camel_case_and_letter_players() {
        let record = MoveRecord::new(Player::B, Position::new(2, 0), 3);
        let json = serde_json::to_value(record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "player": "B",
                "position": { "q": 2, "r": 0 },
                "moveNumber": 3,
                "swapUsed": false
            })
        );
    }

    #[test]
    fn record_accepts_legacy_new_position_key() {
        let json = r#"{
            "player": "A",
            "position": { "q": 1, "r": 1 },
            "moveNumber": 1,
            "swapUsed": true,
            "newPosition": { "q": 3, "r": 3 }
        }"#;

        let record: MoveRecord = serde_json::from_str(json).unwrap();

        assert!(record.swap_used);
        assert_eq!(record.swap_new_position, Some(Position::new(3, 3)));
    }
}
