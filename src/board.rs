use crate::error::BoardError;
use crate::types::{Cell, Player, Position};

/// Hex neighbor offsets `(dq, dr)`. Order matters: path search tries them
/// in exactly this sequence.
pub const NEIGHBORS: [(i32, i32); 6] = [(-1, 0), (1, 0), (0, -1), (0, 1), (-1, 1), (1, -1)];

/// N×N occupancy grid, stored row-major (`r * size + q`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an all-empty board.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        // Coordinates are i32, so the side length must fit one.
        if size == 0 || i32::try_from(size).is_err() {
            return Err(BoardError::InvalidSize(size));
        }
        let len = size.checked_mul(size).ok_or(BoardError::InvalidSize(size))?;
        Ok(Self {
            size,
            cells: vec![Cell::Empty; len],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        in_bounds(pos, self.size)
    }

    pub fn get(&self, pos: Position) -> Result<Cell, BoardError> {
        let idx = self.index_of(pos)?;
        Ok(self.cells[idx])
    }

    /// Places one stone. Fails without touching the board when the cell is
    /// out of range or already taken.
    pub fn place(&mut self, pos: Position, player: Player) -> Result<(), BoardError> {
        let idx = self.index_of(pos)?;
        if !self.cells[idx].is_empty() {
            return Err(BoardError::CellOccupied(pos));
        }
        self.cells[idx] = Cell::Stone(player);
        Ok(())
    }

    /// Resets a cell to empty. Only the swap rule uses this.
    pub fn clear(&mut self, pos: Position) -> Result<(), BoardError> {
        let idx = self.index_of(pos)?;
        self.cells[idx] = Cell::Empty;
        Ok(())
    }

    /// True when `pos` is on the board and holds `player`'s stone.
    pub fn is_owned_by(&self, pos: Position, player: Player) -> bool {
        self.index_of(pos)
            .map(|idx| self.cells[idx] == Cell::Stone(player))
            .unwrap_or(false)
    }

    /// Returns `(a_count, b_count)`.
    pub fn count(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(a, b), cell| match cell {
            Cell::Stone(Player::A) => (a + 1, b),
            Cell::Stone(Player::B) => (a, b + 1),
            Cell::Empty => (a, b),
        })
    }

    /// Returns the number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Empty cells in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| self.position_of(idx))
            .collect()
    }

    /// Converts the board to a flat row-major vector where
    /// 0=empty, 1=A, 2=B.
    pub fn to_array(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.to_u8()).collect()
    }

    fn index_of(&self, pos: Position) -> Result<usize, BoardError> {
        if !in_bounds(pos, self.size) {
            return Err(BoardError::OutOfBounds {
                pos,
                size: self.size,
            });
        }
        Ok(pos.r as usize * self.size + pos.q as usize)
    }

    fn position_of(&self, idx: usize) -> Position {
        Position::new((idx % self.size) as i32, (idx / self.size) as i32)
    }
}

pub(crate) fn in_bounds(pos: Position, size: usize) -> bool {
    let within = |c: i32| usize::try_from(c).is_ok_and(|c| c < size);
    within(pos.q) && within(pos.r)
}
