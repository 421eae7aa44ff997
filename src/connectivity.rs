use crate::board::{Board, NEIGHBORS};
use crate::types::{Player, Position};

/// Returns `true` when `player` links their two edges. A/red joins column 0 to
/// the last column; B/blue joins row 0 to the last row.
pub fn is_connected(board: &Board, player: Player) -> bool {
    search(board, player).is_some()
}

/// Returns the first connecting path found, start edge first, or an empty
/// vector when the player is not connected.
///
/// Start cells are tried in index order and neighbors in [`NEIGHBORS`]
/// order, so the result is fixed for a given board. It is not necessarily
/// the shortest path.
pub fn find_path(board: &Board, player: Player) -> Vec<Position> {
    search(board, player).unwrap_or_default()
}

fn search(board: &Board, player: Player) -> Option<Vec<Position>> {
    let size = board.size();
    let mut visited = vec![false; size * size];
    let idx = |pos: Position| pos.r as usize * size + pos.q as usize;

    for i in 0..size as i32 {
        let start = start_cell(player, i);
        if !board.is_owned_by(start, player) || visited[idx(start)] {
            continue;
        }

        visited[idx(start)] = true;
        if reaches_end(player, start, size) {
            return Some(vec![start]);
        }

        // (cell, index of the next neighbor offset to try)
        let mut stack: Vec<(Position, usize)> = vec![(start, 0)];
        while let Some(frame) = stack.last_mut() {
            let (pos, next) = *frame;
            if next == NEIGHBORS.len() {
                stack.pop();
                continue;
            }
            frame.1 += 1;

            let (dq, dr) = NEIGHBORS[next];
            let neighbor = Position::new(pos.q + dq, pos.r + dr);
            if !board.is_owned_by(neighbor, player) || visited[idx(neighbor)] {
                continue;
            }

            visited[idx(neighbor)] = true;
            if reaches_end(player, neighbor, size) {
                let mut path: Vec<Position> = stack.iter().map(|(p, _)| *p).collect();
                path.push(neighbor);
                return Some(path);
            }
            stack.push((neighbor, 0));
        }
    }

    None
}

fn start_cell(player: Player, i: i32) -> Position {
    match player {
        Player::A => Position::new(0, i),
        Player::B => Position::new(i, 0),
    }
}

fn reaches_end(player: Player, pos: Position, size: usize) -> bool {
    let last = size as i32 - 1;
    match player {
        Player::A => pos.q == last,
        Player::B => pos.r == last,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, stones: &[(i32, i32)], player: Player) -> Board {
        let mut board = Board::new(size).unwrap();
        for &(q, r) in stones {
            board.place(Position::new(q, r), player).unwrap();
        }
        board
    }

    fn positions(cells: &[(i32, i32)]) -> Vec<Position> {
        cells.iter().map(|&(q, r)| Position::new(q, r)).collect()
    }

    // Full first column plus a staircase from (0,3) up to column 3.
    const STAIRCASE: [(i32, i32); 7] = [(0, 0), (0, 1), (0, 2), (0, 3), (1, 2), (2, 1), (3, 0)];

    #[test]
    fn empty_board_is_not_connected() {
        let board = Board::new(5).unwrap();

        assert!(!is_connected(&board, Player::A));
        assert!(!is_connected(&board, Player::B));
        assert!(find_path(&board, Player::A).is_empty());
    }

    #[test]
    fn first_column_and_staircase_connects_player_a() {
        let board = board_with(4, &STAIRCASE, Player::A);

        assert!(is_connected(&board, Player::A));
        assert!(!is_connected(&board, Player::B));
    }

    #[test]
    fn removing_any_staircase_cell_disconnects() {
        for cut in [(1, 2), (2, 1), (3, 0)] {
            let stones: Vec<_> = STAIRCASE.iter().copied().filter(|&c| c != cut).collect();
            let board = board_with(4, &stones, Player::A);

            assert!(!is_connected(&board, Player::A), "cut at {cut:?}");
        }
    }

    #[test]
    fn find_path_follows_neighbor_order_and_backtracks_dead_ends() {
        let board = board_with(4, &STAIRCASE, Player::A);

        // (0,3) is explored from (1,2) and abandoned before (2,1) is tried.
        assert_eq!(
            find_path(&board, Player::A),
            positions(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 1), (3, 0)])
        );
    }

    #[test]
    fn find_path_is_deterministic() {
        let board = board_with(4, &STAIRCASE, Player::A);
        assert_eq!(find_path(&board, Player::A), find_path(&board, Player::A));
    }

    #[test]
    fn player_b_connects_top_to_bottom() {
        let board = board_with(3, &[(2, 0), (1, 1), (1, 2)], Player::B);

        assert!(is_connected(&board, Player::B));
        assert_eq!(find_path(&board, Player::B), positions(&[(2, 0), (1, 1), (1, 2)]));
    }

    #[test]
    fn diagonal_that_is_not_a_hex_neighbor_does_not_connect() {
        // (0,0) and (1,1) differ by (1,1), which is not a hex neighbor.
        let board = board_with(2, &[(0, 0), (1, 1)], Player::A);
        assert!(!is_connected(&board, Player::A));
    }

    #[test]
    fn later_start_cell_is_used_when_earlier_one_is_a_dead_end() {
        let board = board_with(3, &[(0, 0), (0, 2), (1, 2), (2, 2)], Player::A);

        assert_eq!(
            find_path(&board, Player::A),
            positions(&[(0, 2), (1, 2), (2, 2)])
        );
    }

    #[test]
    fn single_cell_board_connects_immediately() {
        let board = board_with(1, &[(0, 0)], Player::B);
        assert_eq!(find_path(&board, Player::B), positions(&[(0, 0)]));
    }
}
