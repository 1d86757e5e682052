// --- File: quoridor-project/quoridor-core/src/distance.rs ---

//! Shortest-path distance oracle.
//!
//! Distances are unweighted (every open edge costs 1), so a breadth-first
//! search suffices; we use BFS uniformly rather than mixing it with a
//! weighted algorithm elsewhere, since every edge genuinely has unit cost.

use crate::board::{Board, Cell};
use std::collections::{HashSet, VecDeque};

/// The length of the shortest open-edge path from `from` to any cell in
/// `targets`, or `None` if no such path exists.
pub fn distance_to_set(board: &Board, from: Cell, targets: &HashSet<Cell>) -> Option<u32> {
    if targets.contains(&from) {
        return Some(0);
    }

    let mut visited = vec![false; board.size() * board.size()];
    visited[from] = true;
    let mut queue = VecDeque::new();
    queue.push_back((from, 0u32));

    while let Some((cell, dist)) = queue.pop_front() {
        for next in board.neighbours(cell) {
            if visited[next] {
                continue;
            }
            if targets.contains(&next) {
                return Some(dist + 1);
            }
            visited[next] = true;
            queue.push_back((next, dist + 1));
        }
    }

    None
}

/// Distance from a player's current position to `targets`, honouring the
/// pre-first-move case: with no cell yet, the player would
/// first occupy some cell of `start_row`, then proceed, so the distance
/// is one more than the best BFS distance from `start_row` to `targets`.
pub fn player_distance(
    board: &Board,
    cell: Option<Cell>,
    start_row: &HashSet<Cell>,
    targets: &HashSet<Cell>,
) -> Option<u32> {
    match cell {
        Some(c) => distance_to_set(board, c, targets),
        None => start_row
            .iter()
            .filter_map(|&c| distance_to_set(board, c, targets))
            .min()
            .map(|d| d + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Orientation;
    use crate::color::Color;

    #[test]
    fn open_board_distance_is_manhattan_along_a_column() {
        let board = Board::new(9);
        // From a cell in the top row to the bottom row, straight down.
        let mut targets = HashSet::new();
        targets.insert(80); // bottom-right corner
        targets.insert(79);
        targets.insert(78);
        targets.insert(77);
        targets.insert(76);
        targets.insert(75);
        targets.insert(74);
        targets.insert(73);
        targets.insert(72); // bottom-left corner
        let dist = distance_to_set(&board, 4, &targets).unwrap();
        assert_eq!(dist, 8); // 9x9 board, 8 rows to cross
    }

    #[test]
    fn wall_that_fully_encloses_target_row_yields_no_path() {
        // A 4x4 board where two non-overlapping horizontal walls seal every
        // edge between row 0 and row 1.
        let mut board = Board::new(4);
        board
            .place_wall((0, 4), (1, 5), Orientation::Horizontal)
            .unwrap();
        board
            .place_wall((2, 6), (3, 7), Orientation::Horizontal)
            .unwrap();
        let mut targets = HashSet::new();
        targets.insert(4);
        targets.insert(5);
        targets.insert(6);
        targets.insert(7);
        assert_eq!(distance_to_set(&board, 1, &targets), None);
    }

    #[test]
    fn player_distance_before_first_move_is_one_more_than_best_start_row_distance() {
        let board = Board::new(9);
        let with_cell = distance_to_set(&board, 4, board.target_row(Color::Black)).unwrap();
        let absent = player_distance(
            &board,
            None,
            board.start_row(Color::Black),
            board.target_row(Color::Black),
        )
        .unwrap();
        assert_eq!(absent, with_cell + 1);
    }

    #[test]
    fn distance_to_own_row_is_zero() {
        let board = Board::new(9);
        let mut targets = HashSet::new();
        for c in 0..9 {
            targets.insert(c);
        }
        assert_eq!(distance_to_set(&board, 4, &targets), Some(0));
    }
}
