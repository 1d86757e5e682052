// --- File: quoridor-project/quoridor-core/src/legality.rs ---

//! The legality checker: displacement and wall validation.

use crate::board::{Board, Cell, Direction, EdgePair, Orientation};
use crate::color::Color;
use crate::distance::player_distance;
use crate::error::QuoridorError;

/// Validates a proposed pawn displacement.
///
/// `mover` is the mover's current cell, `None` on the mover's very first
/// move of the game. `opponent` is the opponent's current cell.
pub fn validate_displacement(
    board: &Board,
    mover: Option<Cell>,
    opponent: Cell,
    destination: Cell,
    colour: Color,
) -> Result<(), QuoridorError> {
    if !board.is_valid_cell(destination) {
        return Err(QuoridorError::MalformedMove(format!(
            "destination {} is out of range",
            destination
        )));
    }
    if Some(destination) == mover {
        return Err(QuoridorError::IllegalDisplacement(
            "destination equals current cell".into(),
        ));
    }
    if destination == opponent {
        return Err(QuoridorError::IllegalDisplacement(
            "destination occupied by the opponent".into(),
        ));
    }

    let p = match mover {
        None => {
            return if board.start_row(colour).contains(&destination) {
                Ok(())
            } else {
                Err(QuoridorError::IllegalDisplacement(
                    "first move must land on the mover's own start row".into(),
                ))
            };
        }
        Some(p) => p,
    };

    // Simple step.
    if board.is_open(p, destination) {
        return Ok(());
    }

    // From here on, only jumps over the opponent are possible; the
    // opponent must be directly adjacent via an open edge.
    let axis = match board.direction_between(p, opponent) {
        Some(d) if board.is_open(p, opponent) => d,
        _ => {
            return Err(QuoridorError::IllegalDisplacement(
                "no open edge to destination and opponent is not adjacent to jump over".into(),
            ))
        }
    };

    // Straight jump: the cell beyond the opponent along the same axis.
    let straight = board.neighbour(opponent, axis);
    if straight == Some(destination) {
        return Ok(());
    }

    // Diagonal jump, only available when the straight jump is blocked.
    let straight_blocked = straight.is_none();
    if !straight_blocked {
        return Err(QuoridorError::IllegalDisplacement(
            "diagonal jump attempted while the straight jump is open".into(),
        ));
    }

    let (perp_a, perp_b) = perpendicular(axis);
    for perp in [perp_a, perp_b] {
        if board.neighbour(opponent, perp) == Some(destination) {
            return Ok(());
        }
    }

    Err(QuoridorError::IllegalDisplacement(
        "destination is not a legal step or jump from the current cell".into(),
    ))
}

fn perpendicular(d: Direction) -> (Direction, Direction) {
    match d {
        Direction::North | Direction::South => (Direction::East, Direction::West),
        Direction::East | Direction::West => (Direction::North, Direction::South),
    }
}

/// Every legal displacement destination from `mover`, in compass order,
/// expanding jumps over `opponent` per the rules above. Up to 5 results:
/// one per open direction not occupied by the opponent, or up to two
/// diagonal jumps in place of a direction that leads into the opponent.
pub fn candidate_displacements(board: &Board, mover: Cell, opponent: Cell) -> Vec<Cell> {
    let mut out = Vec::with_capacity(5);
    for &d in Direction::ALL.iter() {
        let Some(n) = board.neighbour(mover, d) else {
            continue;
        };
        if n != opponent {
            out.push(n);
            continue;
        }
        match board.neighbour(opponent, d) {
            Some(straight) => out.push(straight),
            None => {
                let (perp_a, perp_b) = perpendicular(d);
                for perp in [perp_a, perp_b] {
                    if let Some(c) = board.neighbour(opponent, perp) {
                        out.push(c);
                    }
                }
            }
        }
    }
    out
}

/// Every wall slot whose two edges are open and which does not cross a
/// perpendicular wall already in place. Does not check the no-blockade
/// rule; callers should run [`validate_wall`] on each candidate before
/// committing to one.
pub fn wall_candidates(board: &Board) -> Vec<(EdgePair, EdgePair, Orientation)> {
    let size = board.size();
    let mut out = Vec::new();
    for i in 0..size.saturating_sub(1) {
        for j in 0..size.saturating_sub(1) {
            let a = i * size + j;

            let h_primary = (a, a + size);
            let h_secondary = (a + 1, a + 1 + size);
            if board.wall_edges_open(h_primary, h_secondary)
                && !board.crosses_existing_wall(h_primary, Orientation::Horizontal)
            {
                out.push((h_primary, h_secondary, Orientation::Horizontal));
            }

            let v_primary = (a, a + 1);
            let v_secondary = (a + size, a + size + 1);
            if board.wall_edges_open(v_primary, v_secondary)
                && !board.crosses_existing_wall(v_primary, Orientation::Vertical)
            {
                out.push((v_primary, v_secondary, Orientation::Vertical));
            }
        }
    }
    out
}

/// Validates a proposed wall placement against current board state,
/// including the no-blockade rule. Wall-count bookkeeping (whether the
/// mover has any walls left) is the referee's responsibility, not this
/// checker's.
pub fn validate_wall(
    board: &mut Board,
    primary: EdgePair,
    secondary: EdgePair,
    black_cell: Option<Cell>,
    white_cell: Option<Cell>,
) -> Result<Orientation, QuoridorError> {
    let (primary, secondary) = board.canonicalise_wall(primary, secondary);

    if !board.wall_edges_open(primary, secondary) {
        return Err(QuoridorError::IllegalWall(
            "wall overlaps an already-walled edge".into(),
        ));
    }

    let orientation = board.wall_orientation(primary);
    if board.wall_orientation(secondary) != orientation {
        return Err(QuoridorError::IllegalWall(
            "the two edges do not share an orientation".into(),
        ));
    }
    if !adjacent_wall_pair(board, primary, secondary, orientation) {
        return Err(QuoridorError::IllegalWall(
            "the two edges are not a valid wall geometry".into(),
        ));
    }
    if board.crosses_existing_wall(primary, orientation) {
        return Err(QuoridorError::IllegalWall(
            "wall crosses an existing perpendicular wall".into(),
        ));
    }

    board
        .place_wall(primary, secondary, orientation)
        .map_err(|_| QuoridorError::IllegalWall("wall edges are not both open".into()))?;

    let black_ok = player_distance(
        board,
        black_cell,
        board.start_row(Color::Black),
        board.target_row(Color::Black),
    )
    .is_some();
    let white_ok = player_distance(
        board,
        white_cell,
        board.start_row(Color::White),
        board.target_row(Color::White),
    )
    .is_some();

    board.remove_wall(primary, secondary);

    if !black_ok || !white_ok {
        return Err(QuoridorError::IllegalWall(
            "wall would cut off a player's path to their target row".into(),
        ));
    }

    Ok(orientation)
}

/// Confirms `primary` and `secondary` are the two edges of one wall slot:
/// parallel, adjacent, sharing the right geometric relationship for
/// `orientation`.
fn adjacent_wall_pair(
    board: &Board,
    primary: EdgePair,
    secondary: EdgePair,
    orientation: Orientation,
) -> bool {
    let size = board.size();
    match orientation {
        // Vertical wall: primary (a, a+1), secondary (a+size, a+size+1).
        Orientation::Vertical => {
            primary.1 == primary.0 + 1
                && secondary.0 == primary.0 + size
                && secondary.1 == primary.1 + size
        }
        // Horizontal wall: primary (a, a+size), secondary (a+1, a+1+size).
        Orientation::Horizontal => {
            primary.1 == primary.0 + size
                && secondary.0 == primary.0 + 1
                && secondary.1 == primary.1 + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn first_move_must_land_on_start_row() {
        let board = Board::new(9);
        assert!(validate_displacement(&board, None, 76, 4, Color::Black).is_ok());
        assert!(validate_displacement(&board, None, 76, 13, Color::Black).is_err());
    }

    #[test]
    fn simple_step_onto_open_neighbour_is_legal() {
        let board = Board::new(9);
        assert!(validate_displacement(&board, Some(40), 76, 31, Color::Black).is_ok());
    }

    #[test]
    fn straight_jump_over_adjacent_opponent() {
        let board = Board::new(9);
        // Mover at 31, opponent directly south at 40, straight jump to 49.
        assert!(validate_displacement(&board, Some(31), 40, 49, Color::Black).is_ok());
    }

    #[test]
    fn diagonal_jump_when_straight_jump_blocked() {
        let mut board = Board::new(9);
        // Mover at 31, opponent at 40 (south edge of board beyond is 49, which
        // exists on a 9x9 board, so wall off 40-49 to force a diagonal jump).
        board
            .place_wall((40, 49), (39, 48), Orientation::Horizontal)
            .unwrap();
        assert!(validate_displacement(&board, Some(31), 40, 41, Color::Black).is_ok());
        assert!(validate_displacement(&board, Some(31), 40, 39, Color::Black).is_ok());
        assert!(validate_displacement(&board, Some(31), 40, 49, Color::Black).is_err());
    }

    #[test]
    fn candidate_displacements_from_centre_are_the_four_neighbours() {
        let board = Board::new(9);
        let candidates = candidate_displacements(&board, 40, 76);
        assert_eq!(candidates.len(), 4);
    }

    #[test]
    fn candidate_displacements_expand_a_blocked_direction_into_jumps() {
        let board = Board::new(9);
        // Opponent directly south of the mover; straight jump open, so it
        // replaces the south direction with exactly one destination.
        let candidates = candidate_displacements(&board, 31, 40);
        assert_eq!(candidates.len(), 4);
        assert!(candidates.contains(&49));
    }

    #[test]
    fn wall_candidates_on_a_fresh_board_cover_every_intersection_twice() {
        let board = Board::new(9);
        let candidates = wall_candidates(&board);
        assert_eq!(candidates.len(), 2 * 8 * 8);
    }

    #[test]
    fn wall_that_would_seal_a_player_off_is_rejected() {
        let mut board = Board::new(4);
        // These two horizontal walls together would seal row 0 from row 1
        // entirely; the second one must be rejected by the blockade rule.
        validate_wall(&mut board, (0, 4), (1, 5), Some(2), Some(14))
            .expect("first wall leaves a gap, must be legal");
        board.place_wall((0, 4), (1, 5), Orientation::Horizontal).unwrap();
        assert!(validate_wall(&mut board, (2, 6), (3, 7), Some(2), Some(14)).is_err());
    }
}
