// --- File: quoridor-project/quoridor-core/src/strategy/search.rs ---

//! Iterative-deepening negamax with alpha-beta pruning.

use crate::board::{Board, Cell, Orientation};
use crate::color::Color;
use crate::distance::player_distance;
use crate::legality::{candidate_displacements, validate_wall, wall_candidates};
use crate::moves::Move;
use crate::strategy::Strategy;
use log::{debug, info};
use std::time::{Duration, Instant};

const WIN: i64 = 1_000_000;
const LOSS: i64 = -WIN;
const INVALID: i64 = 2_000_000;

/// Total wall-clock budget for a whole game; split evenly across the
/// expected number of turns to get a per-move budget.
const TOTAL_BUDGET: Duration = Duration::from_millis(15_000);
const EXPECTED_TURNS: u32 = 100;

/// A move packed into the shape the original engine used: a type tag, an
/// orientation flag (walls only), and either a signed cell delta (step)
/// or a corner cell (wall). Kept here mainly to document the origin of
/// the move-generation order; [`Move`] remains the type actually carried
/// across the strategy boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EncodedMove {
    kind: MoveKind,
    orientation: Option<Orientation>,
    payload: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveKind {
    Step,
    Wall,
}

fn encode(mv: Move, mover_cell: Option<Cell>) -> EncodedMove {
    match mv {
        Move::Step { destination, .. } => EncodedMove {
            kind: MoveKind::Step,
            orientation: None,
            payload: destination as i32 - mover_cell.unwrap_or(destination) as i32,
        },
        Move::Wall {
            primary,
            orientation,
            ..
        } => EncodedMove {
            kind: MoveKind::Wall,
            orientation: Some(orientation),
            payload: primary.0 as i32,
        },
        Move::None => EncodedMove {
            kind: MoveKind::Step,
            orientation: None,
            payload: 0,
        },
    }
}

/// A snapshot of both players' positions and remaining walls, plus whose
/// turn it is within the search tree. `board` is shared, mutated in place
/// by `apply`/`undo` and restored exactly by `undo`.
struct State {
    board: Board,
    black_cell: Option<Cell>,
    white_cell: Option<Cell>,
    black_walls: u32,
    white_walls: u32,
    mover: Color,
}

/// Everything needed to reverse one `apply` call.
enum Undo {
    Step { colour: Color, previous: Option<Cell> },
    Wall {
        primary: (Cell, Cell),
        secondary: (Cell, Cell),
        colour: Color,
    },
}

impl State {
    fn cell(&self, colour: Color) -> Option<Cell> {
        match colour {
            Color::Black => self.black_cell,
            Color::White => self.white_cell,
        }
    }

    fn cell_mut(&mut self, colour: Color) -> &mut Option<Cell> {
        match colour {
            Color::Black => &mut self.black_cell,
            Color::White => &mut self.white_cell,
        }
    }

    fn walls_mut(&mut self, colour: Color) -> &mut u32 {
        match colour {
            Color::Black => &mut self.black_walls,
            Color::White => &mut self.white_walls,
        }
    }

    fn walls(&self, colour: Color) -> u32 {
        match colour {
            Color::Black => self.black_walls,
            Color::White => self.white_walls,
        }
    }

    fn default_cell(&self, colour: Color) -> Cell {
        self.cell(colour)
            .unwrap_or_else(|| *self.board.start_row(colour).iter().next().unwrap())
    }

    /// Applies `mv` (which must belong to `self.mover`) and flips whose
    /// turn it is. Returns the undo record.
    fn apply(&mut self, mv: Move) -> Undo {
        let colour = self.mover;
        self.mover = self.mover.opponent();
        match mv {
            Move::Step { destination, .. } => {
                let previous = self.cell(colour);
                *self.cell_mut(colour) = Some(destination);
                Undo::Step { colour, previous }
            }
            Move::Wall {
                primary,
                secondary,
                orientation,
                ..
            } => {
                let _ = self.board.place_wall(primary, secondary, orientation);
                *self.walls_mut(colour) -= 1;
                Undo::Wall {
                    primary,
                    secondary,
                    colour,
                }
            }
            Move::None => Undo::Step {
                colour,
                previous: self.cell(colour),
            },
        }
    }

    fn undo(&mut self, undo: Undo) {
        self.mover = self.mover.opponent();
        match undo {
            Undo::Step { colour, previous } => {
                *self.cell_mut(colour) = previous;
            }
            Undo::Wall {
                primary,
                secondary,
                colour,
            } => {
                self.board.remove_wall(primary, secondary);
                *self.walls_mut(colour) += 1;
            }
        }
    }

    fn generate_moves(&mut self) -> Vec<Move> {
        let colour = self.mover;
        let opponent = colour.opponent();
        let mut moves = Vec::new();

        match self.cell(colour) {
            None => {
                for &c in self.board.start_row(colour) {
                    moves.push(Move::Step {
                        colour,
                        destination: c,
                    });
                }
            }
            Some(own) => {
                let opp = self.default_cell(opponent);
                for destination in candidate_displacements(&self.board, own, opp) {
                    moves.push(Move::Step { colour, destination });
                }
            }
        }

        if self.walls(colour) > 0 {
            let black_cell = self.cell(Color::Black);
            let white_cell = self.cell(Color::White);
            for (primary, secondary, orientation) in wall_candidates(&self.board) {
                if validate_wall(&mut self.board, primary, secondary, black_cell, white_cell).is_ok() {
                    moves.push(Move::Wall {
                        colour,
                        primary,
                        secondary,
                        orientation,
                    });
                }
            }
        }

        moves.sort_by_key(|&mv| {
            let payload = encode(mv, self.cell(colour));
            (payload.kind == MoveKind::Wall, payload.payload)
        });
        moves
    }

    /// Evaluation from the perspective of `self.mover`.
    fn evaluate(&self, depth: i32) -> i64 {
        let colour = self.mover;
        let opponent = colour.opponent();
        let mover_cell = self.default_cell(colour);
        let opponent_cell = self.default_cell(opponent);

        let mover_dist = player_distance(
            &self.board,
            self.cell(colour),
            self.board.start_row(colour),
            self.board.target_row(colour),
        );
        let opponent_dist = player_distance(
            &self.board,
            self.cell(opponent),
            self.board.start_row(opponent),
            self.board.target_row(opponent),
        );

        let (mover_dist, opponent_dist) = match (mover_dist, opponent_dist) {
            (Some(m), Some(o)) => (m, o),
            _ => return -INVALID,
        };

        if mover_dist == 0 {
            return WIN - (depth as i64) * (depth as i64);
        }
        if opponent_dist == 0 {
            return LOSS + (depth as i64) * (depth as i64);
        }

        let size = self.board.size() as i64;
        let half = size / 2;
        let mover_col = self.board.col_of(mover_cell) as i64;
        let opponent_col = self.board.col_of(opponent_cell) as i64;

        (opponent_dist as i64).pow(2) - (mover_dist as i64).pow(2) - (mover_col - half).abs()
            + (opponent_col - half).abs()
    }
}

pub struct SearchStrategy {
    name: String,
    colour: Color,
    state: State,
    total_budget: Duration,
    deadline: Option<Instant>,
    aborted: bool,
}

impl SearchStrategy {
    pub fn new() -> Self {
        SearchStrategy {
            name: "Negamax".to_string(),
            colour: Color::Black,
            state: State {
                board: Board::new(9),
                black_cell: None,
                white_cell: None,
                black_walls: 0,
                white_walls: 0,
                mover: Color::Black,
            },
            total_budget: TOTAL_BUDGET,
            deadline: None,
            aborted: false,
        }
    }

    /// Overrides the whole-game time budget (default ~15s), split evenly
    /// across the expected number of turns to get each move's deadline.
    pub fn with_total_budget(mut self, total: Duration) -> Self {
        self.total_budget = total;
        self
    }

    /// Overrides the per-move deadline directly (the CLI's `-t` flag),
    /// expressed internally as the equivalent whole-game budget.
    pub fn with_per_move_budget(mut self, per_move: Duration) -> Self {
        self.total_budget = per_move * EXPECTED_TURNS;
        self
    }

    fn per_move_budget(&self) -> Duration {
        self.total_budget / EXPECTED_TURNS
    }

    fn apply_reported_move(&mut self, mv: Move) {
        match mv {
            Move::Step { colour, destination } => {
                *self.state.cell_mut(colour) = Some(destination);
            }
            Move::Wall {
                colour,
                primary,
                secondary,
                orientation,
            } => {
                let (primary, secondary) = self.state.board.canonicalise_wall(primary, secondary);
                let _ = self.state.board.place_wall(primary, secondary, orientation);
                *self.state.walls_mut(colour) -= 1;
            }
            Move::None => {}
        }
    }

    fn negamax(&mut self, depth: i32, mut alpha: i64, beta: i64) -> i64 {
        if self.aborted {
            return 0;
        }
        if depth == 0 {
            return self.state.evaluate(0);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.aborted = true;
                return 0;
            }
        }

        let moves = self.state.generate_moves();
        if moves.is_empty() {
            return self.state.evaluate(depth);
        }

        let mut best = i64::MIN;
        for mv in moves {
            let undo = self.state.apply(mv);
            let score = -self.negamax(depth - 1, -beta, -alpha);
            self.state.undo(undo);
            if self.aborted {
                return 0;
            }
            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }

    /// Iterative deepening from depth 1 until the per-move deadline is
    /// hit; returns the best move from the deepest fully completed
    /// iteration.
    fn search_best_move(&mut self) -> Move {
        let moves = self.state.generate_moves();
        if moves.is_empty() {
            // Blocked: fall back to resubmitting the current cell, which
            // the referee will reject as a forfeit. The rules guarantee
            // a legal move exists whenever it is actually our turn, so
            // this only triggers if our internal board has drifted from
            // the authoritative one.
            let colour = self.colour;
            return Move::Step {
                colour,
                destination: self.state.default_cell(colour),
            };
        }

        self.deadline = Some(Instant::now() + self.per_move_budget());
        self.aborted = false;

        let mut best_move = moves[0];
        let mut depth = 1;
        loop {
            let mut alpha = LOSS - 1;
            let beta = WIN + 1;
            let mut depth_best: Option<(Move, i64)> = None;

            for &mv in &moves {
                if self.aborted {
                    break;
                }
                let undo = self.state.apply(mv);
                let score = -self.negamax(depth - 1, -beta, -alpha);
                self.state.undo(undo);
                if self.aborted {
                    break;
                }
                if depth_best.map_or(true, |(_, best_score)| score > best_score) {
                    depth_best = Some((mv, score));
                }
                if score > alpha {
                    alpha = score;
                }
            }

            if self.aborted {
                break;
            }
            if let Some((mv, _)) = depth_best {
                best_move = mv;
            }
            depth += 1;
            if depth > 60 {
                // Search trees this deep never occur before the clock
                // runs out; this is only a backstop against an infinite
                // loop if the time source misbehaves.
                break;
            }
        }

        debug!("{} searched to depth {}", self.colour, depth - 1);
        best_move
    }
}

impl Default for SearchStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for SearchStrategy {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn initialize(&mut self, colour: Color, board: Board, wall_count: u32) {
        self.colour = colour;
        self.state = State {
            board,
            black_cell: None,
            white_cell: None,
            black_walls: wall_count,
            white_walls: wall_count,
            mover: colour,
        };
        self.deadline = None;
        self.aborted = false;
    }

    fn play(&mut self, previous_move: Move) -> Move {
        self.apply_reported_move(previous_move);
        self.state.mover = self.colour;
        let mv = self.search_best_move();
        self.apply_reported_move(mv);
        mv
    }

    fn finalize(&mut self) {
        info!("{} finished", self.colour);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_then_undo_restores_state_exactly() {
        let mut state = State {
            board: Board::new(9),
            black_cell: Some(4),
            white_cell: Some(76),
            black_walls: 10,
            white_walls: 10,
            mover: Color::Black,
        };
        let mv = Move::Step {
            colour: Color::Black,
            destination: 13,
        };
        let undo = state.apply(mv);
        assert_eq!(state.black_cell, Some(13));
        assert_eq!(state.mover, Color::White);
        state.undo(undo);
        assert_eq!(state.black_cell, Some(4));
        assert_eq!(state.mover, Color::Black);
    }

    #[test]
    fn wall_apply_undo_round_trip_restores_open_edges() {
        let mut state = State {
            board: Board::new(9),
            black_cell: Some(4),
            white_cell: Some(76),
            black_walls: 10,
            white_walls: 10,
            mover: Color::Black,
        };
        let mv = Move::Wall {
            colour: Color::Black,
            primary: (0, 9),
            secondary: (1, 10),
            orientation: Orientation::Horizontal,
        };
        assert!(state.board.is_open(0, 9));
        let undo = state.apply(mv);
        assert!(!state.board.is_open(0, 9));
        assert_eq!(state.black_walls, 9);
        state.undo(undo);
        assert!(state.board.is_open(0, 9));
        assert_eq!(state.black_walls, 10);
    }

    #[test]
    fn search_returns_a_move_that_makes_progress_on_a_fresh_board() {
        let mut strategy = SearchStrategy::new();
        strategy.initialize(Color::Black, Board::new(5), 2);
        let mv = strategy.play(Move::None);
        assert!(mv.is_step());
    }
}
