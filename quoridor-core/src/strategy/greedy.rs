// --- File: quoridor-project/quoridor-core/src/strategy/greedy.rs ---

//! The greedy strategy: step toward the target by default,
//! reach for a wall when falling behind in the distance race.

use crate::board::{Board, Cell, Orientation};
use crate::color::Color;
use crate::distance::distance_to_set;
use crate::legality::{validate_wall, wall_candidates};
use crate::moves::Move;
use crate::strategy::{Strategy, WallChoice};
use log::debug;

pub struct GreedyStrategy {
    choice: WallChoice,
    name: String,
    colour: Color,
    board: Board,
    own_cell: Option<Cell>,
    opponent_cell: Option<Cell>,
    walls_remaining: u32,
}

impl GreedyStrategy {
    pub fn new(choice: WallChoice) -> Self {
        let name = match choice {
            WallChoice::Good => "Greedy-Good".to_string(),
            WallChoice::Better => "Greedy-Better".to_string(),
        };
        GreedyStrategy {
            choice,
            name,
            colour: Color::Black,
            board: Board::new(9),
            own_cell: None,
            opponent_cell: None,
            walls_remaining: 0,
        }
    }

    fn apply_to_internal_board(&mut self, mv: Move) {
        match mv {
            Move::Step { colour, destination } => {
                if colour == self.colour {
                    self.own_cell = Some(destination);
                } else {
                    self.opponent_cell = Some(destination);
                }
            }
            Move::Wall {
                primary,
                secondary,
                orientation,
                ..
            } => {
                let (primary, secondary) = self.board.canonicalise_wall(primary, secondary);
                let _ = self.board.place_wall(primary, secondary, orientation);
            }
            Move::None => {}
        }
    }

    fn distance_to_target(&self, cell: Cell) -> Option<u32> {
        distance_to_set(&self.board, cell, self.board.target_row(self.colour))
    }

    fn opponent_distance_to_target(&self, cell: Cell) -> Option<u32> {
        let opponent = self.colour.opponent();
        distance_to_set(&self.board, cell, self.board.target_row(opponent))
    }

    fn choose_wall(&mut self) -> Option<Move> {
        if self.walls_remaining == 0 {
            return None;
        }
        let opponent_cell = self.opponent_cell?;
        let own_cell = self.own_cell?;
        let baseline_opponent = self.opponent_distance_to_target(opponent_cell)?;

        let (black_cell, white_cell) = match self.colour {
            Color::Black => (Some(own_cell), Some(opponent_cell)),
            Color::White => (Some(opponent_cell), Some(own_cell)),
        };

        let candidates = wall_candidates(&self.board);
        let mut best: Option<(Move, i64)> = None;

        for (primary, secondary, orientation) in candidates {
            if validate_wall(&mut self.board, primary, secondary, black_cell, white_cell).is_err() {
                continue;
            }

            self.board.place_wall(primary, secondary, orientation).ok()?;
            let new_opponent = self.opponent_distance_to_target(opponent_cell);
            let new_own = self.distance_to_target(own_cell);
            self.board.remove_wall(primary, secondary);

            let (new_opponent, new_own) = match (new_opponent, new_own) {
                (Some(o), Some(m)) => (o, m),
                _ => continue,
            };
            if new_opponent <= baseline_opponent {
                continue;
            }

            let candidate_move = Move::Wall {
                colour: self.colour,
                primary,
                secondary,
                orientation,
            };

            match self.choice {
                WallChoice::Good => return Some(candidate_move),
                WallChoice::Better => {
                    let diff = new_opponent as i64 - new_own as i64;
                    if best.as_ref().map_or(true, |(_, best_diff)| diff > *best_diff) {
                        best = Some((candidate_move, diff));
                    }
                }
            }
        }

        best.map(|(mv, _)| mv)
    }

    fn choose_step(&self) -> Move {
        use crate::legality::candidate_displacements;

        let own_cell = match self.own_cell {
            Some(c) => c,
            None => {
                let start = *self.board.start_row(self.colour).iter().next().unwrap();
                return Move::Step {
                    colour: self.colour,
                    destination: start,
                };
            }
        };
        let opponent_cell = self
            .opponent_cell
            .expect("opponent has moved before we take our second turn");

        let mut best: Option<(Cell, u32)> = None;
        for cell in candidate_displacements(&self.board, own_cell, opponent_cell) {
            if let Some(d) = self.distance_to_target(cell) {
                if best.is_none() || d < best.unwrap().1 {
                    best = Some((cell, d));
                }
            }
        }

        let destination = best.map(|(c, _)| c).unwrap_or(own_cell);
        Move::Step {
            colour: self.colour,
            destination,
        }
    }
}

impl Strategy for GreedyStrategy {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn initialize(&mut self, colour: Color, board: Board, wall_count: u32) {
        self.colour = colour;
        self.board = board;
        self.walls_remaining = wall_count;
        self.own_cell = None;
        self.opponent_cell = None;
    }

    fn play(&mut self, previous_move: Move) -> Move {
        self.apply_to_internal_board(previous_move);

        let own_cell = self.own_cell;
        let opponent_cell = self.opponent_cell;
        if let (Some(own), Some(opp)) = (own_cell, opponent_cell) {
            let mover_dist = self.distance_to_target(own);
            let opponent_dist = self.opponent_distance_to_target(opp);
            if let (Some(m), Some(o)) = (mover_dist, opponent_dist) {
                if m > o {
                    if let Some(wall_move) = self.choose_wall() {
                        debug!("{} places a wall, behind {} to {}", self.colour, m, o);
                        if let Move::Wall {
                            primary,
                            secondary,
                            orientation,
                            ..
                        } = wall_move
                        {
                            let _ = self.board.place_wall(primary, secondary, orientation);
                            self.walls_remaining -= 1;
                        }
                        return wall_move;
                    }
                }
            }
        }

        let step = self.choose_step();
        if let Move::Step { destination, .. } = step {
            self.own_cell = Some(destination);
        }
        step
    }

    fn finalize(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_move_lands_on_the_own_start_row() {
        let mut strategy = GreedyStrategy::new(WallChoice::Good);
        strategy.initialize(Color::Black, Board::new(9), 10);
        let mv = strategy.play(Move::None);
        match mv {
            Move::Step { colour, destination } => {
                assert_eq!(colour, Color::Black);
                assert!(Board::new(9).start_row(Color::Black).contains(&destination));
            }
            _ => panic!("expected a step on the first move"),
        }
    }

    #[test]
    fn steps_reduce_distance_to_target_on_an_open_board() {
        let mut strategy = GreedyStrategy::new(WallChoice::Better);
        strategy.initialize(Color::Black, Board::new(9), 10);
        let first = strategy.play(Move::None);
        let Move::Step { destination: first_cell, .. } = first else {
            panic!("expected a step");
        };
        // Report the opponent's first move so our internal state is complete.
        let opp_move = Move::Step {
            colour: Color::White,
            destination: 76,
        };
        let second = strategy.play(opp_move);
        if let Move::Step { destination, .. } = second {
            let board = Board::new(9);
            let before = distance_to_set(&board, first_cell, board.target_row(Color::Black)).unwrap();
            let after = distance_to_set(&board, destination, board.target_row(Color::Black)).unwrap();
            assert!(after <= before);
        }
    }
}
