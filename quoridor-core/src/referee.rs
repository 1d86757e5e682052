// --- File: quoridor-project/quoridor-core/src/referee.rs ---

//! The referee loop: owns the authoritative board, alternates
//! the active colour, validates every move, and declares a winner.

use crate::board::{Board, Cell, Orientation};
use crate::color::Color;
use crate::config::Config;
use crate::error::QuoridorError;
use crate::legality::{validate_displacement, validate_wall};
use crate::moves::Move;
use crate::strategy::Strategy;
use log::{debug, info, warn};

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    /// The winner reached the opponent's starting row.
    ReachedTarget,
    /// The loser returned an invalid move.
    InvalidMove,
    /// The referee's `max_turns` safety valve tripped with nobody having
    /// won; not part of the rules of Quoridor itself, which has no draw
    /// condition, but a real two-strategy match needs a termination
    /// guarantee.
    TurnLimitReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Option<Color>,
    pub reason: WinReason,
    pub turns: u32,
}

struct PlayerState {
    cell: Option<Cell>,
    walls_remaining: u32,
}

/// Runs one game to completion between two strategies.
pub struct Referee<'a> {
    board: Board,
    black: PlayerState,
    white: PlayerState,
    black_strategy: &'a mut dyn Strategy,
    white_strategy: &'a mut dyn Strategy,
    max_turns: Option<u32>,
}

impl<'a> Referee<'a> {
    pub fn new(
        config: Config,
        black_strategy: &'a mut dyn Strategy,
        white_strategy: &'a mut dyn Strategy,
    ) -> Self {
        let board = Board::new(config.board_size);
        let walls = config.wall_allotment();
        Referee {
            board,
            black: PlayerState {
                cell: None,
                walls_remaining: walls,
            },
            white: PlayerState {
                cell: None,
                walls_remaining: walls,
            },
            black_strategy,
            white_strategy,
            max_turns: None,
        }
    }

    /// Sets the safety valve that ends the game as a non-win if nobody
    /// has reached their target row within this many turns.
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    /// Plays the game to completion, starting with `first` to move.
    pub fn run(mut self, first: Color) -> Outcome {
        self.black_strategy.initialize(
            Color::Black,
            self.board.clone(),
            self.black.walls_remaining,
        );
        self.white_strategy.initialize(
            Color::White,
            self.board.clone(),
            self.white.walls_remaining,
        );

        let mut active = first;
        let mut previous = Move::None;
        let mut turns = 0u32;

        loop {
            if let Some(limit) = self.max_turns {
                if turns >= limit {
                    info!("turn limit {} reached with no winner", limit);
                    return Outcome {
                        winner: None,
                        reason: WinReason::TurnLimitReached,
                        turns,
                    };
                }
            }

            let candidate = match active {
                Color::Black => self.black_strategy.play(previous),
                Color::White => self.white_strategy.play(previous),
            };
            debug!("{} plays {:?}", active, candidate);

            match self.apply(active, candidate) {
                Ok(won) => {
                    turns += 1;
                    if won {
                        info!("{} reached the target row on turn {}", active, turns);
                        self.finalize_both();
                        return Outcome {
                            winner: Some(active),
                            reason: WinReason::ReachedTarget,
                            turns,
                        };
                    }
                }
                Err(err) => {
                    warn!("{} submitted an invalid move: {}", active, err);
                    self.finalize_both();
                    return Outcome {
                        winner: Some(active.opponent()),
                        reason: WinReason::InvalidMove,
                        turns,
                    };
                }
            }

            previous = candidate;
            active = active.opponent();
        }
    }

    fn finalize_both(&mut self) {
        self.black_strategy.finalize();
        self.white_strategy.finalize();
    }

    fn player(&self, colour: Color) -> &PlayerState {
        match colour {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    fn player_mut(&mut self, colour: Color) -> &mut PlayerState {
        match colour {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        }
    }

    /// Validates and applies `candidate`, returning whether the mover won.
    fn apply(&mut self, colour: Color, candidate: Move) -> Result<bool, QuoridorError> {
        if candidate.colour() != Some(colour) {
            return Err(QuoridorError::MalformedMove(
                "move colour does not match the active player".into(),
            ));
        }

        match candidate {
            Move::Step { destination, .. } => {
                let mover_cell = self.player(colour).cell;
                // Before the opponent's own first move it occupies no cell
                // yet; an out-of-range sentinel can never equal a valid
                // destination, so the "destination == opponent" check in
                // `validate_displacement` simply never fires.
                let opponent_cell = self
                    .player(colour.opponent())
                    .cell
                    .unwrap_or(self.board.size() * self.board.size());
                validate_displacement(&self.board, mover_cell, opponent_cell, destination, colour)?;
                self.player_mut(colour).cell = Some(destination);
                let won = self.board.target_row(colour).contains(&destination);
                Ok(won)
            }
            Move::Wall {
                primary,
                secondary,
                ..
            } => {
                if self.player(colour).walls_remaining == 0 {
                    return Err(QuoridorError::NoWallsRemaining);
                }
                let orientation: Orientation = validate_wall(
                    &mut self.board,
                    primary,
                    secondary,
                    self.black.cell,
                    self.white.cell,
                )?;
                let (primary, secondary) = self.board.canonicalise_wall(primary, secondary);
                self.board.place_wall(primary, secondary, orientation)?;
                self.player_mut(colour).walls_remaining -= 1;
                Ok(false)
            }
            Move::None => Err(QuoridorError::MalformedMove(
                "None is not a submittable move".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::greedy::GreedyStrategy;
    use crate::strategy::WallChoice;

    #[test]
    fn a_game_between_two_greedy_strategies_terminates_with_a_winner() {
        let config = Config::new(5); // small board, fast game
        let mut black = GreedyStrategy::new(WallChoice::Better);
        let mut white = GreedyStrategy::new(WallChoice::Good);
        let referee = Referee::new(config, &mut black, &mut white).with_max_turns(500);
        let outcome = referee.run(Color::Black);
        assert!(outcome.winner.is_some() || outcome.reason == WinReason::TurnLimitReached);
    }
}
