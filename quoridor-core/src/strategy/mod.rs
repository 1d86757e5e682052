// --- File: quoridor-project/quoridor-core/src/strategy/mod.rs ---

//! Defines the core Strategy trait and publicly exports all implemented
//! strategies.

use crate::board::Board;
use crate::color::Color;
use crate::moves::Move;

/// Defines the interface for all AI playing strategies.
pub trait Strategy: Send + Sync {
    /// A human-readable identifier, character set `[A-Za-z0-9 _-]`.
    fn name(&self) -> String;

    /// Called once before any `play`. The callee takes ownership of the
    /// supplied board copy and is responsible for keeping it in sync by
    /// applying both sides' moves as they are reported through `play`.
    fn initialize(&mut self, colour: Color, board: Board, wall_count: u32);

    /// Returns this turn's move. `previous_move` is `Move::None` on the
    /// very first call of the game, otherwise the opponent's last move.
    fn play(&mut self, previous_move: Move) -> Move;

    /// Called once at game end.
    fn finalize(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallChoice {
    /// Return the first wall slot that strictly increases the opponent's
    /// distance to target.
    Good,
    /// Return the wall slot maximising opponent-minus-mover distance
    /// differential.
    Better,
}

pub mod greedy;
pub mod search;

pub use greedy::GreedyStrategy;
pub use search::SearchStrategy;
