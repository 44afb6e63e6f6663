//! Computer opponents.
//!
//! The game only ever talks to an opponent through [`MoveSource`], so any
//! strategy can be plugged in. Two built-in levels are provided:
//! - Easy: Random legal pit
//! - Medium: One-ply greedy, preferring extra turns and then the biggest store gain

use crate::board::{Board, BoardSnapshot};
use crate::config::GameConfig;
use crate::player::Side;
use crate::sowing::resolve_move;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Anything that can pick a move for the side to play.
///
/// Implementations must return a pit that passes validation for the side
/// to move in `snapshot`, or `None` when that side has no legal move.
pub trait MoveSource {
    fn choose_move(&mut self, snapshot: &BoardSnapshot) -> Option<usize>;
}

impl<F> MoveSource for F
where
    F: FnMut(&BoardSnapshot) -> Option<usize>,
{
    fn choose_move(&mut self, snapshot: &BoardSnapshot) -> Option<usize> {
        self(snapshot)
    }
}

/// Bot difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotDifficulty {
    Easy,
    Medium,
}

/// A bot player that picks pits for one side
pub struct Bot {
    pub side: Side,
    pub difficulty: BotDifficulty,
    rng: StdRng,
}

impl Bot {
    pub fn new(side: Side, difficulty: BotDifficulty) -> Self {
        Self {
            side,
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(side: Side, difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            side,
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build the computer player described by a game configuration
    pub fn for_config(config: &GameConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(config.computer_side, config.difficulty, seed),
            None => Self::new(config.computer_side, config.difficulty),
        }
    }

    /// Easy: Just pick a random legal pit
    fn choose_easy(&mut self, moves: &[usize]) -> Option<usize> {
        moves.choose(&mut self.rng).copied()
    }

    /// Medium: Play every legal pit on a scratch board and keep the best
    fn choose_medium(&self, snapshot: &BoardSnapshot, moves: &[usize]) -> Option<usize> {
        let before = snapshot.store(self.side);

        // Ties go to the pit nearest the store
        moves.iter().copied().max_by_key(|&pit| {
            let mut board = Board::from_snapshot(snapshot);
            board.set_turn(self.side);
            let result = resolve_move(&mut board, pit);
            (result.ended_in_store(), board.store(self.side) - before)
        })
    }
}

impl MoveSource for Bot {
    fn choose_move(&mut self, snapshot: &BoardSnapshot) -> Option<usize> {
        let moves = snapshot.legal_moves(self.side);
        if moves.is_empty() {
            return None;
        }

        match self.difficulty {
            BotDifficulty::Easy => self.choose_easy(&moves),
            BotDifficulty::Medium => self.choose_medium(snapshot, &moves),
        }
    }
}
