//! Core game state machine.
//!
//! This module contains the `GameSession` struct, which decides whose turn
//! it is, runs moves through the resolver, asks the computer opponent for
//! its moves and detects the end of the game.
//!
//! Moves can be consumed two ways:
//! - [`GameSession::play_move`] resolves everything up to the next human
//!   turn (or the end of the game) and returns every event at once.
//! - [`GameSession::begin_move`] followed by repeated [`GameSession::step`]
//!   calls yields one event at a time, for front ends that animate sowing.
//!
//! If the computer opponent fails to produce a legal move, the events already
//! applied are still handed out, followed by [`GameEvent::Aborted`], and the
//! session stays in [`GamePhase::Aborted`].

use crate::actions::{GameEvent, Move};
use crate::board::{Board, BoardSnapshot, MoveRejection};
use crate::bot::{Bot, MoveSource};
use crate::config::{ConfigError, EndRule, FirstMover, GameConfig};
use crate::player::Side;
use crate::score::OutcomeSink;
use crate::sowing::{Resolution, Sowing};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, info};

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win(Side),
    Tie,
}

impl Outcome {
    /// The larger store wins; equal stores tie
    pub fn from_stores(store_a: u32, store_b: u32) -> Self {
        match store_a.cmp(&store_b) {
            Ordering::Greater => Outcome::Win(Side::PlayerA),
            Ordering::Less => Outcome::Win(Side::PlayerB),
            Ordering::Equal => Outcome::Tie,
        }
    }

    /// The winning side, if there is one
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Win(side) => Some(*side),
            Outcome::Tie => None,
        }
    }
}

/// Session phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for `side` to pick a pit
    AwaitingMove { side: Side },

    /// Stones are being sown; no other move is accepted
    MoveInProgress { sowing: Sowing },

    /// A row was cleared
    GameOver { outcome: Outcome },

    /// The opponent broke its contract; the game cannot continue
    Aborted { reason: GameError },
}

/// Errors that can occur when playing a move
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Not your turn")]
    NotYourTurn,

    #[error("Invalid move: {}", join_rejections(.0))]
    InvalidMove(Vec<MoveRejection>),

    #[error("A move is already in progress")]
    MoveInProgress,

    #[error("Game is over")]
    GameOver,

    #[error("Opponent chose pit {pit}, which is not a legal move")]
    OpponentContractViolation { pit: usize },

    #[error("Opponent has no move while the game is still running")]
    OpponentHasNoMove,

    #[error("Game was aborted")]
    Aborted,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn join_rejections(rejections: &[MoveRejection]) -> String {
    rejections
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A single game between a human and a computer opponent
pub struct GameSession {
    board: Board,
    phase: GamePhase,
    config: GameConfig,
    opponent: Box<dyn MoveSource>,
    /// Events produced but not yet handed out by `step`
    pending: VecDeque<GameEvent>,
    /// Every move started this game, both sides
    history: Vec<Move>,
    outcome_reported: bool,
}

impl GameSession {
    /// Start a new game.
    ///
    /// If the computer moves first its move is already in progress when this
    /// returns; drain it with [`GameSession::advance`] or [`GameSession::step`].
    pub fn new(config: GameConfig, opponent: Box<dyn MoveSource>) -> Result<Self, GameError> {
        config.validate()?;

        let first = match config.first_mover {
            FirstMover::Fixed(side) => side,
            FirstMover::Random => {
                let mut rng = match config.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                if rng.gen_bool(0.5) {
                    Side::PlayerA
                } else {
                    Side::PlayerB
                }
            }
        };

        let board = Board::new(config.stones_per_pit, first);
        Self::from_board(board, config, opponent)
    }

    /// Start a new game against the built-in bot described by `config`
    pub fn with_bot(config: GameConfig) -> Result<Self, GameError> {
        let bot = Bot::for_config(&config);
        Self::new(config, Box::new(bot))
    }

    /// Resume play from an arbitrary position, with `board.turn()` to move
    pub fn from_board(
        mut board: Board,
        config: GameConfig,
        opponent: Box<dyn MoveSource>,
    ) -> Result<Self, GameError> {
        board.set_sowing(false);
        let side = board.turn();

        let mut session = Self {
            board,
            phase: GamePhase::AwaitingMove { side },
            config,
            opponent,
            pending: VecDeque::new(),
            history: Vec::new(),
            outcome_reported: false,
        };

        if session.board.is_end_condition() {
            session.end_game();
        } else if side == session.computer_side() {
            session.start_computer_move();
            if let Some(reason) = session.abort_reason() {
                return Err(reason.clone());
            }
        }

        Ok(session)
    }

    /// The current board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Read-only counts for all pits plus whose turn it is
    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Moves started so far, in order
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn computer_side(&self) -> Side {
        self.config.computer_side
    }

    pub fn human_side(&self) -> Side {
        self.config.human_side()
    }

    /// Side waiting to move, if the session is waiting at all
    pub fn to_move(&self) -> Option<Side> {
        match self.phase {
            GamePhase::AwaitingMove { side } => Some(side),
            _ => None,
        }
    }

    /// Whether moves can still be played
    pub fn is_active(&self) -> bool {
        !matches!(
            self.phase,
            GamePhase::GameOver { .. } | GamePhase::Aborted { .. }
        )
    }

    /// Get the outcome if the game is finished
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::GameOver { outcome } => Some(outcome),
            _ => None,
        }
    }

    /// Why the session was aborted, if it was
    pub fn abort_reason(&self) -> Option<&GameError> {
        match &self.phase {
            GamePhase::Aborted { reason } => Some(reason),
            _ => None,
        }
    }

    /// Whether `side` could start a move from `pit` right now
    pub fn validate_move(&self, side: Side, pit: usize) -> bool {
        self.to_move() == Some(side) && self.board.validate_move(side, pit)
    }

    /// Pits `side` could start a move from right now; empty unless it is `side`'s turn
    pub fn legal_moves(&self, side: Side) -> Vec<usize> {
        if self.to_move() == Some(side) {
            self.board.legal_moves(side)
        } else {
            Vec::new()
        }
    }

    /// Pick up the stones in `pit` for `side`; sowing continues in [`GameSession::step`]
    pub fn begin_move(&mut self, side: Side, pit: usize) -> Result<(), GameError> {
        match &self.phase {
            GamePhase::GameOver { .. } => return Err(GameError::GameOver),
            GamePhase::Aborted { .. } => return Err(GameError::Aborted),
            GamePhase::MoveInProgress { .. } => return Err(GameError::MoveInProgress),
            GamePhase::AwaitingMove { side: to_move } if *to_move != side => {
                return Err(GameError::NotYourTurn)
            }
            GamePhase::AwaitingMove { .. } => {}
        }

        let rejections = self.board.move_rejections(side, pit);
        if !rejections.is_empty() {
            debug!(?side, pit, ?rejections, "move rejected");
            return Err(GameError::InvalidMove(rejections));
        }

        self.start_sowing(Move::new(side, pit));
        Ok(())
    }

    /// Advance the game by one observable event.
    ///
    /// Returns `None` once the session is waiting for the human or has
    /// stopped and every event has been handed out.
    pub fn step(&mut self) -> Option<GameEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        let placeholder = GamePhase::AwaitingMove {
            side: self.board.turn(),
        };
        match std::mem::replace(&mut self.phase, placeholder) {
            GamePhase::MoveInProgress { mut sowing } if !sowing.is_done() => {
                self.pending.extend(sowing.step(&mut self.board));
                self.phase = GamePhase::MoveInProgress { sowing };
            }
            GamePhase::MoveInProgress { sowing } => {
                let resolution = sowing.finish(&mut self.board);
                self.conclude(resolution);

                if self.to_move() == Some(self.computer_side()) {
                    self.start_computer_move();
                }
            }
            phase => {
                self.phase = phase;
                return None;
            }
        }

        self.pending.pop_front()
    }

    /// Run until input is needed from the human or the session stops
    pub fn advance(&mut self) -> Vec<GameEvent> {
        std::iter::from_fn(|| self.step()).collect()
    }

    /// Play a whole move for `side`, plus any computer replies it triggers.
    ///
    /// An opponent failure during the replies is not an error here: the
    /// returned events end with [`GameEvent::Aborted`].
    pub fn play_move(&mut self, side: Side, pit: usize) -> Result<Vec<GameEvent>, GameError> {
        self.begin_move(side, pit)?;
        Ok(self.advance())
    }

    /// Hand the outcome to `sink` once the game is over.
    ///
    /// Returns true only on the call that actually reported it.
    pub fn report_outcome(&mut self, sink: &mut dyn OutcomeSink) -> bool {
        match self.outcome() {
            Some(outcome) if !self.outcome_reported => {
                sink.record(outcome);
                self.outcome_reported = true;
                true
            }
            _ => false,
        }
    }

    // ==================== Helper Methods ====================

    fn start_sowing(&mut self, mv: Move) {
        self.history.push(mv);
        let (sowing, picked_up) = Sowing::begin(&mut self.board, mv.pit);
        self.pending.push_back(picked_up);
        self.phase = GamePhase::MoveInProgress { sowing };
    }

    fn start_computer_move(&mut self) {
        let side = self.computer_side();
        let snapshot = self.board.snapshot();

        let Some(pit) = self.opponent.choose_move(&snapshot) else {
            error!(?side, "opponent returned no move for a live game");
            self.abort(GameError::OpponentHasNoMove);
            return;
        };

        if !self.board.validate_move(side, pit) {
            error!(?side, pit, "opponent chose an illegal pit");
            self.abort(GameError::OpponentContractViolation { pit });
            return;
        }

        debug!(?side, pit, "computer move");
        self.start_sowing(Move::new(side, pit));
    }

    /// Queued after any events already produced, so nothing follows it
    fn abort(&mut self, reason: GameError) {
        self.pending.push_back(GameEvent::Aborted {
            reason: reason.clone(),
        });
        self.phase = GamePhase::Aborted { reason };
    }

    /// Decide what follows a resolved move
    fn conclude(&mut self, resolution: Resolution) {
        let side = resolution.side;
        let extra_turn = resolution.ended_in_store();
        self.pending.extend(resolution.events);

        if self.board.is_end_condition() {
            self.end_game();
            return;
        }

        let next_side = if extra_turn {
            self.pending.push_back(GameEvent::ExtraTurn { side });
            side
        } else {
            self.pending.push_back(GameEvent::TurnEnded {
                side,
                next_side: side.other(),
            });
            side.other()
        };

        debug!(?side, ?next_side, extra_turn, "turn resolved");
        self.board.set_turn(next_side);
        self.phase = GamePhase::AwaitingMove { side: next_side };
    }

    fn end_game(&mut self) {
        if self.config.end_rule == EndRule::SweepRemaining {
            let swept = self.board.sweep_remaining();
            self.pending.push_back(GameEvent::RowsSwept { swept });
        }

        let store_a = self.board.store(Side::PlayerA);
        let store_b = self.board.store(Side::PlayerB);
        let outcome = Outcome::from_stores(store_a, store_b);

        info!(?outcome, store_a, store_b, "game over");
        self.pending.push_back(GameEvent::GameOver {
            outcome,
            store_a,
            store_b,
        });
        self.phase = GamePhase::GameOver { outcome };
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("board", &self.board)
            .field("phase", &self.phase)
            .field("config", &self.config)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}
