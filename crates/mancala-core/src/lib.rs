//! A two-player Mancala game engine
//!
//! This crate provides the core game logic for a human-versus-computer
//! Mancala game (6 pits and 1 store per side), including:
//! - Board representation with pits, stores and move validation
//! - Move resolution: sowing, the store skip rule and captures
//! - Game session state machine with turn passing and end detection
//! - Computer opponents behind a pluggable move source
//!
//! # Architecture
//!
//! The game engine is platform-agnostic and does no I/O. It can be compiled to:
//! - Native Rust for a terminal front end
//! - WebAssembly for a browser front end
//!
//! # Modules
//!
//! - [`board`]: Pits, the 14-pit board and move validation
//! - [`sowing`]: The move resolver, stone by stone
//! - [`game`]: Game session state machine
//! - [`bot`]: Opponent move sources

pub mod actions;
pub mod board;
pub mod bot;
pub mod config;
pub mod game;
pub mod player;
pub mod score;
pub mod sowing;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameEvent, Move};
pub use board::{
    Board, BoardSnapshot, MoveRejection, Pit, PitKind, MAX_STONES_PER_PIT, PIT_COUNT, PITS_PER_SIDE,
};
pub use bot::{Bot, BotDifficulty, MoveSource};
pub use config::{ConfigError, EndRule, FirstMover, GameConfig};
pub use game::{GameError, GamePhase, GameSession, Outcome};
pub use player::Side;
pub use score::{OutcomeSink, Scoreboard};
pub use sowing::{resolve_move, Capture, Resolution, Sowing};
