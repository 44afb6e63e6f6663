//! Moves players make and the events they produce.
//!
//! Every change to the board during a move is reported as a [`GameEvent`],
//! in the order it happened, so a front end can replay a move one deposit
//! at a time.

use crate::game::{GameError, Outcome};
use crate::player::Side;
use serde::{Deserialize, Serialize};

/// A request to sow from one of a side's pits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub side: Side,
    pub pit: usize,
}

impl Move {
    pub fn new(side: Side, pit: usize) -> Self {
        Self { side, pit }
    }
}

/// Events that occur while a move is resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// All stones were lifted out of the starting pit
    StonesPickedUp { side: Side, pit: usize, stones: u32 },

    /// One stone was dropped into a pit, which now holds `stones`
    StoneSown { pit: usize, stones: u32 },

    /// The opponent's store was passed over without a deposit
    StoreSkipped { pit: usize },

    /// The last stone landed in an empty pit of the mover's own row
    Captured {
        side: Side,
        pit: usize,
        opposite: usize,
        /// Stones moved into the store, the landing stone included
        stones: u32,
    },

    /// The last stone landed in the mover's store
    ExtraTurn { side: Side },

    /// Play passed to the other side
    TurnEnded { side: Side, next_side: Side },

    /// Stones left in the rows were moved into their stores
    RowsSwept { swept: Vec<(Side, u32)> },

    /// One row was cleared and the game is decided
    GameOver {
        outcome: Outcome,
        store_a: u32,
        store_b: u32,
    },

    /// The opponent failed to produce a legal move; always the last event
    Aborted { reason: GameError },
}
