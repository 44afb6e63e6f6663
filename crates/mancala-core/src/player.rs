//! The two sides of the board.
//!
//! This module contains:
//! - Side, identifying whose pits, store and turn something belongs to
//! - Index helpers mapping a side to its slice of the fixed board layout

use crate::board::{PITS_PER_SIDE, PIT_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// One of the two players at the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Owns pits 0-5 and the store at index 6
    PlayerA,
    /// Owns pits 7-12 and the store at index 13
    PlayerB,
}

impl Side {
    /// Both sides, in board order
    pub const ALL: [Side; 2] = [Side::PlayerA, Side::PlayerB];

    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::PlayerA => Side::PlayerB,
            Side::PlayerB => Side::PlayerA,
        }
    }

    /// Index of the first regular pit on this side
    pub fn first_pit(self) -> usize {
        match self {
            Side::PlayerA => 0,
            Side::PlayerB => PITS_PER_SIDE + 1,
        }
    }

    /// Index of this side's store
    pub fn store_index(self) -> usize {
        match self {
            Side::PlayerA => PITS_PER_SIDE,
            Side::PlayerB => PIT_COUNT - 1,
        }
    }

    /// Indices of this side's six regular pits
    pub fn pit_range(self) -> Range<usize> {
        self.first_pit()..self.store_index()
    }

    /// Whether `index` is one of this side's regular pits
    pub fn owns_pit(self, index: usize) -> bool {
        self.pit_range().contains(&index)
    }

    /// Which side a board index belongs to (stores included)
    pub fn of_index(index: usize) -> Option<Side> {
        match index {
            i if i <= Side::PlayerA.store_index() => Some(Side::PlayerA),
            i if i <= Side::PlayerB.store_index() => Some(Side::PlayerB),
            _ => None,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Side::PlayerA => "Player A",
            Side::PlayerB => "Player B",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
