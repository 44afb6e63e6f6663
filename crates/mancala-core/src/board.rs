//! Board representation for the Mancala game.
//!
//! The board is a fixed ring of 14 pits:
//!
//! ```text
//!        12  11  10   9   8   7        <- Player B's pits
//!   13                            6    <- stores (B left, A right)
//!         0   1   2   3   4   5        <- Player A's pits
//! ```
//!
//! Sowing runs counter-clockwise by increasing index, wrapping 13 -> 0.

use crate::player::Side;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Total number of pits on the board, stores included
pub const PIT_COUNT: usize = 14;

/// Regular pits on each side
pub const PITS_PER_SIDE: usize = 6;

/// Stones placed in each regular pit at the start of a standard game
pub const DEFAULT_STONES_PER_PIT: u32 = 4;

/// Most stones a game may start with in each regular pit
pub const MAX_STONES_PER_PIT: u32 = 1_000;

/// The two kinds of pit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PitKind {
    /// A playable pit on a side's row
    Regular,
    /// A scoring pit at the end of a side's row
    Store,
}

/// A single stone-holding pit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pit {
    pub kind: PitKind,
    /// Whose side the pit belongs to
    pub owner: Side,
    pub stones: u32,
}

impl Pit {
    fn regular(owner: Side, stones: u32) -> Self {
        Self {
            kind: PitKind::Regular,
            owner,
            stones,
        }
    }

    fn store(owner: Side) -> Self {
        Self {
            kind: PitKind::Store,
            owner,
            stones: 0,
        }
    }

    /// Whether this is a scoring pit
    pub fn is_store(&self) -> bool {
        self.kind == PitKind::Store
    }
}

/// Reasons a move request fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveRejection {
    #[error("Pit {pit} is not one of {side}'s pits")]
    WrongSide { side: Side, pit: usize },

    #[error("Cannot move from a store")]
    Store,

    #[error("No stones in pit {pit}")]
    EmptyPit { pit: usize },

    #[error("A move is already in progress")]
    MoveInProgress,

    #[error("The game is over")]
    GameOver,
}

/// Read-only view of the board handed to opponents and front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Stone counts for all 14 pits in board order
    pub pits: [u32; PIT_COUNT],
    /// Whose move is next
    pub turn: Side,
}

impl BoardSnapshot {
    /// Stones in the pit at `index`
    pub fn stones(&self, index: usize) -> u32 {
        self.pits[index]
    }

    /// Stones in a side's store
    pub fn store(&self, side: Side) -> u32 {
        self.pits[side.store_index()]
    }

    /// Pits `side` could legally start a move from
    pub fn legal_moves(&self, side: Side) -> Vec<usize> {
        Board::from_snapshot(self).legal_moves(side)
    }
}

/// The complete game board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pits: [Pit; PIT_COUNT],
    /// Whose move is next
    turn: Side,
    /// Set while a move's stones are still being distributed
    sowing: bool,
}

impl Board {
    /// Create a board with `stones_per_pit` in every regular pit and empty stores
    pub fn new(stones_per_pit: u32, first: Side) -> Self {
        let pits = std::array::from_fn(|index| {
            let owner = Side::of_index(index).unwrap_or(Side::PlayerB);
            if index == owner.store_index() {
                Pit::store(owner)
            } else {
                Pit::regular(owner, stones_per_pit)
            }
        });

        Self {
            pits,
            turn: first,
            sowing: false,
        }
    }

    /// Create the standard 4-stones-per-pit board with Player A to move
    pub fn standard() -> Self {
        Self::new(DEFAULT_STONES_PER_PIT, Side::PlayerA)
    }

    /// Create a board from explicit stone counts in board order
    pub fn from_counts(counts: [u32; PIT_COUNT], turn: Side) -> Self {
        let mut board = Self::new(0, turn);
        for (pit, count) in board.pits.iter_mut().zip(counts) {
            pit.stones = count;
        }
        board
    }

    /// Rebuild a scratch board from a snapshot
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        Self::from_counts(snapshot.pits, snapshot.turn)
    }

    /// All pits in board order
    pub fn pits(&self) -> &[Pit; PIT_COUNT] {
        &self.pits
    }

    /// Get a pit by index
    pub fn pit(&self, index: usize) -> Option<&Pit> {
        self.pits.get(index)
    }

    /// Stones currently in the pit at `index`.
    ///
    /// Panics if `index` is not below [`PIT_COUNT`].
    pub fn stone_count(&self, index: usize) -> u32 {
        self.pits[index].stones
    }

    /// Empty a pit, returning how many stones it held
    pub fn take_all_stones(&mut self, index: usize) -> u32 {
        std::mem::take(&mut self.pits[index].stones)
    }

    /// Drop `count` stones into a pit
    pub fn add_stones(&mut self, index: usize, count: u32) {
        self.pits[index].stones += count;
    }

    /// Whose move is next
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub(crate) fn set_turn(&mut self, side: Side) {
        self.turn = side;
    }

    /// Whether a move is currently being distributed
    pub fn is_sowing(&self) -> bool {
        self.sowing
    }

    pub(crate) fn set_sowing(&mut self, sowing: bool) {
        self.sowing = sowing;
    }

    /// The regular pit directly across the board, if `index` is a regular pit
    pub fn opposite(index: usize) -> Option<usize> {
        let owner = Side::of_index(index)?;
        owner
            .owns_pit(index)
            .then(|| 2 * PITS_PER_SIDE - index)
    }

    /// Every reason `side` may not start a move from `pit`.
    ///
    /// Each check is evaluated on its own, so a single request can fail
    /// several of them at once. An empty result means the move is valid.
    /// Once either row is empty nothing validates.
    pub fn move_rejections(&self, side: Side, pit: usize) -> Vec<MoveRejection> {
        let mut rejections = Vec::new();

        if !side.owns_pit(pit) {
            rejections.push(MoveRejection::WrongSide { side, pit });
        }

        if self.pit(pit).is_some_and(Pit::is_store) {
            rejections.push(MoveRejection::Store);
        }

        if self.pit(pit).is_some_and(|p| p.stones == 0) {
            rejections.push(MoveRejection::EmptyPit { pit });
        }

        if self.sowing {
            rejections.push(MoveRejection::MoveInProgress);
        }

        if self.is_end_condition() {
            rejections.push(MoveRejection::GameOver);
        }

        rejections
    }

    /// Check whether `side` may start a move from `pit`. Never mutates the board.
    pub fn validate_move(&self, side: Side, pit: usize) -> bool {
        self.move_rejections(side, pit).is_empty()
    }

    /// Pits `side` could start a move from right now
    pub fn legal_moves(&self, side: Side) -> Vec<usize> {
        side.pit_range()
            .filter(|&pit| self.validate_move(side, pit))
            .collect()
    }

    /// Stones in a side's store
    pub fn store(&self, side: Side) -> u32 {
        self.stone_count(side.store_index())
    }

    /// Stones left in a side's regular pits
    pub fn side_stones(&self, side: Side) -> u32 {
        side.pit_range().map(|pit| self.stone_count(pit)).sum()
    }

    /// Whether all six regular pits on a side are empty
    pub fn side_is_empty(&self, side: Side) -> bool {
        side.pit_range().all(|pit| self.stone_count(pit) == 0)
    }

    /// The game ends as soon as either row is cleared
    pub fn is_end_condition(&self) -> bool {
        Side::ALL.into_iter().any(|side| self.side_is_empty(side))
    }

    /// Stones on the whole board; constant for the lifetime of a game
    pub fn total_stones(&self) -> u32 {
        self.pits.iter().map(|p| p.stones).sum()
    }

    /// Move every stone left in each row into that row's store.
    ///
    /// Returns how many stones each side had swept.
    pub fn sweep_remaining(&mut self) -> Vec<(Side, u32)> {
        Side::ALL
            .into_iter()
            .map(|side| {
                let swept: u32 = side.pit_range().map(|pit| self.take_all_stones(pit)).sum();
                self.add_stones(side.store_index(), swept);
                (side, swept)
            })
            .collect()
    }

    /// Capture a read-only view of the board
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            pits: std::array::from_fn(|index| self.pits[index].stones),
            turn: self.turn,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
