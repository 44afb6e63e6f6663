//! Move resolution: sowing, the store skip rule and captures.
//!
//! A move is resolved in three stages so that a front end can watch it
//! happen one stone at a time:
//!
//! 1. [`Sowing::begin`] lifts every stone out of the starting pit.
//! 2. [`Sowing::step`] drops the next stone, passing over the opponent's
//!    store. Call it until [`Sowing::is_done`].
//! 3. [`Sowing::finish`] applies the capture rule to the final pit and
//!    releases the board for the next move.
//!
//! [`resolve_move`] runs all three back to back.

use crate::actions::GameEvent;
use crate::board::{Board, PIT_COUNT};
use crate::player::Side;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stones taken by a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    /// Where the last stone landed
    pub pit: usize,
    /// The pit across from it
    pub opposite: usize,
    /// Total stones moved into the mover's store
    pub stones: u32,
}

/// Result of a fully resolved move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub side: Side,
    pub start: usize,
    /// The pit the last stone landed in
    pub final_index: usize,
    pub capture: Option<Capture>,
    /// Every board change, in order
    pub events: Vec<GameEvent>,
}

impl Resolution {
    /// Whether the last stone landed in the mover's own store
    pub fn ended_in_store(&self) -> bool {
        self.final_index == self.side.store_index()
    }
}

/// A move whose stones are in hand and still being distributed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sowing {
    side: Side,
    start: usize,
    cursor: usize,
    remaining: u32,
}

impl Sowing {
    /// Pick up every stone in `start` for the side whose turn it is.
    ///
    /// The move must already have passed [`Board::validate_move`]. The board
    /// refuses further moves until [`Sowing::finish`] is called.
    pub fn begin(board: &mut Board, start: usize) -> (Self, GameEvent) {
        let side = board.turn();
        let stones = board.take_all_stones(start);
        board.set_sowing(true);
        debug!(?side, start, stones, "picked up stones");

        let sowing = Self {
            side,
            start,
            cursor: start,
            remaining: stones,
        };
        let event = GameEvent::StonesPickedUp {
            side,
            pit: start,
            stones,
        };
        (sowing, event)
    }

    /// The side making this move
    pub fn side(&self) -> Side {
        self.side
    }

    /// Stones still in hand
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether every stone has been sown
    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }

    /// Sow the next stone. Returns no events once the hand is empty.
    pub fn step(&mut self, board: &mut Board) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.is_done() {
            return events;
        }

        self.cursor = (self.cursor + 1) % PIT_COUNT;
        if self.cursor == self.side.other().store_index() {
            events.push(GameEvent::StoreSkipped { pit: self.cursor });
            self.cursor = (self.cursor + 1) % PIT_COUNT;
        }

        board.add_stones(self.cursor, 1);
        self.remaining -= 1;
        events.push(GameEvent::StoneSown {
            pit: self.cursor,
            stones: board.stone_count(self.cursor),
        });

        events
    }

    /// Sow anything still in hand, apply the capture rule and release the board
    pub fn finish(mut self, board: &mut Board) -> Resolution {
        let mut events = Vec::new();
        while !self.is_done() {
            events.extend(self.step(board));
        }

        let capture = self.capture(board);
        if let Some(capture) = capture {
            debug!(side = ?self.side, ?capture, "captured");
            events.push(GameEvent::Captured {
                side: self.side,
                pit: capture.pit,
                opposite: capture.opposite,
                stones: capture.stones,
            });
        }

        board.set_sowing(false);
        debug!(side = ?self.side, start = self.start, final_index = self.cursor, "move resolved");

        Resolution {
            side: self.side,
            start: self.start,
            final_index: self.cursor,
            capture,
            events,
        }
    }

    /// Only the final pit is checked, after every stone is down
    fn capture(&self, board: &mut Board) -> Option<Capture> {
        let pit = self.cursor;
        if !self.side.owns_pit(pit) || board.stone_count(pit) != 1 {
            return None;
        }

        let opposite = Board::opposite(pit)?;
        if board.stone_count(opposite) == 0 {
            return None;
        }

        let stones = board.take_all_stones(pit) + board.take_all_stones(opposite);
        board.add_stones(self.side.store_index(), stones);

        Some(Capture {
            pit,
            opposite,
            stones,
        })
    }
}

/// Resolve a whole move from `start` for the side whose turn it is
pub fn resolve_move(board: &mut Board, start: usize) -> Resolution {
    let (sowing, picked_up) = Sowing::begin(board, start);
    let mut resolution = sowing.finish(board);
    resolution.events.insert(0, picked_up);
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sown_pits(events: &[GameEvent]) -> Vec<usize> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::StoneSown { pit, .. } => Some(*pit),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_simple_sow() {
        let mut board = Board::standard();

        let result = resolve_move(&mut board, 0);

        assert_eq!(result.final_index, 4);
        assert_eq!(board.stone_count(0), 0);
        for pit in 1..=4 {
            assert_eq!(board.stone_count(pit), 5);
        }
        assert_eq!(result.capture, None);
        assert!(!result.ended_in_store());
        assert!(!board.is_sowing());
    }

    #[test]
    fn test_sow_into_own_store() {
        let mut board = Board::standard();

        let result = resolve_move(&mut board, 2);

        assert_eq!(result.final_index, 6);
        assert!(result.ended_in_store());
        assert_eq!(board.store(Side::PlayerA), 1);

        // The store now holds exactly one stone, but stores never capture
        assert_eq!(result.capture, None);
        assert!(!result
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Captured { .. })));
        assert_eq!(board.side_stones(Side::PlayerB), 24);
    }

    #[test]
    fn test_thirteen_stones_skip_opponent_store_once() {
        let mut board = Board::from_counts([13, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], Side::PlayerA);

        let result = resolve_move(&mut board, 0);
        let sown = sown_pits(&result.events);

        let skips = result
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::StoreSkipped { pit: 13 }))
            .count();
        assert_eq!(skips, 1);
        assert_eq!(sown.iter().filter(|&&p| p == 6).count(), 1);
        assert!(!sown.contains(&13));
        assert_eq!(result.final_index, 0);
        assert_eq!(board.store(Side::PlayerB), 0);

        // Landed back in the emptied start pit across from a one-stone pit
        assert_eq!(
            result.capture,
            Some(Capture {
                pit: 0,
                opposite: 12,
                stones: 2
            })
        );
        assert_eq!(board.store(Side::PlayerA), 3);
        assert_eq!(board.total_stones(), 13);
    }

    #[test]
    fn test_player_b_skips_player_a_store() {
        let mut board = Board::from_counts([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 20, 0], Side::PlayerB);

        let result = resolve_move(&mut board, 12);
        let sown = sown_pits(&result.events);

        assert!(!sown.contains(&6));
        assert_eq!(board.store(Side::PlayerA), 0);
        assert_eq!(sown.iter().filter(|&&p| p == 13).count(), 2);
        assert_eq!(board.total_stones(), 20);
    }

    #[test]
    fn test_capture_takes_landing_and_opposite() {
        let mut board = Board::from_counts([1, 0, 0, 0, 0, 0, 10, 0, 4, 4, 4, 4, 4, 10], Side::PlayerA);

        let result = resolve_move(&mut board, 0);

        assert_eq!(result.final_index, 1);
        assert_eq!(
            result.capture,
            Some(Capture {
                pit: 1,
                opposite: 11,
                stones: 5
            })
        );
        assert_eq!(board.stone_count(1), 0);
        assert_eq!(board.stone_count(11), 0);
        assert_eq!(board.store(Side::PlayerA), 15);
        assert_eq!(board.store(Side::PlayerB), 10);
        assert_eq!(board.total_stones(), 41);
    }

    #[test]
    fn test_no_capture_when_opposite_empty() {
        let mut board = Board::from_counts([1, 0, 0, 0, 0, 0, 0, 4, 4, 4, 4, 0, 4, 0], Side::PlayerA);

        let result = resolve_move(&mut board, 0);

        assert_eq!(result.capture, None);
        assert_eq!(board.stone_count(1), 1);
        assert_eq!(board.store(Side::PlayerA), 0);
    }

    #[test]
    fn test_no_capture_when_landing_pit_was_occupied() {
        let mut board = Board::from_counts([1, 2, 0, 0, 0, 0, 0, 4, 4, 4, 4, 4, 4, 0], Side::PlayerA);

        let result = resolve_move(&mut board, 0);

        assert_eq!(result.capture, None);
        assert_eq!(board.stone_count(1), 3);
    }

    #[test]
    fn test_no_capture_on_opponent_row() {
        let mut board = Board::from_counts([0, 0, 0, 0, 0, 2, 0, 0, 4, 4, 4, 4, 4, 0], Side::PlayerA);

        let result = resolve_move(&mut board, 5);

        assert_eq!(result.final_index, 7);
        assert_eq!(result.capture, None);
        assert_eq!(board.stone_count(7), 1);
    }

    #[test]
    fn test_stepwise_matches_full_resolution() {
        let mut stepped = Board::standard();
        let mut direct = Board::standard();

        let (mut sowing, _) = Sowing::begin(&mut stepped, 3);
        assert!(stepped.is_sowing());
        assert!(!stepped.validate_move(Side::PlayerA, 0));

        let mut deposits = 0;
        while !sowing.is_done() {
            let events = sowing.step(&mut stepped);
            assert!(!events.is_empty());
            deposits += 1;
        }
        assert_eq!(deposits, 4);
        assert!(sowing.step(&mut stepped).is_empty());

        let stepped_result = sowing.finish(&mut stepped);
        let direct_result = resolve_move(&mut direct, 3);

        assert_eq!(stepped, direct);
        assert_eq!(stepped_result.final_index, direct_result.final_index);
        assert!(!stepped.is_sowing());
    }

    #[test]
    fn test_sown_event_reports_new_count() {
        let mut board = Board::standard();
        let (mut sowing, picked_up) = Sowing::begin(&mut board, 0);

        assert_eq!(
            picked_up,
            GameEvent::StonesPickedUp {
                side: Side::PlayerA,
                pit: 0,
                stones: 4
            }
        );
        assert_eq!(
            sowing.step(&mut board),
            vec![GameEvent::StoneSown { pit: 1, stones: 5 }]
        );
        assert_eq!(sowing.remaining(), 3);
    }
}
