//! Recording finished games.

use crate::game::Outcome;
use crate::player::Side;
use serde::{Deserialize, Serialize};

/// Receives the outcome of each finished game, exactly once per game
pub trait OutcomeSink {
    fn record(&mut self, outcome: Outcome);
}

/// Running tally of finished games
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub wins_a: u32,
    pub wins_b: u32,
    pub ties: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Games won by a side
    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::PlayerA => self.wins_a,
            Side::PlayerB => self.wins_b,
        }
    }

    /// Total games recorded
    pub fn games_played(&self) -> u32 {
        self.wins_a + self.wins_b + self.ties
    }
}

impl OutcomeSink for Scoreboard {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win(Side::PlayerA) => self.wins_a += 1,
            Outcome::Win(Side::PlayerB) => self.wins_b += 1,
            Outcome::Tie => self.ties += 1,
        }
    }
}
