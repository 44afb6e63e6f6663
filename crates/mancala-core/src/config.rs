//! Game configuration.

use crate::board::{DEFAULT_STONES_PER_PIT, MAX_STONES_PER_PIT};
use crate::bot::BotDifficulty;
use crate::player::Side;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors in a game configuration
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("stones_per_pit must be at least 1")]
    NoStones,

    #[error("stones_per_pit must be at most {max}")]
    TooManyStones { max: u32 },

    #[error("Invalid value {value:?} for {key}")]
    Invalid { key: String, value: String },
}

impl ConfigError {
    fn invalid(key: &str, value: &str) -> Self {
        ConfigError::Invalid {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Who makes the first move of a game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstMover {
    /// Coin flip at the start of every game
    #[default]
    Random,
    Fixed(Side),
}

/// How the winner is decided once a row is cleared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndRule {
    /// Compare the two stores as they stand
    #[default]
    CompareStores,
    /// Move each row's leftover stones into its own store first
    SweepRemaining,
}

/// Settings for a single game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Stones in every regular pit at the start
    pub stones_per_pit: u32,
    pub first_mover: FirstMover,
    pub end_rule: EndRule,
    /// The side played by the computer
    pub computer_side: Side,
    pub difficulty: BotDifficulty,
    /// Seed for the first-mover coin flip and the bot; random when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            stones_per_pit: DEFAULT_STONES_PER_PIT,
            first_mover: FirstMover::Random,
            end_rule: EndRule::CompareStores,
            computer_side: Side::PlayerB,
            difficulty: BotDifficulty::Medium,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Check the configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stones_per_pit == 0 {
            return Err(ConfigError::NoStones);
        }
        if self.stones_per_pit > MAX_STONES_PER_PIT {
            return Err(ConfigError::TooManyStones {
                max: MAX_STONES_PER_PIT,
            });
        }
        Ok(())
    }

    /// The side the human plays
    pub fn human_side(&self) -> Side {
        self.computer_side.other()
    }
}

impl FromStr for Side {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "player_a" | "playera" => Ok(Side::PlayerA),
            "b" | "player_b" | "playerb" => Ok(Side::PlayerB),
            _ => Err(ConfigError::invalid("side", s)),
        }
    }
}

impl FromStr for FirstMover {
    type Err = ConfigError;

    /// Accepts `random` or a side name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("random") {
            return Ok(FirstMover::Random);
        }
        s.parse()
            .map(FirstMover::Fixed)
            .map_err(|_| ConfigError::invalid("first_mover", s))
    }
}

impl FromStr for EndRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compare" | "compare_stores" => Ok(EndRule::CompareStores),
            "sweep" | "sweep_remaining" => Ok(EndRule::SweepRemaining),
            _ => Err(ConfigError::invalid("end_rule", s)),
        }
    }
}

impl FromStr for BotDifficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(BotDifficulty::Easy),
            "medium" => Ok(BotDifficulty::Medium),
            _ => Err(ConfigError::invalid("difficulty", s)),
        }
    }
}
