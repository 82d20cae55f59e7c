//! Game configuration.
//!
//! The defaults reproduce the simplified single-token rules: up to four
//! players, one token each, first token home wins. Variants change the
//! limits and board geometry here instead of touching the engine.
//!
//! ```
//! use ludo_engine::core::GameConfig;
//!
//! let config = GameConfig::default()
//!     .with_tokens_per_player(4)
//!     .with_win_threshold(4);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.home(), 57);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::ConfigError;

/// Number of board colors, and therefore the hard player cap.
pub const COLOR_COUNT: usize = 4;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum registered players.
    pub max_players: usize,

    /// Players required before the game can start.
    pub min_players: usize,

    /// Tokens each player moves.
    pub tokens_per_player: usize,

    /// Tokens a player must bring home to win.
    pub win_threshold: u32,

    /// Squares a token travels on the shared track, counting its entry square.
    pub track_length: u8,

    /// Squares in each color's home stretch, excluding the home slot.
    pub home_stretch_length: u8,

    /// Roll required to leave base.
    pub entry_roll: u8,

    /// Roll that grants the same player another turn.
    pub bonus_roll: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_players: COLOR_COUNT,
            min_players: 2,
            tokens_per_player: 1,
            win_threshold: 1,
            track_length: 51,
            home_stretch_length: 5,
            entry_roll: 6,
            bonus_roll: 6,
        }
    }
}

impl GameConfig {
    /// Set the player limits.
    #[must_use]
    pub fn with_player_limits(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Set the number of tokens per player.
    #[must_use]
    pub fn with_tokens_per_player(mut self, tokens: usize) -> Self {
        self.tokens_per_player = tokens;
        self
    }

    /// Set the number of tokens needed to win.
    #[must_use]
    pub fn with_win_threshold(mut self, threshold: u32) -> Self {
        self.win_threshold = threshold;
        self
    }

    /// Set the track and home-stretch lengths.
    #[must_use]
    pub fn with_geometry(mut self, track_length: u8, home_stretch_length: u8) -> Self {
        self.track_length = track_length;
        self.home_stretch_length = home_stretch_length;
        self
    }

    /// Set the entry and bonus rolls.
    #[must_use]
    pub fn with_rolls(mut self, entry_roll: u8, bonus_roll: u8) -> Self {
        self.entry_roll = entry_roll;
        self.bonus_roll = bonus_roll;
        self
    }

    /// The terminal `HOME` position.
    #[must_use]
    pub fn home(&self) -> u8 {
        self.track_length
            .saturating_add(self.home_stretch_length)
            .saturating_add(1)
    }

    /// Check every limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < 2
            || self.min_players > self.max_players
            || self.max_players > COLOR_COUNT
        {
            return Err(ConfigError::PlayerLimits {
                min: self.min_players,
                max: self.max_players,
            });
        }
        if !(1..=COLOR_COUNT).contains(&self.tokens_per_player) {
            return Err(ConfigError::TokensPerPlayer(self.tokens_per_player));
        }
        if self.win_threshold == 0 || self.win_threshold as usize > self.tokens_per_player {
            return Err(ConfigError::WinThreshold {
                threshold: self.win_threshold,
                tokens: self.tokens_per_player,
            });
        }
        if self.track_length == 0 {
            return Err(ConfigError::EmptyTrack);
        }
        let home = self.track_length as usize + self.home_stretch_length as usize + 1;
        if home > u8::MAX as usize {
            return Err(ConfigError::BoardTooLarge { home });
        }
        for (name, value) in [("entry_roll", self.entry_roll), ("bonus_roll", self.bonus_roll)] {
            if !(1..=6).contains(&value) {
                return Err(ConfigError::DieFace { name, value });
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML config. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
