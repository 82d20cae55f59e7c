//! Board geometry and movement resolution.
//!
//! Token positions are relative to the owning color:
//!
//! | Position | Meaning |
//! |---|---|
//! | `0` | base |
//! | `1..=track_length` | shared track, `1` is the color's entry square |
//! | `track_length + 1..home` | the color's home stretch |
//! | `home` | finished |
//!
//! The shared track is a ring of `track_length + 1` squares. Colors enter
//! at evenly spaced squares, so the same relative offset lands on different
//! ring squares for different colors.

use serde::{Deserialize, Serialize};

use crate::core::{Color, GameConfig, COLOR_COUNT};

/// Position of a token at base.
pub const BASE: u8 = 0;

/// Position of a token that just left base.
pub const START_ENTRY: u8 = 1;

/// Where a token is on its journey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenPhase {
    Base,
    Track,
    HomeStretch,
    Home,
}

/// Geometry derived from a `GameConfig`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    track_length: u8,
    home_stretch_length: u8,
    entry_roll: u8,
}

impl Board {
    /// Build the geometry for a config.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            track_length: config.track_length,
            home_stretch_length: config.home_stretch_length,
            entry_roll: config.entry_roll,
        }
    }

    /// The terminal position.
    #[must_use]
    pub fn home(&self) -> u8 {
        self.track_length
            .saturating_add(self.home_stretch_length)
            .saturating_add(1)
    }

    /// Squares on the shared ring.
    #[must_use]
    pub fn ring_size(&self) -> usize {
        self.track_length as usize + 1
    }

    /// Classify a position.
    #[must_use]
    pub fn phase(&self, position: u8) -> TokenPhase {
        if position == BASE {
            TokenPhase::Base
        } else if position <= self.track_length {
            TokenPhase::Track
        } else if position < self.home() {
            TokenPhase::HomeStretch
        } else {
            TokenPhase::Home
        }
    }

    /// Where a token at `position` lands after `roll`.
    ///
    /// Returns `None` when the token cannot move: at base without the entry
    /// roll, already home, or the roll would overshoot home.
    ///
    /// ```
    /// use ludo_engine::core::GameConfig;
    /// use ludo_engine::rules::Board;
    ///
    /// let board = Board::new(&GameConfig::default());
    /// assert_eq!(board.resolve(0, 6), Some(1));
    /// assert_eq!(board.resolve(0, 5), None);
    /// assert_eq!(board.resolve(50, 4), Some(54));
    /// assert_eq!(board.resolve(54, 3), Some(57));
    /// assert_eq!(board.resolve(54, 4), None);
    /// ```
    #[must_use]
    pub fn resolve(&self, position: u8, roll: u8) -> Option<u8> {
        match self.phase(position) {
            TokenPhase::Base => (roll == self.entry_roll).then_some(START_ENTRY),
            TokenPhase::Track | TokenPhase::HomeStretch => {
                let target = position as u16 + roll as u16;
                (target <= self.home() as u16).then_some(target as u8)
            }
            TokenPhase::Home => None,
        }
    }

    /// Ring square (0-based) of a track position for `color`.
    ///
    /// Base, home-stretch and home positions are off the ring.
    #[must_use]
    pub fn absolute_square(&self, color: Color, position: u8) -> Option<usize> {
        if self.phase(position) != TokenPhase::Track {
            return None;
        }
        let ring = self.ring_size();
        let entry = color.index() * ring / COLOR_COUNT;
        Some((entry + position as usize - 1) % ring)
    }
}
