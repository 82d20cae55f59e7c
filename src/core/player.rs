//! Player identification and per-player records.
//!
//! ## PlayerId
//!
//! Seat index assigned at registration. Seats are 0-based and follow
//! registration order, which is also turn order.
//!
//! ## Color
//!
//! One of the four board colors. A color selects where a player's tokens
//! enter the shared track.
//!
//! ## Player
//!
//! The registered record: identity, display name, color, token positions
//! and score.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::address::Address;
use super::error::LudoError;

/// Seat index of a registered player.
///
/// The first registered player is `PlayerId(0)` and moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a game with `player_count` players.
    ///
    /// ```
    /// use ludo_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Board color. The discriminant is the wire value (0..=3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red = 0,
    Green = 1,
    Yellow = 2,
    Blue = 3,
}

impl Color {
    /// All colors in wire order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];

    /// Get the wire value.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Color {
    type Error = LudoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Color::ALL
            .get(value as usize)
            .copied()
            .ok_or(LudoError::InvalidColor(value))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Token positions for one player. Most variants use 1-4 tokens.
pub type Tokens = SmallVec<[u8; 4]>;

/// A registered player.
///
/// Identity, name and color are fixed at registration. Token positions and
/// score change only through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    address: Address,
    name: String,
    color: Color,
    tokens: Tokens,
    score: u32,
}

impl Player {
    /// Create a player with every token at base.
    pub(crate) fn new(
        address: Address,
        name: impl Into<String>,
        color: Color,
        token_count: usize,
    ) -> Self {
        Self {
            address,
            name: name.into(),
            color,
            tokens: SmallVec::from_elem(0, token_count),
            score: 0,
        }
    }

    /// External identity.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Board color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Position of the first token.
    ///
    /// In the single-token variant this is the player's only position.
    #[must_use]
    pub fn position(&self) -> u8 {
        self.tokens.first().copied().unwrap_or(0)
    }

    /// Positions of all tokens.
    #[must_use]
    pub fn tokens(&self) -> &[u8] {
        &self.tokens
    }

    /// Number of tokens that reached home.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn set_token(&mut self, token: usize, position: u8) {
        self.tokens[token] = position;
    }

    pub(crate) fn add_score(&mut self) {
        self.score += 1;
    }
}
