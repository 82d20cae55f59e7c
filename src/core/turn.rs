//! Turn order and turn sub-state.
//!
//! Turn order is a rotation of the seats fixed at game start: the front seat
//! is to move, and ending a turn rotates the front seat to the back. A bonus
//! turn leaves the rotation untouched. All "whose turn is next" logic lives
//! in `TurnOrder::end_turn`.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::player::PlayerId;

/// Whether the current player still owes a roll or a move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnStage {
    /// Start of a turn: the player must roll.
    #[default]
    AwaitingRoll,
    /// The player rolled `roll` and must move.
    AwaitingMove { roll: u8 },
}

impl TurnStage {
    /// The pending roll, if the player has rolled this turn.
    #[must_use]
    pub fn pending_roll(self) -> Option<u8> {
        match self {
            TurnStage::AwaitingRoll => None,
            TurnStage::AwaitingMove { roll } => Some(roll),
        }
    }
}

/// What happened to the turn pointer when a turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnChange {
    /// Same player moves again.
    Bonus(PlayerId),
    /// The turn passed to another player.
    Passed(PlayerId),
}

/// Rotation over the seats, front seat to move.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrder {
    seats: VecDeque<PlayerId>,
}

impl TurnOrder {
    /// Create a rotation over `player_count` seats, seat 0 first.
    ///
    /// ```
    /// use ludo_engine::core::PlayerId;
    /// use ludo_engine::core::TurnOrder;
    ///
    /// let mut order = TurnOrder::new(3);
    /// assert_eq!(order.current(), Some(PlayerId::new(0)));
    ///
    /// order.end_turn(false);
    /// assert_eq!(order.current(), Some(PlayerId::new(1)));
    /// ```
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            seats: PlayerId::all(player_count).collect(),
        }
    }

    /// The seat to move. `None` before the game starts.
    #[must_use]
    pub fn current(&self) -> Option<PlayerId> {
        self.seats.front().copied()
    }

    /// Number of seats in the rotation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Check if the rotation is empty (game not started).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Seats in the order they will move, current seat first.
    pub fn upcoming(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.seats.iter().copied()
    }

    /// Check that the rotation holds each of `player_count` seats exactly once.
    #[must_use]
    pub fn covers(&self, player_count: usize) -> bool {
        let mut seen = vec![false; player_count];
        for seat in &self.seats {
            match seen.get_mut(seat.index()) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        seen.iter().all(|&s| s)
    }

    /// End the current turn.
    ///
    /// With `bonus` the current seat keeps the turn; otherwise the rotation
    /// advances by one. Returns `None` on an empty rotation.
    pub fn end_turn(&mut self, bonus: bool) -> Option<TurnChange> {
        if bonus {
            return self.current().map(TurnChange::Bonus);
        }
        self.seats.rotate_left(1.min(self.seats.len()));
        self.current().map(TurnChange::Passed)
    }
}
