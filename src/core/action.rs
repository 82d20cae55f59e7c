//! Accepted operations, recorded for audit and replay.
//!
//! Every call the engine accepts is appended to the history as an
//! `ActionRecord`. Rejected calls are never recorded. Replaying the history
//! against a fresh game with the same dice reproduces the final state.

use serde::{Deserialize, Serialize};

use super::address::Address;
use super::player::Color;

/// An accepted game operation with its arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// `register_player(name, color)`.
    Register { name: String, color: Color },
    /// `start_game()`.
    Start,
    /// `roll_dice(seed)`; `face` is the value that was rolled.
    Roll { seed: u64, face: u8 },
    /// `move_token()` (`token: None`) or `move_token_at(token)`.
    Move { token: Option<usize> },
}

impl Action {
    /// Operation name, as used in error messages and logs.
    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self {
            Action::Register { .. } => "register_player",
            Action::Start => "start_game",
            Action::Roll { .. } => "roll_dice",
            Action::Move { token: None } => "move_token",
            Action::Move { token: Some(_) } => "move_token_at",
        }
    }
}

/// A recorded action with metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Caller that issued the action.
    pub caller: Address,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken (0 before the game starts).
    pub turn: u32,

    /// Position in the history.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(caller: Address, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            caller,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names() {
        let register = Action::Register {
            name: "Alice".to_string(),
            color: Color::Red,
        };
        assert_eq!(register.operation(), "register_player");
        assert_eq!(Action::Start.operation(), "start_game");
        assert_eq!(Action::Roll { seed: 1, face: 6 }.operation(), "roll_dice");
        assert_eq!(Action::Move { token: None }.operation(), "move_token");
        assert_eq!(Action::Move { token: Some(2) }.operation(), "move_token_at");
    }

    #[test]
    fn test_action_record() {
        let record = ActionRecord::new(Address::from_low_u64(1), Action::Start, 0, 2);

        assert_eq!(record.caller, Address::from_low_u64(1));
        assert_eq!(record.action, Action::Start);
        assert_eq!(record.turn, 0);
        assert_eq!(record.sequence, 2);
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(
            Address::from_low_u64(3),
            Action::Roll { seed: 99, face: 4 },
            7,
            12,
        );

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
