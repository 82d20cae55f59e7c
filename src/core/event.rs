//! Game notifications.
//!
//! Events are the only externally visible side effects besides the state
//! itself. The engine appends them to its event log; hosts read or drain
//! the log and forward events to their observers.

use serde::{Deserialize, Serialize};

use super::address::Address;
use super::player::{Color, PlayerId};

/// A notification emitted by an accepted operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A player joined the game.
    PlayerRegistered {
        player: Address,
        seat: PlayerId,
        name: String,
        color: Color,
    },

    /// The game left registration. `players` is in turn order.
    GameStarted { players: Vec<Address> },

    /// A token changed position. `score` is the player's score after the move.
    TokenMoved {
        player: Address,
        token: usize,
        from: u8,
        to: u8,
        score: u32,
    },
}

impl GameEvent {
    /// The player the event concerns, if it concerns a single player.
    #[must_use]
    pub fn player(&self) -> Option<Address> {
        match self {
            GameEvent::PlayerRegistered { player, .. } | GameEvent::TokenMoved { player, .. } => {
                Some(*player)
            }
            GameEvent::GameStarted { .. } => None,
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::PlayerRegistered { player, seat, name, color } => {
                write!(f, "{name} ({player}) registered as {color} in {seat}")
            }
            GameEvent::GameStarted { players } => {
                write!(f, "game started with {} players", players.len())
            }
            GameEvent::TokenMoved { player, token, from, to, score } => {
                write!(f, "{player} moved token {token} from {from} to {to} (score {score})")
            }
        }
    }
}
