//! Core types: identities, players, configuration, dice, turn rotation,
//! history, events, state and errors.
//!
//! These are the building blocks the rules engine works with. None of them
//! enforce game rules on their own.

pub mod address;
pub mod player;
pub mod config;
pub mod dice;
pub mod turn;
pub mod action;
pub mod event;
pub mod state;
pub mod error;

pub use address::{Address, ADDRESS_LEN};
pub use player::{Color, Player, PlayerId, Tokens};
pub use config::{GameConfig, COLOR_COUNT};
pub use dice::{DiceSource, RollContext, ScriptedDice, SeededDice, DIE_FACES};
pub use turn::{TurnChange, TurnOrder, TurnStage};
pub use action::{Action, ActionRecord};
pub use event::GameEvent;
pub use state::{GameState, Phase};
pub use error::{
    AddressParseError, ConfigError, ErrorKind, LudoError, ReplayError, Result, SnapshotError,
};
