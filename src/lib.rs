//! # ludo-engine
//!
//! An authoritative, turn-based Ludo engine.
//!
//! ## Design Principles
//!
//! 1. **One Owned Aggregate**: all state lives in `GameState`, mutated only
//!    through `LudoGame`'s four operations. Rejected calls change nothing.
//!
//! 2. **Explicit Call Origin**: every operation takes the caller's
//!    `Address`; the host decides who is calling.
//!
//! 3. **Configuration Over Convention**: player limits, tokens per player,
//!    win threshold and board geometry come from `GameConfig`.
//!
//! 4. **Replayable**: dice are a pure function of seed and context, and
//!    every accepted call is recorded, so any game can be rebuilt.
//!
//! ## Lifecycle
//!
//! `Registration` → `InProgress` → `Finished`. Within a turn the current
//! player rolls, then moves. Rolling a 6 grants another turn.
//!
//! ## Modules
//!
//! - `core`: addresses, players, config, dice, turn rotation, history,
//!   events, state, errors
//! - `rules`: board geometry, the `LudoGame` state machine, history replay

pub mod core;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Address, Color, ConfigError, DiceSource, ErrorKind, GameConfig,
    GameEvent, GameState, LudoError, Phase, Player, PlayerId, ReplayError, RollContext,
    ScriptedDice, SeededDice, SnapshotError, TurnOrder, TurnStage,
};

pub use crate::rules::{
    replay, Board, LudoGame, MoveOutcome, Movement, TokenPhase,
};
