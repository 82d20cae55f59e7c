//! Game rules: board geometry, the state machine and replay.
//!
//! `LudoGame` is the only type that mutates game state. `Board` is a pure
//! helper it delegates to, exposed for renderers and tests.

pub mod board;
pub mod engine;
pub mod replay;

pub use board::{Board, TokenPhase, BASE, START_ENTRY};
pub use engine::{LudoGame, MoveOutcome, Movement};
pub use replay::replay;
