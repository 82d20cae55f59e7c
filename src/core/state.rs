//! Game state aggregate.
//!
//! ## GameState
//!
//! Everything the engine owns, in one serializable value:
//! - Configuration and lifecycle phase
//! - Registered players (registration order is turn order)
//! - Turn rotation, turn sub-state and last roll
//! - Action history
//!
//! Fields are read through accessors; only the engine mutates them.
//!
//! ## Snapshots
//!
//! `to_bytes` / `from_bytes` encode the state with `bincode`. Restoring
//! re-validates the configuration and the cross-field invariants, so a
//! tampered snapshot is rejected instead of producing an impossible game.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::address::Address;
use super::config::GameConfig;
use super::dice::DIE_FACES;
use super::error::SnapshotError;
use super::player::{Player, PlayerId};
use super::turn::{TurnOrder, TurnStage};

/// Top-level lifecycle stage. Transitions only move forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Players may register.
    #[default]
    Registration,
    /// Players take turns rolling and moving.
    InProgress,
    /// A player reached the win threshold.
    Finished,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Phase::Registration => "registering players",
            Phase::InProgress => "in progress",
            Phase::Finished => "finished",
        };
        f.write_str(text)
    }
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) phase: Phase,
    pub(crate) players: Vec<Player>,
    pub(crate) turn: TurnOrder,
    pub(crate) stage: TurnStage,
    pub(crate) last_roll: Option<u8>,
    /// Starts at 1 when the game starts; 0 during registration.
    pub(crate) turn_number: u32,
    pub(crate) roll_nonce: u64,
    pub(crate) history: Vector<ActionRecord>,
}

impl GameState {
    /// Create an empty state in the registration phase.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            phase: Phase::Registration,
            players: Vec::new(),
            turn: TurnOrder::default(),
            stage: TurnStage::AwaitingRoll,
            last_roll: None,
            turn_number: 0,
            roll_nonce: 0,
            history: Vector::new(),
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Registered players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of registered players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Find a player's seat by address.
    #[must_use]
    pub fn seat_of(&self, address: &Address) -> Option<PlayerId> {
        self.players
            .iter()
            .position(|p| p.address() == *address)
            .map(|i| PlayerId::new(i as u8))
    }

    /// Look up a player by address.
    #[must_use]
    pub fn player(&self, address: &Address) -> Option<&Player> {
        self.players.iter().find(|p| p.address() == *address)
    }

    /// Look up a player by seat.
    #[must_use]
    pub fn player_at(&self, seat: PlayerId) -> Option<&Player> {
        self.players.get(seat.index())
    }

    /// Turn rotation.
    #[must_use]
    pub fn turn(&self) -> &TurnOrder {
        &self.turn
    }

    /// Turn sub-state.
    #[must_use]
    pub fn stage(&self) -> TurnStage {
        self.stage
    }

    /// Last recorded die value.
    #[must_use]
    pub fn last_roll(&self) -> Option<u8> {
        self.last_roll
    }

    /// Turn number (0 before the game starts).
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Rolls made so far.
    #[must_use]
    pub fn roll_nonce(&self) -> u64 {
        self.roll_nonce
    }

    /// Accepted operations in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === History ===

    /// Append an accepted action to the history.
    pub(crate) fn record(&mut self, caller: Address, action: Action) {
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(caller, action, self.turn_number, sequence));
    }

    // === Snapshots ===

    /// Encode the state.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode and validate a state.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let state: GameState = bincode::deserialize(bytes)?;
        state.check_consistency()?;
        Ok(state)
    }

    /// Check the cross-field invariants every reachable state satisfies.
    pub(crate) fn check_consistency(&self) -> Result<(), SnapshotError> {
        self.config.validate()?;

        if self.players.len() > self.config.max_players {
            return Err(SnapshotError::Inconsistent("more players than allowed"));
        }
        let home = self.config.home();
        let mut addresses = FxHashSet::default();
        let mut colors = FxHashSet::default();
        for player in &self.players {
            if player.tokens().len() != self.config.tokens_per_player {
                return Err(SnapshotError::Inconsistent("token count differs from config"));
            }
            if player.tokens().iter().any(|&t| t > home) {
                return Err(SnapshotError::Inconsistent("token beyond home"));
            }
            let home_tokens = player.tokens().iter().filter(|&&t| t == home).count();
            if home_tokens != player.score() as usize {
                return Err(SnapshotError::Inconsistent("score differs from tokens at home"));
            }
            if !addresses.insert(player.address()) || !colors.insert(player.color()) {
                return Err(SnapshotError::Inconsistent("duplicate address or color"));
            }
        }

        let is_die_face = |face: u8| (1..=DIE_FACES).contains(&face);
        if self.last_roll.is_some_and(|face| !is_die_face(face)) {
            return Err(SnapshotError::Inconsistent("last roll is not a die face"));
        }
        if let Some(roll) = self.stage.pending_roll() {
            if !is_die_face(roll) || self.last_roll != Some(roll) {
                return Err(SnapshotError::Inconsistent("pending roll is not the last roll"));
            }
        }

        let threshold = self.config.win_threshold;
        let winners = self.players.iter().filter(|p| p.score() >= threshold).count();
        match self.phase {
            Phase::Registration => {
                let untouched = self.turn_number == 0
                    && self.last_roll.is_none()
                    && self.stage == TurnStage::AwaitingRoll;
                if !untouched || winners > 0 {
                    return Err(SnapshotError::Inconsistent("play recorded during registration"));
                }
            }
            Phase::InProgress | Phase::Finished => {
                if self.players.len() < self.config.min_players {
                    return Err(SnapshotError::Inconsistent("fewer players than required"));
                }
                if self.turn_number == 0 {
                    return Err(SnapshotError::Inconsistent("started game has no turn number"));
                }
            }
        }
        match self.phase {
            Phase::InProgress if winners > 0 => {
                return Err(SnapshotError::Inconsistent("game in progress has a winner"));
            }
            Phase::Finished if winners != 1 || self.stage != TurnStage::AwaitingRoll => {
                return Err(SnapshotError::Inconsistent("finished game needs exactly one winner"));
            }
            _ => {}
        }

        let expected_seats = match self.phase {
            Phase::Registration => 0,
            Phase::InProgress | Phase::Finished => self.players.len(),
        };
        if !self.turn.covers(expected_seats) {
            return Err(SnapshotError::Inconsistent("turn rotation does not match players"));
        }
        Ok(())
    }
}
