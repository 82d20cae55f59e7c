//! Error types.
//!
//! Every rule violation is a caller-correctable precondition failure; nothing
//! is transient and nothing is retried. A rejected call leaves the game
//! exactly as it was.

use thiserror::Error;

use super::address::Address;
use super::player::{Color, PlayerId};
use super::state::Phase;

/// Result alias for game operations.
pub type Result<T, E = LudoError> = std::result::Result<T, E>;

/// Broad classification of a rejected call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller is not the player whose turn it is.
    Authorization,
    /// Operation invoked out of the required order within a turn.
    Sequencing,
    /// Too many players, or a uniqueness constraint would break.
    Capacity,
    /// Operation not allowed in the current game phase.
    Phase,
    /// Argument outside its valid domain.
    Input,
}

/// A rejected game operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LudoError {
    #[error("`{operation}` is not allowed while the game is {phase}")]
    InvalidPhase { operation: &'static str, phase: Phase },

    #[error("not your turn: {caller} called, {expected} is to move")]
    NotYourTurn { caller: Address, expected: Address },

    #[error("the dice were already rolled this turn")]
    AlreadyRolled,

    #[error("must roll before moving")]
    MustRollFirst,

    #[error("maximum of {max} players reached")]
    MaxPlayersReached { max: usize },

    #[error("color {0} is already taken")]
    ColorTaken(Color),

    #[error("{0} is already registered")]
    AlreadyRegistered(Address),

    #[error("need at least {required} players to start, have {registered}")]
    NotEnoughPlayers { required: usize, registered: usize },

    #[error("invalid color {0}, expected 0..=3")]
    InvalidColor(u8),

    #[error("token {token} does not exist (player has {tokens})")]
    InvalidToken { token: usize, tokens: usize },

    #[error("{0} holds the turn but has no player")]
    VacantSeat(PlayerId),
}

impl LudoError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            LudoError::NotYourTurn { .. } | LudoError::VacantSeat(_) => ErrorKind::Authorization,
            LudoError::AlreadyRolled | LudoError::MustRollFirst => ErrorKind::Sequencing,
            LudoError::MaxPlayersReached { .. }
            | LudoError::ColorTaken(_)
            | LudoError::AlreadyRegistered(_)
            | LudoError::NotEnoughPlayers { .. } => ErrorKind::Capacity,
            LudoError::InvalidPhase { .. } => ErrorKind::Phase,
            LudoError::InvalidColor(_) | LudoError::InvalidToken { .. } => ErrorKind::Input,
        }
    }
}

/// An invalid or unreadable `GameConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("player limits must satisfy 2 <= min ({min}) <= max ({max}) <= 4")]
    PlayerLimits { min: usize, max: usize },

    #[error("tokens per player must be 1..=4, got {0}")]
    TokensPerPlayer(usize),

    #[error("win threshold must be 1..={tokens}, got {threshold}")]
    WinThreshold { threshold: u32, tokens: usize },

    #[error("track length must be at least 1")]
    EmptyTrack,

    #[error("board too large: home slot {home} does not fit in a byte")]
    BoardTooLarge { home: usize },

    #[error("{name} must be a die face 1..=6, got {value}")]
    DieFace { name: &'static str, value: u8 },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to encode or restore a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("snapshot carries an invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("snapshot is inconsistent: {0}")]
    Inconsistent(&'static str),
}

/// Failure to rebuild a game from its action history.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("action {sequence} was rejected on replay: {source}")]
    Rejected {
        sequence: u32,
        #[source]
        source: LudoError,
    },

    #[error("action {sequence} rolled {actual}, history recorded {recorded}")]
    Diverged { sequence: u32, recorded: u8, actual: u8 },
}

/// Failure to parse an `Address` from text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AddressParseError {
    #[error("expected 40 hex digits, got {0}")]
    Length(usize),

    #[error("invalid hex digits in address: {0}")]
    InvalidHex(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let caller = Address::from_low_u64(1);
        let expected = Address::from_low_u64(2);

        assert_eq!(LudoError::NotYourTurn { caller, expected }.kind(), ErrorKind::Authorization);
        assert_eq!(LudoError::MustRollFirst.kind(), ErrorKind::Sequencing);
        assert_eq!(LudoError::AlreadyRolled.kind(), ErrorKind::Sequencing);
        assert_eq!(LudoError::MaxPlayersReached { max: 4 }.kind(), ErrorKind::Capacity);
        assert_eq!(LudoError::ColorTaken(Color::Red).kind(), ErrorKind::Capacity);
        assert_eq!(LudoError::AlreadyRegistered(caller).kind(), ErrorKind::Capacity);
        assert_eq!(
            LudoError::InvalidPhase { operation: "roll_dice", phase: Phase::Finished }.kind(),
            ErrorKind::Phase
        );
        assert_eq!(LudoError::InvalidColor(9).kind(), ErrorKind::Input);
    }

    #[test]
    fn test_error_messages() {
        let err = LudoError::InvalidPhase {
            operation: "register_player",
            phase: Phase::InProgress,
        };
        assert_eq!(
            err.to_string(),
            "`register_player` is not allowed while the game is in progress"
        );

        let err = LudoError::NotEnoughPlayers { required: 2, registered: 1 };
        assert_eq!(err.to_string(), "need at least 2 players to start, have 1");
    }
}
