//! Dice sources.
//!
//! ## Key Features
//!
//! - **Seeded**: the die face is a pure function of the caller's seed and the
//!   roll context, so any game can be replayed exactly
//! - **Context-bound**: the same seed gives different faces for different
//!   callers, turns and roll counts
//! - **Pluggable**: `DiceSource` is the seam for a verifiable randomness
//!   source (commit-reveal, oracle) in trust-sensitive deployments
//!
//! `SeededDice` is predictable by whoever picks the seed. It is suitable for
//! simulation, tests and cooperative play only.
//!
//! ```
//! use ludo_engine::core::{Address, DiceSource, RollContext, SeededDice};
//!
//! let mut dice = SeededDice::new(42);
//! let ctx = RollContext::new(Address::from_low_u64(1), 1, 0);
//!
//! let face = dice.roll(7, &ctx);
//! assert!((1..=6).contains(&face));
//! assert_eq!(face, SeededDice::new(42).roll(7, &ctx));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::address::{Address, ADDRESS_LEN};

/// Number of faces on the die.
pub const DIE_FACES: u8 = 6;

/// Execution context mixed into every roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RollContext {
    /// Player rolling.
    pub caller: Address,
    /// Turn number at the time of the roll.
    pub turn_number: u32,
    /// Rolls made in this game before this one.
    pub roll_nonce: u64,
}

impl RollContext {
    /// Create a roll context.
    #[must_use]
    pub fn new(caller: Address, turn_number: u32, roll_nonce: u64) -> Self {
        Self {
            caller,
            turn_number,
            roll_nonce,
        }
    }
}

/// Produces die faces for the engine.
///
/// Implementations must return a value in `1..=DIE_FACES`. The engine only
/// consults its dice after the caller has been authorized.
pub trait DiceSource {
    /// Roll the die for `seed` in `ctx`.
    fn roll(&mut self, seed: u64, ctx: &RollContext) -> u8;
}

impl<D: DiceSource + ?Sized> DiceSource for Box<D> {
    fn roll(&mut self, seed: u64, ctx: &RollContext) -> u8 {
        (**self).roll(seed, ctx)
    }
}

/// Deterministic dice derived from a salt, the seed and the roll context.
///
/// The salt stands in for the entropy of the execution environment; it is
/// fixed per game so replays with the same salt reproduce every roll.
///
/// The context is packed little-endian into the ChaCha key, the salt picks
/// the stream and the seed picks the block. Faces are therefore identical on
/// every target, whatever its pointer width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededDice {
    salt: u64,
}

impl SeededDice {
    /// Create seeded dice with the given salt.
    #[must_use]
    pub const fn new(salt: u64) -> Self {
        Self { salt }
    }

    /// The salt.
    #[must_use]
    pub const fn salt(&self) -> u64 {
        self.salt
    }

    /// Compute the face for `seed` in `ctx` without mutating anything.
    #[must_use]
    pub fn face(&self, seed: u64, ctx: &RollContext) -> u8 {
        let mut key = [0u8; 32];
        key[..ADDRESS_LEN].copy_from_slice(ctx.caller.as_bytes());
        key[ADDRESS_LEN..ADDRESS_LEN + 4].copy_from_slice(&ctx.turn_number.to_le_bytes());
        key[ADDRESS_LEN + 4..].copy_from_slice(&ctx.roll_nonce.to_le_bytes());

        let mut rng = ChaCha8Rng::from_seed(key);
        rng.set_stream(self.salt);
        rng.set_word_pos(u128::from(seed) << 4);
        rng.gen_range(1..=DIE_FACES)
    }
}

impl DiceSource for SeededDice {
    fn roll(&mut self, seed: u64, ctx: &RollContext) -> u8 {
        self.face(seed, ctx)
    }
}

/// Dice that replay a fixed script of faces, cycling when exhausted.
///
/// Seeds and context are ignored. Used to drive exact scenarios.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    /// Create scripted dice.
    ///
    /// Panics if `faces` is empty or contains a value outside `1..=6`.
    pub fn new(faces: impl Into<Vec<u8>>) -> Self {
        let faces = faces.into();
        assert!(!faces.is_empty(), "Script must have at least 1 face");
        assert!(
            faces.iter().all(|f| (1..=DIE_FACES).contains(f)),
            "Script faces must be 1..=6"
        );
        Self { faces, cursor: 0 }
    }

    /// Number of faces rolled so far.
    #[must_use]
    pub fn rolls(&self) -> usize {
        self.cursor
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self, _seed: u64, _ctx: &RollContext) -> u8 {
        let face = self.faces[self.cursor % self.faces.len()];
        self.cursor += 1;
        face
    }
}
