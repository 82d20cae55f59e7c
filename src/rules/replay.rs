//! Deterministic replay of an action history.
//!
//! A history recorded by one game, applied to a fresh game with the same
//! config and an equivalent dice source, reproduces the original state.
//! Each recorded roll is checked against the replayed face so a different
//! salt or dice source is caught at the first divergent roll.

use tracing::debug;

use crate::core::{Action, ActionRecord, DiceSource, GameConfig, ReplayError};

use super::engine::LudoGame;

/// Rebuild a game by re-applying `history` in order.
///
/// ```
/// use ludo_engine::core::{Address, Color, GameConfig};
/// use ludo_engine::rules::{replay, LudoGame};
///
/// let alice = Address::from_low_u64(1);
/// let bob = Address::from_low_u64(2);
///
/// let mut game = LudoGame::seeded(GameConfig::default(), 9).unwrap();
/// game.register_player(alice, "Alice", Color::Red).unwrap();
/// game.register_player(bob, "Bob", Color::Green).unwrap();
/// game.start_game(alice).unwrap();
/// game.roll_dice(alice, 1).unwrap();
/// game.move_token(alice).unwrap();
///
/// let replayed = replay(GameConfig::default(), game.dice().clone(), game.history()).unwrap();
/// assert_eq!(replayed.state(), game.state());
/// ```
pub fn replay<'a, D, I>(config: GameConfig, dice: D, history: I) -> Result<LudoGame<D>, ReplayError>
where
    D: DiceSource,
    I: IntoIterator<Item = &'a ActionRecord>,
{
    let mut game = LudoGame::new(config, dice)?;

    for record in history {
        let sequence = record.sequence;
        let rejected = |source| ReplayError::Rejected { sequence, source };

        match &record.action {
            Action::Register { name, color } => {
                game.register_player(record.caller, name.clone(), *color).map_err(rejected)?;
            }
            Action::Start => game.start_game(record.caller).map_err(rejected)?,
            Action::Roll { seed, face } => {
                let actual = game.roll_dice(record.caller, *seed).map_err(rejected)?;
                if actual != *face {
                    return Err(ReplayError::Diverged {
                        sequence,
                        recorded: *face,
                        actual,
                    });
                }
            }
            Action::Move { token: None } => {
                game.move_token(record.caller).map_err(rejected)?;
            }
            Action::Move { token: Some(token) } => {
                game.move_token_at(record.caller, *token).map_err(rejected)?;
            }
        }
    }

    debug!(actions = game.history().len(), "history replayed");
    Ok(game)
}
