//! The Ludo state machine.
//!
//! `LudoGame` owns the game state, the board geometry, the dice and the
//! event log. Callers drive it one operation at a time:
//!
//! 1. `register_player` for each player (registration order is turn order)
//! 2. `start_game`
//! 3. the current player alternates `roll_dice` and `move_token` until a
//!    player reaches the win threshold
//!
//! ## Implementation Notes
//!
//! - Every operation validates all preconditions before touching state, so
//!   a rejected call leaves the game unchanged
//! - A phase violation is reported before any other check
//! - Rolling the bonus roll (6) keeps the turn with the same player, even
//!   when no token could move

use im::Vector;
use tracing::{debug, info, instrument};

use crate::core::{
    Action, ActionRecord, Address, Color, ConfigError, DiceSource, GameConfig, GameEvent,
    GameState, LudoError, Phase, Player, PlayerId, Result, RollContext, SeededDice,
    SnapshotError, TurnChange, TurnOrder, TurnStage,
};

use super::board::Board;

/// What a move did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    /// No token could move with this roll; the turn was consumed.
    Wasted,
    /// A token changed position.
    Moved { token: usize, from: u8, to: u8 },
}

/// Result of `move_token` / `move_token_at`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The roll that was consumed.
    pub roll: u8,
    /// What happened on the board.
    pub movement: Movement,
    /// A token reached home with this move.
    pub scored: bool,
    /// The same player moves again.
    pub bonus_turn: bool,
    /// The move ended the game.
    pub game_over: bool,
}

impl MoveOutcome {
    /// Check if a token changed position.
    #[must_use]
    pub fn moved(&self) -> bool {
        matches!(self.movement, Movement::Moved { .. })
    }
}

/// A Ludo game.
///
/// ```
/// use ludo_engine::core::{Address, Color, GameConfig, Phase, ScriptedDice};
/// use ludo_engine::rules::LudoGame;
///
/// let alice = Address::from_low_u64(1);
/// let bob = Address::from_low_u64(2);
///
/// let mut game = LudoGame::new(GameConfig::default(), ScriptedDice::new(vec![6, 3])).unwrap();
/// game.register_player(alice, "Alice", Color::Red).unwrap();
/// game.register_player(bob, "Bob", Color::Green).unwrap();
/// game.start_game(alice).unwrap();
///
/// assert_eq!(game.roll_dice(alice, 1).unwrap(), 6);
/// let outcome = game.move_token(alice).unwrap();
/// assert!(outcome.bonus_turn);
/// assert_eq!(game.player(&alice).unwrap().position(), 1);
/// assert_eq!(game.phase(), Phase::InProgress);
/// ```
#[derive(Debug)]
pub struct LudoGame<D = SeededDice> {
    state: GameState,
    board: Board,
    dice: D,
    events: Vector<GameEvent>,
}

impl LudoGame<SeededDice> {
    /// Create a game with seeded dice.
    pub fn seeded(config: GameConfig, salt: u64) -> std::result::Result<Self, ConfigError> {
        Self::new(config, SeededDice::new(salt))
    }
}

impl<D: DiceSource> LudoGame<D> {
    /// Create a game in the registration phase.
    pub fn new(config: GameConfig, dice: D) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            board: Board::new(&config),
            state: GameState::new(config),
            dice,
            events: Vector::new(),
        })
    }

    /// Restore a game from a state, rejecting states no sequence of
    /// operations could have produced. The event log starts empty.
    pub fn from_state(state: GameState, dice: D) -> std::result::Result<Self, SnapshotError> {
        state.check_consistency()?;
        Ok(Self {
            board: Board::new(state.config()),
            state,
            dice,
            events: Vector::new(),
        })
    }

    /// Restore a game from `snapshot_bytes` output. The event log starts empty.
    pub fn from_snapshot_bytes(bytes: &[u8], dice: D) -> std::result::Result<Self, SnapshotError> {
        let state = GameState::from_bytes(bytes)?;
        Self::from_state(state, dice)
    }

    /// Encode the current state.
    pub fn snapshot_bytes(&self) -> std::result::Result<Vec<u8>, SnapshotError> {
        self.state.to_bytes()
    }

    // === Operations ===

    /// Register `caller` with a display name and color.
    ///
    /// # Errors
    ///
    /// `InvalidPhase` outside registration, `AlreadyRegistered`,
    /// `MaxPlayersReached`, `ColorTaken`.
    #[instrument(skip_all, fields(caller = %caller, color = %color))]
    pub fn register_player(
        &mut self,
        caller: Address,
        name: impl Into<String>,
        color: Color,
    ) -> Result<PlayerId> {
        self.check_registration(caller, color)
            .inspect_err(|err| debug!(%err, "registration rejected"))?;

        let name = name.into();
        let seat = PlayerId::new(self.state.players.len() as u8);
        self.state.players.push(Player::new(
            caller,
            name.clone(),
            color,
            self.state.config.tokens_per_player,
        ));
        self.state.record(
            caller,
            Action::Register {
                name: name.clone(),
                color,
            },
        );
        self.emit(GameEvent::PlayerRegistered {
            player: caller,
            seat,
            name,
            color,
        });

        info!(%seat, %color, "player registered");
        Ok(seat)
    }

    /// Leave registration and hand the first turn to the first registrant.
    ///
    /// # Errors
    ///
    /// `InvalidPhase` outside registration, `NotEnoughPlayers`.
    #[instrument(skip_all, fields(caller = %caller))]
    pub fn start_game(&mut self, caller: Address) -> Result<()> {
        self.check_start()
            .inspect_err(|err| debug!(%err, "start rejected"))?;

        self.state.phase = Phase::InProgress;
        self.state.turn = TurnOrder::new(self.state.players.len());
        self.state.stage = TurnStage::AwaitingRoll;
        self.state.turn_number = 1;
        self.state.record(caller, Action::Start);

        let players = self.state.players.iter().map(Player::address).collect();
        self.emit(GameEvent::GameStarted { players });

        info!(players = self.state.players.len(), "game started");
        Ok(())
    }

    /// Roll the die for the current player.
    ///
    /// The face is derived from `seed` and the roll context by the game's
    /// dice source. Returns the face.
    ///
    /// # Errors
    ///
    /// `InvalidPhase` unless in progress, `NotYourTurn`, `AlreadyRolled`.
    #[instrument(skip_all, fields(caller = %caller, seed = seed))]
    pub fn roll_dice(&mut self, caller: Address, seed: u64) -> Result<u8> {
        self.check_roll(caller)
            .inspect_err(|err| debug!(%err, "roll rejected"))?;

        let ctx = RollContext::new(caller, self.state.turn_number, self.state.roll_nonce);
        let face = self.dice.roll(seed, &ctx);
        debug_assert!((1..=6).contains(&face), "dice source returned {face}");

        self.state.last_roll = Some(face);
        self.state.stage = TurnStage::AwaitingMove { roll: face };
        self.state.roll_nonce += 1;
        self.state.record(caller, Action::Roll { seed, face });

        debug!(face, "rolled");
        Ok(face)
    }

    /// Move the first token that can legally use the pending roll.
    ///
    /// If no token can move the roll is wasted and the turn still ends.
    ///
    /// # Errors
    ///
    /// `InvalidPhase` unless in progress, `NotYourTurn`, `MustRollFirst`.
    #[instrument(skip_all, fields(caller = %caller))]
    pub fn move_token(&mut self, caller: Address) -> Result<MoveOutcome> {
        self.apply_move(caller, None)
    }

    /// Move a specific token with the pending roll.
    ///
    /// If that token cannot move the roll is wasted and the turn still ends.
    ///
    /// # Errors
    ///
    /// As `move_token`, plus `InvalidToken` for an index out of range.
    #[instrument(skip_all, fields(caller = %caller, token = token))]
    pub fn move_token_at(&mut self, caller: Address, token: usize) -> Result<MoveOutcome> {
        self.apply_move(caller, Some(token))
    }

    // === Accessors ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Address of the player to move. `None` during registration.
    #[must_use]
    pub fn current_player(&self) -> Option<Address> {
        self.current_seat()
            .and_then(|seat| self.state.player_at(seat))
            .map(Player::address)
    }

    /// Seat index of the player to move. `None` during registration.
    #[must_use]
    pub fn turn_index(&self) -> Option<usize> {
        self.current_seat().map(PlayerId::index)
    }

    /// Last recorded die value.
    #[must_use]
    pub fn last_roll(&self) -> Option<u8> {
        self.state.last_roll
    }

    /// Check if the current player rolled and still owes a move.
    #[must_use]
    pub fn has_rolled_this_turn(&self) -> bool {
        self.state.stage.pending_roll().is_some()
    }

    /// Look up a player by address.
    #[must_use]
    pub fn player(&self, address: &Address) -> Option<&Player> {
        self.state.player(address)
    }

    /// Registered players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.state.players()
    }

    /// The winning player once the game is finished.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        if self.state.phase != Phase::Finished {
            return None;
        }
        let threshold = self.state.config.win_threshold;
        self.state.players.iter().find(|p| p.score() >= threshold)
    }

    /// Turn number (0 before the game starts).
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.state.turn_number
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        self.state.config()
    }

    /// Board geometry.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The full state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Accepted operations in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        self.state.history()
    }

    /// Events emitted since the last drain.
    #[must_use]
    pub fn events(&self) -> &Vector<GameEvent> {
        &self.events
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events).into_iter().collect()
    }

    /// The dice source.
    #[must_use]
    pub fn dice(&self) -> &D {
        &self.dice
    }

    // === Validation ===

    fn require_phase(&self, operation: &'static str, required: Phase) -> Result<()> {
        if self.state.phase == required {
            Ok(())
        } else {
            Err(LudoError::InvalidPhase {
                operation,
                phase: self.state.phase,
            })
        }
    }

    fn require_turn(&self, caller: Address) -> Result<PlayerId> {
        let seat = self.current_seat().ok_or(LudoError::InvalidPhase {
            operation: "turn",
            phase: self.state.phase,
        })?;
        let expected = self
            .state
            .player_at(seat)
            .map(Player::address)
            .ok_or(LudoError::VacantSeat(seat))?;
        if caller == expected {
            Ok(seat)
        } else {
            Err(LudoError::NotYourTurn { caller, expected })
        }
    }

    fn check_registration(&self, caller: Address, color: Color) -> Result<()> {
        self.require_phase("register_player", Phase::Registration)?;

        if self.state.seat_of(&caller).is_some() {
            return Err(LudoError::AlreadyRegistered(caller));
        }
        let max = self.state.config.max_players;
        if self.state.players.len() >= max {
            return Err(LudoError::MaxPlayersReached { max });
        }
        if self.state.players.iter().any(|p| p.color() == color) {
            return Err(LudoError::ColorTaken(color));
        }
        Ok(())
    }

    fn check_start(&self) -> Result<()> {
        self.require_phase("start_game", Phase::Registration)?;

        let required = self.state.config.min_players;
        let registered = self.state.players.len();
        if registered < required {
            return Err(LudoError::NotEnoughPlayers {
                required,
                registered,
            });
        }
        Ok(())
    }

    fn check_roll(&self, caller: Address) -> Result<()> {
        self.require_phase("roll_dice", Phase::InProgress)?;
        self.require_turn(caller)?;

        if self.state.stage.pending_roll().is_some() {
            return Err(LudoError::AlreadyRolled);
        }
        Ok(())
    }

    /// Validate a move and pick the token. Returns (seat, roll, token to move).
    fn plan_move(
        &self,
        caller: Address,
        token: Option<usize>,
    ) -> Result<(PlayerId, u8, Option<(usize, u8)>)> {
        let operation = if token.is_some() { "move_token_at" } else { "move_token" };
        self.require_phase(operation, Phase::InProgress)?;
        let seat = self.require_turn(caller)?;
        let roll = self.state.stage.pending_roll().ok_or(LudoError::MustRollFirst)?;

        let tokens = self
            .state
            .player_at(seat)
            .map(Player::tokens)
            .ok_or(LudoError::VacantSeat(seat))?;

        let step = match token {
            Some(index) => {
                let position = *tokens.get(index).ok_or(LudoError::InvalidToken {
                    token: index,
                    tokens: tokens.len(),
                })?;
                self.board.resolve(position, roll).map(|to| (index, to))
            }
            None => tokens.iter().enumerate().find_map(|(index, &position)| {
                self.board.resolve(position, roll).map(|to| (index, to))
            }),
        };

        Ok((seat, roll, step))
    }

    // === Mutation ===

    fn apply_move(&mut self, caller: Address, token: Option<usize>) -> Result<MoveOutcome> {
        let (seat, roll, step) = self
            .plan_move(caller, token)
            .inspect_err(|err| debug!(%err, "move rejected"))?;

        let home = self.board.home();
        let threshold = self.state.config.win_threshold;

        let mut movement = Movement::Wasted;
        let mut scored = false;
        let mut event = None;

        let player = self
            .state
            .players
            .get_mut(seat.index())
            .ok_or(LudoError::VacantSeat(seat))?;

        if let Some((index, to)) = step {
            let from = player.tokens()[index];
            player.set_token(index, to);
            if to == home {
                player.add_score();
                scored = true;
            }
            movement = Movement::Moved { token: index, from, to };
            event = Some(GameEvent::TokenMoved {
                player: caller,
                token: index,
                from,
                to,
                score: player.score(),
            });
        }
        let score = player.score();

        // History entries carry the turn the move was made in.
        self.state.record(caller, Action::Move { token });
        self.state.stage = TurnStage::AwaitingRoll;

        if let Some(event) = event {
            self.emit(event);
        }

        let game_over = scored && score >= threshold;
        let mut bonus_turn = false;

        if game_over {
            self.state.phase = Phase::Finished;
            info!(%seat, score, "game finished");
        } else {
            let bonus = roll == self.state.config.bonus_roll;
            match self.state.turn.end_turn(bonus) {
                Some(TurnChange::Bonus(_)) => bonus_turn = true,
                Some(TurnChange::Passed(next)) => {
                    self.state.turn_number += 1;
                    debug!(%next, turn = self.state.turn_number, "turn passed");
                }
                None => {}
            }
        }

        debug!(roll, ?movement, scored, bonus_turn, "move resolved");
        Ok(MoveOutcome {
            roll,
            movement,
            scored,
            bonus_turn,
            game_over,
        })
    }

    fn current_seat(&self) -> Option<PlayerId> {
        match self.state.phase {
            Phase::Registration => None,
            Phase::InProgress | Phase::Finished => self.state.turn.current(),
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorKind, ScriptedDice};

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    fn started(faces: Vec<u8>) -> LudoGame<ScriptedDice> {
        let mut game = LudoGame::new(GameConfig::default(), ScriptedDice::new(faces)).unwrap();
        game.register_player(addr(1), "Alice", Color::Red).unwrap();
        game.register_player(addr(2), "Bob", Color::Green).unwrap();
        game.start_game(addr(1)).unwrap();
        game.drain_events();
        game
    }

    #[test]
    fn test_register_assigns_seats_in_order() {
        let mut game = LudoGame::seeded(GameConfig::default(), 1).unwrap();

        assert_eq!(game.register_player(addr(1), "Alice", Color::Red), Ok(PlayerId::new(0)));
        assert_eq!(game.register_player(addr(2), "Bob", Color::Blue), Ok(PlayerId::new(1)));

        let names: Vec<_> = game.players().iter().map(Player::name).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(game.current_player(), None);
        assert_eq!(game.turn_index(), None);
        assert_eq!(game.events().len(), 2);
    }

    #[test]
    fn test_start_requires_two_players() {
        let mut game = LudoGame::seeded(GameConfig::default(), 1).unwrap();
        game.register_player(addr(1), "Alice", Color::Red).unwrap();

        assert_eq!(
            game.start_game(addr(1)),
            Err(LudoError::NotEnoughPlayers { required: 2, registered: 1 })
        );
        assert_eq!(game.phase(), Phase::Registration);
    }

    #[test]
    fn test_start_sets_first_player() {
        let game = started(vec![1]);

        assert_eq!(game.phase(), Phase::InProgress);
        assert_eq!(game.current_player(), Some(addr(1)));
        assert_eq!(game.turn_index(), Some(0));
        assert_eq!(game.turn_number(), 1);
        assert!(!game.has_rolled_this_turn());
    }

    #[test]
    fn test_roll_then_reroll_rejected() {
        let mut game = started(vec![3]);

        assert_eq!(game.roll_dice(addr(1), 1), Ok(3));
        assert!(game.has_rolled_this_turn());
        assert_eq!(game.roll_dice(addr(1), 2), Err(LudoError::AlreadyRolled));
        assert_eq!(game.last_roll(), Some(3));
    }

    #[test]
    fn test_wrong_caller_rejected() {
        let mut game = started(vec![3]);

        let err = game.roll_dice(addr(2), 1).unwrap_err();
        assert_eq!(err, LudoError::NotYourTurn { caller: addr(2), expected: addr(1) });
        assert_eq!(err.kind(), ErrorKind::Authorization);

        let err = game.roll_dice(addr(9), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert!(game.history().iter().all(|r| r.caller != addr(9)));
    }

    #[test]
    fn test_move_before_roll() {
        let mut game = started(vec![3]);
        assert_eq!(game.move_token(addr(1)), Err(LudoError::MustRollFirst));
    }

    #[test]
    fn test_wasted_roll_passes_turn() {
        let mut game = started(vec![4]);

        game.roll_dice(addr(1), 1).unwrap();
        let outcome = game.move_token(addr(1)).unwrap();

        assert_eq!(outcome.movement, Movement::Wasted);
        assert!(!outcome.bonus_turn);
        assert_eq!(game.player(&addr(1)).unwrap().position(), 0);
        assert_eq!(game.current_player(), Some(addr(2)));
        assert_eq!(game.turn_number(), 2);
        assert!(game.events().is_empty());
    }

    #[test]
    fn test_six_enters_and_grants_bonus() {
        let mut game = started(vec![6, 2]);

        game.roll_dice(addr(1), 1).unwrap();
        let outcome = game.move_token(addr(1)).unwrap();

        assert_eq!(outcome.movement, Movement::Moved { token: 0, from: 0, to: 1 });
        assert!(outcome.bonus_turn);
        assert_eq!(game.current_player(), Some(addr(1)));
        assert_eq!(game.turn_number(), 1);
        assert_eq!(
            game.events().iter().cloned().collect::<Vec<_>>(),
            vec![GameEvent::TokenMoved { player: addr(1), token: 0, from: 0, to: 1, score: 0 }]
        );

        game.roll_dice(addr(1), 2).unwrap();
        let outcome = game.move_token(addr(1)).unwrap();
        assert_eq!(outcome.movement, Movement::Moved { token: 0, from: 1, to: 3 });
        assert_eq!(game.current_player(), Some(addr(2)));
    }

    #[test]
    fn test_move_token_at_rejects_bad_index() {
        let mut game = started(vec![6]);

        game.roll_dice(addr(1), 1).unwrap();
        assert_eq!(
            game.move_token_at(addr(1), 1),
            Err(LudoError::InvalidToken { token: 1, tokens: 1 })
        );
        // Rejection kept the pending roll
        assert!(game.has_rolled_this_turn());
        assert!(game.move_token_at(addr(1), 0).unwrap().moved());
    }

    #[test]
    fn test_rejected_calls_leave_state_untouched() {
        let mut game = started(vec![2]);
        let before = game.state().clone();

        let _ = game.move_token(addr(1));
        let _ = game.roll_dice(addr(2), 5);
        let _ = game.register_player(addr(3), "Carol", Color::Yellow);
        let _ = game.start_game(addr(1));

        assert_eq!(game.state(), &before);
    }

    #[test]
    fn test_drain_events() {
        let mut game = LudoGame::seeded(GameConfig::default(), 1).unwrap();
        game.register_player(addr(1), "Alice", Color::Red).unwrap();

        let events = game.drain_events();
        assert_eq!(events.len(), 1);
        assert!(game.events().is_empty());
    }

    #[test]
    fn test_from_state_rejects_vacant_turn_seat() {
        let mut game = started(vec![1]);
        game.roll_dice(addr(1), 1).unwrap();
        game.move_token(addr(1)).unwrap();
        assert_eq!(game.current_player(), Some(addr(2)));

        let mut state = game.state().clone();
        state.players.pop();

        let result = LudoGame::from_state(state, ScriptedDice::new(vec![1]));
        assert!(matches!(result, Err(SnapshotError::Inconsistent(_))));
    }

    #[test]
    fn test_vacant_turn_seat_is_an_error() {
        let mut game = started(vec![1]);
        game.roll_dice(addr(1), 1).unwrap();
        game.move_token(addr(1)).unwrap();
        game.state.players.pop();

        let vacant = LudoError::VacantSeat(PlayerId::new(1));
        assert_eq!(game.current_player(), None);
        assert_eq!(game.roll_dice(Address::ZERO, 1), Err(vacant.clone()));
        assert_eq!(game.move_token(Address::ZERO), Err(vacant));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig::default().with_win_threshold(5);
        assert!(LudoGame::seeded(config, 1).is_err());
    }
}
