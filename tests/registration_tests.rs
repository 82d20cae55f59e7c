//! Registration and game start.

use ludo_engine::core::{
    Address, Color, ErrorKind, GameConfig, GameEvent, LudoError, Phase, PlayerId,
};
use ludo_engine::rules::LudoGame;

fn addr(n: u64) -> Address {
    Address::from_low_u64(n)
}

fn new_game() -> LudoGame {
    LudoGame::seeded(GameConfig::default(), 42).unwrap()
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn test_registers_players_with_unique_colors_and_starts() {
    let mut game = new_game();

    game.register_player(addr(1), "Alice", Color::Red).unwrap();
    game.register_player(addr(2), "Bob", Color::Green).unwrap();
    game.start_game(addr(1)).unwrap();

    assert_eq!(game.current_player(), Some(addr(1)));

    let events: Vec<_> = game.drain_events();
    assert_eq!(events.len(), 3);
    assert!(matches!(
        &events[0],
        GameEvent::PlayerRegistered { player, seat, name, color: Color::Red }
            if *player == addr(1) && *seat == PlayerId::new(0) && name == "Alice"
    ));
    assert!(matches!(&events[1], GameEvent::PlayerRegistered { color: Color::Green, .. }));
    assert_eq!(
        events[2],
        GameEvent::GameStarted {
            players: vec![addr(1), addr(2)]
        }
    );
}

#[test]
fn test_player_record_after_registration() {
    let mut game = new_game();
    game.register_player(addr(7), "Carol", Color::Yellow).unwrap();

    let player = game.player(&addr(7)).unwrap();
    assert_eq!(player.address(), addr(7));
    assert_eq!(player.name(), "Carol");
    assert_eq!(player.color(), Color::Yellow);
    assert_eq!(player.position(), 0);
    assert_eq!(player.score(), 0);

    assert!(game.player(&addr(8)).is_none());
}

#[test]
fn test_enforces_max_players() {
    let mut game = new_game();

    game.register_player(addr(1), "Alice", Color::Red).unwrap();
    game.register_player(addr(2), "Bob", Color::Green).unwrap();
    game.register_player(addr(3), "Carol", Color::Yellow).unwrap();
    game.register_player(addr(4), "Dan", Color::Blue).unwrap();

    // Capacity is checked before color, so a taken color still reports capacity
    for color in Color::ALL {
        let err = game.register_player(addr(5), "Eve", color).unwrap_err();
        assert_eq!(err, LudoError::MaxPlayersReached { max: 4 });
        assert_eq!(err.kind(), ErrorKind::Capacity);
    }
    assert_eq!(game.players().len(), 4);
}

#[test]
fn test_rejects_duplicate_color() {
    let mut game = new_game();

    game.register_player(addr(1), "Alice", Color::Red).unwrap();
    assert_eq!(
        game.register_player(addr(2), "Bob", Color::Red),
        Err(LudoError::ColorTaken(Color::Red))
    );
    assert_eq!(game.players().len(), 1);
}

#[test]
fn test_rejects_double_registration() {
    let mut game = new_game();

    game.register_player(addr(1), "Alice", Color::Red).unwrap();
    assert_eq!(
        game.register_player(addr(1), "Alice again", Color::Blue),
        Err(LudoError::AlreadyRegistered(addr(1)))
    );
    assert_eq!(game.player(&addr(1)).unwrap().name(), "Alice");
}

#[test]
fn test_rejects_out_of_range_color() {
    assert_eq!(Color::try_from(4u8), Err(LudoError::InvalidColor(4)));
    assert_eq!(LudoError::InvalidColor(4).kind(), ErrorKind::Input);
}

#[test]
fn test_smaller_player_cap() {
    let config = GameConfig::default().with_player_limits(2, 2);
    let mut game = LudoGame::seeded(config, 1).unwrap();

    game.register_player(addr(1), "Alice", Color::Red).unwrap();
    game.register_player(addr(2), "Bob", Color::Green).unwrap();
    assert_eq!(
        game.register_player(addr(3), "Carol", Color::Yellow),
        Err(LudoError::MaxPlayersReached { max: 2 })
    );
}

// =============================================================================
// Start
// =============================================================================

#[test]
fn test_start_needs_minimum_players() {
    let mut game = new_game();

    assert_eq!(
        game.start_game(addr(1)),
        Err(LudoError::NotEnoughPlayers { required: 2, registered: 0 })
    );

    game.register_player(addr(1), "Alice", Color::Red).unwrap();
    assert_eq!(
        game.start_game(addr(1)),
        Err(LudoError::NotEnoughPlayers { required: 2, registered: 1 })
    );
    assert_eq!(game.phase(), Phase::Registration);
}

#[test]
fn test_cannot_start_twice_or_register_after_start() {
    let mut game = new_game();
    game.register_player(addr(1), "Alice", Color::Red).unwrap();
    game.register_player(addr(2), "Bob", Color::Green).unwrap();
    game.start_game(addr(2)).unwrap();

    let err = game.start_game(addr(1)).unwrap_err();
    assert_eq!(
        err,
        LudoError::InvalidPhase { operation: "start_game", phase: Phase::InProgress }
    );
    assert_eq!(err.kind(), ErrorKind::Phase);

    assert_eq!(
        game.register_player(addr(3), "Carol", Color::Yellow),
        Err(LudoError::InvalidPhase { operation: "register_player", phase: Phase::InProgress })
    );
}

#[test]
fn test_turn_order_follows_registration_order() {
    let mut game = new_game();

    // Colors registered out of order; seats still follow registration
    game.register_player(addr(3), "Carol", Color::Blue).unwrap();
    game.register_player(addr(1), "Alice", Color::Red).unwrap();
    game.register_player(addr(2), "Bob", Color::Yellow).unwrap();
    game.start_game(addr(1)).unwrap();

    let order: Vec<_> = game
        .state()
        .turn()
        .upcoming()
        .map(|seat| game.state().player_at(seat).unwrap().address())
        .collect();
    assert_eq!(order, vec![addr(3), addr(1), addr(2)]);
    assert_eq!(game.current_player(), Some(addr(3)));
}

#[test]
fn test_rolls_and_moves_rejected_during_registration() {
    let mut game = new_game();
    game.register_player(addr(1), "Alice", Color::Red).unwrap();

    assert_eq!(
        game.roll_dice(addr(1), 1),
        Err(LudoError::InvalidPhase { operation: "roll_dice", phase: Phase::Registration })
    );
    assert_eq!(
        game.move_token(addr(1)),
        Err(LudoError::InvalidPhase { operation: "move_token", phase: Phase::Registration })
    );
}
