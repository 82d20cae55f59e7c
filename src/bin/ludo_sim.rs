//! Simulate a Ludo game from the command line.
//!
//! Registers synthetic players, then lets whoever holds the turn roll and
//! move with incrementing seeds until someone wins or the action cap is hit.
//! Events go to stdout (text or JSON lines); logs go to stderr.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ludo_engine::{Address, Color, GameConfig, GameEvent, LudoGame, Phase};

const NAMES: [&str; 4] = ["Alice", "Bob", "Carol", "Dan"];

/// Ludo simulator
#[derive(Parser, Debug)]
#[command(name = "ludo_sim")]
#[command(about = "Play a seeded Ludo game to completion", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of players (2-4)
    #[arg(short, long, default_value = "2")]
    players: usize,

    /// Dice salt; the same salt and seed replay the same game
    #[arg(long, default_value = "42")]
    salt: u64,

    /// First roll seed; each roll uses the next one
    #[arg(long, default_value = "1")]
    seed: u64,

    /// TOML game config (defaults to the single-token rules)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many roll+move pairs
    #[arg(long, default_value = "10000")]
    max_actions: usize,

    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => GameConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };

    if !(2..=NAMES.len()).contains(&cli.players) {
        bail!("--players must be 2..=4, got {}", cli.players);
    }

    let mut game = LudoGame::seeded(config, cli.salt)?;

    for (i, (&name, color)) in NAMES.iter().zip(Color::ALL).take(cli.players).enumerate() {
        game.register_player(Address::from_low_u64(i as u64 + 1), name, color)?;
    }
    let host = Address::from_low_u64(1);
    game.start_game(host)?;
    print_events(&mut game, cli.json)?;

    let mut seed = cli.seed;
    let mut actions = 0;
    while game.phase() == Phase::InProgress && actions < cli.max_actions {
        let current = game
            .current_player()
            .context("game in progress without a current player")?;
        game.roll_dice(current, seed)?;
        game.move_token(current)?;
        print_events(&mut game, cli.json)?;

        seed = seed.wrapping_add(1);
        actions += 1;
    }

    match game.winner() {
        Some(winner) => info!(
            winner = winner.name(),
            turns = game.turn_number(),
            actions,
            "game over"
        ),
        None => warn!(actions, "action cap reached before anyone won"),
    }

    if !cli.json {
        println!();
        for player in game.players() {
            println!(
                "{:<6} {:<7} tokens {:?} score {}",
                player.name(),
                player.color(),
                player.tokens(),
                player.score()
            );
        }
    }

    Ok(())
}

fn print_events(game: &mut LudoGame, json: bool) -> Result<()> {
    for event in game.drain_events() {
        if json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            println!("{}", describe(&event, game));
        }
    }
    Ok(())
}

fn describe(event: &GameEvent, game: &LudoGame) -> String {
    match event {
        GameEvent::TokenMoved { player, token, from, to, score } => {
            let name = game.player(player).map_or("?", |p| p.name());
            let phase = game.board().phase(*to);
            format!("{name} token {token}: {from} -> {to} ({phase:?}), score {score}")
        }
        other => other.to_string(),
    }
}
