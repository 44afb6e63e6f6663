//! Mancala in the terminal, human against the computer.

use anyhow::Context;
use mancala_core::{GameConfig, GameError, GameEvent, GameSession, Scoreboard, Side};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod terminal;

use terminal::{describe, parse_pit, render_board, render_scoreboard};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = config_from_env()?;
    info!(?config, "Starting Mancala");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut scores = Scoreboard::new();
    let mut game_number: u64 = 0;

    loop {
        let mut game_config = config.clone();
        game_config.seed = config.seed.map(|seed| seed.wrapping_add(game_number));
        game_number += 1;

        let Some(human) = play_game(game_config, &mut input, &mut scores)? else {
            break;
        };
        println!("{}", render_scoreboard(&scores, human));

        match prompt(&mut input, "Play again? [y/N] ")? {
            Some(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
            _ => break,
        }
    }

    println!("Thanks for playing.");
    Ok(())
}

/// Read one setting from the environment, if present
fn env_setting<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .with_context(|| format!("{key}={value}")),
        Err(_) => Ok(None),
    }
}

fn config_from_env() -> anyhow::Result<GameConfig> {
    let mut config = GameConfig::default();

    if let Some(stones) = env_setting("MANCALA_STONES")? {
        config.stones_per_pit = stones;
    }
    if let Some(first) = env_setting("MANCALA_FIRST")? {
        config.first_mover = first;
    }
    if let Some(rule) = env_setting("MANCALA_END_RULE")? {
        config.end_rule = rule;
    }
    if let Some(difficulty) = env_setting("MANCALA_DIFFICULTY")? {
        config.difficulty = difficulty;
    }
    config.seed = env_setting("MANCALA_SEED")?;

    config.validate()?;
    Ok(config)
}

/// Print a prompt and read a line; `None` once input is closed
fn prompt(input: &mut impl BufRead, message: &str) -> io::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn print_events(events: &[GameEvent], human: Side) {
    for line in events.iter().filter_map(|event| describe(event, human)) {
        println!("{line}");
    }
}

/// Play one game to the end.
///
/// Returns the human's side, or `None` if input closed mid-game.
fn play_game(
    config: GameConfig,
    input: &mut impl BufRead,
    scores: &mut Scoreboard,
) -> anyhow::Result<Option<Side>> {
    let mut session = GameSession::with_bot(config)?;
    let human = session.human_side();

    println!("You play the bottom row. Pick a pit by number, 1 to 6.");
    print_events(&session.advance(), human);

    while session.is_active() {
        println!();
        println!("{}", render_board(&session.snapshot(), human));

        let Some(line) = prompt(input, "Your move: ")? else {
            return Ok(None);
        };
        let pit = match parse_pit(&line, human) {
            Ok(pit) => pit,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match session.play_move(human, pit) {
            Ok(events) => print_events(&events, human),
            Err(err @ GameError::InvalidMove(_)) => println!("{err}"),
            Err(err) => {
                warn!(%err, "game stopped");
                return Err(err.into());
            }
        }
    }

    println!();
    println!("{}", render_board(&session.snapshot(), human));

    if let Some(reason) = session.abort_reason() {
        warn!(%reason, "game aborted");
        return Err(reason.clone().into());
    }
    session.report_outcome(scores);
    Ok(Some(human))
}
