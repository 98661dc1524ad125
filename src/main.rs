//! Headless blockfall runner (default binary).
//!
//! Plays one game with a simple placement heuristic, driving the engine only
//! through its public reducer API and the logical clock, then prints the
//! final high-score record as JSON on stdout. Logs go to stderr.
//!
//! Environment:
//! - `BLOCKFALL_CONFIG`: JSON config file (defaults when unset)
//! - `BLOCKFALL_SEED`: fixed seed (otherwise derived from the wall clock)
//! - `BLOCKFALL_LOG`: log level (`error`..`trace`, default `info`)
//! - `BLOCKFALL_MAX_PIECES`: stop after this many pieces (default 500)

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::{debug, info, Level};
use tracing_subscriber::prelude::*;

use blockfall::core::{Board, Config, Game, HighScore, Platform};
use blockfall::types::{CellKind, GameAction};

const DEFAULT_MAX_PIECES: u32 = 500;
const PLAYER_INITIALS: &str = "CPU";
const PLATFORM: Platform = Platform::Desktop;

fn main() -> Result<()> {
    init_logging();

    let config = Config::from_env().context("failed to load config")?;
    let started_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?
        .as_millis() as u64;
    let seed = match env_parse::<u32>("BLOCKFALL_SEED")? {
        Some(seed) => seed,
        None => started_at as u32,
    };
    let max_pieces = env_parse::<u32>("BLOCKFALL_MAX_PIECES")?.unwrap_or(DEFAULT_MAX_PIECES);

    info!(
        seed,
        max_pieces,
        walls = ?config.walls,
        platform = PLATFORM.as_str(),
        "starting headless game"
    );
    let game = run(Game::new(config, seed).start(), max_pieces);

    info!(
        score = game.score(),
        lines = game.lines_cleared(),
        level = game.level(),
        pieces = game.blocks_spawned(),
        clock_ms = game.clock_ms(),
        over = game.over(),
        "game finished"
    );

    if game.over() {
        let record = HighScore::from_game(&game, PLAYER_INITIALS, started_at, PLATFORM)
            .map_err(|e| anyhow::anyhow!("{} ({})", e.message(), e.code()))?;
        println!("{}", serde_json::to_string(&record)?);
    } else {
        let summary = serde_json::json!({
            "score": game.score(),
            "linesCleared": game.lines_cleared(),
            "over": false,
        });
        println!("{}", summary);
    }
    Ok(())
}

fn init_logging() {
    let level = std::env::var("BLOCKFALL_LOG")
        .ok()
        .and_then(|s| Level::from_str(s.trim()).ok())
        .unwrap_or(Level::INFO);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            let value = raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("invalid {}", key))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

/// Play until the game ends or `max_pieces` have spawned
fn run(mut game: Game, max_pieces: u32) -> Game {
    while !game.over() && game.blocks_spawned() < max_pieces {
        let piece_id = game.blocks_spawned();
        let plan = plan_placement(&game);
        debug!(piece = piece_id, actions = plan.len(), "placing");

        // One clock tick between inputs, as a human-speed driver would.
        for action in plan {
            if game.over() || game.blocks_spawned() != piece_id {
                break;
            }
            game = game.apply(action).tick_clock();
        }

        // A plan cut short by an early lock just moves on to the next piece.
        while !game.over() && game.blocks_spawned() == piece_id {
            game = game.tick_clock();
        }
    }
    game
}

/// Choose rotation and column for the falling piece by trying each placement
fn plan_placement(game: &Game) -> Vec<GameAction> {
    let width = game.board().width();
    let mut best: Option<(f64, Vec<GameAction>)> = None;

    for turns in 0..4 {
        for lefts in 0..width {
            for rights in 0..width {
                // Only one horizontal direction is ever needed.
                if lefts > 0 && rights > 0 {
                    continue;
                }
                let mut actions = vec![GameAction::RotateCw; turns];
                actions.extend(std::iter::repeat(GameAction::MoveLeft).take(lefts));
                actions.extend(std::iter::repeat(GameAction::MoveRight).take(rights));
                actions.push(GameAction::HardDrop);

                let outcome = actions.iter().fold(game.clone(), |g, &a| g.apply(a));
                let value = evaluate(game, &outcome);
                if best.as_ref().map_or(true, |(v, _)| value > *v) {
                    best = Some((value, actions));
                }
            }
        }
    }

    best.map(|(_, actions)| actions)
        .unwrap_or_else(|| vec![GameAction::HardDrop])
}

/// Higher is better
fn evaluate(before: &Game, after: &Game) -> f64 {
    if after.over() {
        return f64::MIN;
    }
    let lines = after.lines_cleared().saturating_sub(before.lines_cleared()) as f64;
    let heights = column_heights(after.board());
    let aggregate: usize = heights.iter().sum();
    let bumpiness: usize = heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum();
    let holes = count_holes(after.board());

    0.76 * lines - 0.51 * aggregate as f64 - 0.36 * holes as f64 - 0.18 * bumpiness as f64
}

fn column_heights(board: &Board) -> Vec<usize> {
    let rows: Vec<&[blockfall::types::Cell]> = board.rows().collect();
    (0..board.width())
        .map(|col| {
            rows.iter()
                .position(|row| row[col].kind == CellKind::Block)
                .map_or(0, |top| rows.len() - top)
        })
        .collect()
}

fn count_holes(board: &Board) -> usize {
    let rows: Vec<&[blockfall::types::Cell]> = board.rows().collect();
    (0..board.width())
        .map(|col| {
            rows.iter()
                .skip_while(|row| row[col].kind != CellKind::Block)
                .filter(|row| row[col].kind == CellKind::Empty)
                .count()
        })
        .sum()
}
