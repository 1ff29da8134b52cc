//! xfcheckers command line
//!
//! Headless entry points to the library:
//! - `check` loads a scene description and prints its traversal
//! - `play` runs a game from a list of clicks
//! - `settings` prints the effective settings

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use xfcheckers::core::{load_settings, save_settings};
use xfcheckers::game::CheckersGame;
use xfcheckers::scene::{SceneDescription, SceneGraph, TraceContext};

/// Checkers with a declarative scene graph
#[derive(Parser, Debug)]
#[command(name = "xfcheckers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a scene description, report warnings and print a traversal
    Check {
        /// Scene description JSON
        scene: PathBuf,

        /// Scene time to sample animations and highlights at
        #[arg(long, default_value = "0.0")]
        time: f64,
    },

    /// Play a game headlessly from `x1,y1:x2,y2` click pairs
    Play {
        moves: Vec<String>,
    },

    /// Print the effective settings
    Settings {
        /// Write the effective settings back to the config directory
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Check { scene, time } => check(&scene, time),
        Command::Play { moves } => play(&moves),
        Command::Settings { save } => settings(save),
    }
}

fn check(path: &Path, time: f64) -> Result<()> {
    let description = SceneDescription::from_path(path)
        .with_context(|| format!("failed to read scene {}", path.display()))?;
    let mut graph = SceneGraph::from_description(&description)
        .with_context(|| format!("scene {} is invalid", path.display()))?;

    for warning in graph.warnings() {
        println!("warning: {warning}");
    }
    println!(
        "{} components, {} primitives",
        graph.node_count(),
        graph.primitive_count()
    );

    graph.update(time);
    let mut ctx = TraceContext::at_time(time);
    graph.display_scene(&mut ctx);
    for event in ctx.events() {
        println!("{event}");
    }
    Ok(())
}

/// Parse `x,y`
fn parse_coord(text: &str) -> Result<(u8, u8)> {
    let (x, y) = text
        .split_once(',')
        .with_context(|| format!("expected x,y but got '{text}'"))?;
    let x: u8 = x.trim().parse().with_context(|| format!("bad x in '{text}'"))?;
    let y: u8 = y.trim().parse().with_context(|| format!("bad y in '{text}'"))?;
    if x > 7 || y > 7 {
        bail!("({x}, {y}) is off the board");
    }
    Ok((x, y))
}

fn play(moves: &[String]) -> Result<()> {
    let settings = load_settings();
    let step = settings.move_animation_secs + 0.01;
    let mut game = CheckersGame::new(settings);
    let mut t = 0.0;

    for entry in moves {
        let (from, to) = entry
            .split_once(':')
            .with_context(|| format!("expected x1,y1:x2,y2 but got '{entry}'"))?;
        let (from, to) = (parse_coord(from)?, parse_coord(to)?);

        game.select_piece(from.0, from.1);
        game.select_tile(to.0, to.1);
        info!("[GAME] {} after {}", game.state().name(), entry);

        // Let the move animation and any follow-up transition finish
        t += step;
        game.update(t);
        if game.state().is_game_over() {
            break;
        }
    }

    println!("{}", game.board());
    println!("{}", game.scoreboard());
    println!("state: {}", game.state().name());
    Ok(())
}

fn settings(save: bool) -> Result<()> {
    let settings = load_settings();
    println!("{}", serde_json::to_string_pretty(&settings)?);
    if save {
        let path = save_settings(&settings).context("failed to save settings")?;
        println!("saved to {}", path.display());
    }
    Ok(())
}
