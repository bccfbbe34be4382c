//! Blockpad command-line driver.
//!
//! Replays a RON script of editor events against a fresh session and prints
//! the final session state as JSON.
//!
//! Usage:
//!   blockpad replay script.ron
//!   blockpad replay script.ron --config blockpad.ron --pretty
//!   RUST_LOG=blockpad_doc=debug blockpad replay script.ron

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use blockpad_doc::{EditorConfig, EditorSession};

mod script;

/// Block document editor driver.
#[derive(Parser, Debug)]
#[command(name = "blockpad")]
#[command(about = "Drive a Blockpad editing session from the command line")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a RON event script and print the resulting session as JSON
    Replay {
        /// Script file (RON list of events)
        script: PathBuf,

        /// Editor config file (RON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    // stdout carries the snapshot, logs go to stderr
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Replay {
            script,
            config,
            pretty,
        } => run_replay(&script, config.as_deref(), pretty),
    }
}

fn run_replay(script_path: &Path, config: Option<&Path>, pretty: bool) -> Result<()> {
    let config = match config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EditorConfig::default(),
    };

    let text = std::fs::read_to_string(script_path)
        .with_context(|| format!("reading script {}", script_path.display()))?;
    let events = script::parse(&text)
        .with_context(|| format!("parsing script {}", script_path.display()))?;

    let mut session = EditorSession::new(&config);
    script::replay(&mut session, &events);
    tracing::info!(
        events = events.len(),
        blocks = session.document().len(),
        tags = session.tags().len(),
        "replay finished"
    );

    let snapshot = session.snapshot();
    let json = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");
    Ok(())
}
