// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! runIT exercise log
//!
//! Interactive shell for recording workouts and reviewing statistics.

use anyhow::Context;
use clap::Parser;
use runit::{
    cli::Shell,
    config::{Config, DEFAULT_CONFIG_FILE},
    db::SqliteDb,
    Tracker,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Record workouts and review your exercise statistics
#[derive(Parser)]
#[command(name = "runit", version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.json_logs);

    let config = Config::load(&args.config);
    tracing::info!(database = %config.database_file.display(), "Starting runIT");

    let db = match SqliteDb::open(&config.database_file) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "Failed to open database");
            eprintln!(
                "Could not open database '{}': {}\nCheck 'databaseFile' in {} and try again.",
                config.database_file.display(),
                e,
                args.config.display()
            );
            std::process::exit(1);
        }
    };

    if config.seed_demo_user {
        // A failure here only costs the demo account
        if let Err(e) = db.seed_demo_user() {
            tracing::warn!(error = %e, "Failed to create demo user");
        }
    }

    let mut tracker = Tracker::new(db);
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();

    Shell::new(&mut tracker, std::io::stdout().lock())
        .with_prompt(interactive)
        .run(stdin.lock())
        .context("Shell terminated")?;

    Ok(())
}

/// Initialize logging to stderr, honouring `RUST_LOG`.
fn init_logging(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "runit=warn",
        1 => "runit=info",
        2 => "runit=debug",
        _ => "runit=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
