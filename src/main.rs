//! Renju - interactive five-in-a-row with an automated opponent.
//!
//! Process wiring only: parse arguments, initialize tracing, construct the
//! game actor once, and hand its handle to the interactive loop.

#![warn(missing_docs)]

mod cli;
mod front;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use renju::actor::GameActor;
use renju::game::{EngineStatus, ForbiddenPolicy, RuleEngine, Side};
use renju::move_source::{MoveSource, RandomSource};
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so the board stays readable on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let status = EngineStatus::from_str(&cli.engine)
        .map_err(|_| anyhow!("unknown engine seat {:?}; expected Sente, Gote or Disabled", cli.engine))?;
    let policy = ForbiddenPolicy::from_str(&cli.policy)
        .map_err(|_| anyhow!("unknown policy {:?}; expected enforced, advisory or off", cli.policy))?;

    let mut engine = RuleEngine::new(cli.rows, cli.cols);
    engine.set_name(Side::Sente, cli.sente);
    engine.set_name(Side::Gote, cli.gote);
    engine.set_engine_status(status);
    engine.set_policy(policy);

    let source: Box<dyn MoveSource> = match cli.seed {
        Some(seed) => Box::new(RandomSource::seeded(seed)),
        None => Box::new(RandomSource::new()),
    };

    let (handle, worker) = GameActor::spawn(engine, source);
    info!(rows = cli.rows, cols = cli.cols, %status, %policy, "backend ready");

    front::run(handle).await?;

    worker.await.context("game actor panicked")??;
    Ok(())
}
