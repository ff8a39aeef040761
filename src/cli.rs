//! Command-line arguments for the renju binary.

use clap::Parser;

/// Renju - rule-enforcement core with an optional automated opponent.
#[derive(Parser, Debug)]
#[command(name = "renju")]
#[command(about = "Five-in-a-row with forbidden-move arbitration", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Board rows
    #[arg(long, default_value_t = 15)]
    pub rows: usize,

    /// Board columns
    #[arg(long, default_value_t = 15)]
    pub cols: usize,

    /// Sente player name
    #[arg(long, default_value = "Anonymous")]
    pub sente: String,

    /// Gote player name
    #[arg(long, default_value = "Gryffin Engine")]
    pub gote: String,

    /// Which side the automated opponent plays (Sente, Gote, or Disabled)
    #[arg(long, default_value = "Gote")]
    pub engine: String,

    /// Forbidden-move policy for Sente (enforced, advisory, or off)
    #[arg(long, default_value = "enforced")]
    pub policy: String,

    /// Fixed seed for the automated opponent (reproducible games)
    #[arg(long)]
    pub seed: Option<u64>,
}
