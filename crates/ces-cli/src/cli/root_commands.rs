use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Extract, score and store every campaign in an archive.
    Extract(ExtractArgs),
    /// Load an archive and report its shape without touching the store.
    Validate(ValidateArgs),
    /// Summarize what the store holds.
    Stats(StatsArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ExtractArgs {
    /// Archive JSON file (overrides `archive.path`).
    #[arg(short, long)]
    pub archive: Option<PathBuf>,

    /// Database file (overrides `database.path`).
    #[arg(long)]
    pub db: Option<String>,

    /// Documents per transaction group (overrides `pipeline.batch_size`).
    #[arg(short, long)]
    pub batch_size: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    /// Archive JSON file (overrides `archive.path`).
    #[arg(short, long)]
    pub archive: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct StatsArgs {
    /// Database file (overrides `database.path`).
    #[arg(long)]
    pub db: Option<String>,

    /// Number of best-scoring campaigns to list.
    #[arg(long, default_value_t = 10)]
    pub top: u32,
}
