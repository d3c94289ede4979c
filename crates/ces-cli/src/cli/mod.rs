use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `ces` binary.
#[derive(Debug, Parser)]
#[command(
    name = "ces",
    version,
    about = "Campaign effectiveness scoring - extract metrics and cultural markers from campaign archives"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no progress bar)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (info logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}
