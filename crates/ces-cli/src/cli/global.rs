use clap::ValueEnum;

/// Output mode shared by every command.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Aligned key/value or row table.
    Table,
    /// Single-line JSON.
    Raw,
}

/// Global flags accepted before or after the subcommand.
#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
}
