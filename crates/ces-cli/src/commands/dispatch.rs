use ces_config::CesConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: CesConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Extract(args) => commands::extract::handle(&args, config, flags).await,
        Commands::Validate(args) => commands::validate::handle(&args, config, flags),
        Commands::Stats(args) => commands::stats::handle(&args, config, flags).await,
    }
}
