use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::commands::load_archive;
use crate::output::output;

/// Handle `ces validate`.
pub fn handle(
    args: &ValidateArgs,
    config: ces_config::CesConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let config = bootstrap::finalize(config, args.archive.as_deref(), None, None)?;
    let archive = load_archive(&config)?;
    output(&archive.report, flags.format)
}
