use anyhow::Context;
use ces_config::CesConfig;

/// Load `.env`, then the layered configuration.
pub fn load_config() -> anyhow::Result<CesConfig> {
    CesConfig::load_with_dotenv().context("failed to load configuration")
}

/// Apply CLI overrides on top of loaded configuration, then validate.
pub fn finalize(
    mut config: CesConfig,
    archive: Option<&std::path::Path>,
    db: Option<&str>,
    batch_size: Option<usize>,
) -> anyhow::Result<CesConfig> {
    if let Some(archive) = archive {
        config.archive.path = archive.display().to_string();
    }
    if let Some(db) = db {
        config.database.path = db.to_string();
    }
    if let Some(batch_size) = batch_size {
        config.pipeline.batch_size = batch_size;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}
