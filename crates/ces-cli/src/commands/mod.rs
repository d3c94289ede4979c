pub mod dispatch;
pub mod extract;
pub mod stats;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use ces_config::CesConfig;
use ces_extract::{ArchiveLoader, ExtractError, LoadedArchive};

use crate::pipeline::PipelineError;

/// Load the configured archive. Fails when no archive path is known.
///
/// Only an archive with no document collection is reported as
/// `PipelineError::MalformedArchive`; unreadable files and invalid JSON keep
/// their own errors.
pub fn load_archive(config: &CesConfig) -> anyhow::Result<LoadedArchive> {
    if !config.archive.is_configured() {
        anyhow::bail!("no archive given: pass --archive or set archive.path / CES_ARCHIVE__PATH");
    }
    let path = Path::new(&config.archive.path);
    ArchiveLoader::default()
        .load_path(path)
        .map_err(|error| match error {
            malformed @ ExtractError::MalformedArchive(_) => {
                anyhow::Error::new(PipelineError::MalformedArchive(malformed))
            }
            other => anyhow::Error::new(other),
        })
        .with_context(|| format!("failed to load archive {}", path.display()))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn config_for(path: &Path) -> CesConfig {
        let mut config = CesConfig::default();
        config.archive.path = path.display().to_string();
        config
    }

    #[test]
    fn missing_file_is_not_reported_as_malformed() {
        let dir = TempDir::new().unwrap();
        let err = load_archive(&config_for(&dir.path().join("missing.json"))).unwrap_err();

        assert!(err.downcast_ref::<PipelineError>().is_none(), "{err:#}");
        assert!(
            matches!(err.downcast_ref::<ExtractError>(), Some(ExtractError::Io { .. })),
            "{err:#}"
        );
        assert!(!format!("{err:#}").contains("malformed archive"), "{err:#}");
    }

    #[test]
    fn invalid_json_keeps_its_own_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_archive(&config_for(&path)).unwrap_err();
        assert!(
            matches!(err.downcast_ref::<ExtractError>(), Some(ExtractError::InvalidJson(_))),
            "{err:#}"
        );
    }

    #[test]
    fn archive_without_documents_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, r#"{"metadata": {"total_documents": 0}}"#).unwrap();

        let err = load_archive(&config_for(&path)).unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<PipelineError>(),
                Some(PipelineError::MalformedArchive(_))
            ),
            "{err:#}"
        );
    }
}
