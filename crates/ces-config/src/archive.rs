//! Input archive location.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArchiveConfig {
    /// Path to the archive JSON file. Empty means it must come from the CLI.
    #[serde(default)]
    pub path: String,
}

impl ArchiveConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.path.is_empty()
    }
}
