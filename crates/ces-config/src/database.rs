//! Results store configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "ces_intelligence.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// libSQL database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
