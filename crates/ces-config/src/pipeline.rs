//! Batch orchestration settings.

use serde::{Deserialize, Serialize};

const fn default_batch_size() -> usize {
    100
}

const fn default_progress_every() -> usize {
    50
}

const fn default_summary_chars() -> usize {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Documents per persistence group (one transaction each).
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Log a progress line every N processed documents. `0` disables it.
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,

    /// Length, in characters, of the summary derived from content when a
    /// document has no summary of its own.
    #[serde(default = "default_summary_chars")]
    pub summary_chars: usize,

    /// Emit info-level logs without `--verbose`.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            progress_every: default_progress_every(),
            summary_chars: default_summary_chars(),
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = PipelineConfig::default();
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.progress_every, 50);
        assert_eq!(config.summary_chars, 500);
        assert!(!config.verbose);
    }
}
