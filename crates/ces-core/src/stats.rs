//! Statistics for a single batch run.

use serde::{Deserialize, Serialize};

/// Counters for one batch run. Created fresh per run, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub total_documents: usize,
    pub processed_documents: usize,
    pub errors: usize,
    pub extracted_metrics: usize,
    pub cultural_insights: usize,
}

impl RunStats {
    #[must_use]
    pub fn new(total_documents: usize) -> Self {
        Self {
            total_documents,
            ..Self::default()
        }
    }

    /// Count one successfully persisted document.
    pub fn record_success(&mut self, metrics: usize, insights: usize) {
        self.processed_documents += 1;
        self.extracted_metrics += metrics;
        self.cultural_insights += insights;
    }

    /// Count one failed document.
    pub fn record_failure(&mut self) {
        self.errors += 1;
    }

    /// Documents that have been attempted so far.
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.processed_documents + self.errors
    }
}
