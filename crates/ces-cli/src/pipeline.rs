//! Batch orchestration: analyze → persist, one transaction per document group.
//!
//! Documents are processed strictly in order, one at a time. Each group of
//! `batch_size` documents is written inside a single sink transaction and
//! every document inside its own savepoint. A document that cannot be read or
//! written is counted, logged and skipped; the rest of its group still
//! commits. A sink that cannot open or commit a group, or cannot undo a failed
//! document, stops the run: the open group is rolled back and the statistics
//! gathered up to that point travel with the error.

use ces_core::entities::ProcessedCampaign;
use ces_core::stats::RunStats;
use ces_db::{CampaignSink, DatabaseError};
use ces_extract::{CampaignAnalyzer, ExtractError};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::progress::Progress;

/// Why one document was skipped.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    InvalidDocument(ExtractError),

    #[error("failed to persist campaign: {0}")]
    Persist(DatabaseError),
}

/// A skipped document and the reason it was skipped.
#[derive(Debug)]
pub struct DocumentFailure {
    /// Position in the archive's document array.
    pub index: usize,
    pub campaign_name: Option<String>,
    pub reason: DocumentError,
}

/// Failures that end a run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("malformed archive: {0}")]
    MalformedArchive(#[source] ExtractError),

    /// `stats` covers the documents handled before the store went away. It is
    /// incomplete and the writes of the group that was open have been
    /// discarded.
    #[error("store unavailable after {} of {} documents: {source}", .stats.attempted(), .stats.total_documents)]
    SinkUnavailable {
        stats: RunStats,
        #[source]
        source: DatabaseError,
    },
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub stats: RunStats,
    pub groups: usize,
    pub failures: Vec<DocumentFailure>,
}

/// Serializable view of a [`DocumentFailure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureSummary {
    pub index: usize,
    pub campaign_name: Option<String>,
    pub reason: String,
}

impl From<&DocumentFailure> for FailureSummary {
    fn from(failure: &DocumentFailure) -> Self {
        Self {
            index: failure.index,
            campaign_name: failure.campaign_name.clone(),
            reason: failure.reason.to_string(),
        }
    }
}

/// Drives the analyzer and a sink over a loaded document collection.
pub struct BatchPipeline<'a, S> {
    analyzer: &'a CampaignAnalyzer,
    sink: &'a S,
    batch_size: usize,
    progress_every: usize,
}

impl<'a, S: CampaignSink> BatchPipeline<'a, S> {
    /// A `batch_size` of zero is treated as one.
    pub fn new(analyzer: &'a CampaignAnalyzer, sink: &'a S, batch_size: usize) -> Self {
        Self {
            analyzer,
            sink,
            batch_size: batch_size.max(1),
            progress_every: 0,
        }
    }

    /// Log a progress line every `n` processed documents. Zero disables it.
    #[must_use]
    pub const fn with_progress_every(mut self, n: usize) -> Self {
        self.progress_every = n;
        self
    }

    /// Process every document.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::SinkUnavailable` if a group cannot be started
    /// or committed. Per-document failures are reported in the
    /// [`RunReport`], never as an error.
    pub async fn run(&self, documents: &[Value]) -> Result<RunReport, PipelineError> {
        let mut stats = RunStats::new(documents.len());
        let mut failures = Vec::new();
        let total_groups = documents.len().div_ceil(self.batch_size);
        let progress = Progress::groups(total_groups as u64, "processing campaigns");

        info!(
            documents = documents.len(),
            groups = total_groups,
            batch_size = self.batch_size,
            "starting batch run"
        );

        for (group, chunk) in documents.chunks(self.batch_size).enumerate() {
            if let Err(source) = self.sink.begin_group().await {
                progress.finish_err("store unavailable");
                return Err(PipelineError::SinkUnavailable { stats, source });
            }

            for (offset, value) in chunk.iter().enumerate() {
                let index = group * self.batch_size + offset;
                match self.process(index, value).await {
                    Ok(processed) => {
                        stats.record_success(processed.metrics.len(), processed.insights.len());
                        self.log_progress(&stats);
                    }
                    Err(failure) => {
                        stats.record_failure();
                        if let DocumentError::Persist(source @ DatabaseError::Unavailable(_)) =
                            failure.reason
                        {
                            return Err(self.abort_group(stats, source, &progress).await);
                        }
                        warn!(
                            index = failure.index,
                            campaign = failure.campaign_name.as_deref().unwrap_or("<unnamed>"),
                            reason = %failure.reason,
                            "skipping document"
                        );
                        failures.push(failure);
                    }
                }
            }

            if let Err(source) = self.sink.commit_group().await {
                return Err(self.abort_group(stats, source, &progress).await);
            }

            progress.inc(1);
            info!(
                group = group + 1,
                of = total_groups,
                documents = chunk.len(),
                processed = stats.processed_documents,
                errors = stats.errors,
                "group committed"
            );
        }

        progress.finish_ok(&format!(
            "{} processed, {} errors",
            stats.processed_documents, stats.errors
        ));

        Ok(RunReport {
            stats,
            groups: total_groups,
            failures,
        })
    }

    /// Roll back the open group after a fatal sink error. The rollback is
    /// best effort; its own failure is only logged.
    async fn abort_group(
        &self,
        stats: RunStats,
        source: DatabaseError,
        progress: &Progress,
    ) -> PipelineError {
        if let Err(error) = self.sink.rollback_group().await {
            warn!(%error, "failed to roll back document group");
        }
        progress.finish_err("store unavailable");
        PipelineError::SinkUnavailable { stats, source }
    }

    async fn process(
        &self,
        index: usize,
        value: &Value,
    ) -> Result<ProcessedCampaign, DocumentFailure> {
        let campaign_name = value
            .get("campaign_name")
            .and_then(Value::as_str)
            .map(str::to_string);
        let fail = |reason| DocumentFailure {
            index,
            campaign_name: campaign_name.clone(),
            reason,
        };

        let processed = self
            .analyzer
            .analyze_value(index, value)
            .map_err(|e| fail(DocumentError::InvalidDocument(e)))?;

        self.sink
            .persist(&processed)
            .await
            .map_err(|e| fail(DocumentError::Persist(e)))?;

        debug!(
            index,
            campaign_id = %processed.campaign.id,
            metrics = processed.metrics.len(),
            insights = processed.insights.len(),
            overall = processed.campaign.scores.overall,
            "persisted campaign"
        );
        Ok(processed)
    }

    fn log_progress(&self, stats: &RunStats) {
        if self.progress_every > 0 && stats.processed_documents % self.progress_every == 0 {
            info!(
                processed = stats.processed_documents,
                total = stats.total_documents,
                "progress"
            );
        }
    }
}
