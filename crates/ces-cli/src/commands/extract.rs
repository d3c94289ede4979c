use anyhow::Context;
use ces_core::stats::RunStats;
use ces_db::{CesDb, StoreSummary};
use ces_extract::{ArchiveReport, CampaignAnalyzer};
use serde::Serialize;
use tracing::info;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExtractArgs;
use crate::commands::load_archive;
use crate::output::output;
use crate::pipeline::{BatchPipeline, FailureSummary, PipelineError};

/// Printed after a run. `complete` is false when the store became unavailable
/// part way and `stats` only covers the documents handled until then.
#[derive(Debug, Serialize)]
struct ExtractResponse {
    complete: bool,
    archive: ArchiveReport,
    groups: usize,
    stats: RunStats,
    failures: Vec<FailureSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    store: Option<StoreSummary>,
}

/// Handle `ces extract`.
pub async fn handle(
    args: &ExtractArgs,
    config: ces_config::CesConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let config = bootstrap::finalize(
        config,
        args.archive.as_deref(),
        args.db.as_deref(),
        args.batch_size,
    )?;

    let archive = load_archive(&config)?;
    let db = CesDb::open_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open store {}", config.database.path))?;

    let analyzer = CampaignAnalyzer::filipino(config.scoring)?
        .with_summary_chars(config.pipeline.summary_chars);
    let pipeline = BatchPipeline::new(&analyzer, &db, config.pipeline.batch_size)
        .with_progress_every(config.pipeline.progress_every);

    match pipeline.run(&archive.documents).await {
        Ok(report) => {
            info!(
                processed = report.stats.processed_documents,
                errors = report.stats.errors,
                metrics = report.stats.extracted_metrics,
                insights = report.stats.cultural_insights,
                "extraction complete"
            );
            let response = ExtractResponse {
                complete: true,
                archive: archive.report,
                groups: report.groups,
                stats: report.stats,
                failures: report.failures.iter().map(FailureSummary::from).collect(),
                store: Some(db.summary().await?),
            };
            output(&response, flags.format)
        }
        Err(error) => {
            if let PipelineError::SinkUnavailable { stats, .. } = &error {
                let response = ExtractResponse {
                    complete: false,
                    archive: archive.report,
                    groups: 0,
                    stats: *stats,
                    failures: Vec::new(),
                    store: None,
                };
                output(&response, flags.format)?;
            }
            Err(error.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ces_config::CesConfig;
    use tempfile::TempDir;

    use super::*;
    use crate::cli::OutputFormat;

    const ARCHIVE: &str = r#"{
        "metadata": {"total_documents": 3},
        "all_documents": [
            {"campaign_name": "Kapwa Cans", "brand": "Acme", "year": 2023,
             "content": "Sales grew by 15% as the bayanihan spirit drove our strategy for success."},
            {"campaign_name": "Broken", "content": ["not", "text"]},
            {"campaign_name": "Quiet", "brand": "Beta", "summary": "A first-of-its-kind jeepney tour."}
        ]
    }"#;

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Raw,
            quiet: true,
            verbose: false,
        }
    }

    fn write_archive(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("archive.json");
        std::fs::write(&path, ARCHIVE).unwrap();
        path
    }

    #[tokio::test]
    async fn extract_writes_campaigns_to_store() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("ces.db").display().to_string();
        let args = ExtractArgs {
            archive: Some(write_archive(&dir)),
            db: Some(db_path.clone()),
            batch_size: Some(2),
        };

        handle(&args, CesConfig::default(), &flags()).await.unwrap();
        // Second run upserts the same two campaigns.
        handle(&args, CesConfig::default(), &flags()).await.unwrap();

        let db = CesDb::open_local(&db_path).await.unwrap();
        let summary = db.summary().await.unwrap();
        assert_eq!(summary.campaigns, 2);
        assert!(summary.cultural_insights >= 2);
    }

    #[tokio::test]
    async fn extract_without_archive_fails() {
        let args = ExtractArgs {
            archive: None,
            db: Some(":memory:".to_string()),
            batch_size: None,
        };
        let err = handle(&args, CesConfig::default(), &flags())
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("no archive"), "{err:#}");
    }

    #[tokio::test]
    async fn extract_rejects_malformed_archive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"metadata": {"total_documents": 0}}"#).unwrap();
        let args = ExtractArgs {
            archive: Some(path),
            db: Some(":memory:".to_string()),
            batch_size: None,
        };
        let err = handle(&args, CesConfig::default(), &flags())
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("malformed archive"), "{err:#}");
    }
}
