//! The write contract the batch orchestrator drives.
//!
//! A run opens one transaction per document group. Each document is written
//! inside its own savepoint, so a document that fails half way leaves none of
//! its rows behind while the rest of the group still commits.

use std::fmt::Display;

use ces_core::entities::ProcessedCampaign;
use tracing::warn;

use crate::CesDb;
use crate::error::DatabaseError;

const DOCUMENT_SAVEPOINT: &str = "ces_document";

/// Destination for processed campaigns.
///
/// `begin_group` and `commit_group` failures mean the store is unusable and
/// should end the run. A `persist` failure concerns one document only, unless
/// it is `DatabaseError::Unavailable`: then the document's partial rows could
/// not be undone and the open group must be rolled back, not committed.
#[allow(async_fn_in_trait)]
pub trait CampaignSink {
    /// Open the transaction for a document group.
    async fn begin_group(&self) -> Result<(), DatabaseError>;

    /// Upsert a campaign and append its metric and insight rows.
    ///
    /// On any error other than `Unavailable`, nothing written by this call
    /// remains.
    async fn persist(&self, processed: &ProcessedCampaign) -> Result<(), DatabaseError>;

    /// Commit the open group.
    async fn commit_group(&self) -> Result<(), DatabaseError>;

    /// Discard everything written since `begin_group`.
    async fn rollback_group(&self) -> Result<(), DatabaseError>;
}

impl CesDb {
    async fn write_processed(&self, processed: &ProcessedCampaign) -> Result<(), DatabaseError> {
        let id = processed.campaign.id.as_str();
        self.upsert_campaign(&processed.campaign).await?;
        self.insert_metrics(id, &processed.metrics).await?;
        self.insert_insights(id, &processed.insights).await?;
        Ok(())
    }
}

/// The error `persist` reports for a failed write. A savepoint that could not
/// be undone leaves partial rows in the open group, which makes the store
/// unavailable for the rest of the group.
fn savepoint_failure<E: Display>(
    campaign_id: &str,
    undone: Result<(), E>,
    error: DatabaseError,
) -> DatabaseError {
    match undone {
        Ok(()) => error,
        Err(rollback) => {
            warn!(campaign_id, error = %rollback, "failed to roll back campaign savepoint");
            DatabaseError::Unavailable(format!(
                "rollback of campaign {campaign_id} failed after `{error}`: {rollback}"
            ))
        }
    }
}

impl CampaignSink for CesDb {
    async fn begin_group(&self) -> Result<(), DatabaseError> {
        self.conn()
            .execute("BEGIN", ())
            .await
            .map_err(|e| DatabaseError::Unavailable(format!("begin group: {e}")))?;
        Ok(())
    }

    async fn persist(&self, processed: &ProcessedCampaign) -> Result<(), DatabaseError> {
        self.conn()
            .execute(&format!("SAVEPOINT {DOCUMENT_SAVEPOINT}"), ())
            .await?;

        match self.write_processed(processed).await {
            Ok(()) => {
                self.conn()
                    .execute(&format!("RELEASE SAVEPOINT {DOCUMENT_SAVEPOINT}"), ())
                    .await?;
                Ok(())
            }
            Err(error) => {
                let undo = format!(
                    "ROLLBACK TO SAVEPOINT {DOCUMENT_SAVEPOINT}; RELEASE SAVEPOINT {DOCUMENT_SAVEPOINT};"
                );
                let undone = self.conn().execute_batch(&undo).await.map(|_| ());
                Err(savepoint_failure(&processed.campaign.id, undone, error))
            }
        }
    }

    async fn commit_group(&self) -> Result<(), DatabaseError> {
        self.conn()
            .execute("COMMIT", ())
            .await
            .map_err(|e| DatabaseError::Unavailable(format!("commit group: {e}")))?;
        Ok(())
    }

    async fn rollback_group(&self) -> Result<(), DatabaseError> {
        self.conn().execute("ROLLBACK", ()).await?;
        Ok(())
    }
}
