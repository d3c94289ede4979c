//! Metric repository. Rows are append-only per campaign.

use ces_core::entities::MetricObservation;

use crate::CesDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_enum};

fn row_to_metric(row: &libsql::Row) -> Result<MetricObservation, DatabaseError> {
    Ok(MetricObservation {
        kind: parse_enum(&row.get::<String>(0)?)?,
        numeric_value: row.get::<Option<f64>>(1)?,
        text_value: row.get::<String>(2)?,
        unit: get_opt_string(row, 3)?,
        context: row.get::<String>(4)?,
    })
}

impl CesDb {
    /// Append metric rows for a campaign, preserving their order.
    pub async fn insert_metrics(
        &self,
        campaign_id: &str,
        metrics: &[MetricObservation],
    ) -> Result<(), DatabaseError> {
        for metric in metrics {
            self.conn()
                .execute(
                    "INSERT INTO metrics (campaign_id, metric_type, numeric_value, text_value, unit, context)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    libsql::params![
                        campaign_id,
                        metric.kind.as_str(),
                        metric.numeric_value,
                        metric.text_value.as_str(),
                        metric.unit.as_deref(),
                        metric.context.as_str()
                    ],
                )
                .await?;
        }
        Ok(())
    }

    /// Metrics of a campaign in insertion order.
    pub async fn metrics_for_campaign(
        &self,
        campaign_id: &str,
    ) -> Result<Vec<MetricObservation>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT metric_type, numeric_value, text_value, unit, context
                 FROM metrics WHERE campaign_id = ?1 ORDER BY id",
                [campaign_id],
            )
            .await?;
        let mut metrics = Vec::new();
        while let Some(row) = rows.next().await? {
            metrics.push(row_to_metric(&row)?);
        }
        Ok(metrics)
    }

    pub async fn metric_count(&self) -> Result<usize, DatabaseError> {
        self.count("SELECT COUNT(*) FROM metrics").await
    }
}
