//! Cultural insight repository. Rows are append-only per campaign.

use ces_core::entities::CulturalInsight;

use crate::CesDb;
use crate::error::DatabaseError;
use crate::helpers::parse_enum;

fn row_to_insight(row: &libsql::Row) -> Result<CulturalInsight, DatabaseError> {
    Ok(CulturalInsight {
        element: row.get::<String>(0)?,
        category: parse_enum(&row.get::<String>(1)?)?,
        context: row.get::<String>(2)?,
        impact_score: row.get::<f64>(3)?,
    })
}

impl CesDb {
    /// Append cultural insight rows for a campaign, preserving their order.
    pub async fn insert_insights(
        &self,
        campaign_id: &str,
        insights: &[CulturalInsight],
    ) -> Result<(), DatabaseError> {
        for insight in insights {
            self.conn()
                .execute(
                    "INSERT INTO cultural_insights (campaign_id, element, category, context, impact_score)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    libsql::params![
                        campaign_id,
                        insight.element.as_str(),
                        insight.category.as_str(),
                        insight.context.as_str(),
                        insight.impact_score
                    ],
                )
                .await?;
        }
        Ok(())
    }

    /// Insights of a campaign in insertion order.
    pub async fn insights_for_campaign(
        &self,
        campaign_id: &str,
    ) -> Result<Vec<CulturalInsight>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT element, category, context, impact_score
                 FROM cultural_insights WHERE campaign_id = ?1 ORDER BY id",
                [campaign_id],
            )
            .await?;
        let mut insights = Vec::new();
        while let Some(row) = rows.next().await? {
            insights.push(row_to_insight(&row)?);
        }
        Ok(insights)
    }

    pub async fn insight_count(&self) -> Result<usize, DatabaseError> {
        self.count("SELECT COUNT(*) FROM cultural_insights").await
    }
}
