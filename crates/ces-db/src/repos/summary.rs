//! Store-wide summary for reporting.

use serde::Serialize;

use crate::CesDb;
use crate::error::DatabaseError;
use crate::helpers::get_count;

/// Number of brands listed in [`StoreSummary::top_brands`].
pub const TOP_BRANDS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandScore {
    pub brand: String,
    pub campaigns: usize,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryImpact {
    pub category: String,
    pub insights: usize,
    pub average_impact: f64,
}

/// Aggregate view of everything in the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    pub campaigns: usize,
    /// `None` while the store holds no campaigns.
    pub average_overall_score: Option<f64>,
    pub metrics: usize,
    pub cultural_insights: usize,
    pub top_brands: Vec<BrandScore>,
    pub insight_categories: Vec<CategoryImpact>,
}

impl CesDb {
    pub async fn summary(&self) -> Result<StoreSummary, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT COUNT(*), AVG(overall_score) FROM campaigns", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let campaigns = get_count(&row, 0)?;
        let average_overall_score = row.get::<Option<f64>>(1)?;

        Ok(StoreSummary {
            campaigns,
            average_overall_score,
            metrics: self.metric_count().await?,
            cultural_insights: self.insight_count().await?,
            top_brands: self.top_brands(TOP_BRANDS).await?,
            insight_categories: self.insight_categories().await?,
        })
    }

    /// Brands ranked by average overall score.
    pub async fn top_brands(&self, limit: u32) -> Result<Vec<BrandScore>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT brand, COUNT(*), AVG(overall_score) AS avg_score
                 FROM campaigns
                 GROUP BY brand
                 ORDER BY avg_score DESC, brand
                 LIMIT ?1",
                libsql::params![i64::from(limit)],
            )
            .await?;
        let mut brands = Vec::new();
        while let Some(row) = rows.next().await? {
            brands.push(BrandScore {
                brand: row.get::<String>(0)?,
                campaigns: get_count(&row, 1)?,
                average_score: row.get::<f64>(2)?,
            });
        }
        Ok(brands)
    }

    /// Insight counts and mean impact per cultural category, most frequent first.
    pub async fn insight_categories(&self) -> Result<Vec<CategoryImpact>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT category, COUNT(*) AS n, AVG(impact_score)
                 FROM cultural_insights
                 GROUP BY category
                 ORDER BY n DESC, category",
                (),
            )
            .await?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(CategoryImpact {
                category: row.get::<String>(0)?,
                insights: get_count(&row, 1)?,
                average_impact: row.get::<f64>(2)?,
            });
        }
        Ok(categories)
    }
}
