//! Campaign repository: upsert keyed on the deterministic id, read-back.

use ces_core::entities::CampaignRecord;
use ces_core::scores::CesScores;

use crate::CesDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_year};

const CAMPAIGN_COLUMNS: &str = "id, campaign_name, brand, agency, year, category, subcategory, \
     market, award_metal, business_results_score, market_impact_score, creativity_score, \
     cultural_relevance_score, efficiency_score, overall_score, summary, raw_content";

fn row_to_campaign(row: &libsql::Row) -> Result<CampaignRecord, DatabaseError> {
    Ok(CampaignRecord {
        id: row.get::<String>(0)?,
        campaign_name: row.get::<String>(1)?,
        brand: row.get::<String>(2)?,
        agency: row.get::<String>(3)?,
        year: get_year(row, 4)?,
        category: row.get::<String>(5)?,
        subcategory: get_opt_string(row, 6)?,
        market: row.get::<String>(7)?,
        award_metal: get_opt_string(row, 8)?,
        scores: CesScores {
            business_results: row.get::<f64>(9)?,
            market_impact: row.get::<f64>(10)?,
            creativity: row.get::<f64>(11)?,
            cultural_relevance: row.get::<f64>(12)?,
            efficiency: row.get::<f64>(13)?,
            overall: row.get::<f64>(14)?,
        },
        summary: row.get::<String>(15)?,
        raw_content: row.get::<String>(16)?,
    })
}

impl CesDb {
    /// Insert a campaign, or overwrite the existing row with the same id.
    ///
    /// Metric and insight rows already stored for the id are kept.
    pub async fn upsert_campaign(&self, campaign: &CampaignRecord) -> Result<(), DatabaseError> {
        let scores = &campaign.scores;
        self.conn()
            .execute(
                "INSERT INTO campaigns (id, campaign_name, brand, agency, year, category, subcategory,
                    market, award_metal, business_results_score, market_impact_score, creativity_score,
                    cultural_relevance_score, efficiency_score, overall_score, summary, raw_content)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
                 ON CONFLICT(id) DO UPDATE SET
                    campaign_name = excluded.campaign_name,
                    brand = excluded.brand,
                    agency = excluded.agency,
                    year = excluded.year,
                    category = excluded.category,
                    subcategory = excluded.subcategory,
                    market = excluded.market,
                    award_metal = excluded.award_metal,
                    business_results_score = excluded.business_results_score,
                    market_impact_score = excluded.market_impact_score,
                    creativity_score = excluded.creativity_score,
                    cultural_relevance_score = excluded.cultural_relevance_score,
                    efficiency_score = excluded.efficiency_score,
                    overall_score = excluded.overall_score,
                    summary = excluded.summary,
                    raw_content = excluded.raw_content,
                    updated_at = datetime('now')",
                libsql::params![
                    campaign.id.as_str(),
                    campaign.campaign_name.as_str(),
                    campaign.brand.as_str(),
                    campaign.agency.as_str(),
                    i64::from(campaign.year),
                    campaign.category.as_str(),
                    campaign.subcategory.as_deref(),
                    campaign.market.as_str(),
                    campaign.award_metal.as_deref(),
                    scores.business_results,
                    scores.market_impact,
                    scores.creativity,
                    scores.cultural_relevance,
                    scores.efficiency,
                    scores.overall,
                    campaign.summary.as_str(),
                    campaign.raw_content.as_str()
                ],
            )
            .await?;
        Ok(())
    }

    pub async fn get_campaign(&self, id: &str) -> Result<CampaignRecord, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_campaign(&row)
    }

    /// Campaigns ordered by overall score, best first.
    pub async fn list_campaigns(&self, limit: u32) -> Result<Vec<CampaignRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {CAMPAIGN_COLUMNS} FROM campaigns
                     ORDER BY overall_score DESC, id LIMIT ?1"
                ),
                libsql::params![i64::from(limit)],
            )
            .await?;
        let mut campaigns = Vec::new();
        while let Some(row) = rows.next().await? {
            campaigns.push(row_to_campaign(&row)?);
        }
        Ok(campaigns)
    }

    pub async fn campaign_count(&self) -> Result<usize, DatabaseError> {
        self.count("SELECT COUNT(*) FROM campaigns").await
    }

    pub(crate) async fn count(&self, sql: &str) -> Result<usize, DatabaseError> {
        let mut rows = self.conn().query(sql, ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        crate::helpers::get_count(&row, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn test_db() -> CesDb {
        CesDb::open_local(":memory:").await.unwrap()
    }

    fn campaign(id: &str, overall: f64) -> CampaignRecord {
        CampaignRecord {
            id: id.to_string(),
            campaign_name: "Bayanihan Bottles".to_string(),
            brand: "Acme".to_string(),
            agency: "Hive".to_string(),
            year: 2023,
            category: "Effectiveness".to_string(),
            subcategory: Some("FMCG".to_string()),
            market: "Philippines".to_string(),
            award_metal: None,
            scores: CesScores {
                business_results: 0.6,
                market_impact: 0.5,
                creativity: 0.4,
                cultural_relevance: 0.3,
                efficiency: 0.5,
                overall,
            },
            summary: "summary".to_string(),
            raw_content: "content".to_string(),
        }
    }

    #[tokio::test]
    async fn upsert_then_get() {
        let db = test_db().await;
        let record = campaign("c1", 0.49);
        db.upsert_campaign(&record).await.unwrap();

        assert_eq!(db.get_campaign("c1").await.unwrap(), record);
        assert_eq!(db.campaign_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn upsert_overwrites_in_place() {
        let db = test_db().await;
        db.upsert_campaign(&campaign("c1", 0.49)).await.unwrap();

        let mut updated = campaign("c1", 0.75);
        updated.agency = "Other Agency".to_string();
        updated.award_metal = Some("Gold".to_string());
        db.upsert_campaign(&updated).await.unwrap();

        assert_eq!(db.campaign_count().await.unwrap(), 1);
        assert_eq!(db.get_campaign("c1").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn get_missing_campaign_is_no_result() {
        let db = test_db().await;
        assert!(matches!(
            db.get_campaign("nope").await,
            Err(DatabaseError::NoResult)
        ));
    }

    #[tokio::test]
    async fn list_orders_by_overall_score() {
        let db = test_db().await;
        db.upsert_campaign(&campaign("low", 0.3)).await.unwrap();
        db.upsert_campaign(&campaign("high", 0.9)).await.unwrap();
        db.upsert_campaign(&campaign("mid", 0.6)).await.unwrap();

        let ids: Vec<String> = db
            .list_campaigns(2)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["high", "mid"]);
    }
}
