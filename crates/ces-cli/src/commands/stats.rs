use anyhow::Context;
use ces_core::entities::CampaignRecord;
use ces_db::{CesDb, StoreSummary};
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::StatsArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StatsResponse {
    store: StoreSummary,
    top_campaigns: Vec<TopCampaign>,
}

#[derive(Debug, Serialize)]
struct TopCampaign {
    id: String,
    campaign_name: String,
    brand: String,
    year: i32,
    overall_score: f64,
}

impl From<CampaignRecord> for TopCampaign {
    fn from(campaign: CampaignRecord) -> Self {
        Self {
            id: campaign.id,
            campaign_name: campaign.campaign_name,
            brand: campaign.brand,
            year: campaign.year,
            overall_score: campaign.scores.overall,
        }
    }
}

/// Handle `ces stats`.
pub async fn handle(
    args: &StatsArgs,
    config: ces_config::CesConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let config = bootstrap::finalize(config, None, args.db.as_deref(), None)?;
    let db = CesDb::open_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open store {}", config.database.path))?;
    let response = collect(&db, args.top).await?;
    output(&response, flags.format)
}

async fn collect(db: &CesDb, top: u32) -> anyhow::Result<StatsResponse> {
    Ok(StatsResponse {
        store: db.summary().await?,
        top_campaigns: db
            .list_campaigns(top)
            .await?
            .into_iter()
            .map(TopCampaign::from)
            .collect(),
    })
}
