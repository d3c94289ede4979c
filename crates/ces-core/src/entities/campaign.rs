use serde::{Deserialize, Serialize};

use super::{CulturalInsight, MetricObservation};
use crate::scores::CesScores;

/// The stored form of one processed document.
///
/// `id` is derived from name, brand and year (see [`crate::ids`]), so
/// re-processing the same campaign overwrites this record in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub id: String,
    pub campaign_name: String,
    pub brand: String,
    pub agency: String,
    pub year: i32,
    pub category: String,
    pub subcategory: Option<String>,
    pub market: String,
    pub award_metal: Option<String>,
    pub scores: CesScores,
    pub summary: String,
    pub raw_content: String,
}

/// A campaign record with the child records extracted from its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedCampaign {
    pub campaign: CampaignRecord,
    pub metrics: Vec<MetricObservation>,
    pub insights: Vec<CulturalInsight>,
}
