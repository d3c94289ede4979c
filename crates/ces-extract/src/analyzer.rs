//! Per-document analysis: extraction, detection, and scoring in one step.

use ces_core::entities::{CampaignRecord, Document, ProcessedCampaign};
use ces_core::ids::document_campaign_id;
use ces_core::scores::CesWeights;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::cultural::CulturalDetector;
use crate::error::ExtractError;
use crate::metrics::MetricExtractor;
use crate::scoring::CesScorer;

pub const DEFAULT_SUMMARY_CHARS: usize = 500;
pub const DEFAULT_MARKET: &str = "Philippines";

/// Turns one archive document into a campaign record and its child records.
#[derive(Debug, Clone)]
pub struct CampaignAnalyzer {
    extractor: MetricExtractor,
    detector: CulturalDetector,
    scorer: CesScorer,
    summary_chars: usize,
    default_year: i32,
}

impl CampaignAnalyzer {
    #[must_use]
    pub fn new(detector: CulturalDetector, scorer: CesScorer) -> Self {
        Self {
            extractor: MetricExtractor::new(),
            detector,
            scorer,
            summary_chars: DEFAULT_SUMMARY_CHARS,
            default_year: Utc::now().year(),
        }
    }

    /// Analyzer with the Filipino lexicon and the given weights.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Pattern` if the lexicon fails to compile.
    pub fn filipino(weights: CesWeights) -> Result<Self, ExtractError> {
        Ok(Self::new(
            CulturalDetector::filipino()?,
            CesScorer::new(weights),
        ))
    }

    /// Number of content characters kept when a document has no summary.
    #[must_use]
    pub const fn with_summary_chars(mut self, summary_chars: usize) -> Self {
        self.summary_chars = summary_chars;
        self
    }

    /// Year recorded for documents without a usable one.
    #[must_use]
    pub const fn with_default_year(mut self, year: i32) -> Self {
        self.default_year = year;
        self
    }

    /// Read archive entry `index` as a document, then analyze it.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::InvalidDocument` if the entry is not an object
    /// or a field has the wrong type.
    pub fn analyze_value(
        &self,
        index: usize,
        value: &Value,
    ) -> Result<ProcessedCampaign, ExtractError> {
        let document = parse_document(index, value)?;
        Ok(self.analyze(&document))
    }

    /// Analyze a document. A document with no text still yields a campaign
    /// record, with no metrics or insights.
    #[must_use]
    pub fn analyze(&self, document: &Document) -> ProcessedCampaign {
        let text = document.text();
        let metrics = self.extractor.extract(text);
        let insights = self.detector.detect(text);
        let scores = self.scorer.score(text, &metrics, &insights);

        let campaign = CampaignRecord {
            id: document_campaign_id(document),
            campaign_name: or_default(document.campaign_name.as_deref(), "Unknown Campaign"),
            brand: or_default(document.brand.as_deref(), "Unknown Brand"),
            agency: or_default(document.agency.as_deref(), "Unknown Agency"),
            year: document.year_number().unwrap_or(self.default_year),
            category: or_default(document.category.as_deref(), "General"),
            subcategory: non_empty(document.subcategory.as_deref()),
            market: DEFAULT_MARKET.to_string(),
            award_metal: non_empty(document.award_metal.as_deref()),
            scores,
            summary: self.summary(document, text),
            raw_content: text.to_string(),
        };

        ProcessedCampaign {
            campaign,
            metrics,
            insights,
        }
    }

    fn summary(&self, document: &Document, text: &str) -> String {
        match non_empty(document.summary.as_deref()) {
            Some(summary) => summary,
            None => text.chars().take(self.summary_chars).collect(),
        }
    }
}

/// Deserialize archive entry `index` into a [`Document`].
///
/// # Errors
///
/// Returns `ExtractError::InvalidDocument` with the entry index.
pub fn parse_document(index: usize, value: &Value) -> Result<Document, ExtractError> {
    Document::deserialize(value).map_err(|source| ExtractError::InvalidDocument { index, source })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn or_default(value: Option<&str>, fallback: &str) -> String {
    non_empty(value).unwrap_or_else(|| fallback.to_string())
}
