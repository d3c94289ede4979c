//! Composite CES scoring.
//!
//! Each sub-scorer applies its own cap at 1.0; none is clamped from below.
//! The overall score is the weighted sum using the scorer's [`CesWeights`].

use ces_core::entities::{CulturalInsight, MetricObservation};
use ces_core::scores::{CesScores, CesWeights};

const MARKET_KEYWORDS: [&str; 4] = ["market share", "reach", "awareness", "penetration"];
const EFFICIENCY_KEYWORDS: [&str; 4] = ["roi", "efficiency", "cost-effective", "budget"];
const CREATIVE_KEYWORDS: [&str; 5] = ["innovative", "first", "unique", "breakthrough", "original"];

/// Combines metrics, insights, and raw text into CES scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct CesScorer {
    weights: CesWeights,
}

impl CesScorer {
    #[must_use]
    pub const fn new(weights: CesWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub const fn weights(&self) -> &CesWeights {
        &self.weights
    }

    #[must_use]
    pub fn score(
        &self,
        content: &str,
        metrics: &[MetricObservation],
        insights: &[CulturalInsight],
    ) -> CesScores {
        self.weights.combine(
            business_results(metrics),
            market_impact(metrics),
            creativity(content),
            cultural_relevance(insights),
            efficiency(metrics),
        )
    }
}

#[allow(clippy::cast_precision_loss)]
fn per_hit(base: f64, step: f64, hits: usize) -> f64 {
    (step.mul_add(hits as f64, base)).min(1.0)
}

/// 0.5 flat, plus 0.1 per growth, percentage, or currency metric.
#[must_use]
pub fn business_results(metrics: &[MetricObservation]) -> f64 {
    let hits = metrics
        .iter()
        .filter(|m| m.kind.is_business_result())
        .count();
    if hits == 0 {
        return 0.5;
    }
    per_hit(0.5, 0.1, hits)
}

/// 0.5 plus 0.15 per metric whose context mentions reach or share.
#[must_use]
pub fn market_impact(metrics: &[MetricObservation]) -> f64 {
    let hits = metrics
        .iter()
        .filter(|m| m.context_mentions(&MARKET_KEYWORDS))
        .count();
    per_hit(0.5, 0.15, hits)
}

/// 0.4 plus 0.15 per distinct creative keyword in the text.
#[must_use]
pub fn creativity(content: &str) -> f64 {
    let lowered = content.to_lowercase();
    let hits = CREATIVE_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count();
    per_hit(0.4, 0.15, hits)
}

/// 0.3 with no insights, otherwise mean impact plus a diversity bonus.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cultural_relevance(insights: &[CulturalInsight]) -> f64 {
    if insights.is_empty() {
        return 0.3;
    }
    let count = insights.len() as f64;
    let mean = insights.iter().map(|i| i.impact_score).sum::<f64>() / count;
    let diversity = (0.05 * count).min(0.3);
    (mean + diversity).min(1.0)
}

/// 0.5 plus 0.25 per metric whose context mentions cost or return.
#[must_use]
pub fn efficiency(metrics: &[MetricObservation]) -> f64 {
    let hits = metrics
        .iter()
        .filter(|m| m.context_mentions(&EFFICIENCY_KEYWORDS))
        .count();
    per_hit(0.5, 0.25, hits)
}
