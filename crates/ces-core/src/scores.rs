//! Campaign Effectiveness Score (CES) types.
//!
//! The overall score is the weighted sum of five sub-scores. Weights are an
//! immutable value handed to the scorer at construction; the defaults sum to
//! exactly 1.0.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Tolerance used when checking that weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// The five sub-scores and their weighted combination.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CesScores {
    pub business_results: f64,
    pub market_impact: f64,
    pub creativity: f64,
    pub cultural_relevance: f64,
    pub efficiency: f64,
    pub overall: f64,
}

/// Relative weight of each sub-score in the overall CES score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CesWeights {
    #[serde(default = "default_business_results")]
    pub business_results: f64,
    #[serde(default = "default_market_impact")]
    pub market_impact: f64,
    #[serde(default = "default_creativity")]
    pub creativity: f64,
    #[serde(default = "default_cultural_relevance")]
    pub cultural_relevance: f64,
    #[serde(default = "default_efficiency")]
    pub efficiency: f64,
}

const fn default_business_results() -> f64 {
    0.30
}
const fn default_market_impact() -> f64 {
    0.25
}
const fn default_creativity() -> f64 {
    0.20
}
const fn default_cultural_relevance() -> f64 {
    0.15
}
const fn default_efficiency() -> f64 {
    0.10
}

impl Default for CesWeights {
    fn default() -> Self {
        Self {
            business_results: default_business_results(),
            market_impact: default_market_impact(),
            creativity: default_creativity(),
            cultural_relevance: default_cultural_relevance(),
            efficiency: default_efficiency(),
        }
    }
}

impl CesWeights {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.business_results
            + self.market_impact
            + self.creativity
            + self.cultural_relevance
            + self.efficiency
    }

    /// Check that every weight is non-negative and that they sum to 1.0.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` describing the first violation.
    pub fn validate(&self) -> Result<(), CoreError> {
        let named = [
            ("business_results", self.business_results),
            ("market_impact", self.market_impact),
            ("creativity", self.creativity),
            ("cultural_relevance", self.cultural_relevance),
            ("efficiency", self.efficiency),
        ];
        if let Some((name, value)) = named.iter().find(|(_, w)| !w.is_finite() || *w < 0.0) {
            return Err(CoreError::Validation(format!(
                "weight '{name}' must be a non-negative number, got {value}"
            )));
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(CoreError::Validation(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }

    /// Weighted sum of the five sub-scores. Does not clamp.
    #[must_use]
    pub fn combine(
        &self,
        business_results: f64,
        market_impact: f64,
        creativity: f64,
        cultural_relevance: f64,
        efficiency: f64,
    ) -> CesScores {
        let overall = business_results * self.business_results
            + market_impact * self.market_impact
            + creativity * self.creativity
            + cultural_relevance * self.cultural_relevance
            + efficiency * self.efficiency;
        CesScores {
            business_results,
            market_impact,
            creativity,
            cultural_relevance,
            efficiency,
            overall,
        }
    }
}
