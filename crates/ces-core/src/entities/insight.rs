use serde::{Deserialize, Serialize};

use crate::enums::CulturalCategory;

/// A cultural lexicon term found in campaign text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalInsight {
    /// The lexicon term as written in the lexicon.
    pub element: String,
    pub category: CulturalCategory,
    /// Surrounding text window, trimmed.
    pub context: String,
    /// Contextual impact in `[0, 1]`.
    pub impact_score: f64,
}
