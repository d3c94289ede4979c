use serde::{Deserialize, Serialize};

use crate::enums::MetricKind;

/// One pattern match pulled out of campaign text.
///
/// Observations are append-only and never deduplicated: the same span may be
/// reported by several pattern kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricObservation {
    pub kind: MetricKind,
    /// Parsed value with thousands separators stripped. `None` if unparsable.
    pub numeric_value: Option<f64>,
    /// The raw captured number as it appeared in the text.
    pub text_value: String,
    /// Unit or magnitude token (`%`, `x`, `million`, `K`, ...).
    pub unit: Option<String>,
    /// The full matched span.
    pub context: String,
}

impl MetricObservation {
    /// Whether the lower-cased context mentions any of `keywords`.
    #[must_use]
    pub fn context_mentions(&self, keywords: &[&str]) -> bool {
        let context = self.context.to_lowercase();
        keywords.iter().any(|keyword| context.contains(keyword))
    }
}
