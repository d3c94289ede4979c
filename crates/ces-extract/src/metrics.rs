//! Pattern-based metric extraction.
//!
//! Five regex families run independently over the raw text, in
//! [`MetricKind::ALL`] order. Every match becomes one observation. Nothing is
//! filtered or deduplicated here: a span such as `"up 25% in awareness"` is
//! reported by the percentage, growth and numeric patterns alike, and the
//! scorer decides what counts.

use std::sync::LazyLock;

use ces_core::entities::MetricObservation;
use ces_core::enums::MetricKind;
use regex::{Captures, Regex};

/// Where an observation's unit comes from.
#[derive(Debug, Clone, Copy)]
enum UnitSource {
    Fixed(&'static str),
    /// Optional magnitude capture group.
    Group(usize),
}

#[derive(Debug)]
struct MetricPattern {
    kind: MetricKind,
    regex: Regex,
    unit: UnitSource,
}

impl MetricPattern {
    fn new(kind: MetricKind, pattern: &str, unit: UnitSource) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).expect("valid metric regex"),
            unit,
        }
    }

    fn observe(&self, caps: &Captures<'_>) -> MetricObservation {
        let text_value = caps.get(1).map_or("", |m| m.as_str()).to_string();
        let unit = match self.unit {
            UnitSource::Fixed(unit) => Some(unit.to_string()),
            UnitSource::Group(idx) => caps.get(idx).map(|m| m.as_str().to_string()),
        };
        MetricObservation {
            kind: self.kind,
            numeric_value: parse_number(&text_value),
            text_value,
            unit,
            context: caps.get(0).map_or("", |m| m.as_str()).to_string(),
        }
    }
}

static PATTERNS: LazyLock<Vec<MetricPattern>> = LazyLock::new(|| {
    vec![
        MetricPattern::new(
            MetricKind::Percentage,
            r"(\d+(?:\.\d+)?)\s*%\s*([a-zA-Z\s]+)",
            UnitSource::Fixed("%"),
        ),
        MetricPattern::new(
            MetricKind::Currency,
            r"(?i)(?:₱|PHP|P)\s*(\d+(?:,\d{3})*(?:\.\d+)?)\s*(million|billion|M|B)?",
            UnitSource::Group(2),
        ),
        MetricPattern::new(
            MetricKind::Multiplier,
            r"(\d+(?:\.\d+)?)[xX]\s*([a-zA-Z\s]+)",
            UnitSource::Fixed("x"),
        ),
        MetricPattern::new(
            MetricKind::Growth,
            r"(?i)(?:grew|increased|up)\s*(?:by\s*)?(\d+(?:\.\d+)?)\s*%",
            UnitSource::Fixed("%"),
        ),
        MetricPattern::new(
            MetricKind::Numeric,
            r"(\d+(?:,\d{3})*(?:\.\d+)?)\s*(million|billion|thousand|K|M|B)?\s*([a-zA-Z\s]+)",
            UnitSource::Group(2),
        ),
    ]
});

/// Parse a captured number, ignoring thousands separators.
///
/// Returns `None` for anything that is not a finite decimal number, e.g.
/// non-ASCII digits matched by `\d`.
fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Applies the fixed metric pattern set to campaign text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricExtractor;

impl MetricExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Extract every observation, ordered by pattern kind then match position.
    #[must_use]
    pub fn extract(&self, content: &str) -> Vec<MetricObservation> {
        PATTERNS
            .iter()
            .flat_map(|pattern| {
                pattern
                    .regex
                    .captures_iter(content)
                    .map(move |caps| pattern.observe(&caps))
            })
            .collect()
    }
}
