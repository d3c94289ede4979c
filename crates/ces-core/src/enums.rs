//! Metric kinds and cultural lexicon categories.
//!
//! Both enums use `snake_case` serialization and expose `as_str()` for the
//! value stored in SQL. Declaration order is significant: extraction and
//! detection walk `ALL` in this order, and their output order follows it.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// MetricKind
// ---------------------------------------------------------------------------

/// The pattern family that produced a metric observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// `25% increase in sales`
    Percentage,
    /// `₱2.5 million`, `PHP 1,000`
    Currency,
    /// `3x growth`
    Multiplier,
    /// `grew by 15%`
    Growth,
    /// Catch-all: any number with trailing words.
    Numeric,
}

impl MetricKind {
    /// Extraction order.
    pub const ALL: [Self; 5] = [
        Self::Percentage,
        Self::Currency,
        Self::Multiplier,
        Self::Growth,
        Self::Numeric,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Currency => "currency",
            Self::Multiplier => "multiplier",
            Self::Growth => "growth",
            Self::Numeric => "numeric",
        }
    }

    /// Kinds that count towards the business-results sub-score.
    #[must_use]
    pub const fn is_business_result(self) -> bool {
        matches!(self, Self::Growth | Self::Percentage | Self::Currency)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CulturalCategory
// ---------------------------------------------------------------------------

/// Category of a cultural lexicon term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CulturalCategory {
    Values,
    Festivals,
    Family,
    Food,
    Expressions,
    Places,
    Occasions,
}

impl CulturalCategory {
    pub const ALL: [Self; 7] = [
        Self::Values,
        Self::Festivals,
        Self::Family,
        Self::Food,
        Self::Expressions,
        Self::Places,
        Self::Occasions,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Values => "values",
            Self::Festivals => "festivals",
            Self::Family => "family",
            Self::Food => "food",
            Self::Expressions => "expressions",
            Self::Places => "places",
            Self::Occasions => "occasions",
        }
    }
}

impl fmt::Display for CulturalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
