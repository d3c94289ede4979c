//! Cultural marker detection over a categorized lexicon.

use ces_core::entities::CulturalInsight;
use ces_core::enums::CulturalCategory;
use regex::{Regex, RegexBuilder};

use crate::error::ExtractError;
use crate::lexicon::Lexicon;

/// Characters of surrounding text kept on each side of a hit.
pub const CONTEXT_RADIUS: usize = 100;

const BASE_IMPACT: f64 = 0.5;

/// Context keywords and the bonus each adds to a hit's impact score.
const IMPACT_BONUSES: [(&str, f64); 3] = [("strategy", 0.2), ("success", 0.2), ("connect", 0.1)];

#[derive(Debug, Clone)]
struct TermMatcher {
    category: CulturalCategory,
    term: String,
    regex: Regex,
}

/// Finds lexicon terms in campaign text.
///
/// Each term is an independent case-insensitive substring scan, so
/// overlapping terms can both hit (`"ate"` inside `"strategy"`). Only the
/// first occurrence of a term is reported.
#[derive(Debug, Clone)]
pub struct CulturalDetector {
    matchers: Vec<TermMatcher>,
}

impl CulturalDetector {
    /// Compile one matcher per lexicon term.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Pattern` if a term cannot be compiled.
    pub fn new(lexicon: &Lexicon) -> Result<Self, ExtractError> {
        let matchers = lexicon
            .terms()
            .map(|(category, term)| {
                let regex = RegexBuilder::new(&regex::escape(term))
                    .case_insensitive(true)
                    .build()?;
                Ok(TermMatcher {
                    category,
                    term: term.to_string(),
                    regex,
                })
            })
            .collect::<Result<Vec<_>, ExtractError>>()?;
        Ok(Self { matchers })
    }

    /// Detector over the default Filipino lexicon.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Pattern` if a term cannot be compiled.
    pub fn filipino() -> Result<Self, ExtractError> {
        Self::new(&Lexicon::filipino())
    }

    /// Insights in lexicon order, at most one per term.
    #[must_use]
    pub fn detect(&self, content: &str) -> Vec<CulturalInsight> {
        self.matchers
            .iter()
            .filter_map(|matcher| {
                let hit = matcher.regex.find(content)?;
                let context = context_window(content, hit.start(), hit.end(), CONTEXT_RADIUS);
                Some(CulturalInsight {
                    element: matcher.term.clone(),
                    category: matcher.category,
                    impact_score: impact_score(context),
                    context: context.to_string(),
                })
            })
            .collect()
    }
}

/// Up to `radius` characters either side of `start..end`, trimmed.
///
/// Counts characters, not bytes, so the window never splits a code point.
#[must_use]
pub fn context_window(content: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = content[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(start, |(i, _)| i);
    let to = content[end..]
        .char_indices()
        .nth(radius)
        .map_or(content.len(), |(i, _)| end + i);
    content[from..to].trim()
}

/// Base 0.5 plus keyword bonuses found in the context, capped at 1.0.
#[must_use]
pub fn impact_score(context: &str) -> f64 {
    let lowered = context.to_lowercase();
    let score = IMPACT_BONUSES
        .iter()
        .filter(|(keyword, _)| lowered.contains(keyword))
        .fold(BASE_IMPACT, |acc, (_, bonus)| acc + bonus);
    score.min(1.0)
}
