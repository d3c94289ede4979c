//! # ces-extract
//!
//! The extraction-and-scoring half of the CES pipeline:
//! - [`ArchiveLoader`]: locates the document array in a campaign archive
//! - [`MetricExtractor`]: regex-based metric observations
//! - [`CulturalDetector`] over a [`Lexicon`]: cultural marker hits with impact
//! - [`CesScorer`]: five sub-scores and the weighted overall score
//! - [`CampaignAnalyzer`]: all of the above for one document
//!
//! Nothing here touches the store.

pub mod analyzer;
pub mod archive;
pub mod cultural;
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod scoring;

pub use analyzer::CampaignAnalyzer;
pub use archive::{ArchiveLoader, ArchiveReport, LoadedArchive};
pub use cultural::CulturalDetector;
pub use error::ExtractError;
pub use lexicon::Lexicon;
pub use metrics::MetricExtractor;
pub use scoring::CesScorer;
