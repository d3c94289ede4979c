//! Input documents and the records derived from them.
//!
//! A [`Document`] is read from the archive. Processing it yields exactly one
//! [`CampaignRecord`] plus any number of [`MetricObservation`]s and
//! [`CulturalInsight`]s, bundled as a [`ProcessedCampaign`] so child records
//! always travel with the campaign they reference.

mod campaign;
mod document;
mod insight;
mod metric;

pub use campaign::{CampaignRecord, ProcessedCampaign};
pub use document::Document;
pub use insight::CulturalInsight;
pub use metric::MetricObservation;
