//! # ces-core
//!
//! Core types shared by every crate of the campaign effectiveness (CES) pipeline:
//! - Input [`Document`](entities::Document) as it appears in a campaign archive
//! - Derived records: campaign, metric observation, cultural insight
//! - Metric and cultural-category enums
//! - Score and weight types for the composite CES score
//! - Run statistics for one batch run
//! - Deterministic campaign identifier derivation
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod scores;
pub mod stats;
