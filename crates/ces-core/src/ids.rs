//! Deterministic campaign identifiers.
//!
//! A campaign id is the lowercase hex SHA-256 of `"{name}_{brand}_{year}"`
//! built from the document's own fields (absent fields contribute an empty
//! string). The same source fields always produce the same id, which is what
//! makes re-processing an upsert rather than an insert.

use sha2::{Digest, Sha256};

use crate::entities::Document;

/// Derive the campaign id from raw name, brand and year.
#[must_use]
pub fn campaign_id(name: &str, brand: &str, year: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(b"_");
    hasher.update(brand.as_bytes());
    hasher.update(b"_");
    hasher.update(year.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Derive the campaign id for a document.
#[must_use]
pub fn document_campaign_id(doc: &Document) -> String {
    campaign_id(
        doc.campaign_name.as_deref().unwrap_or_default(),
        doc.brand.as_deref().unwrap_or_default(),
        doc.year.as_deref().unwrap_or_default(),
    )
}
