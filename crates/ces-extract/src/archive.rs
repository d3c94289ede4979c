//! Archive loading.
//!
//! Campaign archives come in several loose shapes: a bare array of documents,
//! an object with a `documents` or `all_documents` array, or an object with
//! some other array-valued key. Each accepted shape is an [`ArchiveShape`]
//! strategy; the loader tries them in a fixed priority order and the first one
//! that resolves wins.
//!
//! Alongside the documents the loader builds an [`ArchiveReport`] from the
//! optional `metadata` and `statistics` objects. The report is informational
//! and never affects which documents are processed.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::ExtractError;

/// One way of locating the document array inside an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveShape {
    /// The archive itself is an array.
    BareArray,
    /// The archive is an object with an array under this key (may be empty).
    NamedField(String),
    /// The first non-empty array-valued key of the object, in file order.
    FirstArrayField,
}

/// Where the documents were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ResolvedShape {
    BareArray,
    NamedField { field: String },
    FirstArrayField { field: String },
}

impl ArchiveShape {
    /// `BareArray`, `documents`, `all_documents`, then any array field.
    #[must_use]
    pub fn default_order() -> Vec<Self> {
        vec![
            Self::BareArray,
            Self::NamedField("documents".to_string()),
            Self::NamedField("all_documents".to_string()),
            Self::FirstArrayField,
        ]
    }

    /// Try this strategy against an archive root.
    #[must_use]
    pub fn resolve(&self, root: &Value) -> Option<ResolvedShape> {
        match (self, root) {
            (Self::BareArray, Value::Array(_)) => Some(ResolvedShape::BareArray),
            (Self::NamedField(name), Value::Object(map)) => map
                .get(name)
                .filter(|v| v.is_array())
                .map(|_| ResolvedShape::NamedField {
                    field: name.clone(),
                }),
            (Self::FirstArrayField, Value::Object(map)) => map
                .iter()
                .find(|(_, v)| v.as_array().is_some_and(|a| !a.is_empty()))
                .map(|(key, _)| ResolvedShape::FirstArrayField { field: key.clone() }),
            _ => None,
        }
    }
}

/// One `award_*` or `year_*` entry of the archive statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub count: u64,
}

/// Informational summary of an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveReport {
    pub shape: ResolvedShape,
    pub document_count: usize,
    pub file_size_bytes: Option<u64>,
    /// `metadata.total_documents`, else `statistics.total`.
    pub declared_total: Option<u64>,
    pub effectiveness_documents: Option<u64>,
    pub documents_with_metrics: Option<u64>,
    pub breakdown: Vec<BreakdownEntry>,
}

/// Documents plus the report describing where they came from.
#[derive(Debug, Clone)]
pub struct LoadedArchive {
    /// Raw document values. Each is deserialized independently so one bad
    /// entry does not fail the whole archive.
    pub documents: Vec<Value>,
    pub report: ArchiveReport,
}

/// Locates the document array in an archive using an ordered strategy list.
#[derive(Debug, Clone)]
pub struct ArchiveLoader {
    strategies: Vec<ArchiveShape>,
}

impl Default for ArchiveLoader {
    fn default() -> Self {
        Self::new(ArchiveShape::default_order())
    }
}

impl ArchiveLoader {
    #[must_use]
    pub const fn new(strategies: Vec<ArchiveShape>) -> Self {
        Self { strategies }
    }

    /// Read and load an archive file.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Io` if the file cannot be read,
    /// `ExtractError::InvalidJson` if it is not JSON, and
    /// `ExtractError::MalformedArchive` if no strategy finds a document array.
    pub fn load_path(&self, path: &Path) -> Result<LoadedArchive, ExtractError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = raw.len(), "read archive");
        let root: Value = serde_json::from_str(&raw)?;
        self.load_value(root, Some(raw.len() as u64))
    }

    /// Load an archive that is already in memory.
    ///
    /// # Errors
    ///
    /// See [`Self::load_path`].
    pub fn load_str(&self, raw: &str) -> Result<LoadedArchive, ExtractError> {
        let root: Value = serde_json::from_str(raw)?;
        self.load_value(root, Some(raw.len() as u64))
    }

    /// Resolve the document array of a parsed archive.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::MalformedArchive` if no strategy matches.
    pub fn load_value(
        &self,
        mut root: Value,
        file_size_bytes: Option<u64>,
    ) -> Result<LoadedArchive, ExtractError> {
        let shape = self
            .strategies
            .iter()
            .find_map(|strategy| strategy.resolve(&root))
            .ok_or_else(|| {
                ExtractError::MalformedArchive(
                    "could not find a documents array in the archive".to_string(),
                )
            })?;
        debug!(?shape, "resolved archive shape");

        let (metadata, statistics) = match &root {
            Value::Object(map) => (object_field(map, "metadata"), object_field(map, "statistics")),
            _ => (None, None),
        };

        let declared_total = count_field(metadata, "total_documents")
            .or_else(|| count_field(statistics, "total"));
        let effectiveness_documents = count_field(metadata, "effectiveness_documents")
            .or_else(|| count_field(statistics, "effectiveness"));
        let documents_with_metrics = count_field(metadata, "documents_with_metrics")
            .or_else(|| count_field(statistics, "with_metrics"));
        let breakdown = statistics
            .filter(|stats| stats.get("total").is_some_and(is_truthy))
            .map(breakdown_entries)
            .unwrap_or_default();

        let documents = take_documents(&mut root, &shape);
        info!(documents = documents.len(), ?shape, "loaded archive");

        Ok(LoadedArchive {
            report: ArchiveReport {
                shape,
                document_count: documents.len(),
                file_size_bytes,
                declared_total,
                effectiveness_documents,
                documents_with_metrics,
                breakdown,
            },
            documents,
        })
    }
}

fn take_documents(root: &mut Value, shape: &ResolvedShape) -> Vec<Value> {
    let slot = match shape {
        ResolvedShape::BareArray => Some(root),
        ResolvedShape::NamedField { field } | ResolvedShape::FirstArrayField { field } => {
            root.get_mut(field.as_str())
        }
    };
    match slot.map(Value::take) {
        Some(Value::Array(documents)) => documents,
        _ => Vec::new(),
    }
}

fn object_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

fn count_field(map: Option<&Map<String, Value>>, key: &str) -> Option<u64> {
    map.and_then(|m| m.get(key)).and_then(Value::as_u64)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Only built when `statistics.total` is set.
fn breakdown_entries(statistics: &Map<String, Value>) -> Vec<BreakdownEntry> {
    statistics
        .iter()
        .filter_map(|(key, value)| {
            let label = key
                .strip_prefix("award_")
                .map(|rest| format!("Award: {rest}"))
                .or_else(|| key.strip_prefix("year_").map(|rest| format!("Year: {rest}")))?;
            Some(BreakdownEntry {
                label,
                count: value.as_u64()?,
            })
        })
        .collect()
}
