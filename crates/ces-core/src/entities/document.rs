use serde::{Deserialize, Deserializer, Serialize};

/// One campaign document from the archive. Immutable once read.
///
/// Every field is optional: archives are assembled from loosely structured
/// award entries and missing fields get defaults when the campaign record is
/// built. `year` accepts either a JSON number or a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub campaign_name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub agency: Option<String>,
    #[serde(default, deserialize_with = "year_as_string")]
    pub year: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub award_metal: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl Document {
    /// The text the pipeline analyses: `content`, else `summary`, else empty.
    ///
    /// Empty strings fall through to the next candidate.
    #[must_use]
    pub fn text(&self) -> &str {
        [self.content.as_deref(), self.summary.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    /// Year as an integer, if the document carries a parseable one.
    #[must_use]
    pub fn year_number(&self) -> Option<i32> {
        self.year.as_deref().and_then(|y| y.trim().parse().ok())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawYear {
    Int(i64),
    Float(f64),
    Text(String),
}

fn year_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawYear>::deserialize(deserializer)?;
    Ok(raw.map(|year| match year {
        RawYear::Int(n) => n.to_string(),
        RawYear::Float(f) => f.to_string(),
        RawYear::Text(s) => s,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_full_document() {
        let doc: Document = serde_json::from_value(serde_json::json!({
            "campaign_name": "Bayanihan Bottles",
            "brand": "Acme",
            "agency": "TBWA",
            "year": 2023,
            "category": "Effectiveness",
            "subcategory": "FMCG",
            "award_metal": "Gold",
            "content": "Sales grew by 15%",
        }))
        .unwrap();

        assert_eq!(doc.campaign_name.as_deref(), Some("Bayanihan Bottles"));
        assert_eq!(doc.year.as_deref(), Some("2023"));
        assert_eq!(doc.year_number(), Some(2023));
        assert_eq!(doc.text(), "Sales grew by 15%");
    }

    #[test]
    fn year_accepts_string() {
        let doc: Document = serde_json::from_str(r#"{"year": "2021"}"#).unwrap();
        assert_eq!(doc.year.as_deref(), Some("2021"));
        assert_eq!(doc.year_number(), Some(2021));
    }

    #[test]
    fn year_null_is_none() {
        let doc: Document = serde_json::from_str(r#"{"year": null}"#).unwrap();
        assert_eq!(doc.year, None);
        assert_eq!(doc.year_number(), None);
    }

    #[test]
    fn non_numeric_year_has_no_number() {
        let doc: Document = serde_json::from_str(r#"{"year": "circa 2020"}"#).unwrap();
        assert_eq!(doc.year_number(), None);
    }

    #[test]
    fn text_falls_back_to_summary() {
        let doc = Document {
            content: Some(String::new()),
            summary: Some("short summary".into()),
            ..Document::default()
        };
        assert_eq!(doc.text(), "short summary");
    }

    #[test]
    fn text_is_empty_without_content_or_summary() {
        assert_eq!(Document::default().text(), "");
    }

    #[test]
    fn non_string_content_is_rejected() {
        let result = serde_json::from_str::<Document>(r#"{"content": 42}"#);
        assert!(result.is_err());
    }
}
