//! Report builder: merges per-facet outcomes into the ordered output document.

use crate::error::FacetError;
use crate::registry::Shaped;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::json;

/// One facet's slot in a [`Report`].
#[derive(Debug, Clone, PartialEq)]
pub enum FacetEntry {
    Data(Shaped),
    Failed(String),
}

impl FacetEntry {
    pub fn is_failed(&self) -> bool {
        matches!(self, FacetEntry::Failed(_))
    }

    /// Failure marker text, if this entry failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            FacetEntry::Failed(message) => Some(message),
            FacetEntry::Data(_) => None,
        }
    }

    pub fn data(&self) -> Option<&Shaped> {
        match self {
            FacetEntry::Data(value) => Some(value),
            FacetEntry::Failed(_) => None,
        }
    }

    /// The JSON value this entry contributes to the wire document.
    pub fn to_value(&self) -> Shaped {
        match self {
            FacetEntry::Data(value) => value.clone(),
            FacetEntry::Failed(message) => failure_marker(message),
        }
    }
}

impl From<std::result::Result<Shaped, FacetError>> for FacetEntry {
    fn from(result: std::result::Result<Shaped, FacetError>) -> Self {
        match result {
            Ok(value) => FacetEntry::Data(value),
            Err(err) => FacetEntry::Failed(err.to_string()),
        }
    }
}

impl Serialize for FacetEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FacetEntry::Data(value) => value.serialize(serializer),
            FacetEntry::Failed(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
        }
    }
}

/// `{"error": "<message>"}`, used for whole facets and for list elements.
pub fn failure_marker(message: &str) -> Shaped {
    json!({ "error": message })
}

/// Per-request aggregate keyed by facet name, in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    entries: Vec<(String, FacetEntry)>,
}

impl Report {
    /// Builds a report from `(facet name, outcome)` pairs, keeping their order.
    pub fn build<I, E>(results: I) -> Self
    where
        I: IntoIterator<Item = (String, E)>,
        E: Into<FacetEntry>,
    {
        Self {
            entries: results
                .into_iter()
                .map(|(name, outcome)| (name, outcome.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FacetEntry> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FacetEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|(_, e)| e.is_failed()).count()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_build_order_with_markers() {
        let report = Report::build(vec![
            ("Memory".to_string(), Ok(json!({ "Total Memory (GB)": "8.00" }))),
            ("Battery".to_string(), Err(FacetError::Timeout)),
            ("CPU".to_string(), Ok(json!({ "Cores": 8 }))),
        ]);

        let text = serde_json::to_string(&report).unwrap();
        assert_eq!(
            text,
            concat!(
                r#"{"Memory":{"Total Memory (GB)":"8.00"},"#,
                r#""Battery":{"error":"Timeout"},"CPU":{"Cores":8}}"#
            )
        );
        assert_eq!(report.failures(), 1);
        assert_eq!(report.get("Battery").unwrap().error(), Some("Timeout"));
    }

    #[test]
    fn query_failures_keep_their_cause() {
        let report = Report::build(vec![(
            "Battery".to_string(),
            Err::<Shaped, _>(FacetError::Query("permission denied".into())),
        )]);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({ "Battery": { "error": "permission denied" } })
        );
    }
}
