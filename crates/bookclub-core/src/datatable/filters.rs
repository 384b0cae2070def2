//! Column filter state and its flat query-string form.
//!
//! `[{ id: "genre", value: ["fiction", "drama"] }]` <-> `{ "filter[genre]": "fiction,drama" }`.
//! Values containing a comma cannot be told apart from two values after a
//! round trip.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const SEPARATOR: &str = ",";

/// Filter value: a single string or a selection of options.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Single(String),
    Many(Vec<String>),
}

impl FilterValue {
    pub fn values(&self) -> &[String] {
        match self {
            FilterValue::Single(value) => std::slice::from_ref(value),
            FilterValue::Many(values) => values,
        }
    }

    pub fn contains(&self, option: &str) -> bool {
        self.values().iter().any(|v| v == option)
    }

    pub fn is_empty(&self) -> bool {
        self.values().iter().all(String::is_empty)
    }
}

// A single value and a one-element selection are the same filter.
impl PartialEq for FilterValue {
    fn eq(&self, other: &Self) -> bool {
        self.values() == other.values()
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Single(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Single(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        FilterValue::Many(values)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(values: Vec<&str>) -> Self {
        FilterValue::Many(values.into_iter().map(String::from).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub id: String,
    pub value: FilterValue,
}

impl ColumnFilter {
    pub fn new(id: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

fn enclose(id: &str) -> String {
    format!("filter[{}]", id)
}

/// `filter[genre]` -> `genre`; keys without the bracket syntax pass through.
fn extract_id(key: &str) -> &str {
    key.strip_prefix("filter[")
        .and_then(|rest| rest.find(']').map(|end| &rest[..end]))
        .unwrap_or(key)
}

/// Flatten filters into query pairs, joining selections with a comma.
pub fn encode(filters: &[ColumnFilter], enclosed: bool) -> IndexMap<String, String> {
    filters
        .iter()
        .map(|filter| {
            let key = if enclosed {
                enclose(&filter.id)
            } else {
                filter.id.clone()
            };
            let joined = filter.value.values().join(SEPARATOR);
            (key, joined)
        })
        .collect()
}

/// Inverse of [`encode`]. Entries with an empty value are dropped.
pub fn decode<K, V>(input: impl IntoIterator<Item = (K, V)>) -> Vec<ColumnFilter>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    input
        .into_iter()
        .filter(|(_, value)| !value.as_ref().is_empty())
        .map(|(key, value)| ColumnFilter {
            id: extract_id(key.as_ref()).to_string(),
            value: FilterValue::Many(
                value
                    .as_ref()
                    .split(SEPARATOR)
                    .map(String::from)
                    .collect(),
            ),
        })
        .collect()
}

/// Parse a `id=v1,v2` command-line style filter.
pub fn parse_assignment(input: &str) -> Option<ColumnFilter> {
    let (id, value) = input.split_once('=')?;
    let id = id.trim();
    if id.is_empty() || value.is_empty() {
        return None;
    }
    decode([(id, value)]).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_enclosed_joins_values() {
        let filters = vec![ColumnFilter::new("genre", vec!["fiction", "drama"])];
        let encoded = encode(&filters, true);
        assert_eq!(encoded.len(), 1);
        assert_eq!(encoded["filter[genre]"], "fiction,drama");
    }

    #[test]
    fn test_encode_bare_keys() {
        let filters = vec![
            ColumnFilter::new("status", "published"),
            ColumnFilter::new("genre", vec!["drama"]),
        ];
        let encoded = encode(&filters, false);
        let keys: Vec<&str> = encoded.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["status", "genre"]);
        assert_eq!(encoded["status"], "published");
    }

    #[test]
    fn test_round_trip_enclosed() {
        let filters = vec![
            ColumnFilter::new("genre", vec!["fiction", "drama"]),
            ColumnFilter::new("author", "le guin"),
        ];
        assert_eq!(decode(encode(&filters, true)), filters);
    }

    #[test]
    fn test_decode_without_brackets_uses_key() {
        let decoded = decode([("genre", "fiction")]);
        assert_eq!(decoded, vec![ColumnFilter::new("genre", "fiction")]);
    }

    #[test]
    fn test_decode_skips_empty_values() {
        let decoded = decode([("filter[genre]", ""), ("filter[author]", "tolkien")]);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id, "author");
    }

    #[test]
    fn test_embedded_comma_is_ambiguous() {
        let filters = vec![ColumnFilter::new("title", "war, and peace")];
        let decoded = decode(encode(&filters, true));
        assert_ne!(decoded, filters);
        assert_eq!(decoded[0].value.values().len(), 2);
    }

    #[test]
    fn test_single_equals_one_element_selection() {
        assert_eq!(FilterValue::from("a"), FilterValue::from(vec!["a"]));
        assert_ne!(FilterValue::from("a"), FilterValue::from(vec!["a", "b"]));
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("genre=fiction,drama"),
            Some(ColumnFilter::new("genre", vec!["fiction", "drama"]))
        );
        assert_eq!(parse_assignment("genre="), None);
        assert_eq!(parse_assignment("=x"), None);
        assert_eq!(parse_assignment("nothing"), None);
    }
}
