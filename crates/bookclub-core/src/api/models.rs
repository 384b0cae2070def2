use crate::error::ValidationError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Catalog models. Unknown fields are kept in `extra` so rows round-trip
// unchanged through edit forms.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub bio: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub info: String,
    pub created_at: String,
    /// Required key whose value may be null.
    #[serde(deserialize_with = "Option::deserialize")]
    pub updated_at: Option<String>,
    pub author: Author,
    pub genres: Vec<Genre>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A record type whose shape can be checked before acting on a raw row.
pub trait Schema: DeserializeOwned {
    const NAME: &'static str;

    fn parse(row: &Value) -> Result<Self, ValidationError> {
        Self::deserialize(row).map_err(|e| ValidationError::Schema {
            schema: Self::NAME.to_string(),
            message: e.to_string(),
        })
    }
}

impl Schema for Book {
    const NAME: &'static str = "book";
}

impl Schema for Author {
    const NAME: &'static str = "author";
}

impl Schema for Genre {
    const NAME: &'static str = "genre";
}

/// Page metadata sent next to `data` on list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListMeta {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub next: Option<Value>,
}
