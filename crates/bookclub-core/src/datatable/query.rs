//! Query parameters sent to list endpoints and the identity that scopes an
//! accumulated result set.

use super::filters::{self, ColumnFilter};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::num::NonZeroU32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Active sort on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSort {
    pub id: String,
    pub desc: bool,
}

impl ColumnSort {
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: false,
        }
    }

    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: true,
        }
    }

    pub fn order(&self) -> SortOrder {
        if self.desc { SortOrder::Desc } else { SortOrder::Asc }
    }
}

/// Position of the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// Zero-based page counter kept by the client.
    Index(u64),
    /// Token handed out by the server, echoed back verbatim.
    Token(String),
}

impl Cursor {
    pub const START: Cursor = Cursor::Index(0);

    /// Interpret a `meta.next` value. Null and empty strings mean "no next page".
    pub fn from_json(value: &Value) -> Option<Cursor> {
        match value {
            Value::Number(n) => n.as_u64().map(Cursor::Index),
            Value::String(s) if !s.is_empty() => Some(Cursor::Token(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Index(index) => write!(f, "{}", index),
            Cursor::Token(token) => f.write_str(token),
        }
    }
}

/// The part of a query that decides *which* rows come back. Any change
/// starts a new epoch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryIdentity {
    pub sort: Option<ColumnSort>,
    pub search: Option<String>,
    pub filters: Vec<ColumnFilter>,
}

impl QueryIdentity {
    pub fn new(
        sort: Option<ColumnSort>,
        search: impl Into<String>,
        filters: Vec<ColumnFilter>,
    ) -> Self {
        let search = search.into();
        Self {
            sort,
            search: (!search.is_empty()).then_some(search),
            filters: filters.into_iter().filter(|f| !f.value.is_empty()).collect(),
        }
    }
}

/// Parameters for one page request.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub cursor: Cursor,
    pub size: NonZeroU32,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub search: Option<String>,
    pub filters: IndexMap<String, String>,
}

impl QueryState {
    pub fn new(identity: &QueryIdentity, cursor: Cursor, size: NonZeroU32) -> Self {
        Self {
            cursor,
            size,
            sort_by: identity.sort.as_ref().map(|s| s.id.clone()),
            sort_order: identity.sort.as_ref().map(ColumnSort::order),
            search: identity.search.clone(),
            filters: filters::encode(&identity.filters, true),
        }
    }

    /// Query pairs in wire order: cursor, size, sort, search, filters.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("cursor".to_string(), self.cursor.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sort_by".to_string(), sort_by.clone()));
        }
        if let Some(order) = self.sort_order {
            pairs.push(("sort_order".to_string(), order.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        pairs.extend(
            self.filters
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn size(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_identity_normalizes_empty_search_and_filters() {
        let identity = QueryIdentity::new(
            None,
            "",
            vec![ColumnFilter::new("genre", Vec::<String>::new())],
        );
        assert_eq!(identity, QueryIdentity::default());
    }

    #[test]
    fn test_query_pairs_full() {
        let identity = QueryIdentity::new(
            Some(ColumnSort::asc("title")),
            "dune",
            vec![ColumnFilter::new("genre", vec!["fiction", "drama"])],
        );
        let state = QueryState::new(&identity, Cursor::START, size(10));
        assert_eq!(
            state.to_query_pairs(),
            vec![
                ("cursor".to_string(), "0".to_string()),
                ("size".to_string(), "10".to_string()),
                ("sort_by".to_string(), "title".to_string()),
                ("sort_order".to_string(), "asc".to_string()),
                ("search".to_string(), "dune".to_string()),
                ("filter[genre]".to_string(), "fiction,drama".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_minimal() {
        let state = QueryState::new(
            &QueryIdentity::default(),
            Cursor::Token("abc".to_string()),
            size(15),
        );
        assert_eq!(
            state.to_query_pairs(),
            vec![
                ("cursor".to_string(), "abc".to_string()),
                ("size".to_string(), "15".to_string()),
            ]
        );
    }

    #[test]
    fn test_cursor_from_json() {
        assert_eq!(Cursor::from_json(&json!(2)), Some(Cursor::Index(2)));
        assert_eq!(
            Cursor::from_json(&json!("next-token")),
            Some(Cursor::Token("next-token".to_string()))
        );
        assert_eq!(Cursor::from_json(&json!(null)), None);
        assert_eq!(Cursor::from_json(&json!("")), None);
    }

    #[test]
    fn test_sort_order() {
        assert_eq!(ColumnSort::asc("title").order(), SortOrder::Asc);
        assert_eq!(ColumnSort::desc("title").order().as_str(), "desc");
    }
}
