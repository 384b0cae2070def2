//! Column sets and toolbar facets for each resource. Rows are raw JSON so a
//! row that fails validation can still be listed.

use super::types::Resource;
use crate::datatable::{Column, FacetedFilter, FilterOption, TableState, Toolbar};
use crate::utils::text::{format_timestamp, to_title_case};
use serde_json::Value;

const PLACEHOLDER: &str = "---";

fn text(row: &Value, pointer: &str) -> Option<String> {
    match row.pointer(pointer)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn title_cased(row: &Value, pointer: &str) -> String {
    text(row, pointer)
        .filter(|s| !s.is_empty())
        .map(|s| to_title_case(&s))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn plain(row: &Value, pointer: &str) -> String {
    text(row, pointer).unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn genre_names(row: &Value) -> String {
    row.get("genres")
        .and_then(Value::as_array)
        .map(|genres| {
            genres
                .iter()
                .filter_map(|g| g.get("name").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

fn created_at(row: &Value) -> String {
    text(row, "/createdAt")
        .map(|s| format_timestamp(&s))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Rows are keyed by their `id` field when present.
pub fn row_key(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

pub fn columns(resource: Resource) -> Vec<Column<Value>> {
    match resource {
        Resource::Books => vec![
            Column::new("title", "Title", |row: &Value| title_cased(row, "/title"))
                .sortable()
                .always_visible()
                .size(300),
            Column::new("author", "Author", |row: &Value| title_cased(row, "/author/name"))
                .always_visible(),
            Column::new("genres", "Genres", genre_names)
                .always_visible()
                .size(300),
            Column::new("createdAt", "Created", created_at)
                .sortable()
                .size(200),
        ],
        Resource::Authors => vec![
            Column::new("name", "Name", |row: &Value| title_cased(row, "/name"))
                .sortable()
                .always_visible()
                .size(200),
            Column::new("bio", "Bio", |row: &Value| plain(row, "/bio")).size(400),
        ],
        Resource::Genres => vec![
            Column::new("name", "Name", |row: &Value| title_cased(row, "/name"))
                .sortable()
                .always_visible()
                .size(200),
            Column::new("description", "Description", |row: &Value| {
                plain(row, "/description")
            })
            .size(400),
        ],
    }
}

/// Faceted filters offered in the toolbar. The genre options are example data.
pub fn facets(resource: Resource) -> Vec<FacetedFilter> {
    match resource {
        Resource::Books => vec![FacetedFilter::new(
            "genres",
            "Genre",
            ["fiction", "fantasy", "drama", "poetry", "mystery"]
                .into_iter()
                .map(|value| FilterOption::new(to_title_case(value), value))
                .collect(),
        )],
        Resource::Authors | Resource::Genres => Vec::new(),
    }
}

pub fn table_state(resource: Resource) -> TableState<Value> {
    TableState::new(columns(resource)).with_row_key(row_key)
}

pub fn toolbar(resource: Resource) -> Toolbar {
    Toolbar::new(resource.search_placeholder(), facets(resource))
}
