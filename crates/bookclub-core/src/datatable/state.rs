//! Table state controller: sorting, search, column filters and visibility.
//!
//! Sorting and filtering are manual. The controller never reorders rows; it
//! only holds the state the query is built from. Every mutator that can
//! change the query identity reports whether it did, so the caller knows
//! when to reset the data source.

use super::filters::{ColumnFilter, FilterValue};
use super::query::{ColumnSort, QueryIdentity};
use crate::error::ValidationError;
use indexmap::IndexMap;

pub type CellFn<T> = fn(&T) -> String;
pub type KeyFn<T> = fn(&T) -> Option<String>;

/// Default column width when none is set.
pub const DEFAULT_COLUMN_SIZE: u16 = 150;

/// One column of the table.
pub struct Column<T> {
    pub id: String,
    pub header: String,
    pub cell: CellFn<T>,
    pub sortable: bool,
    pub hideable: bool,
    pub size: u16,
}

// Manual impls: a derive would require `T: Clone`.
impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            cell: self.cell,
            sortable: self.sortable,
            hideable: self.hideable,
            size: self.size,
        }
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("hideable", &self.hideable)
            .field("size", &self.size)
            .finish()
    }
}

impl<T> Column<T> {
    pub fn new(id: impl Into<String>, header: impl Into<String>, cell: CellFn<T>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            cell,
            sortable: false,
            hideable: true,
            size: DEFAULT_COLUMN_SIZE,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn always_visible(mut self) -> Self {
        self.hideable = false;
        self
    }

    pub fn size(mut self, size: u16) -> Self {
        self.size = size;
        self
    }

    pub fn render(&self, row: &T) -> String {
        (self.cell)(row)
    }
}

pub struct TableState<T> {
    columns: Vec<Column<T>>,
    row_key: Option<KeyFn<T>>,
    sorting: Option<ColumnSort>,
    global_filter: String,
    column_filters: Vec<ColumnFilter>,
    column_visibility: IndexMap<String, bool>,
}

impl<T> TableState<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        let column_visibility = columns.iter().map(|c| (c.id.clone(), true)).collect();
        Self {
            columns,
            row_key: None,
            sorting: None,
            global_filter: String::new(),
            column_filters: Vec::new(),
            column_visibility,
        }
    }

    pub fn with_row_key(mut self, key: KeyFn<T>) -> Self {
        self.row_key = Some(key);
        self
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn has_column(&self, id: &str) -> bool {
        self.column(id).is_some()
    }

    fn require_column(&self, id: &str) -> Result<&Column<T>, ValidationError> {
        self.column(id)
            .ok_or_else(|| ValidationError::UnknownColumn(id.to_string()))
    }

    // --- sorting ---

    pub fn sorting(&self) -> Option<&ColumnSort> {
        self.sorting.as_ref()
    }

    /// Cycle none -> asc -> desc -> none on `id`. A different column starts at asc.
    pub fn toggle_sort(&mut self, id: &str) -> Result<bool, ValidationError> {
        if !self.require_column(id)?.sortable {
            return Err(ValidationError::NotSortable(id.to_string()));
        }
        let next = match &self.sorting {
            Some(current) if current.id == id && !current.desc => Some(ColumnSort::desc(id)),
            Some(current) if current.id == id => None,
            _ => Some(ColumnSort::asc(id)),
        };
        Ok(self.replace_sorting(next))
    }

    pub fn set_sorting(&mut self, sorting: Option<ColumnSort>) -> Result<bool, ValidationError> {
        if let Some(sort) = &sorting {
            if !self.require_column(&sort.id)?.sortable {
                return Err(ValidationError::NotSortable(sort.id.clone()));
            }
        }
        Ok(self.replace_sorting(sorting))
    }

    fn replace_sorting(&mut self, sorting: Option<ColumnSort>) -> bool {
        if self.sorting == sorting {
            return false;
        }
        self.sorting = sorting;
        true
    }

    // --- global filter ---

    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    /// Expects an already debounced value.
    pub fn set_global_filter(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.global_filter == value {
            return false;
        }
        self.global_filter = value;
        true
    }

    // --- column filters ---

    pub fn column_filters(&self) -> &[ColumnFilter] {
        &self.column_filters
    }

    pub fn column_filter(&self, id: &str) -> Option<&FilterValue> {
        self.column_filters
            .iter()
            .find(|f| f.id == id)
            .map(|f| &f.value)
    }

    /// Set or clear (`None` or empty value) the filter on one column.
    pub fn set_column_filter(
        &mut self,
        id: &str,
        value: Option<FilterValue>,
    ) -> Result<bool, ValidationError> {
        self.require_column(id)?;
        let value = value.filter(|v| !v.is_empty());
        let position = self.column_filters.iter().position(|f| f.id == id);

        let changed = match (position, value) {
            (None, None) => false,
            (Some(index), None) => {
                self.column_filters.remove(index);
                true
            }
            (Some(index), Some(value)) => {
                let slot = &mut self.column_filters[index].value;
                if *slot == value {
                    false
                } else {
                    *slot = value;
                    true
                }
            }
            (None, Some(value)) => {
                self.column_filters.push(ColumnFilter::new(id, value));
                true
            }
        };
        Ok(changed)
    }

    /// Add `option` to the column's selection, or remove it if already selected.
    pub fn toggle_filter_option(&mut self, id: &str, option: &str) -> Result<bool, ValidationError> {
        let mut selected: Vec<String> = self
            .column_filter(id)
            .map(|v| v.values().to_vec())
            .unwrap_or_default();
        if let Some(index) = selected.iter().position(|v| v == option) {
            selected.remove(index);
        } else {
            selected.push(option.to_string());
        }
        let value = (!selected.is_empty()).then_some(FilterValue::Many(selected));
        self.set_column_filter(id, value)
    }

    pub fn reset_column_filters(&mut self) -> bool {
        if self.column_filters.is_empty() {
            return false;
        }
        self.column_filters.clear();
        true
    }

    pub fn is_filtered(&self) -> bool {
        !self.column_filters.is_empty()
    }

    // --- visibility ---

    pub fn is_visible(&self, id: &str) -> bool {
        self.column_visibility.get(id).copied().unwrap_or(false)
    }

    /// Flip visibility of a hideable column and return the new state.
    /// Visibility never affects the query.
    pub fn toggle_column_visibility(&mut self, id: &str) -> Result<bool, ValidationError> {
        let hideable = self.require_column(id)?.hideable;
        let visible = self.column_visibility.entry(id.to_string()).or_insert(true);
        if hideable {
            *visible = !*visible;
        }
        Ok(*visible)
    }

    pub fn visible_columns(&self) -> Vec<&Column<T>> {
        self.columns
            .iter()
            .filter(|c| self.is_visible(&c.id))
            .collect()
    }

    pub fn hideable_columns(&self) -> impl Iterator<Item = &Column<T>> {
        self.columns.iter().filter(|c| c.hideable)
    }

    // --- derived ---

    pub fn identity(&self) -> QueryIdentity {
        QueryIdentity::new(
            self.sorting.clone(),
            self.global_filter.clone(),
            self.column_filters.clone(),
        )
    }

    /// Stable row id: the key accessor's value, else the row's position.
    pub fn row_id(&self, row: &T, index: usize) -> String {
        self.row_key
            .and_then(|key| key(row))
            .unwrap_or_else(|| index.to_string())
    }
}
