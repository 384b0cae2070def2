//! Toolbar above the table: debounced search input and faceted filters.

use super::debounce::Debouncer;
use super::filters::FilterValue;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A filter offered as a fixed set of options on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetedFilter {
    pub id: String,
    pub title: String,
    pub options: Vec<FilterOption>,
}

impl FacetedFilter {
    pub fn new(id: impl Into<String>, title: impl Into<String>, options: Vec<FilterOption>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            options,
        }
    }

    /// Labels of the options selected by `value`, in option order.
    pub fn selected_labels(&self, value: Option<&FilterValue>) -> Vec<&str> {
        let Some(value) = value else {
            return Vec::new();
        };
        self.options
            .iter()
            .filter(|o| value.contains(&o.value))
            .map(|o| o.label.as_str())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Toolbar {
    placeholder: String,
    search_text: String,
    facets: Vec<FacetedFilter>,
    debouncer: Debouncer<String>,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new("Search...", Vec::new())
    }
}

impl Toolbar {
    pub fn new(placeholder: impl Into<String>, facets: Vec<FacetedFilter>) -> Self {
        Self {
            placeholder: placeholder.into(),
            search_text: String::new(),
            facets,
            debouncer: Debouncer::default(),
        }
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debouncer = Debouncer::new(delay);
        self
    }

    /// Drop facets whose column does not exist in the table.
    pub fn restrict_to(&mut self, column_exists: impl Fn(&str) -> bool) {
        self.facets.retain(|facet| {
            let keep = column_exists(&facet.id);
            if !keep {
                log::debug!("dropping faceted filter for unknown column {}", facet.id);
            }
            keep
        });
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn facets(&self) -> &[FacetedFilter] {
        &self.facets
    }

    pub fn facet(&self, id: &str) -> Option<&FacetedFilter> {
        self.facets.iter().find(|f| f.id == id)
    }

    /// Text as typed, ahead of the debounced value.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>, now: Instant) {
        self.search_text = text.into();
        self.debouncer.input(self.search_text.clone(), now);
    }

    /// Debounced search value, once the input has been quiet long enough.
    pub fn poll_search(&mut self, now: Instant) -> Option<String> {
        self.debouncer.poll(now)
    }

    pub fn search_pending(&self, now: Instant) -> Option<Duration> {
        self.debouncer.remaining(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre_facet() -> FacetedFilter {
        FacetedFilter::new(
            "genres",
            "Genre",
            vec![
                FilterOption::new("Fiction", "fiction"),
                FilterOption::new("Drama", "drama"),
                FilterOption::new("Poetry", "poetry"),
            ],
        )
    }

    #[test]
    fn test_restrict_to_existing_columns() {
        let mut toolbar = Toolbar::new(
            "Filter books...",
            vec![genre_facet(), FacetedFilter::new("status", "Status", vec![])],
        );
        toolbar.restrict_to(|id| id == "genres");
        assert_eq!(toolbar.facets().len(), 1);
        assert!(toolbar.facet("status").is_none());
        assert_eq!(toolbar.placeholder(), "Filter books...");
    }

    #[test]
    fn test_selected_labels_in_option_order() {
        let facet = genre_facet();
        let value = FilterValue::from(vec!["poetry", "fiction"]);
        assert_eq!(facet.selected_labels(Some(&value)), vec!["Fiction", "Poetry"]);
        assert!(facet.selected_labels(None).is_empty());
    }

    #[test]
    fn test_typing_is_debounced() {
        let start = Instant::now();
        let mut toolbar = Toolbar::default();
        for (i, text) in ["d", "du", "dun", "dune"].into_iter().enumerate() {
            toolbar.set_search_text(text, start + Duration::from_millis(100 * i as u64));
        }
        assert_eq!(toolbar.search_text(), "dune");
        assert_eq!(toolbar.poll_search(start + Duration::from_millis(500)), None);
        assert!(toolbar.search_pending(start + Duration::from_millis(500)).is_some());
        assert_eq!(
            toolbar.poll_search(start + Duration::from_millis(700)),
            Some("dune".to_string())
        );
        assert!(toolbar.search_pending(start + Duration::from_millis(700)).is_none());
    }

    #[test]
    fn test_zero_debounce_fires_on_next_poll() {
        let now = Instant::now();
        let mut toolbar = Toolbar::default().with_debounce(Duration::ZERO);
        assert_eq!(toolbar.poll_search(now), None);
        toolbar.set_search_text("a", now);
        assert_eq!(toolbar.poll_search(now), Some("a".to_string()));
    }
}
