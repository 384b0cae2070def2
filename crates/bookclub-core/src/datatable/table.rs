//! Data table orchestrator.
//!
//! Owns the table state, toolbar, data source and virtualizer, and applies
//! [`TableEvent`]s as explicit transitions. A transition that needs data
//! returns a [`FetchTicket`]; the caller runs the request and hands the
//! result back through [`DataTable::complete`].

use super::filters::FilterValue;
use super::query::ColumnSort;
use super::source::{DataSource, FetchOutcome, FetchTicket, Page, PageFetcher, Pagination};
use super::state::TableState;
use super::toolbar::Toolbar;
use super::virtualizer::{
    DEFAULT_FETCH_THRESHOLD, DEFAULT_OVERSCAN, VirtualItem, Virtualizer,
};
use crate::error::{ApiError, ValidationError};
use std::num::NonZeroU32;
use std::time::Instant;

pub const DEFAULT_PAGE_SIZE: NonZeroU32 = NonZeroU32::MIN.saturating_add(14);
pub const DEFAULT_ROW_HEIGHT: u32 = 56;

/// What triggers fetching past the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Scrolling near the end of content.
    #[default]
    Virtualized,
    /// Only an explicit load-more action.
    Manual,
}

#[derive(Debug, Clone)]
pub struct TableOptions {
    pub page_size: NonZeroU32,
    pub pagination: Pagination,
    pub mode: LoadMode,
    pub estimated_row_height: u32,
    pub overscan: usize,
    pub fetch_threshold: u64,
    /// Use measured row heights instead of the uniform estimate.
    pub measure_rows: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            pagination: Pagination::default(),
            mode: LoadMode::default(),
            estimated_row_height: DEFAULT_ROW_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            fetch_threshold: DEFAULT_FETCH_THRESHOLD,
            measure_rows: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    /// Cycle the sort on a column.
    Sort(String),
    SetSort(Option<ColumnSort>),
    SearchInput { text: String, now: Instant },
    Tick(Instant),
    ToggleFilterOption { column: String, value: String },
    SetColumnFilter { column: String, value: Option<FilterValue> },
    ResetFilters,
    ToggleColumn(String),
    Scroll { offset: u64, viewport: u32 },
    /// Scroll just enough to bring a row fully into view.
    Reveal { index: usize, viewport: u32 },
    Resize { viewport: u32 },
    Measured { index: usize, height: Option<u32> },
    LoadMore,
    Refetch,
}

/// State of the manual load-more control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreState {
    Loading,
    LoadingMore,
    LoadMore,
    NothingMore,
}

impl LoadMoreState {
    pub fn label(&self) -> &'static str {
        match self {
            LoadMoreState::Loading => "Loading...",
            LoadMoreState::LoadingMore => "Loading more...",
            LoadMoreState::LoadMore => "Load More",
            LoadMoreState::NothingMore => "Nothing more to load",
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, LoadMoreState::LoadMore)
    }
}

pub struct DataTable<T> {
    state: TableState<T>,
    toolbar: Toolbar,
    source: DataSource<T>,
    virtualizer: Virtualizer,
    mode: LoadMode,
    fetch_threshold: u64,
}

impl<T> DataTable<T> {
    pub fn new(state: TableState<T>, mut toolbar: Toolbar, options: TableOptions) -> Self {
        toolbar.restrict_to(|id| state.has_column(id));
        let virtualizer = if options.measure_rows {
            Virtualizer::measured(options.estimated_row_height)
        } else {
            Virtualizer::fixed(options.estimated_row_height)
        }
        .with_overscan(options.overscan);
        let source = DataSource::new(state.identity(), options.page_size, options.pagination);
        Self {
            state,
            toolbar,
            source,
            virtualizer,
            mode: options.mode,
            fetch_threshold: options.fetch_threshold,
        }
    }

    pub fn state(&self) -> &TableState<T> {
        &self.state
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn source(&self) -> &DataSource<T> {
        &self.source
    }

    pub fn virtualizer(&self) -> &Virtualizer {
        &self.virtualizer
    }

    pub fn rows(&self) -> &[T] {
        self.source.rows()
    }

    pub fn row_id(&self, index: usize) -> Option<String> {
        self.rows()
            .get(index)
            .map(|row| self.state.row_id(row, index))
    }

    /// Rows to draw with their absolute positions.
    pub fn visible_rows(&self) -> Vec<(VirtualItem, &T)> {
        let rows = self.rows();
        self.virtualizer
            .virtual_items()
            .into_iter()
            .filter_map(|item| rows.get(item.index).map(|row| (item, row)))
            .collect()
    }

    pub fn load_more_state(&self) -> LoadMoreState {
        if self.source.is_loading() {
            LoadMoreState::Loading
        } else if self.source.is_fetching_more() {
            LoadMoreState::LoadingMore
        } else if self.source.has_more() {
            LoadMoreState::LoadMore
        } else {
            LoadMoreState::NothingMore
        }
    }

    pub fn is_filtered(&self) -> bool {
        self.state.is_filtered()
    }

    /// Ticket for the first page.
    pub fn start(&mut self) -> Option<FetchTicket> {
        self.source.begin_fetch()
    }

    pub fn handle(&mut self, event: TableEvent) -> Result<Option<FetchTicket>, ValidationError> {
        let ticket = match event {
            TableEvent::Sort(column) => {
                let changed = self.state.toggle_sort(&column)?;
                self.on_sort_change(changed)
            }
            TableEvent::SetSort(sort) => {
                let changed = self.state.set_sorting(sort)?;
                self.on_sort_change(changed)
            }
            TableEvent::SearchInput { text, now } => {
                self.toolbar.set_search_text(text, now);
                None
            }
            TableEvent::Tick(now) => match self.toolbar.poll_search(now) {
                Some(search) => {
                    let changed = self.state.set_global_filter(search);
                    self.on_identity_change(changed)
                }
                None => None,
            },
            TableEvent::ToggleFilterOption { column, value } => {
                let changed = self.state.toggle_filter_option(&column, &value)?;
                self.on_identity_change(changed)
            }
            TableEvent::SetColumnFilter { column, value } => {
                let changed = self.state.set_column_filter(&column, value)?;
                self.on_identity_change(changed)
            }
            TableEvent::ResetFilters => {
                let changed = self.state.reset_column_filters();
                self.on_identity_change(changed)
            }
            TableEvent::ToggleColumn(column) => {
                self.state.toggle_column_visibility(&column)?;
                None
            }
            TableEvent::Scroll { offset, viewport } => {
                self.virtualizer.set_viewport(viewport);
                self.virtualizer.scroll_to_offset(offset);
                self.fetch_if_needed()
            }
            TableEvent::Reveal { index, viewport } => {
                self.virtualizer.set_viewport(viewport);
                self.virtualizer.ensure_visible(index);
                self.fetch_if_needed()
            }
            TableEvent::Resize { viewport } => {
                self.virtualizer.set_viewport(viewport);
                self.fetch_if_needed()
            }
            TableEvent::Measured { index, height } => {
                self.virtualizer.measure(index, height);
                self.fetch_if_needed()
            }
            TableEvent::LoadMore => self.source.begin_fetch(),
            TableEvent::Refetch => {
                self.source.refetch();
                self.sync_rows();
                self.source.begin_fetch()
            }
        };
        Ok(ticket)
    }

    /// Apply a fetch result.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<Page<T>, ApiError>) -> FetchOutcome {
        let outcome = self.source.complete(ticket, result);
        if let FetchOutcome::Appended { .. } = outcome {
            self.sync_rows();
        }
        outcome
    }

    /// Fetch a ticket inline and apply the result.
    pub async fn run<F>(&mut self, ticket: FetchTicket, fetcher: &F) -> FetchOutcome
    where
        F: PageFetcher<T> + ?Sized,
        T: Send,
    {
        let result = fetcher.fetch_page(&ticket.query).await;
        self.complete(&ticket, result)
    }

    /// In virtualized mode, claim the next page when content is running out.
    /// A failed fetch is not retried automatically.
    pub fn fetch_if_needed(&mut self) -> Option<FetchTicket> {
        if self.mode != LoadMode::Virtualized
            || self.source.error().is_some()
            || self.source.is_in_flight()
            || !self.source.has_more()
            || !self.virtualizer.should_fetch_more(self.fetch_threshold)
        {
            return None;
        }
        self.source.begin_fetch()
    }

    fn on_sort_change(&mut self, changed: bool) -> Option<FetchTicket> {
        if changed {
            self.virtualizer.reset_scroll();
        }
        self.on_identity_change(changed)
    }

    fn on_identity_change(&mut self, changed: bool) -> Option<FetchTicket> {
        if !changed {
            return None;
        }
        self.source.reset(self.state.identity());
        self.sync_rows();
        self.source.begin_fetch()
    }

    fn sync_rows(&mut self) {
        self.virtualizer.set_row_count(self.source.rows().len());
    }
}
