//! Headless remote data table.
//!
//! Rows live on the server; the table only holds the query state
//! (sort, search, column filters), the pages fetched so far for that query,
//! and the window of rows currently on screen.
//!
//! # Flow
//!
//! ```text
//! TableEvent -> DataTable::handle -> Option<FetchTicket>
//!                                        |
//!                               PageFetcher::fetch_page
//!                                        |
//!            DataTable::complete(ticket, result) -> FetchOutcome
//! ```
//!
//! Each query identity gets its own epoch. A result for an older epoch is
//! dropped when it arrives, so rows from two queries never mix.

pub mod debounce;
pub mod filters;
pub mod query;
pub mod source;
pub mod state;
pub mod table;
pub mod toolbar;
pub mod virtualizer;

pub use debounce::Debouncer;
pub use filters::{ColumnFilter, FilterValue};
pub use query::{ColumnSort, Cursor, QueryIdentity, QueryState, SortOrder};
pub use source::{DataSource, FetchOutcome, FetchTicket, Page, PageFetcher, Pagination};
pub use state::{Column, TableState};
pub use table::{DataTable, LoadMode, LoadMoreState, TableEvent, TableOptions};
pub use toolbar::{FacetedFilter, FilterOption, Toolbar};
pub use virtualizer::{FixedRange, MeasuredRange, RangeStrategy, VirtualItem, Virtualizer};
