//! Paginated data source: accumulates pages for the current query identity.
//!
//! Fetching is split into [`DataSource::begin_fetch`] and
//! [`DataSource::complete`] so an event loop can run the request elsewhere
//! and hand the result back later. Every ticket carries the epoch it was
//! issued for; completions from an older epoch are dropped on arrival.

use super::query::{Cursor, QueryIdentity, QueryState};
use crate::error::ApiError;
use async_trait::async_trait;
use std::num::NonZeroU32;

/// One page of rows plus what the server said about the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: Option<u64>,
    pub next: Option<Cursor>,
}

impl<T> Page<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            total: None,
            next: None,
        }
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_next(mut self, next: Cursor) -> Self {
        self.next = Some(next);
        self
    }
}

/// Seam between the table and whatever serves the rows.
#[async_trait]
pub trait PageFetcher<T: Send>: Send + Sync {
    async fn fetch_page(&self, query: &QueryState) -> Result<Page<T>, ApiError>;
}

/// How the next page is located and how the end of data is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pagination {
    /// Follow `meta.next` verbatim; no `next` means no more data.
    #[default]
    Cursor,
    /// Count pages from zero; stop once `total` rows are held or a page is empty.
    PageIndex,
}

/// Permission to issue one request, scoped to an epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub epoch: u64,
    pub query: QueryState,
}

#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Appended { added: usize },
    /// The ticket belonged to a superseded epoch; nothing changed.
    Stale,
    Failed(ApiError),
}

pub struct DataSource<T> {
    identity: QueryIdentity,
    size: NonZeroU32,
    pagination: Pagination,
    epoch: u64,
    rows: Vec<T>,
    cursor: Cursor,
    has_more: bool,
    in_flight: Option<u64>,
    error: Option<ApiError>,
    total: Option<u64>,
}

impl<T> DataSource<T> {
    pub fn new(identity: QueryIdentity, size: NonZeroU32, pagination: Pagination) -> Self {
        Self {
            identity,
            size,
            pagination,
            epoch: 0,
            rows: Vec::new(),
            cursor: Cursor::START,
            has_more: true,
            in_flight: None,
            error: None,
            total: None,
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn identity(&self) -> &QueryIdentity {
        &self.identity
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight == Some(self.epoch)
    }

    /// First page of the epoch is on its way.
    pub fn is_loading(&self) -> bool {
        self.is_in_flight() && self.rows.is_empty()
    }

    pub fn is_fetching_more(&self) -> bool {
        self.is_in_flight() && !self.rows.is_empty()
    }

    /// Start a new epoch if `identity` differs from the current one.
    pub fn set_identity(&mut self, identity: QueryIdentity) -> bool {
        if identity == self.identity {
            return false;
        }
        self.reset(identity);
        true
    }

    /// Start a new epoch for `identity` unconditionally.
    pub fn reset(&mut self, identity: QueryIdentity) {
        self.identity = identity;
        self.restart();
    }

    /// Drop everything and start over from the first page with the same identity.
    pub fn refetch(&mut self) {
        self.restart();
    }

    fn restart(&mut self) {
        self.epoch += 1;
        self.rows.clear();
        self.cursor = Cursor::START;
        self.has_more = true;
        self.in_flight = None;
        self.error = None;
        self.total = None;
        log::debug!("data source epoch {} for {:?}", self.epoch, self.identity);
    }

    /// Claim the next request. `None` while a request is in flight or when
    /// the end of data has been reached.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.is_in_flight() || !self.has_more {
            return None;
        }
        self.in_flight = Some(self.epoch);
        self.error = None;
        Some(FetchTicket {
            epoch: self.epoch,
            query: QueryState::new(&self.identity, self.cursor.clone(), self.size),
        })
    }

    /// Apply the result of a ticket issued by [`begin_fetch`](Self::begin_fetch).
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Page<T>, ApiError>,
    ) -> FetchOutcome {
        if ticket.epoch != self.epoch {
            log::debug!(
                "discarding page for epoch {} (current {})",
                ticket.epoch,
                self.epoch
            );
            return FetchOutcome::Stale;
        }
        // Only the single outstanding ticket may settle, and only once.
        if !self.is_in_flight() || ticket.query.cursor != self.cursor {
            log::warn!(
                "ignoring completion for cursor {} that is not in flight",
                ticket.query.cursor
            );
            return FetchOutcome::Stale;
        }
        self.in_flight = None;

        let page = match result {
            Ok(page) => page,
            Err(error) => {
                log::warn!("page fetch failed at cursor {}: {}", self.cursor, error);
                self.error = Some(error.clone());
                return FetchOutcome::Failed(error);
            }
        };

        let added = page.rows.len();
        self.rows.extend(page.rows);
        if page.total.is_some() {
            self.total = page.total;
        }

        match self.pagination {
            Pagination::Cursor => {
                self.has_more = page.next.is_some();
                if let Some(next) = page.next {
                    self.cursor = next;
                }
            }
            Pagination::PageIndex => {
                let reached_total = self
                    .total
                    .is_some_and(|total| self.rows.len() as u64 >= total);
                self.has_more = added > 0 && !reached_total;
                if let Cursor::Index(index) = self.cursor {
                    self.cursor = Cursor::Index(index + 1);
                }
            }
        }

        FetchOutcome::Appended { added }
    }

    /// Request the next page and apply it. `None` when the call was a no-op.
    pub async fn fetch_more<F>(&mut self, fetcher: &F) -> Option<FetchOutcome>
    where
        F: PageFetcher<T> + ?Sized,
        T: Send,
    {
        let ticket = self.begin_fetch()?;
        let result = fetcher.fetch_page(&ticket.query).await;
        Some(self.complete(&ticket, result))
    }
}
