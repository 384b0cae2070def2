//! # bookclub-core
//!
//! Core library for the book club admin tools.
//!
//! This crate provides the shared functionality used by both `bookclub-cli` and
//! `bookclub-tui`: the catalog API client and a headless remote data table
//! (server-side pagination, sorting, filtering and search) that either front
//! end can drive.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bookclub_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> bookclub_core::Result<()> {
//!     let client = ApiClient::new(ClientConfig::new("http://localhost:8080").with_token("t"))?;
//!     let service = ResourceService::new(client, Resource::Books);
//!
//!     let mut table = DataTable::new(
//!         columns::table_state(Resource::Books),
//!         columns::toolbar(Resource::Books),
//!         TableOptions::default(),
//!     );
//!     if let Some(ticket) = table.start() {
//!         table.run(ticket, &service).await;
//!     }
//!     println!("{}", TableDisplay::new().render_data_table(&table));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           API Layer                 │  HTTP client, catalog models
//! ├─────────────────────────────────────┤
//! │        Data Table Layer             │  Query state, pages, virtual window
//! ├─────────────────────────────────────┤
//! │          Core Layer                 │  Resource services, row actions
//! ├─────────────────────────────────────┤
//! │        Storage Layer                │  Configuration, credentials
//! ├─────────────────────────────────────┤
//! │         Utils Layer                 │  Validation, text, retry, logging
//! └─────────────────────────────────────┘
//! ```

pub use error::AppError;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use bookclub_core::prelude::*;
/// ```
pub mod prelude {
    // Error handling
    pub use crate::Result;
    pub use crate::error::{ApiError, AppError, ValidationError};

    // API client and models
    pub use crate::api::client::{ApiClient, ClientConfig};
    pub use crate::api::models::{Author, Book, Genre, Schema};

    // Data table
    pub use crate::datatable::{
        ColumnFilter, ColumnSort, DataTable, FetchOutcome, FetchTicket, LoadMode, Page,
        PageFetcher, Pagination, TableEvent, TableOptions,
    };

    // Services and actions
    pub use crate::actions::{Notification, RowAction, RowActionMenu};
    pub use crate::core::services::columns;
    pub use crate::core::services::resource_service::ResourceService;
    pub use crate::core::services::types::Resource;

    // Storage
    pub use crate::storage::config::Config;
    pub use crate::storage::credentials::{get_api_token, has_api_token};

    // Display utilities
    pub use crate::display::TableDisplay;
}

/// Row actions (edit route, delete with notification).
pub mod actions;

/// API layer - catalog HTTP client and data models.
///
/// - [`api::client`]: HTTP client with bearer authentication
/// - [`api::models`]: Book, author and genre records with schema checks
pub mod api;

/// Business logic layer - per-resource services and column sets.
pub mod core;

/// Headless remote data table.
pub mod datatable;

/// Display layer - comfy-table rendering for the terminal.
pub mod display;

/// Error handling - hierarchical error system.
///
/// - Domain-specific error variants (API, Config, Validation, etc.)
/// - Severity levels (Critical, High, Medium, Low)
/// - Troubleshooting hints for common issues
pub mod error;

/// Application shell - sidebar and breadcrumbs.
pub mod navigation;

/// Storage layer - configuration and credentials.
///
/// - [`storage::config`]: TOML configuration
/// - [`storage::credentials`]: API token from the environment
pub mod storage;

/// Utilities layer - validation, text helpers, retry, logging.
pub mod utils;

/// Convenient Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
