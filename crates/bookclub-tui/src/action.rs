//! Application actions.
//!
//! Background tasks never touch the app directly; they send an [`AppAction`]
//! back over the channel and the run loop applies it between frames.

use bookclub_core::actions::Notification;
use bookclub_core::core::services::types::Resource;
use bookclub_core::datatable::{FetchTicket, Page};
use bookclub_core::error::ApiError;
use serde_json::Value;

#[derive(Debug, Clone)]
pub enum AppAction {
    /// Show another resource in the content area.
    SwitchResource(Resource),

    /// A page request finished.
    ///
    /// `generation` identifies the table the ticket was issued by; a table
    /// is rebuilt whenever the resource changes.
    PageLoaded {
        generation: u64,
        ticket: FetchTicket,
        result: Result<Page<Value>, ApiError>,
    },

    /// Delete the book with this id.
    DeleteBook(u64),

    /// A row action finished.
    ActionFinished {
        notification: Notification,
        refetch: bool,
    },

    /// Go to an application route.
    Navigate(String),
}
