//! Per-row actions on books.
//!
//! A menu can only be built from a row that passes the book schema, so an
//! action never runs against a malformed record.

use crate::api::models::{Book, Schema};
use crate::core::services::traits::DeleteService;
use crate::error::ValidationError;
use crate::navigation::APP_BASE;
use serde_json::Value;
use std::time::Duration;

pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

/// Transient message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub is_error: bool,
    pub duration: Duration,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            is_error: false,
            duration: NOTIFICATION_DURATION,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::success(title, message)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

impl RowAction {
    pub const ALL: [RowAction; 2] = [RowAction::Edit, RowAction::Delete];

    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Edit => "Edit",
            RowAction::Delete => "Delete",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            RowAction::Edit => 'e',
            RowAction::Delete => 'd',
        }
    }
}

/// What the host should do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Navigate(String),
    Notify(Notification),
}

#[derive(Debug, Clone)]
pub struct RowActionMenu {
    book: Book,
}

impl RowActionMenu {
    pub fn for_row(row: &Value) -> Result<Self, ValidationError> {
        let book = Book::parse(row).inspect_err(|e| {
            log::warn!("row actions unavailable: {}", e);
        })?;
        Ok(Self { book })
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn actions(&self) -> &'static [RowAction] {
        &RowAction::ALL
    }

    pub fn edit_route(&self) -> String {
        edit_route(self.book.id)
    }

    /// Delete the book and describe the result for the user.
    pub async fn delete<D>(&self, service: &D) -> Notification
    where
        D: DeleteService + ?Sized,
    {
        delete_book(service, self.book.id).await
    }

    pub async fn run<D>(&self, action: RowAction, service: &D) -> ActionOutcome
    where
        D: DeleteService + ?Sized,
    {
        match action {
            RowAction::Edit => ActionOutcome::Navigate(self.edit_route()),
            RowAction::Delete => ActionOutcome::Notify(self.delete(service).await),
        }
    }
}

pub fn edit_route(id: u64) -> String {
    format!("{}/books/{}/edit", APP_BASE, id)
}

/// Delete by id, without a validated row.
pub async fn delete_book<D>(service: &D, id: u64) -> Notification
where
    D: DeleteService + ?Sized,
{
    match service.delete(id).await {
        Ok(()) => {
            log::debug!("deleted book {}", id);
            Notification::success("Success!", "The book was deleted.")
        }
        Err(error) => {
            log::warn!("failed to delete book {}: {}", id, error);
            Notification::error("Error!", error.user_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ErrorPayload};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct MockDeleter {
        deleted: Mutex<Vec<u64>>,
        fail_with: Option<ApiError>,
    }

    impl MockDeleter {
        fn ok() -> Self {
            Self {
                deleted: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }
    }

    #[async_trait]
    impl DeleteService for MockDeleter {
        async fn delete(&self, id: u64) -> Result<(), ApiError> {
            self.deleted.lock().unwrap().push(id);
            match &self.fail_with {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }
    }

    fn book_row() -> Value {
        json!({
            "id": 42,
            "title": "dune",
            "info": "",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": null,
            "author": {"name": "frank herbert", "bio": ""},
            "genres": []
        })
    }

    #[test]
    fn test_edit_route() {
        let menu = RowActionMenu::for_row(&book_row()).unwrap();
        assert_eq!(menu.edit_route(), "/app/books/42/edit");
        assert_eq!(menu.actions().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_row_refuses_actions() {
        let deleter = MockDeleter::ok();
        let mut row = book_row();
        row["id"] = json!("forty-two");

        let result = RowActionMenu::for_row(&row);
        assert!(matches!(result, Err(ValidationError::Schema { .. })));
        assert!(deleter.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_success_notification() {
        let deleter = MockDeleter::ok();
        let menu = RowActionMenu::for_row(&book_row()).unwrap();
        let outcome = menu.run(RowAction::Delete, &deleter).await;
        assert_eq!(
            outcome,
            ActionOutcome::Notify(Notification {
                title: "Success!".to_string(),
                message: "The book was deleted.".to_string(),
                is_error: false,
                duration: Duration::from_secs(3),
            })
        );
        assert_eq!(*deleter.deleted.lock().unwrap(), vec![42]);
    }

    #[tokio::test]
    async fn test_delete_failure_carries_server_message() {
        let deleter = MockDeleter {
            deleted: Mutex::new(Vec::new()),
            fail_with: Some(ApiError::Server {
                status: 409,
                endpoint: "/books/42".to_string(),
                payload: ErrorPayload {
                    error: "Conflict".to_string(),
                    message: "Book is referenced by a reading list".to_string(),
                    status_code: Some(409),
                    ..Default::default()
                },
            }),
        };
        let notification = delete_book(&deleter, 42).await;
        assert!(notification.is_error);
        assert_eq!(notification.message, "Book is referenced by a reading list");
    }

    #[tokio::test]
    async fn test_edit_does_not_call_service() {
        let deleter = MockDeleter::ok();
        let menu = RowActionMenu::for_row(&book_row()).unwrap();
        let outcome = menu.run(RowAction::Edit, &deleter).await;
        assert_eq!(outcome, ActionOutcome::Navigate("/app/books/42/edit".to_string()));
        assert!(deleter.deleted.lock().unwrap().is_empty());
    }
}
