//! AppAction processing.

use std::time::Instant;

use bookclub_core::datatable::{FetchOutcome, TableEvent};

use crate::action::AppAction;

use super::App;

impl App {
    pub(super) fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::SwitchResource(resource) => {
                self.switch_resource(resource);
            }
            AppAction::PageLoaded {
                generation,
                ticket,
                result,
            } => {
                if generation != self.generation {
                    log::debug!("dropping page for replaced table {}", generation);
                    return;
                }
                match self.table.complete(&ticket, result) {
                    FetchOutcome::Appended { added } => {
                        self.status_bar.set_message(format!(
                            "Loaded {} {}",
                            self.table.rows().len(),
                            self.resource
                        ));
                        log::debug!("epoch {} appended {} rows", ticket.epoch, added);
                        // The new rows may still not fill the viewport.
                        if self.viewport > 0 {
                            let viewport = self.viewport;
                            self.dispatch(TableEvent::Resize { viewport });
                        }
                    }
                    FetchOutcome::Stale => {}
                    FetchOutcome::Failed(error) => {
                        self.status_bar
                            .set_message(format!("Error: {}", error.user_message()));
                    }
                }
            }
            AppAction::DeleteBook(id) => {
                self.spawn_delete(id);
            }
            AppAction::ActionFinished {
                notification,
                refetch,
            } => {
                self.status_bar.notify(notification, Instant::now());
                if refetch {
                    self.dispatch(TableEvent::Refetch);
                }
            }
            AppAction::Navigate(route) => {
                self.status_bar.set_message(format!("Navigated to {}", route));
                self.route = route;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{load_rows, test_app};
    use super::*;
    use bookclub_core::actions::Notification;
    use bookclub_core::core::services::types::Resource;
    use bookclub_core::datatable::Page;
    use serde_json::json;

    #[test]
    fn test_page_for_replaced_table_is_dropped() {
        let mut app = test_app();
        let ticket = app.table.start().unwrap();
        app.switch_resource(Resource::Authors);

        app.handle_action(AppAction::PageLoaded {
            generation: 0,
            ticket,
            result: Ok(Page::new(vec![json!({"id": 1, "title": "stale"})])),
        });
        assert!(app.table.rows().is_empty());
    }

    #[test]
    fn test_page_loaded_updates_status() {
        let mut app = test_app();
        load_rows(&mut app, 5, 20);
        assert_eq!(app.table.rows().len(), 5);
        assert_eq!(app.status_bar.message(), "Loaded 5 books");
    }

    #[test]
    fn test_navigate_changes_route() {
        let mut app = test_app();
        app.handle_action(AppAction::Navigate("/app/books/3/edit".to_string()));
        assert_eq!(app.route, "/app/books/3/edit");
    }

    #[test]
    fn test_failed_action_shows_notification_without_refetch() {
        let mut app = test_app();
        load_rows(&mut app, 2, 2);
        app.handle_action(AppAction::ActionFinished {
            notification: Notification::error("Error!", "not allowed"),
            refetch: false,
        });
        assert!(app.status_bar.notification().is_some_and(|n| n.is_error));
        assert_eq!(app.table.rows().len(), 2);
    }
}
