//! Background requests.
//!
//! Each request runs on its own tokio task and reports back through the
//! action channel; nothing here touches table state after spawning.

use std::sync::Arc;

use bookclub_core::datatable::FetchTicket;
use bookclub_core::error::ApiError;

use crate::action::AppAction;
use crate::service::ServiceClient;

use super::App;

impl App {
    fn connected_service(&mut self) -> Option<Arc<ServiceClient>> {
        match &self.service {
            Some(service) => Some(Arc::clone(service)),
            None => {
                self.status_bar
                    .set_message("Error: Not connected to the catalog API");
                None
            }
        }
    }

    /// Fetch the page a ticket asks for.
    pub(crate) fn spawn_fetch(&mut self, ticket: Option<FetchTicket>) {
        let Some(ticket) = ticket else {
            return;
        };

        let Some(service) = self.connected_service() else {
            // Settle the ticket so the table does not stay in flight.
            let endpoint = self.resource.path();
            self.table.complete(
                &ticket,
                Err(ApiError::Transport {
                    endpoint,
                    message: "no API connection".to_string(),
                }),
            );
            return;
        };

        log::debug!(
            "fetching {} epoch {} cursor {}",
            self.resource,
            ticket.epoch,
            ticket.query.cursor
        );
        let tx = self.action_tx.clone();
        let resource = self.resource;
        let generation = self.generation;

        tokio::spawn(async move {
            let result = service.fetch_page(resource, &ticket.query).await;
            let _ = tx.send(AppAction::PageLoaded {
                generation,
                ticket,
                result,
            });
        });
    }

    pub(crate) fn spawn_delete(&mut self, id: u64) {
        let Some(service) = self.connected_service() else {
            return;
        };

        self.status_bar.set_message(format!("Deleting book {}...", id));
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let notification = service.delete_book(id).await;
            let refetch = !notification.is_error;
            let _ = tx.send(AppAction::ActionFinished {
                notification,
                refetch,
            });
        });
    }
}
