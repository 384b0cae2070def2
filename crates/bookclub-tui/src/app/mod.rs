//! Application state and the main run loop.
//!
//! ## Module Structure
//! - `mod.rs`: App struct, initialization, drawing
//! - `action_handler.rs`: AppAction processing
//! - `data_handler.rs`: page and delete requests on tokio tasks
//! - `input_handler.rs`: keyboard and mouse input

mod action_handler;
mod data_handler;
mod input_handler;

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bookclub_core::core::services::columns;
use bookclub_core::core::services::types::Resource;
use bookclub_core::datatable::{DataTable, LoadMode, Pagination, TableEvent, TableOptions};
use bookclub_core::navigation::{resource_route, sidebar_items};
use bookclub_core::storage::config::Config;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::action::AppAction;
use crate::components::{Component, StatusBar, breadcrumbs, sidebar, table_view, toolbar};
use crate::event::{Event, EventHandler};
use crate::layout::main::{HEADER_HEIGHT, STATUS_BAR_HEIGHT, TOOLBAR_HEIGHT};
use crate::layout::table::{FETCH_THRESHOLD_ROWS, ROW_HEIGHT};
use crate::service::{ConnectionStatus, ServiceClient};

/// What keys currently edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box.
    Search,
    /// Choosing options of the first faceted filter.
    Filter { cursor: usize },
}

pub struct App {
    pub should_quit: bool,
    pub(crate) resource: Resource,
    /// Current application route, drives breadcrumbs and the sidebar.
    pub(crate) route: String,
    pub(crate) table: DataTable<Value>,
    /// Bumped whenever `table` is rebuilt; pages for older tables are dropped.
    pub(crate) generation: u64,
    /// Focused row, the target of row actions.
    pub(crate) selected: usize,
    /// Index into all columns, for sort and visibility keys.
    pub(crate) column_cursor: usize,
    pub(crate) input_mode: InputMode,
    pub(crate) status_bar: StatusBar,
    pub(crate) service: Option<Arc<ServiceClient>>,
    pub(crate) connection_status: ConnectionStatus,
    page_size: NonZeroU32,
    debounce: Duration,
    /// Rows that fit in the table area at the last draw.
    pub(crate) viewport: u32,
    pub(crate) action_tx: mpsc::UnboundedSender<AppAction>,
    action_rx: mpsc::UnboundedReceiver<AppAction>,
}

impl App {
    pub fn new(
        config: &Config,
        service: Option<Arc<ServiceClient>>,
        connection_status: ConnectionStatus,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let page_size = NonZeroU32::new(config.page_size()).unwrap_or(NonZeroU32::MIN);
        let debounce = Duration::from_millis(config.debounce_ms());
        let resource = Resource::Books;

        Self {
            should_quit: false,
            resource,
            route: resource_route(resource),
            table: build_table(resource, page_size, debounce),
            generation: 0,
            selected: 0,
            column_cursor: 0,
            input_mode: InputMode::Normal,
            status_bar: StatusBar::new(),
            service,
            connection_status,
            page_size,
            debounce,
            viewport: 0,
            action_tx,
            action_rx,
        }
    }

    pub async fn run_async(
        &mut self,
        terminal: &mut ratatui::Terminal<impl ratatui::backend::Backend>,
    ) -> std::io::Result<()> {
        let event_handler = EventHandler::new(100);

        let ticket = self.table.start();
        self.spawn_fetch(ticket);

        while !self.should_quit {
            self.process_actions();

            let mut viewport = self.viewport;
            terminal.draw(|frame| viewport = self.draw(frame))?;
            if viewport != self.viewport {
                self.set_viewport(viewport);
            }

            match event_handler.next()? {
                Event::Key(key) => self.handle_key(key.code, key.modifiers),
                Event::Scroll(delta) => self.scroll_by(delta),
                Event::Resize => {}
                Event::Tick => self.on_tick(Instant::now()),
            }
        }

        Ok(())
    }

    fn process_actions(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            self.handle_action(action);
        }
    }

    fn on_tick(&mut self, now: Instant) {
        self.status_bar.expire(now);
        self.dispatch(TableEvent::Tick(now));
    }

    /// Feed an event to the table and fetch whatever it asks for.
    pub(crate) fn dispatch(&mut self, event: TableEvent) {
        match self.table.handle(event) {
            Ok(ticket) => self.spawn_fetch(ticket),
            Err(e) => self.status_bar.set_message(e.to_string()),
        }
    }

    pub(crate) fn set_viewport(&mut self, viewport: u32) {
        self.viewport = viewport;
        self.dispatch(TableEvent::Resize { viewport });
    }

    /// Replace the table with a fresh one for `resource`.
    pub(crate) fn switch_resource(&mut self, resource: Resource) {
        self.resource = resource;
        self.route = resource_route(resource);
        self.generation += 1;
        self.table = build_table(resource, self.page_size, self.debounce);
        self.selected = 0;
        self.column_cursor = 0;
        self.input_mode = InputMode::Normal;
        self.status_bar.set_message(format!("Viewing {}", resource));

        let ticket = self.table.start();
        self.spawn_fetch(ticket);
        if self.viewport > 0 {
            self.dispatch(TableEvent::Resize {
                viewport: self.viewport,
            });
        }
    }

    /// Id of the column under the column cursor.
    pub(crate) fn cursor_column(&self) -> Option<String> {
        self.table
            .state()
            .columns()
            .get(self.column_cursor)
            .map(|c| c.id.clone())
    }

    /// Draw the UI. Returns the number of table rows that fit.
    fn draw(&mut self, frame: &mut Frame) -> u32 {
        let size = frame.area();

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar::SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(size);
        sidebar::render(frame, columns[0], &sidebar_items(), &self.route);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(TOOLBAR_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .split(columns[1]);

        breadcrumbs::render(frame, main_chunks[0], &self.route, &self.connection_status);
        toolbar::render(
            frame,
            main_chunks[1],
            self.table.toolbar(),
            self.table.state(),
            self.input_mode == InputMode::Search,
            Instant::now(),
        );

        let cursor_column = self.cursor_column();
        table_view::render(
            frame,
            main_chunks[2],
            &self.table,
            self.selected,
            cursor_column.as_deref(),
        );

        if let InputMode::Filter { cursor } = self.input_mode {
            if let Some(facet) = self.table.toolbar().facets().first() {
                let selected = self.table.state().column_filter(&facet.id);
                toolbar::render_facet_popup(frame, main_chunks[2], facet, selected, cursor);
            }
        }

        self.status_bar.draw(frame, main_chunks[3], false);

        let rows = main_chunks[2]
            .height
            .saturating_sub(table_view::CHROME_HEIGHT) as u32;
        rows * ROW_HEIGHT
    }
}

fn build_table(resource: Resource, page_size: NonZeroU32, debounce: Duration) -> DataTable<Value> {
    let options = TableOptions {
        page_size,
        pagination: Pagination::PageIndex,
        mode: LoadMode::Virtualized,
        estimated_row_height: ROW_HEIGHT,
        fetch_threshold: FETCH_THRESHOLD_ROWS * ROW_HEIGHT as u64,
        // Every row is exactly one terminal line.
        measure_rows: false,
        ..TableOptions::default()
    };
    DataTable::new(
        columns::table_state(resource),
        columns::toolbar(resource).with_debounce(debounce),
        options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookclub_core::datatable::Page;
    use serde_json::json;

    pub(crate) fn test_app() -> App {
        App::new(&Config::default(), None, ConnectionStatus::Anonymous)
    }

    /// Load `count` book rows into the current table.
    pub(crate) fn load_rows(app: &mut App, count: u64, total: u64) {
        let ticket = app
            .table
            .handle(TableEvent::LoadMore)
            .unwrap()
            .or_else(|| app.table.start())
            .expect("a page can be requested");
        let start = app.table.rows().len() as u64;
        let rows = (start..start + count)
            .map(|id| json!({"id": id, "title": format!("book {}", id)}))
            .collect();
        app.handle_action(AppAction::PageLoaded {
            generation: app.generation,
            ticket,
            result: Ok(Page::new(rows).with_total(total)),
        });
    }

    #[test]
    fn test_new_app_starts_on_books() {
        let app = test_app();
        assert_eq!(app.resource, Resource::Books);
        assert_eq!(app.route, "/app/books");
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.cursor_column().as_deref(), Some("title"));
    }

    #[test]
    fn test_switch_resource_rebuilds_table() {
        let mut app = test_app();
        load_rows(&mut app, 3, 3);
        assert_eq!(app.table.rows().len(), 3);

        app.switch_resource(Resource::Genres);
        assert_eq!(app.generation, 1);
        assert_eq!(app.route, "/app/genres");
        assert!(app.table.rows().is_empty());
        assert!(app.table.state().has_column("description"));
    }
}
