//! Keyboard and mouse input.
//!
//! Keys are handled by mode first (search box, filter popup), then as
//! global bindings.

use std::time::Instant;

use bookclub_core::actions::{RowAction, RowActionMenu};
use bookclub_core::core::services::types::Resource;
use bookclub_core::datatable::TableEvent;
use crossterm::event::{KeyCode, KeyModifiers};

use crate::action::AppAction;
use crate::layout::table::{DEFAULT_PAGE_JUMP, ROW_HEIGHT};

use super::{App, InputMode};

impl App {
    pub(super) fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Search => self.handle_search_keys(code),
            InputMode::Filter { cursor } => self.handle_filter_keys(code, cursor),
            InputMode::Normal => self.handle_normal_keys(code),
        }
    }

    fn handle_search_keys(&mut self, code: KeyCode) {
        let mut text = self.table.toolbar().search_text().to_string();
        match code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                return;
            }
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Char(c) => text.push(c),
            _ => return,
        }
        // Applied by the debouncer on a later tick.
        self.dispatch(TableEvent::SearchInput {
            text,
            now: Instant::now(),
        });
    }

    fn handle_filter_keys(&mut self, code: KeyCode, cursor: usize) {
        let Some(facet) = self.table.toolbar().facets().first().cloned() else {
            self.input_mode = InputMode::Normal;
            return;
        };
        let last = facet.options.len().saturating_sub(1);
        match code {
            KeyCode::Esc | KeyCode::Char('f') => self.input_mode = InputMode::Normal,
            KeyCode::Down | KeyCode::Char('j') => {
                self.input_mode = InputMode::Filter {
                    cursor: (cursor + 1).min(last),
                };
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.input_mode = InputMode::Filter {
                    cursor: cursor.saturating_sub(1),
                };
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(option) = facet.options.get(cursor) {
                    self.select(0);
                    self.dispatch(TableEvent::ToggleFilterOption {
                        column: facet.id.clone(),
                        value: option.value.clone(),
                    });
                }
            }
            KeyCode::Char('x') => {
                self.select(0);
                self.dispatch(TableEvent::ResetFilters);
            }
            _ => {}
        }
    }

    fn handle_normal_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => {
                let _ = self
                    .action_tx
                    .send(AppAction::SwitchResource(self.resource.next()));
            }
            KeyCode::BackTab => {
                let previous = Resource::ALL
                    .into_iter()
                    .find(|r| r.next() == self.resource)
                    .unwrap_or(self.resource);
                let _ = self.action_tx.send(AppAction::SwitchResource(previous));
            }
            KeyCode::Down | KeyCode::Char('j') => self.select(self.selected + 1),
            KeyCode::Up | KeyCode::Char('k') => self.select(self.selected.saturating_sub(1)),
            KeyCode::PageDown => self.select(self.selected + self.page_jump()),
            KeyCode::PageUp => self.select(self.selected.saturating_sub(self.page_jump())),
            KeyCode::Home | KeyCode::Char('g') => self.select(0),
            KeyCode::End | KeyCode::Char('G') => self.select(usize::MAX),
            KeyCode::Left | KeyCode::Char('h') => {
                self.column_cursor = self.column_cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let last = self.table.state().columns().len().saturating_sub(1);
                self.column_cursor = (self.column_cursor + 1).min(last);
            }
            KeyCode::Char('s') => self.toggle_sort(),
            KeyCode::Char('v') => self.toggle_column(),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('f') => {
                if self.table.toolbar().facets().is_empty() {
                    self.status_bar
                        .set_message(format!("No filters for {}", self.resource));
                } else {
                    self.input_mode = InputMode::Filter { cursor: 0 };
                }
            }
            KeyCode::Char('x') => {
                self.select(0);
                self.dispatch(TableEvent::ResetFilters);
            }
            KeyCode::Char('L') | KeyCode::Enter => self.dispatch(TableEvent::LoadMore),
            KeyCode::Char('r') => {
                self.select(0);
                self.dispatch(TableEvent::Refetch);
            }
            KeyCode::Esc => {
                if !self.table.toolbar().search_text().is_empty() {
                    self.dispatch(TableEvent::SearchInput {
                        text: String::new(),
                        now: Instant::now(),
                    });
                }
            }
            KeyCode::Char(c) => {
                if let Some(action) = RowAction::ALL.into_iter().find(|a| a.shortcut() == c) {
                    self.run_row_action(action);
                }
            }
            _ => {}
        }
    }

    pub(super) fn scroll_by(&mut self, delta: i64) {
        let target = if delta < 0 {
            self.selected.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.selected.saturating_add(delta as usize)
        };
        self.select(target);
    }

    fn page_jump(&self) -> usize {
        match (self.viewport / ROW_HEIGHT) as usize {
            0 => DEFAULT_PAGE_JUMP,
            rows => rows,
        }
    }

    /// Move the focused row, keeping it inside the viewport.
    pub(crate) fn select(&mut self, index: usize) {
        let count = self.table.rows().len();
        self.selected = index.min(count.saturating_sub(1));
        if self.viewport == 0 {
            return;
        }
        self.dispatch(TableEvent::Reveal {
            index: self.selected,
            viewport: self.viewport,
        });
    }

    fn toggle_sort(&mut self) {
        let Some(column) = self.cursor_column() else {
            return;
        };
        if !self
            .table
            .state()
            .column(&column)
            .is_some_and(|c| c.sortable)
        {
            self.status_bar
                .set_message(format!("'{}' cannot be sorted", column));
            return;
        }
        self.selected = 0;
        self.dispatch(TableEvent::Sort(column));
    }

    fn toggle_column(&mut self) {
        let Some(column) = self.cursor_column() else {
            return;
        };
        match self.table.handle(TableEvent::ToggleColumn(column.clone())) {
            Ok(_) => {
                let shown = self.table.state().is_visible(&column);
                self.status_bar.set_message(format!(
                    "{} {}",
                    column,
                    if shown { "shown" } else { "hidden" }
                ));
            }
            Err(e) => self.status_bar.set_message(e.to_string()),
        }
    }

    /// Edit and delete need a row that passes the book schema.
    fn run_row_action(&mut self, action: RowAction) {
        if self.resource != Resource::Books {
            self.status_bar
                .set_message(format!("No row actions for {}", self.resource));
            return;
        }
        let Some(row) = self.table.rows().get(self.selected) else {
            return;
        };
        let menu = match RowActionMenu::for_row(row) {
            Ok(menu) => menu,
            Err(e) => {
                self.status_bar.set_message(format!("Error: {}", e));
                return;
            }
        };
        let next = match action {
            RowAction::Edit => AppAction::Navigate(menu.edit_route()),
            RowAction::Delete => AppAction::DeleteBook(menu.book().id),
        };
        let _ = self.action_tx.send(next);
    }
}
