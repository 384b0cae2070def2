use crate::datatable::{DataTable, SortOrder};
use crate::utils::text::truncate_text;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use crossterm::terminal;

const MIN_CELL_WIDTH: usize = 8;
const MAX_CELL_WIDTH: usize = 60;

/// Terminal rendering of data tables with comfy-table.
pub struct TableDisplay {
    max_width: Option<usize>,
    use_colors: bool,
}

impl TableDisplay {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: true,
        }
    }

    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _)) => Some((cols as usize).clamp(40, 200)),
            Err(_) => Some(80),
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn bold_header(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).add_attribute(Attribute::Bold).fg(color)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    fn configure_table_width(&self, table: &mut Table) {
        let width = self
            .max_width
            .map(|w| if w > 20 { w - 6 } else { w.max(40) })
            .unwrap_or(80);
        table.set_width(width as u16);
    }

    fn new_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);
        table
    }

    /// Column widths are given in pixels; roughly ten per character.
    fn cell_width(size: u16) -> usize {
        (size as usize / 10).clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH)
    }

    /// Every loaded row under the visible columns. The sorted column is marked.
    pub fn render_data_table<T>(&self, data: &DataTable<T>) -> String {
        if data.rows().is_empty() {
            return "No results.".to_string();
        }

        let state = data.state();
        let columns = state.visible_columns();
        let sorting = state.sorting();

        let mut table = self.new_table();
        let headers: Vec<Cell> = columns
            .iter()
            .map(|column| {
                let indicator = match sorting {
                    Some(sort) if sort.id == column.id => match sort.order() {
                        SortOrder::Asc => " ▲",
                        SortOrder::Desc => " ▼",
                    },
                    _ => "",
                };
                self.bold_header(&format!("{}{}", column.header, indicator), Color::Cyan)
            })
            .collect();
        table.set_header(headers);

        for row in data.rows() {
            let cells: Vec<Cell> = columns
                .iter()
                .map(|column| {
                    Cell::new(truncate_text(&column.render(row), Self::cell_width(column.size)))
                })
                .collect();
            table.add_row(cells);
        }

        table.to_string()
    }

    /// One-line description of what is loaded and which query produced it.
    pub fn render_summary<T>(&self, data: &DataTable<T>) -> String {
        let source = data.source();
        let mut parts = vec![match source.total() {
            Some(total) => format!("Showing {} of {} rows", source.rows().len(), total),
            None => format!("Showing {} rows", source.rows().len()),
        }];

        let state = data.state();
        if let Some(sort) = state.sorting() {
            parts.push(format!("Sort: {} {}", sort.id, sort.order().as_str()));
        }
        if !state.global_filter().is_empty() {
            parts.push(format!("Search: \"{}\"", state.global_filter()));
        }
        for filter in state.column_filters() {
            parts.push(format!("{} = {}", filter.id, filter.value.values().join(", ")));
        }
        parts.push(format!("[{}]", data.load_more_state().label()));

        parts.join(" | ")
    }

    /// Render a simple table with custom headers and rows
    pub fn render_simple_table(&self, headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = self.new_table();
        let cells: Vec<Cell> = headers
            .iter()
            .map(|h| self.bold_header(h, Color::Cyan))
            .collect();
        table.set_header(cells);

        for row in rows {
            let cells: Vec<Cell> = row.iter().map(Cell::new).collect();
            table.add_row(cells);
        }

        table.to_string()
    }
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::columns;
    use crate::core::services::types::Resource;
    use crate::datatable::{LoadMode, Page, TableEvent, TableOptions};
    use serde_json::{Value, json};

    fn loaded_books() -> DataTable<Value> {
        let options = TableOptions {
            mode: LoadMode::Manual,
            ..TableOptions::default()
        };
        let mut table = DataTable::new(
            columns::table_state(Resource::Books),
            columns::toolbar(Resource::Books),
            options,
        );
        let ticket = table.handle(TableEvent::Sort("title".to_string())).unwrap().unwrap();
        let rows = vec![
            json!({"id": 1, "title": "dune", "author": {"name": "frank herbert"}, "genres": [{"name": "sf"}]}),
            json!({"id": 2, "title": "emma", "author": {"name": "jane austen"}, "genres": []}),
        ];
        table.complete(&ticket, Ok(Page::new(rows).with_total(2)));
        table
    }

    #[test]
    fn test_table_display_creation() {
        let display = TableDisplay::new().with_max_width(80).with_colors(false);
        assert_eq!(display.max_width, Some(80));
        assert!(!display.use_colors);
    }

    #[test]
    fn test_render_data_table() {
        let display = TableDisplay::new().with_max_width(160).with_colors(false);
        let rendered = display.render_data_table(&loaded_books());
        assert!(rendered.contains("Title ▲"));
        assert!(rendered.contains("Dune"));
        assert!(rendered.contains("Jane Austen"));
        assert!(rendered.contains("Created"));
    }

    #[test]
    fn test_render_summary() {
        let display = TableDisplay::new().with_colors(false);
        let summary = display.render_summary(&loaded_books());
        assert_eq!(
            summary,
            "Showing 2 of 2 rows | Sort: title asc | [Nothing more to load]"
        );
    }

    #[test]
    fn test_render_empty_table() {
        let display = TableDisplay::new();
        let table = DataTable::new(
            columns::table_state(Resource::Genres),
            columns::toolbar(Resource::Genres),
            TableOptions::default(),
        );
        assert_eq!(display.render_data_table(&table), "No results.");
    }

    #[test]
    fn test_cell_width_bounds() {
        assert_eq!(TableDisplay::cell_width(300), 30);
        assert_eq!(TableDisplay::cell_width(10), MIN_CELL_WIDTH);
        assert_eq!(TableDisplay::cell_width(2000), MAX_CELL_WIDTH);
    }
}
