//! The data table: only rows inside the virtual window are turned into widgets.

use bookclub_core::datatable::{DataTable, LoadMoreState, SortOrder};
use bookclub_core::utils::text::truncate_text;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState as WidgetState},
};
use serde_json::Value;

use super::styles::{
    HIGHLIGHT_SYMBOL, TEXT_DIM, TEXT_ERROR, TEXT_WARNING, border_style, header_cursor_style,
    header_style, row_highlight_style,
};

/// Borders and the header row; the footer sits in the bottom border.
pub const CHROME_HEIGHT: u16 = 3;

/// Character width for a column sized in pixels.
fn column_width(size: u16) -> u16 {
    (size / 10).clamp(8, 60)
}

fn header_label(table: &DataTable<Value>, id: &str, header: &str) -> String {
    match table.state().sorting() {
        Some(sort) if sort.id == id => match sort.order() {
            SortOrder::Asc => format!("{} ▲", header),
            SortOrder::Desc => format!("{} ▼", header),
        },
        _ => header.to_string(),
    }
}

/// Footer under the rows: load state or the last error.
pub fn footer_line(table: &DataTable<Value>) -> Line<'static> {
    if let Some(error) = table.source().error() {
        return Line::from(vec![
            Span::styled(format!(" {} ", error.user_message()), TEXT_ERROR),
            Span::styled("(Enter to retry)", TEXT_DIM),
        ]);
    }
    let loaded = table.rows().len();
    let count = match table.source().total() {
        Some(total) => format!(" {} of {} ", loaded, total),
        None => format!(" {} rows ", loaded),
    };
    let state = table.load_more_state();
    let style = match state {
        LoadMoreState::Loading | LoadMoreState::LoadingMore => TEXT_WARNING,
        _ => TEXT_DIM,
    };
    Line::from(vec![
        Span::styled(count, TEXT_DIM),
        Span::styled(format!("· {}", state.label()), style),
    ])
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    table: &DataTable<Value>,
    selected: usize,
    column_cursor: Option<&str>,
) {
    let state = table.state();
    let columns = state.visible_columns();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(true))
        .title_bottom(footer_line(table));

    if table.rows().is_empty() && !table.source().is_loading() {
        let empty = Table::new(
            vec![Row::new(vec![Cell::from(Span::styled("No results.", TEXT_DIM))])],
            [Constraint::Percentage(100)],
        )
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(columns.iter().map(|column| {
        let style = if column_cursor == Some(column.id.as_str()) {
            header_cursor_style()
        } else {
            header_style()
        };
        Cell::from(header_label(table, &column.id, &column.header)).style(style)
    }));

    // Rows outside the viewport proper (overscan) are skipped when drawing.
    let viewport = table.virtualizer().viewport() as u64;
    let offset = table.virtualizer().scroll_offset();
    let window: Vec<_> = table
        .visible_rows()
        .into_iter()
        .filter(|(item, _)| item.start >= offset && item.start < offset + viewport)
        .collect();

    let highlighted = window.iter().position(|(item, _)| item.index == selected);
    let rows: Vec<Row> = window
        .iter()
        .map(|(_, row)| {
            Row::new(columns.iter().map(|column| {
                let width = column_width(column.size) as usize;
                Cell::from(truncate_text(&column.render(row), width))
            }))
        })
        .collect();

    let widths: Vec<Constraint> = columns
        .iter()
        .map(|column| Constraint::Min(column_width(column.size)))
        .collect();

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(row_highlight_style())
        .highlight_symbol(HIGHLIGHT_SYMBOL);

    let mut widget_state = WidgetState::default().with_selected(highlighted);
    frame.render_stateful_widget(widget, area, &mut widget_state);
}
