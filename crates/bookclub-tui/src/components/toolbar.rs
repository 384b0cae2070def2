//! Search input, faceted filter badges and the facet option popup.

use bookclub_core::datatable::{FacetedFilter, FilterValue, TableState, Toolbar};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use serde_json::Value;
use std::time::Instant;

use super::styles::{TEXT_DIM, TEXT_WARNING, badge_active_style, border_style, text_bold_white};

/// Number of selected labels shown on a badge before collapsing to a count.
const MAX_BADGE_LABELS: usize = 2;

/// Badge text for a facet: its title plus what is selected.
pub fn badge_text(facet: &FacetedFilter, selected: Option<&FilterValue>) -> String {
    let labels = facet.selected_labels(selected);
    match labels.len() {
        0 => format!("⊕ {}", facet.title),
        n if n > MAX_BADGE_LABELS => format!("⊕ {} | {} selected", facet.title, n),
        _ => format!("⊕ {} | {}", facet.title, labels.join(", ")),
    }
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    toolbar: &Toolbar,
    state: &TableState<Value>,
    searching: bool,
    now: Instant,
) {
    let mut spans = Vec::new();

    let search = toolbar.search_text();
    if search.is_empty() && !searching {
        spans.push(Span::styled(format!(" {} ", toolbar.placeholder()), TEXT_DIM));
    } else {
        spans.push(Span::styled(format!(" {}", search), text_bold_white()));
        if searching {
            spans.push(Span::styled("▏", TEXT_WARNING));
        }
        if toolbar.search_pending(now).is_some() {
            spans.push(Span::styled(" …", TEXT_DIM));
        }
        spans.push(Span::raw(" "));
    }

    for facet in toolbar.facets() {
        let selected = state.column_filter(&facet.id);
        let style = if selected.is_some() {
            badge_active_style()
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", badge_text(facet, selected)), style));
    }

    if state.is_filtered() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "Reset ✕ (x)",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(searching)),
    );
    frame.render_widget(paragraph, area);
}

/// Options plus the two border rows, never taller than the available space.
fn popup_height(options: usize, available: u16) -> u16 {
    u16::try_from(options)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(available)
}

/// Checklist of a facet's options, centered over `area`.
pub fn render_facet_popup(
    frame: &mut Frame,
    area: Rect,
    facet: &FacetedFilter,
    selected: Option<&FilterValue>,
    cursor: usize,
) {
    let height = popup_height(facet.options.len(), area.height);
    let [popup] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(32)])
        .flex(Flex::Center)
        .areas(popup);

    let items: Vec<ListItem> = facet
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let checked = selected.is_some_and(|v| v.contains(&option.value));
            let mark = if checked { "[x]" } else { "[ ]" };
            let style = if i == cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(format!(" {} {}", mark, option.label), style))
        })
        .collect();

    frame.render_widget(Clear, popup);
    frame.render_widget(
        List::new(items).block(
            Block::default()
                .title(format!(" {} ", facet.title))
                .borders(Borders::ALL)
                .border_style(border_style(true)),
        ),
        popup,
    );
}
