//! Sidebar with the application's sections.

use bookclub_core::navigation::{SIDEBAR_GROUP, SidebarItem};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::styles::{TEXT_DIM, border_style};

/// Width of the sidebar in columns.
pub const SIDEBAR_WIDTH: u16 = 22;

pub fn render(frame: &mut Frame, area: Rect, items: &[SidebarItem], route: &str) {
    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let (marker, style) = if item.is_active(route) {
                (
                    "▌",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(Color::White))
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(format!(" {}", item.title), style),
            ]))
        })
        .collect();

    let list = List::new(list_items).block(
        Block::default()
            .title(Span::styled(format!(" {} ", SIDEBAR_GROUP), TEXT_DIM))
            .borders(Borders::ALL)
            .border_style(border_style(false)),
    );
    frame.render_widget(list, area);
}
