//! Header line: breadcrumbs for the current route and the connection state.

use bookclub_core::navigation::breadcrumbs;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::service::ConnectionStatus;

use super::styles::TEXT_DIM;

pub fn spans_for(route: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, crumb) in breadcrumbs(route).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" > ", TEXT_DIM));
        }
        let style = if crumb.is_active {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(crumb.title, style));
    }
    spans
}

pub fn render(frame: &mut Frame, area: Rect, route: &str, status: &ConnectionStatus) {
    let indicator = match status {
        ConnectionStatus::Anonymous => Span::styled(" ○ anonymous ", TEXT_DIM),
        ConnectionStatus::Authenticated => {
            Span::styled(" ● token ", Style::default().fg(Color::Green))
        }
        ConnectionStatus::Error(_) => Span::styled(" ✗ offline ", Style::default().fg(Color::Red)),
    };

    let mut spans = vec![Span::raw(" ")];
    spans.extend(spans_for(route));
    spans.push(Span::styled("  │", TEXT_DIM));
    spans.push(indicator);

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" bookclub ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}
