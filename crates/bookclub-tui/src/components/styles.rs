//! Shared styles.

use ratatui::style::{Color, Modifier, Style};

pub const BORDER_FOCUSED: Style = Style::new().fg(Color::Cyan);
pub const BORDER_UNFOCUSED: Style = Style::new().fg(Color::DarkGray);

#[inline]
pub fn border_style(focused: bool) -> Style {
    if focused {
        BORDER_FOCUSED
    } else {
        BORDER_UNFOCUSED
    }
}

pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Header cell under the column cursor.
pub fn header_cursor_style() -> Style {
    header_style().add_modifier(Modifier::UNDERLINED)
}

pub fn row_highlight_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub const HIGHLIGHT_SYMBOL: &str = "► ";

pub const TEXT_DIM: Style = Style::new().fg(Color::DarkGray);
pub const TEXT_WARNING: Style = Style::new().fg(Color::Yellow);
pub const TEXT_ERROR: Style = Style::new().fg(Color::Red);
pub const TEXT_SUCCESS: Style = Style::new().fg(Color::Green);

pub fn text_bold_white() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Faceted filter badge with at least one selection.
pub fn badge_active_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
}
