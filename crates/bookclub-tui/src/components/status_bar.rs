//! Key bindings, status message and transient notifications.

use std::time::Instant;

use bookclub_core::actions::Notification;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Component;
use super::styles::{TEXT_ERROR, TEXT_SUCCESS};

#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyBinding {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub struct StatusBar {
    message: String,
    bindings: Vec<KeyBinding>,
    /// Shown instead of the message until it expires.
    notification: Option<(Notification, Instant)>,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            message: String::new(),
            bindings: vec![
                KeyBinding::new("Tab", "Resource"),
                KeyBinding::new("↑↓", "Row"),
                KeyBinding::new("←→", "Column"),
                KeyBinding::new("s", "Sort"),
                KeyBinding::new("v", "Show/Hide"),
                KeyBinding::new("/", "Search"),
                KeyBinding::new("f", "Filter"),
                KeyBinding::new("e/d", "Edit/Delete"),
                KeyBinding::new("q", "Quit"),
            ],
            notification: None,
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn notify(&mut self, notification: Notification, now: Instant) {
        self.notification = Some((notification, now));
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref().map(|(n, _)| n)
    }

    /// Drop the notification once its duration has passed.
    pub fn expire(&mut self, now: Instant) {
        let expired = self
            .notification
            .as_ref()
            .is_some_and(|(n, shown)| now.duration_since(*shown) >= n.duration);
        if expired {
            self.notification = None;
        }
    }
}

impl Component for StatusBar {
    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        let mut spans: Vec<Span> = Vec::new();

        for (i, binding) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(
                format!(" {} ", binding.key),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::raw(binding.action));
        }

        match &self.notification {
            Some((notification, _)) => {
                let style = if notification.is_error {
                    TEXT_ERROR
                } else {
                    TEXT_SUCCESS
                };
                spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
                spans.push(Span::styled(
                    format!("{} {}", notification.title, notification.message),
                    style,
                ));
            }
            None if !self.message.is_empty() => {
                spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
                spans.push(Span::styled(
                    self.message.clone(),
                    Style::default().fg(Color::Green),
                ));
            }
            None => {}
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

        frame.render_widget(paragraph, area);
    }

    fn handle_key(&mut self, _key: KeyEvent) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_notification_expires_after_duration() {
        let mut bar = StatusBar::new();
        let now = Instant::now();
        bar.notify(Notification::success("Success!", "The book was deleted."), now);

        bar.expire(now + Duration::from_secs(2));
        assert!(bar.notification().is_some());

        bar.expire(now + Duration::from_secs(3));
        assert!(bar.notification().is_none());
    }

    #[test]
    fn test_message_kept_under_notification() {
        let mut bar = StatusBar::new();
        bar.set_message("Loaded 15 books");
        bar.notify(Notification::error("Error!", "nope"), Instant::now());
        assert_eq!(bar.message(), "Loaded 15 books");
        assert!(bar.notification().is_some_and(|n| n.is_error));
    }
}
