//! Terminal event polling.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEventKind};
use std::time::Duration;

/// Rows moved per mouse wheel notch.
const WHEEL_STEP: i64 = 3;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Mouse wheel, in rows; positive scrolls down.
    Scroll(i64),
    /// No input within the tick rate. Drives debounced search and notification expiry.
    Tick,
    /// Terminal size changed; the next draw picks it up.
    Resize,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Wait up to one tick for the next event.
    pub fn next(&self) -> std::io::Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }
        Ok(match event::read()? {
            CrosstermEvent::Key(key) => Event::Key(key),
            CrosstermEvent::Resize(_, _) => Event::Resize,
            CrosstermEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => Event::Scroll(WHEEL_STEP),
                MouseEventKind::ScrollUp => Event::Scroll(-WHEEL_STEP),
                _ => Event::Tick,
            },
            _ => Event::Tick,
        })
    }
}
