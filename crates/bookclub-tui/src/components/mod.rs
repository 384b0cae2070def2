//! UI components.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

pub mod breadcrumbs;
pub mod sidebar;
mod status_bar;
pub mod styles;
pub mod table_view;
pub mod toolbar;

pub use status_bar::StatusBar;

/// Common trait for stateful components.
pub trait Component {
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool);

    /// Returns true if the event was consumed.
    #[allow(dead_code)]
    fn handle_key(&mut self, key: KeyEvent) -> bool;
}
