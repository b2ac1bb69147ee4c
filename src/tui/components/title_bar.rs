//! # TitleBar Component
//!
//! Top status bar showing where the user is and what the app is doing.
//!
//! ## Conditional Formatting
//!
//! 1. **Status + update time**: `"staymap | 37.5665, 126.9780 | Loading... | updated 14:02:11"`
//! 2. **Status only**: `"staymap | 37.5665, 126.9780 | Loading..."`
//! 3. **No fix yet**: `"staymap | locating..."`
//!
//! Stateless: every field is a prop and the bar is rebuilt each frame.

use crate::location::Coordinate;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Last resolved position, if any
    pub location: Option<Coordinate>,
    /// Transient status (e.g. "Loading...", "Booking...")
    pub status_message: String,
    /// Wall-clock time of the last successful load, preformatted
    pub updated_at: Option<String>,
}

impl TitleBar {
    pub fn new(
        location: Option<Coordinate>,
        status_message: String,
        updated_at: Option<String>,
    ) -> Self {
        Self {
            location,
            status_message,
            updated_at,
        }
    }

    fn text(&self) -> String {
        let mut parts = vec!["staymap".to_string()];
        match self.location {
            Some(coordinate) => parts.push(coordinate.to_string()),
            None => parts.push("locating...".to_string()),
        }
        if !self.status_message.is_empty() {
            parts.push(self.status_message.clone());
        }
        if let Some(updated_at) = &self.updated_at {
            parts.push(format!("updated {updated_at}"));
        }
        parts.join(" | ")
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
