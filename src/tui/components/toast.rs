//! # Toast Component
//!
//! One-line notifications above the key hints: refresh errors and completed
//! bookings. Each toast lives for `TOAST_TTL`; newer toasts queue behind the
//! one currently shown.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    /// Set when the toast first becomes visible.
    shown_at: Option<Instant>,
}

#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toasts.push_back(Toast {
            message: message.into(),
            kind,
            shown_at: None,
        });
    }

    pub fn current(&self) -> Option<&Toast> {
        self.toasts.front()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Starts the front toast's clock and drops it once expired. Returns true
    /// when the visible toast changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(front) = self.toasts.front_mut() else {
            return false;
        };
        let Some(shown_at) = front.shown_at else {
            front.shown_at = Some(now);
            return true;
        };
        if now.duration_since(shown_at) < TOAST_TTL {
            return false;
        }

        self.toasts.pop_front();
        if let Some(next) = self.toasts.front_mut() {
            next.shown_at = Some(now);
        }
        true
    }
}

pub struct ToastLine<'a> {
    pub toast: Option<&'a Toast>,
}

impl Component for ToastLine<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(toast) = self.toast else {
            return;
        };
        let style = match toast.kind {
            ToastKind::Error => Style::default().fg(Color::Red),
            ToastKind::Success => Style::default().fg(Color::Green),
        };
        let line = Line::from(Span::styled(
            format!(" {} ", toast.message),
            style.add_modifier(Modifier::BOLD),
        ))
        .centered();
        frame.render_widget(line, area);
    }
}
