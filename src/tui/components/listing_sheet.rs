//! # Listing Sheet Component
//!
//! Bottom sheet listing nearby stays, opened with `l`/Space or Enter on the
//! map. Up/Down moves the selection, Enter books, Esc closes.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ListingSheetState` lives in `TuiState`
//! - `ListingSheet` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::listings::Listing;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::map_view::spinner;
use crate::tui::event::TuiEvent;

/// Persistent state for the sheet.
#[derive(Default)]
pub struct ListingSheetState {
    pub open: bool,
    pub listings: Vec<Listing>,
    pub list_state: ListState,
}

impl ListingSheetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn selected(&self) -> Option<&Listing> {
        self.list_state.selected().and_then(|i| self.listings.get(i))
    }

    /// Replaces the listings shown. Keeps the selection on the same id when
    /// the listing is still present, otherwise selects the nearest.
    pub fn sync(&mut self, listings: &[Listing]) {
        if self.listings == listings {
            return;
        }
        let selected_id = self.selected().map(|l| l.id.clone());
        self.listings = listings.to_vec();

        let index = selected_id
            .and_then(|id| self.listings.iter().position(|l| l.id == id))
            .or(if self.listings.is_empty() { None } else { Some(0) });
        self.list_state.select(index);
    }
}

/// Events emitted by the sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetEvent {
    Book(Listing),
    Dismiss,
}

impl EventHandler for ListingSheetState {
    type Event = SheetEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SheetEvent> {
        match event {
            TuiEvent::Escape => Some(SheetEvent::Dismiss),
            TuiEvent::CursorUp => {
                if let Some(i) = self.list_state.selected() {
                    self.list_state.select(Some(i.saturating_sub(1)));
                }
                None
            }
            TuiEvent::CursorDown => {
                if let Some(i) = self.list_state.selected() {
                    let last = self.listings.len().saturating_sub(1);
                    self.list_state.select(Some((i + 1).min(last)));
                }
                None
            }
            TuiEvent::Submit => self.selected().cloned().map(SheetEvent::Book),
            _ => None,
        }
    }
}

/// Transient render wrapper for the sheet.
pub struct ListingSheet<'a> {
    pub state: &'a mut ListingSheetState,
    pub is_loading: bool,
    pub error_message: Option<&'a str>,
    pub spinner_frame: usize,
}

impl Component for ListingSheet<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!(" {} stays nearby ", self.state.listings.len());
        let block = Block::default()
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_bottom(Line::from(" Enter Book  Esc Close ").centered())
            .padding(Padding::horizontal(1));

        let message = if self.is_loading {
            Some(Line::from(format!(
                "{} Loading nearby stays...",
                spinner(self.spinner_frame)
            )))
        } else if let Some(error) = self.error_message {
            Some(Line::from(vec![
                Span::styled(error.to_string(), Style::default().fg(Color::Red)),
                Span::raw("  (r to retry)"),
            ]))
        } else if self.state.listings.is_empty() {
            Some(Line::from("No stays found nearby. Press r to try again."))
        } else {
            None
        };

        if let Some(message) = message {
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .state
            .listings
            .iter()
            .map(|listing| listing_item(listing, inner_width))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .highlight_symbol("▸ ");

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

fn listing_item(listing: &Listing, width: usize) -> ListItem<'static> {
    let distance = format_distance(listing.distance_meters);
    let price = format!("₩{}/night", format_price(listing.price_per_night));
    // highlight symbol + separators
    let fixed = 2 + distance.width() + price.width() + 4;
    let text_width = width.saturating_sub(fixed);
    let name_width = text_width / 2;
    let address_width = text_width - name_width;

    ListItem::new(Line::from(vec![
        Span::styled(
            pad_to_width(&listing.name, name_width),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            pad_to_width(&listing.address, address_width),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(distance, Style::default().fg(Color::Blue)),
        Span::raw("  "),
        Span::styled(price, Style::default().fg(Color::Yellow)),
    ]))
}

/// `"640 m"` style distance, matching the whole-metre precision of the map.
pub fn format_distance(meters: f64) -> String {
    format!("{:>6}", format!("{meters:.0} m"))
}

/// Thousands-separated won amount: `128000` → `"128,000"`.
pub fn format_price(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncates or pads `s` to exactly `width` display columns. Hangul takes two
/// columns per syllable, so this can't be done with `format!` widths.
pub fn pad_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{}{}", s, " ".repeat(width - s.width()));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width.saturating_sub(1) {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
