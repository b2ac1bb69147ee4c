use crate::core::state::UiState;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{BookingOverlay, ListingSheet, MapView, TitleBar, ToastLine};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const KEY_HINTS: &str = " r Refresh  l List  ↑↓ Select  Enter Book  q Quit ";

pub fn draw_ui(frame: &mut Frame, snapshot: &UiState, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min, Percentage};
    let layout = Layout::vertical([Length(1), Min(0), Length(1), Length(1)]);
    let [title_area, main_area, toast_area, hints_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(
        snapshot.current_location,
        status_message(snapshot),
        tui.updated_at.map(|t| t.format("%H:%M:%S").to_string()),
    );
    title_bar.render(frame, title_area);

    let (map_area, sheet_area) = if tui.sheet.open {
        let [map, sheet] = Layout::vertical([Min(6), Percentage(55)]).areas(main_area);
        (map, Some(sheet))
    } else {
        (main_area, None)
    };

    MapView {
        location: snapshot.current_location,
        is_loading: snapshot.is_loading,
        error_message: snapshot.error_message.as_deref(),
        listing_count: snapshot.listings.len(),
        spinner_frame,
    }
    .render(frame, map_area);

    if let Some(sheet_area) = sheet_area {
        ListingSheet {
            state: &mut tui.sheet,
            is_loading: snapshot.is_loading,
            error_message: snapshot.error_message.as_deref(),
            spinner_frame,
        }
        .render(frame, sheet_area);
    }

    if snapshot.is_booking {
        BookingOverlay {
            listing_name: tui.pending_booking.as_ref().map(|l| l.name.as_str()),
            spinner_frame,
        }
        .render(frame, main_area);
    }

    ToastLine {
        toast: tui.toasts.current(),
    }
    .render(frame, toast_area);

    frame.render_widget(
        Line::from(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray))),
        hints_area,
    );
}

fn status_message(snapshot: &UiState) -> String {
    if snapshot.is_booking {
        "Booking...".to_string()
    } else if snapshot.is_loading {
        "Loading...".to_string()
    } else if snapshot.error_message.is_some() {
        "Error".to_string()
    } else {
        String::new()
    }
}
