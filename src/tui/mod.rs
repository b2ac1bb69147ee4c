//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders `UiState`
//! snapshots, and translates keyboard events into view model calls.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop redraws only when something changed:
//!
//! - **Animating** (refresh or booking in flight): draws every ~80ms so the
//!   spinner moves.
//! - **Idle**: sleeps up to 250ms, redrawing on input, resize, a new snapshot
//!   from the view model, or a toast expiring.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;

use crate::LocationMode;
use crate::core::config::ResolvedConfig;
use crate::core::state::UiState;
use crate::core::view_model::{Dependencies, ViewModel};
use crate::listings::{FakeListingSource, Listing};
use crate::location::{CallbackLocationSource, Permission, PlatformError, SimulatedPlatform};
use crate::tui::component::EventHandler;
use crate::tui::components::{ListingSheetState, SheetEvent, ToastKind, ToastQueue};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// What the event loop asks of the view model.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Refresh,
    Book(Listing),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub sheet: ListingSheetState,
    pub toasts: ToastQueue,
    /// When listings last loaded without error
    pub updated_at: Option<DateTime<Local>>,
    /// A refresh was requested and its outcome hasn't been shown yet
    pub pending_refresh: bool,
    /// Listing whose booking is in flight
    pub pending_booking: Option<Listing>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            sheet: ListingSheetState::new(),
            toasts: ToastQueue::default(),
            updated_at: None,
            // The view model refreshes on construction
            pending_refresh: true,
            pending_booking: None,
        }
    }

    /// Reacts to a new snapshot: keeps the sheet in sync and raises toasts
    /// for finished refreshes and bookings.
    pub fn observe(&mut self, snapshot: &UiState) {
        self.sheet.sync(&snapshot.listings);

        if self.pending_refresh && !snapshot.is_loading {
            self.pending_refresh = false;
            match &snapshot.error_message {
                Some(error) => self.toasts.push(error.clone(), ToastKind::Error),
                None => self.updated_at = Some(Local::now()),
            }
        }

        if self.pending_booking.is_some() && !snapshot.is_booking {
            self.pending_booking = None;
            if let Some(booked) = &snapshot.last_booked {
                self.toasts
                    .push(format!("{} booked!", booked.name), ToastKind::Success);
            }
        }
    }

    pub fn handle_event(&mut self, snapshot: &UiState, event: TuiEvent) -> Option<Command> {
        match event {
            TuiEvent::Quit => Some(Command::Quit),
            TuiEvent::Refresh => {
                self.pending_refresh = true;
                Some(Command::Refresh)
            }
            TuiEvent::ToggleSheet => {
                self.sheet.toggle();
                None
            }
            TuiEvent::Resize => None,
            // Enter on the map opens the sheet, like tapping the marker
            TuiEvent::Submit if !self.sheet.open => {
                self.sheet.open = true;
                None
            }
            _ if self.sheet.open => match self.sheet.handle_event(&event)? {
                SheetEvent::Book(listing) => {
                    if snapshot.is_booking || self.pending_booking.is_some() {
                        debug!("Booking already in flight, ignoring {}", listing.id);
                        return None;
                    }
                    self.pending_booking = Some(listing.clone());
                    Some(Command::Book(listing))
                }
                SheetEvent::Dismiss => {
                    self.sheet.open = false;
                    None
                }
            },
            _ => None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Nothing to type into, so the cursor stays hidden for the whole session
        execute!(stdout(), Hide)?;
        info!("Terminal modes enabled (cursor hidden)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// Wire the collaborators for a resolved config.
pub fn build_dependencies(config: &ResolvedConfig) -> Dependencies {
    let platform = match config.location_mode {
        LocationMode::Granted => SimulatedPlatform::new(Some(config.coordinate)),
        LocationMode::Denied => {
            SimulatedPlatform::new(Some(config.coordinate)).with_permission(Permission::Denied)
        }
        LocationMode::NoFix => SimulatedPlatform::new(None),
        LocationMode::Failing => SimulatedPlatform::new(Some(config.coordinate)).with_failure(
            PlatformError::Provider("simulated provider failure".to_string()),
        ),
    }
    .with_latency(config.fix_latency);

    Dependencies {
        location: Arc::new(CallbackLocationSource::new(platform)),
        listings: Arc::new(FakeListingSource::new(
            config.fetch_delay,
            config.booking_delay,
        )),
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let view_model = ViewModel::new(build_dependencies(&config));
    let mut snapshots = view_model.subscribe();
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        if snapshots.has_changed().unwrap_or(false) {
            needs_redraw = true;
        }
        let snapshot = snapshots.borrow_and_update().clone();
        tui.observe(&snapshot);

        if tui.toasts.tick(Instant::now()) {
            needs_redraw = true;
        }

        let animating = snapshot.is_loading || snapshot.is_booking;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &snapshot, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match tui.handle_event(&snapshot, event) {
                Some(Command::Quit) => should_quit = true,
                Some(Command::Refresh) => view_model.refresh(),
                Some(Command::Book(listing)) => view_model.book(listing),
                None => {}
            }
        }

        if should_quit {
            info!("Quit requested");
            break;
        }
    }

    // Aborts anything still in flight
    drop(view_model);

    ratatui::restore();
    Ok(())
}
