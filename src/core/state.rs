//! # UI State
//!
//! The single snapshot describing everything presentation needs to render.
//! Domain data only, no ratatui types. Presentation-only state (selection,
//! toasts, sheet visibility) lives in the `tui` module.
//!
//! ```text
//! UiState
//! ├── is_loading: bool                  // refresh in flight
//! ├── is_booking: bool                  // booking in flight
//! ├── listings: Vec<Listing>            // sorted by distance
//! ├── error_message: Option<String>     // last refresh failure
//! ├── last_booked: Option<Listing>      // most recent completed booking
//! └── current_location: Option<Coordinate> // last resolved position
//! ```
//!
//! Snapshots are never edited in place by callers. `update()` in action.rs
//! builds the next one and the view-model swaps it in whole.

use crate::listings::Listing;
use crate::location::Coordinate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub is_loading: bool,
    pub is_booking: bool,
    pub listings: Vec<Listing>,
    pub error_message: Option<String>,
    pub last_booked: Option<Listing>,
    pub current_location: Option<Coordinate>,
}

impl UiState {
    /// Nothing to show yet: not loading, no error, no listings.
    pub fn is_empty(&self) -> bool {
        !self.is_loading && self.error_message.is_none() && self.listings.is_empty()
    }
}
