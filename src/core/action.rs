//! # Actions
//!
//! Everything that can happen to the screen becomes an `Action`.
//! User presses "refresh"? That's `Action::Refresh`.
//! Listings arrive? That's `Action::ListingsLoaded(batch)`.
//!
//! The `update()` function takes the current snapshot and an action, then
//! returns the next snapshot plus an `Effect` describing any I/O the caller
//! has to start. No side effects here.
//!
//! ```text
//! UiState + Action  →  update()  →  (New UiState, Effect)
//! ```
//!
//! This makes every transition testable:
//! `assert_eq!(update(&state, action), (expected, Effect::None))`.

use log::debug;

use crate::core::pipeline::{PipelineEvent, RefreshError};
use crate::core::state::UiState;
use crate::listings::Listing;
use crate::location::Coordinate;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Start (or restart) the location → listings pipeline.
    Refresh,
    LocationResolved(Coordinate),
    ListingsLoaded(Vec<Listing>),
    RefreshFailed(RefreshError),
    /// User asked to book a listing.
    Book(Listing),
    BookingCompleted(Listing),
}

/// I/O the caller must perform after applying an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SpawnRefresh,
    SpawnBooking(Listing),
}

impl From<PipelineEvent> for Action {
    fn from(event: PipelineEvent) -> Self {
        match event {
            PipelineEvent::LocationResolved(coordinate) => Action::LocationResolved(coordinate),
            PipelineEvent::ListingsLoaded(listings) => Action::ListingsLoaded(listings),
            PipelineEvent::Failed(error) => Action::RefreshFailed(error),
        }
    }
}

pub fn update(state: &UiState, action: Action) -> (UiState, Effect) {
    match action {
        Action::Refresh => (
            UiState {
                is_loading: true,
                error_message: None,
                ..state.clone()
            },
            Effect::SpawnRefresh,
        ),
        Action::LocationResolved(coordinate) => (
            UiState {
                current_location: Some(coordinate),
                ..state.clone()
            },
            Effect::None,
        ),
        Action::ListingsLoaded(listings) => (
            UiState {
                is_loading: false,
                listings,
                error_message: None,
                ..state.clone()
            },
            Effect::None,
        ),
        // Listings from an earlier load stay visible under the error
        Action::RefreshFailed(error) => (
            UiState {
                is_loading: false,
                error_message: Some(error.to_string()),
                ..state.clone()
            },
            Effect::None,
        ),
        Action::Book(listing) => {
            if state.is_booking {
                debug!("Ignoring booking of {}: another booking is in flight", listing.id);
                return (state.clone(), Effect::None);
            }
            (
                UiState {
                    is_booking: true,
                    ..state.clone()
                },
                Effect::SpawnBooking(listing),
            )
        }
        Action::BookingCompleted(listing) => (
            UiState {
                is_booking: false,
                last_booked: Some(listing),
                ..state.clone()
            },
            Effect::None,
        ),
    }
}
