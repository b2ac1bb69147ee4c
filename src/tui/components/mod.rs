//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top status bar showing location and status
//! - `MapView`: Map canvas, or loading/error/empty placeholder
//! - `BookingOverlay`: Card shown while a booking is in flight
//! - `ToastLine`: Current notification
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `ListingSheet`: Bottom sheet with selectable listings
//!
//! Components receive external data as props, never by reaching into
//! `UiState` themselves:
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! MapView { location: snapshot.current_location, .. }.render(frame, area);
//!
//! // Bad: Hidden dependency on global state
//! map_view.render(frame, area); // reads from the view model
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs        (Top status bar)
//! ├── map_view.rs         (Map canvas and placeholders)
//! ├── listing_sheet.rs    (Bottom sheet list)
//! ├── booking_overlay.rs  (Booking progress card)
//! └── toast.rs            (Notifications)
//! ```

pub mod booking_overlay;
pub mod listing_sheet;
pub mod map_view;
mod title_bar;
pub mod toast;

pub use booking_overlay::BookingOverlay;
pub use listing_sheet::{ListingSheet, ListingSheetState, SheetEvent};
pub use map_view::MapView;
pub use title_bar::TitleBar;
pub use toast::{ToastKind, ToastLine, ToastQueue};
