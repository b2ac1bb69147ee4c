//! # Core Application Logic
//!
//! This module contains staymap's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • UiState (snapshot)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • RefreshPipeline      │
//!                    │  • ViewModel            │
//!                    └───────────┬─────────────┘
//!                                │ watch::Receiver<UiState>
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   tests    │      │   other    │
//!     │  Adapter   │      │            │      │  adapters  │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `UiState` snapshot
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`pipeline`]: Location → listings use-case
//! - [`view_model`]: Owns the snapshot, runs effects
//! - [`config`]: Settings and their override hierarchy

pub mod action;
pub mod config;
pub mod pipeline;
pub mod state;
pub mod view_model;

pub use pipeline::{PipelineEvent, RefreshError, RefreshPipeline};
pub use state::UiState;
pub use view_model::{Dependencies, ViewModel};
