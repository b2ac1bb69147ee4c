//! # View Model
//!
//! Owns the `UiState` snapshot and runs the work that changes it.
//!
//! ```text
//! refresh() / book()
//!        │
//!        ▼
//!   dispatch(action) ── update() ──► watch::Sender<UiState> ──► subscribers
//!        │
//!        └── Effect ──► tokio::spawn(pipeline / booking)
//!                              │
//!                              └── apply(action) ──► watch::Sender<UiState>
//! ```
//!
//! Every transition goes through `send_modify`, so subscribers only ever see
//! whole snapshots. Background tasks are tracked by abort handle and
//! cancelled when the view model is dropped.

use std::sync::{Arc, Mutex};

use log::{debug, info};
use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::pipeline::{PipelineEvent, RefreshPipeline};
use crate::core::state::UiState;
use crate::listings::{Listing, ListingSource};
use crate::location::LocationSource;

const PIPELINE_BUFFER: usize = 4;

/// Collaborators wired once at startup and shared for the app's lifetime.
#[derive(Clone)]
pub struct Dependencies {
    pub location: Arc<dyn LocationSource>,
    pub listings: Arc<dyn ListingSource>,
}

pub struct ViewModel {
    pipeline: Arc<RefreshPipeline>,
    listings: Arc<dyn ListingSource>,
    state: Arc<watch::Sender<UiState>>,
    tasks: Mutex<Vec<AbortHandle>>,
}

impl ViewModel {
    /// Creates the view model and starts the first refresh.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(deps: Dependencies) -> Self {
        info!(
            "View model using location={} listings={}",
            deps.location.name(),
            deps.listings.name()
        );
        let (state, _) = watch::channel(UiState::default());
        let view_model = Self {
            pipeline: Arc::new(RefreshPipeline::new(deps.location, deps.listings.clone())),
            listings: deps.listings,
            state: Arc::new(state),
            tasks: Mutex::new(Vec::new()),
        };
        view_model.refresh();
        view_model
    }

    /// Receiver that observes every snapshot swap.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Re-runs the location → listings pipeline. An in-flight refresh is not
    /// cancelled; both flows apply their results as they finish.
    pub fn refresh(&self) {
        self.dispatch(Action::Refresh);
    }

    pub fn book(&self, listing: Listing) {
        self.dispatch(Action::Book(listing));
    }

    fn dispatch(&self, action: Action) {
        match apply(&self.state, action) {
            Effect::None => {}
            Effect::SpawnRefresh => self.spawn_refresh(),
            Effect::SpawnBooking(listing) => self.spawn_booking(listing),
        }
    }

    fn spawn_refresh(&self) {
        info!("Spawning refresh");
        let pipeline = self.pipeline.clone();
        let state = self.state.clone();

        let handle = tokio::spawn(async move {
            let (tx, mut rx) = mpsc::channel::<PipelineEvent>(PIPELINE_BUFFER);
            let forward = async {
                while let Some(event) = rx.recv().await {
                    apply(&state, event.into());
                }
            };
            tokio::join!(pipeline.run(tx), forward);
            debug!("Refresh finished");
        });
        self.track(handle.abort_handle());
    }

    fn spawn_booking(&self, listing: Listing) {
        info!("Spawning booking for {}", listing.id);
        let listings = self.listings.clone();
        let state = self.state.clone();

        let handle = tokio::spawn(async move {
            listings.book(&listing).await;
            apply(&state, Action::BookingCompleted(listing));
        });
        self.track(handle.abort_handle());
    }

    fn track(&self, handle: AbortHandle) {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }
}

impl Drop for ViewModel {
    fn drop(&mut self) {
        let tasks = self.tasks.get_mut().unwrap_or_else(|e| e.into_inner());
        if !tasks.is_empty() {
            debug!("Aborting {} view model task(s)", tasks.len());
        }
        for task in tasks.drain(..) {
            task.abort();
        }
    }
}

/// Applies an action as a single snapshot swap and returns its effect.
fn apply(state: &watch::Sender<UiState>, action: Action) -> Effect {
    debug!("Applying action: {:?}", action);
    let mut effect = Effect::None;
    state.send_modify(|current| {
        let (next, next_effect) = update(current, action);
        *current = next;
        effect = next_effect;
    });
    effect
}
