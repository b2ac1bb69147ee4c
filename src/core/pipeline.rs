//! # Refresh Pipeline
//!
//! The location → listings use-case. Two sequential stages, no parallelism:
//!
//! ```text
//! LocationSource::observe()
//!     ├── Success(c)        → LocationResolved(c)
//!     │                       ListingSource::fetch(c) → ListingsLoaded(batch)…
//!     ├── PermissionDenied  → Failed(PermissionDenied)
//!     └── Unknown           → Failed(LocationUnavailable)
//! ```
//!
//! Events are pushed into an mpsc channel so the caller can apply them to
//! state as they arrive.

use std::fmt;
use std::sync::Arc;

use futures::StreamExt;
use log::{debug, info, warn};
use tokio::sync::mpsc::Sender;

use crate::listings::{Listing, ListingSource};
use crate::location::{Coordinate, LocationOutcome, LocationSource};

/// Why a refresh could not produce listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshError {
    PermissionDenied,
    LocationUnavailable,
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshError::PermissionDenied => write!(f, "permission required"),
            RefreshError::LocationUnavailable => write!(f, "location unavailable"),
        }
    }
}

impl std::error::Error for RefreshError {}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    LocationResolved(Coordinate),
    ListingsLoaded(Vec<Listing>),
    Failed(RefreshError),
}

pub struct RefreshPipeline {
    location: Arc<dyn LocationSource>,
    listings: Arc<dyn ListingSource>,
}

impl RefreshPipeline {
    pub fn new(location: Arc<dyn LocationSource>, listings: Arc<dyn ListingSource>) -> Self {
        Self { location, listings }
    }

    /// Runs one refresh, sending events until the pipeline finishes or the
    /// receiver is dropped.
    pub async fn run(&self, sender: Sender<PipelineEvent>) {
        let coordinate = match self.location.observe().await {
            LocationOutcome::Success(coordinate) => coordinate,
            LocationOutcome::PermissionDenied => {
                info!("Refresh stopped: {}", RefreshError::PermissionDenied);
                send(&sender, PipelineEvent::Failed(RefreshError::PermissionDenied)).await;
                return;
            }
            LocationOutcome::Unknown => {
                info!("Refresh stopped: {}", RefreshError::LocationUnavailable);
                send(&sender, PipelineEvent::Failed(RefreshError::LocationUnavailable)).await;
                return;
            }
        };

        if !send(&sender, PipelineEvent::LocationResolved(coordinate)).await {
            return;
        }

        debug!(
            "Fetching listings from {} near {}",
            self.listings.name(),
            coordinate
        );
        let mut batches = self.listings.fetch(coordinate);
        while let Some(batch) = batches.next().await {
            debug!("Forwarding batch of {} listings", batch.len());
            if !send(&sender, PipelineEvent::ListingsLoaded(batch)).await {
                return;
            }
        }
    }
}

/// Returns false once the receiver is gone.
async fn send(sender: &Sender<PipelineEvent>, event: PipelineEvent) -> bool {
    if sender.send(event).await.is_err() {
        warn!("Pipeline receiver dropped, stopping refresh");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::fake::generate;
    use crate::test_support::{RecordingListingSource, StubLocationSource};
    use tokio::sync::mpsc;

    async fn collect_events(pipeline: &RefreshPipeline) -> Vec<PipelineEvent> {
        let (tx, mut rx) = mpsc::channel(8);
        pipeline.run(tx).await;

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_resolves_then_loads() {
        let coordinate = Coordinate::new(37.5, 127.0);
        let listings = Arc::new(RecordingListingSource::new());
        let pipeline = RefreshPipeline::new(
            Arc::new(StubLocationSource::new(LocationOutcome::Success(coordinate))),
            listings.clone(),
        );

        let events = collect_events(&pipeline).await;

        assert_eq!(
            events,
            vec![
                PipelineEvent::LocationResolved(coordinate),
                PipelineEvent::ListingsLoaded(generate(coordinate)),
            ]
        );
        assert_eq!(listings.fetched(), vec![coordinate]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permission_denied_skips_fetch() {
        let listings = Arc::new(RecordingListingSource::new());
        let pipeline = RefreshPipeline::new(
            Arc::new(StubLocationSource::new(LocationOutcome::PermissionDenied)),
            listings.clone(),
        );

        let events = collect_events(&pipeline).await;

        assert_eq!(
            events,
            vec![PipelineEvent::Failed(RefreshError::PermissionDenied)]
        );
        assert!(listings.fetched().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_location_reports_unavailable() {
        let listings = Arc::new(RecordingListingSource::new());
        let pipeline = RefreshPipeline::new(
            Arc::new(StubLocationSource::new(LocationOutcome::Unknown)),
            listings.clone(),
        );

        let events = collect_events(&pipeline).await;

        assert_eq!(
            events,
            vec![PipelineEvent::Failed(RefreshError::LocationUnavailable)]
        );
        assert!(listings.fetched().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_receiver_stops_before_fetch() {
        let listings = Arc::new(RecordingListingSource::new());
        let pipeline = RefreshPipeline::new(
            Arc::new(StubLocationSource::new(LocationOutcome::Success(
                Coordinate::new(37.5, 127.0),
            ))),
            listings.clone(),
        );

        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        pipeline.run(tx).await;

        assert!(listings.fetched().is_empty());
    }

    #[test]
    fn test_refresh_error_messages() {
        assert_eq!(RefreshError::PermissionDenied.to_string(), "permission required");
        assert_eq!(
            RefreshError::LocationUnavailable.to_string(),
            "location unavailable"
        );
    }
}
