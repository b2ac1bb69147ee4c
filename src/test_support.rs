//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::core::view_model::{Dependencies, ViewModel};
use crate::listings::{FakeListingSource, Listing, ListingSource};
use crate::location::{Coordinate, LocationOutcome, LocationSource};

/// Answers every query immediately with a settable outcome.
pub struct StubLocationSource {
    outcome: Mutex<LocationOutcome>,
    calls: AtomicUsize,
}

impl StubLocationSource {
    pub fn new(outcome: LocationOutcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_outcome(&self, outcome: LocationOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationSource for StubLocationSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn observe(&self) -> LocationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.outcome.lock().unwrap()
    }
}

/// Wraps the default `FakeListingSource` and records every call.
pub struct RecordingListingSource {
    inner: FakeListingSource,
    fetched: Mutex<Vec<Coordinate>>,
    booked: Mutex<Vec<Listing>>,
}

impl RecordingListingSource {
    pub fn new() -> Self {
        Self {
            inner: FakeListingSource::default(),
            fetched: Mutex::new(Vec::new()),
            booked: Mutex::new(Vec::new()),
        }
    }

    pub fn fetched(&self) -> Vec<Coordinate> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn booked(&self) -> Vec<Listing> {
        self.booked.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListingSource for RecordingListingSource {
    fn name(&self) -> &str {
        "recording"
    }

    fn fetch(&self, coordinate: Coordinate) -> BoxStream<'static, Vec<Listing>> {
        self.fetched.lock().unwrap().push(coordinate);
        self.inner.fetch(coordinate)
    }

    async fn book(&self, listing: &Listing) {
        self.booked.lock().unwrap().push(listing.clone());
        self.inner.book(listing).await;
    }
}

/// Creates a view model over test doubles. Needs a tokio runtime.
pub fn test_view_model(
    outcome: LocationOutcome,
) -> (ViewModel, Arc<StubLocationSource>, Arc<RecordingListingSource>) {
    let location = Arc::new(StubLocationSource::new(outcome));
    let listings = Arc::new(RecordingListingSource::new());
    let view_model = ViewModel::new(Dependencies {
        location: location.clone(),
        listings: listings.clone(),
    });
    (view_model, location, listings)
}
