//! Bridge from a callback-style platform location API to [`LocationSource`].
//!
//! Platform location services usually answer "last known location" through a
//! listener that fires later, on some other thread. The pipeline wants a
//! future instead. [`CallbackLocationSource`] registers a one-shot callback
//! that completes a `tokio::sync::oneshot` channel and awaits the receiving
//! end:
//!
//! ```text
//! observe() ──► permission() ── Denied ──► PermissionDenied
//!                   │
//!                Granted
//!                   ▼
//!        request_last_location(cb) ──► Registration (held while awaiting)
//!                   │
//!        cb(Ok(Some(c))) ──► Success(c)
//!        cb(Ok(None))    ──► Unknown
//!        cb(Err(_))      ──► Unknown
//!        cb dropped      ──► Unknown
//! ```
//!
//! The [`Registration`] lives on the future's stack, so dropping the future
//! (caller cancelled, or the owning task was aborted) unregisters the callback.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::sync::oneshot;

use crate::location::{Coordinate, LocationOutcome, LocationSource};

/// Whether the host granted access to the location service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Failures reported by the platform through the fix callback.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// The platform revoked access while the request was pending.
    PermissionRevoked,
    /// The location provider itself failed (disabled, timed out, ...).
    Provider(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::PermissionRevoked => write!(f, "location permission revoked"),
            PlatformError::Provider(msg) => write!(f, "location provider error: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

/// Callback handed to the platform. Invoked at most once.
pub type FixCallback = Box<dyn FnOnce(Result<Option<Coordinate>, PlatformError>) + Send>;

/// Keeps a platform callback registered. Dropping it unregisters.
pub struct Registration {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Registration {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A registration with nothing to release (the platform answered inline).
    pub fn released() -> Self {
        Self { release: None }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Callback-based platform location API.
pub trait PlatformLocation: Send + Sync {
    fn name(&self) -> &str;

    fn permission(&self) -> Permission;

    /// Asks for the last known fix. The callback fires at most once; it may
    /// fire before this returns.
    fn request_last_location(&self, callback: FixCallback) -> Registration;
}

/// Single-shot [`LocationSource`] over a [`PlatformLocation`].
pub struct CallbackLocationSource<P> {
    platform: P,
}

impl<P: PlatformLocation> CallbackLocationSource<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }
}

#[async_trait]
impl<P: PlatformLocation> LocationSource for CallbackLocationSource<P> {
    fn name(&self) -> &str {
        self.platform.name()
    }

    async fn observe(&self) -> LocationOutcome {
        if self.platform.permission() == Permission::Denied {
            info!("Location permission denied by {}", self.platform.name());
            return LocationOutcome::PermissionDenied;
        }

        let (tx, rx) = oneshot::channel();
        let _registration = self.platform.request_last_location(Box::new(move |result| {
            // The receiver is gone if the caller stopped observing
            let _ = tx.send(result);
        }));
        debug!("Requested last known location from {}", self.platform.name());

        match rx.await {
            Ok(Ok(Some(coordinate))) => {
                debug!("Location fix: {}", coordinate);
                LocationOutcome::Success(coordinate)
            }
            Ok(Ok(None)) => {
                info!("No location fix available from {}", self.platform.name());
                LocationOutcome::Unknown
            }
            Ok(Err(e)) => {
                warn!("Location request failed: {}", e);
                LocationOutcome::Unknown
            }
            Err(_) => {
                warn!("{} dropped the location callback without answering", self.platform.name());
                LocationOutcome::Unknown
            }
        }
    }
}
