//! Simulated platform location service.
//!
//! A terminal has no GPS, so the host "platform" answers with a configured
//! fix after a short latency. It can also be told to deny permission, to have
//! no fix, or to fail, which covers every outcome the pipeline handles.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use log::debug;

use super::callback::{FixCallback, Permission, PlatformError, PlatformLocation, Registration};
use crate::location::Coordinate;

pub const DEFAULT_FIX_LATENCY: Duration = Duration::from_millis(150);

pub struct SimulatedPlatform {
    fix: Option<Coordinate>,
    permission: Permission,
    failure: Option<PlatformError>,
    latency: Duration,
    cancelled: Arc<AtomicUsize>,
}

impl SimulatedPlatform {
    pub fn new(fix: Option<Coordinate>) -> Self {
        Self {
            fix,
            permission: Permission::Granted,
            failure: None,
            latency: DEFAULT_FIX_LATENCY,
            cancelled: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permission = permission;
        self
    }

    pub fn with_failure(mut self, failure: PlatformError) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Handle to the number of requests released before they were answered.
    pub fn cancelled_requests(&self) -> Arc<AtomicUsize> {
        self.cancelled.clone()
    }
}

impl PlatformLocation for SimulatedPlatform {
    fn name(&self) -> &str {
        "simulated"
    }

    fn permission(&self) -> Permission {
        self.permission
    }

    /// Answers from a spawned task after the configured latency. Must be
    /// called from within a tokio runtime.
    fn request_last_location(&self, callback: FixCallback) -> Registration {
        let result = match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(self.fix),
        };
        let latency = self.latency;
        let answered = Arc::new(AtomicBool::new(false));

        let cancelled = self.cancelled.clone();
        let task_answered = answered.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            task_answered.store(true, Ordering::SeqCst);
            callback(result);
        });

        Registration::new(move || {
            if !answered.load(Ordering::SeqCst) {
                debug!("Cancelling pending simulated location request");
                cancelled.fetch_add(1, Ordering::SeqCst);
            }
            handle.abort();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{CallbackLocationSource, LocationOutcome, LocationSource};

    #[tokio::test(start_paused = true)]
    async fn test_configured_fix_is_reported() {
        let source = CallbackLocationSource::new(SimulatedPlatform::new(Some(Coordinate::new(
            35.1587, 129.1604,
        ))));
        assert_eq!(
            source.observe().await,
            LocationOutcome::Success(Coordinate::new(35.1587, 129.1604))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_fix_is_unknown() {
        let source = CallbackLocationSource::new(SimulatedPlatform::new(None));
        assert_eq!(source.observe().await, LocationOutcome::Unknown);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_unknown() {
        let platform = SimulatedPlatform::new(Some(Coordinate::new(37.5, 127.0)))
            .with_failure(PlatformError::Provider("gps off".to_string()));
        let source = CallbackLocationSource::new(platform);
        assert_eq!(source.observe().await, LocationOutcome::Unknown);
    }

    #[tokio::test(start_paused = true)]
    async fn test_denied_permission() {
        let platform = SimulatedPlatform::new(Some(Coordinate::new(37.5, 127.0)))
            .with_permission(Permission::Denied);
        let source = CallbackLocationSource::new(platform);
        assert_eq!(source.observe().await, LocationOutcome::PermissionDenied);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fix_arrives_after_latency() {
        let platform = SimulatedPlatform::new(Some(Coordinate::new(37.5, 127.0)))
            .with_latency(Duration::from_secs(2));
        let source = CallbackLocationSource::new(platform);

        let start = tokio::time::Instant::now();
        source.observe().await;
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_observe_aborts_request() {
        let platform = SimulatedPlatform::new(Some(Coordinate::new(37.5, 127.0)))
            .with_latency(Duration::from_secs(10));
        let source = CallbackLocationSource::new(platform);

        let result = tokio::time::timeout(Duration::from_secs(1), source.observe()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_answered_request_is_not_counted_as_cancelled() {
        let platform = SimulatedPlatform::new(Some(Coordinate::new(37.5, 127.0)));
        let cancelled = platform.cancelled_requests();
        let source = CallbackLocationSource::new(platform);

        source.observe().await;
        source.observe().await;
        assert_eq!(cancelled.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_request_is_counted_as_cancelled() {
        let platform = SimulatedPlatform::new(Some(Coordinate::new(37.5, 127.0)))
            .with_latency(Duration::from_secs(10));
        let cancelled = platform.cancelled_requests();
        let source = CallbackLocationSource::new(platform);

        let _ = tokio::time::timeout(Duration::from_secs(1), source.observe()).await;
        assert_eq!(cancelled.load(Ordering::SeqCst), 1);
    }
}
