use async_trait::async_trait;

use super::types::LocationOutcome;

/// Produces the user's position, one query at a time.
///
/// Each call to `observe` is a fresh, lazy, single-shot query: nothing touches
/// the platform until the returned future is polled, and it resolves to exactly
/// one outcome. Dropping the future early must release anything the query
/// registered with the platform.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Returns the name of the source, for logging.
    fn name(&self) -> &str;

    /// Queries the last known location.
    async fn observe(&self) -> LocationOutcome;
}
