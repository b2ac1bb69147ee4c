use async_trait::async_trait;
use futures::stream::BoxStream;

use super::types::Listing;
use crate::location::Coordinate;

#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Returns the name of the source, for logging.
    fn name(&self) -> &str;

    /// Lazily produces batches of listings near `coordinate`, each sorted by
    /// ascending distance. Nothing happens until the stream is polled.
    fn fetch(&self, coordinate: Coordinate) -> BoxStream<'static, Vec<Listing>>;

    /// Books a listing. Completes once the booking round-trip finishes.
    async fn book(&self, listing: &Listing);
}
