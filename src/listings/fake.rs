//! Synthetic listing source.
//!
//! Stands in for a lodging search backend. Listings are generated from a PRNG
//! seeded by the queried latitude, so the same neighbourhood always shows the
//! same ten places:
//!
//! ```text
//! seed = floor(latitude * 1000)
//! for index in 1..=10:
//!     distance  ← [100.0, 2500.0)
//!     name      ← "{city} 힐링 스테이 {index}호"
//!     address   ← "{city} {index * 3}길"
//!     price     ← [60000, 240000)
//! sort by distance
//! ```
//!
//! The draw order above is part of the determinism contract; changing it
//! changes every generated batch. The PRNG is ChaCha8 rather than `StdRng`,
//! whose algorithm may change between rand releases.

use std::ops::Range;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::source::ListingSource;
use super::types::Listing;
use crate::location::Coordinate;

pub const LISTINGS_PER_BATCH: usize = 10;
pub const DISTANCE_RANGE_METERS: Range<f64> = 100.0..2500.0;
pub const PRICE_RANGE: Range<u32> = 60_000..240_000;

pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_BOOKING_DELAY: Duration = Duration::from_millis(300);

const CITIES: [&str; 7] = ["강남", "홍대", "제주", "부산", "광안리", "여의도", "동대문"];

/// PRNG seed for a coordinate. Only the latitude, at 0.001° precision, matters.
pub fn seed_for(coordinate: Coordinate) -> i64 {
    (coordinate.latitude * 1000.0).floor() as i64
}

/// Generates the batch for `coordinate`, sorted by ascending distance.
pub fn generate(coordinate: Coordinate) -> Vec<Listing> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_for(coordinate) as u64);

    let mut listings: Vec<Listing> = (1..=LISTINGS_PER_BATCH)
        .map(|index| {
            let distance_meters = rng.random_range(DISTANCE_RANGE_METERS);
            let name = format!("{} 힐링 스테이 {}호", random_city(&mut rng), index);
            let address = format!("{} {}길", random_city(&mut rng), index * 3);
            Listing {
                id: format!("acc-{index}"),
                name,
                address,
                distance_meters,
                price_per_night: rng.random_range(PRICE_RANGE),
                thumbnail_url: None,
            }
        })
        .collect();

    listings.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    listings
}

fn random_city(rng: &mut ChaCha8Rng) -> &'static str {
    CITIES[rng.random_range(0..CITIES.len())]
}

/// [`ListingSource`] backed by [`generate`], with simulated network latency.
pub struct FakeListingSource {
    fetch_delay: Duration,
    booking_delay: Duration,
}

impl Default for FakeListingSource {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_DELAY, DEFAULT_BOOKING_DELAY)
    }
}

impl FakeListingSource {
    pub fn new(fetch_delay: Duration, booking_delay: Duration) -> Self {
        Self {
            fetch_delay,
            booking_delay,
        }
    }
}

#[async_trait]
impl ListingSource for FakeListingSource {
    fn name(&self) -> &str {
        "fake"
    }

    fn fetch(&self, coordinate: Coordinate) -> BoxStream<'static, Vec<Listing>> {
        let delay = self.fetch_delay;
        stream::once(async move {
            tokio::time::sleep(delay).await;
            let listings = generate(coordinate);
            debug!(
                "Generated {} listings for {} (seed={})",
                listings.len(),
                coordinate,
                seed_for(coordinate)
            );
            listings
        })
        .boxed()
    }

    async fn book(&self, listing: &Listing) {
        tokio::time::sleep(self.booking_delay).await;
        info!("Booked {} ({})", listing.id, listing.name);
    }
}
