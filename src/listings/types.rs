use serde::{Deserialize, Serialize};

/// A lodging entry near the user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: String,
    pub name: String,
    pub address: String,
    /// Straight-line distance from the queried coordinate.
    pub distance_meters: f64,
    /// Nightly rate in won.
    pub price_per_night: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}
