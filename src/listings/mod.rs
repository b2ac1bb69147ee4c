pub mod fake;
pub mod source;
pub mod types;

pub use fake::FakeListingSource;
pub use source::ListingSource;
pub use types::Listing;
