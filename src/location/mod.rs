pub mod source;
pub mod sources;
pub mod types;

pub use source::LocationSource;
pub use sources::{
    CallbackLocationSource, FixCallback, Permission, PlatformError, PlatformLocation,
    Registration, SimulatedPlatform,
};
pub use types::{Coordinate, LocationOutcome};
