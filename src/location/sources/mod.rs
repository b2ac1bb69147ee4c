pub mod callback;
pub mod simulated;

pub use callback::{
    CallbackLocationSource, FixCallback, Permission, PlatformError, PlatformLocation,
    Registration,
};
pub use simulated::SimulatedPlatform;
