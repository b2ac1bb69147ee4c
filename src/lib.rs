//! staymap library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod listings;
pub mod location;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// How the simulated platform answers location queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationMode {
    /// Permission granted, configured fix available.
    #[default]
    Granted,
    /// Permission denied by the host.
    Denied,
    /// Permission granted but no fix available.
    NoFix,
    /// The location provider reports an error.
    Failing,
}
