//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.staymap/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::LocationMode;
use crate::listings::fake::{DEFAULT_BOOKING_DELAY, DEFAULT_FETCH_DELAY};
use crate::location::Coordinate;
use crate::location::sources::simulated::DEFAULT_FIX_LATENCY;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StaymapConfig {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub listings: ListingsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocationConfig {
    pub mode: Option<LocationMode>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub fix_latency_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListingsConfig {
    pub fetch_delay_ms: Option<u64>,
    pub booking_delay_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

/// Seoul City Hall.
pub const DEFAULT_COORDINATE: Coordinate = Coordinate {
    latitude: 37.5665,
    longitude: 126.9780,
};

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub location_mode: LocationMode,
    pub coordinate: Coordinate,
    pub fix_latency: Duration,
    pub fetch_delay: Duration,
    pub booking_delay: Duration,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub location_mode: Option<LocationMode>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// A coordinate part outside its valid range.
    OutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::OutOfRange { field, value } => {
                write!(f, "config error: location.{field} = {value} is out of range")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.staymap/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".staymap").join("config.toml"))
}

/// Load config from `~/.staymap/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `StaymapConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse` or `ConfigError::OutOfRange`.
pub fn load_config() -> Result<StaymapConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(StaymapConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(StaymapConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Parses config TOML and checks that the fix coordinate is on the globe.
pub fn parse_config(contents: &str) -> Result<StaymapConfig, ConfigError> {
    let config: StaymapConfig = toml::from_str(contents).map_err(ConfigError::Parse)?;
    check_range("latitude", config.location.latitude, 90.0)?;
    check_range("longitude", config.location.longitude, 180.0)?;
    Ok(config)
}

fn check_range(field: &'static str, value: Option<f64>, limit: f64) -> Result<(), ConfigError> {
    match value {
        Some(value) if !(-limit..=limit).contains(&value) => {
            Err(ConfigError::OutOfRange { field, value })
        }
        _ => Ok(()),
    }
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# staymap configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults -> this file -> env vars -> CLI flags.

# [location]
# mode = "granted"          # "granted", "denied", "no-fix", "failing"
# latitude = 37.5665        # Or set STAYMAP_LATITUDE
# longitude = 126.9780      # Or set STAYMAP_LONGITUDE
# fix_latency_ms = 150

# [listings]
# fetch_delay_ms = 500
# booking_delay_ms = 300
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &StaymapConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Location mode: CLI → env → config → default
    let location_mode = cli
        .location_mode
        .or_else(|| env_location_mode("STAYMAP_LOCATION"))
        .or(config.location.mode)
        .unwrap_or_default();

    // Coordinate parts resolve independently: CLI → env → config → default
    let latitude = cli
        .latitude
        .or_else(|| env_f64("STAYMAP_LATITUDE"))
        .or(config.location.latitude)
        .unwrap_or(DEFAULT_COORDINATE.latitude);
    let longitude = cli
        .longitude
        .or_else(|| env_f64("STAYMAP_LONGITUDE"))
        .or(config.location.longitude)
        .unwrap_or(DEFAULT_COORDINATE.longitude);

    ResolvedConfig {
        location_mode,
        coordinate: Coordinate::new(latitude, longitude),
        fix_latency: config
            .location
            .fix_latency_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_FIX_LATENCY),
        fetch_delay: config
            .listings
            .fetch_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_FETCH_DELAY),
        booking_delay: config
            .listings
            .booking_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_BOOKING_DELAY),
    }
}

fn env_f64(key: &str) -> Option<f64> {
    let value = std::env::var(key).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, value, e);
            None
        }
    }
}

fn env_location_mode(key: &str) -> Option<LocationMode> {
    let value = std::env::var(key).ok()?;
    match LocationMode::from_str(value.trim(), true) {
        Ok(mode) => Some(mode),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, value, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = StaymapConfig::default();
        assert!(config.location.mode.is_none());
        assert!(config.listings.fetch_delay_ms.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = StaymapConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.location_mode, LocationMode::Granted);
        assert_eq!(resolved.coordinate, DEFAULT_COORDINATE);
        assert_eq!(resolved.fix_latency, DEFAULT_FIX_LATENCY);
        assert_eq!(resolved.fetch_delay, Duration::from_millis(500));
        assert_eq!(resolved.booking_delay, Duration::from_millis(300));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = StaymapConfig {
            location: LocationConfig {
                mode: Some(LocationMode::NoFix),
                latitude: Some(35.1587),
                longitude: Some(129.1604),
                fix_latency_ms: Some(20),
            },
            listings: ListingsConfig {
                fetch_delay_ms: Some(50),
                booking_delay_ms: Some(10),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.location_mode, LocationMode::NoFix);
        assert_eq!(resolved.coordinate, Coordinate::new(35.1587, 129.1604));
        assert_eq!(resolved.fix_latency, Duration::from_millis(20));
        assert_eq!(resolved.fetch_delay, Duration::from_millis(50));
        assert_eq!(resolved.booking_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = StaymapConfig {
            location: LocationConfig {
                mode: Some(LocationMode::Denied),
                latitude: Some(35.0),
                longitude: Some(129.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            location_mode: Some(LocationMode::Granted),
            latitude: Some(33.4996),
            longitude: None,
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.location_mode, LocationMode::Granted);
        assert_eq!(resolved.coordinate, Coordinate::new(33.4996, 129.0));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[location]
mode = "failing"
latitude = 37.5
longitude = 127.0
fix_latency_ms = 0

[listings]
fetch_delay_ms = 1000
booking_delay_ms = 600
"#;
        let config: StaymapConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.location.mode, Some(LocationMode::Failing));
        assert_eq!(config.location.latitude, Some(37.5));
        assert_eq!(config.location.fix_latency_ms, Some(0));
        assert_eq!(config.listings.fetch_delay_ms, Some(1000));
        assert_eq!(config.listings.booking_delay_ms, Some(600));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[location]
mode = "no-fix"
"#;
        let config: StaymapConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.location.mode, Some(LocationMode::NoFix));
        assert!(config.location.latitude.is_none());
        assert!(config.listings.booking_delay_ms.is_none());
    }

    #[test]
    fn test_out_of_range_latitude_rejected() {
        let result = parse_config("[location]\nlatitude = 91.5\nlongitude = 127.0\n");
        assert!(matches!(
            result,
            Err(ConfigError::OutOfRange {
                field: "latitude",
                value
            }) if value == 91.5
        ));
    }

    #[test]
    fn test_out_of_range_longitude_rejected() {
        let err = parse_config("[location]\nlongitude = -180.5\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "config error: location.longitude = -180.5 is out of range"
        );
    }

    #[test]
    fn test_boundary_coordinates_accepted() {
        let config = parse_config("[location]\nlatitude = -90.0\nlongitude = 180.0\n").unwrap();
        assert_eq!(config.location.latitude, Some(-90.0));
        assert_eq!(config.location.longitude, Some(180.0));
    }

    #[test]
    fn test_unknown_mode_is_parse_error() {
        let result: Result<StaymapConfig, _> = toml::from_str("[location]\nmode = \"teleport\"\n");
        assert!(result.is_err());
    }
}
