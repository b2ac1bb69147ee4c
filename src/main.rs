use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use staymap::LocationMode;
use staymap::core::config::{self, CliOverrides};
use std::fs::File;

#[derive(Parser)]
#[command(name = "staymap", about = "Nearby lodging on a terminal map")]
struct Args {
    /// How the location service answers
    #[arg(short, long, value_enum)]
    location: Option<LocationMode>,

    /// Latitude of the simulated fix
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the simulated fix
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to staymap.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("staymap.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, falling back to defaults", e);
        config::StaymapConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            location_mode: args.location,
            latitude: args.lat,
            longitude: args.lon,
        },
    );

    log::info!(
        "staymap starting up: location={:?} at {}",
        resolved.location_mode,
        resolved.coordinate
    );

    staymap::tui::run(resolved)
}
