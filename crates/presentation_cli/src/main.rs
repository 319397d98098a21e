//! Hospital geocoding CLI
//!
//! Command-line interface for manual address lookups and configuration checks.

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use application::services::{PatientLocation, PatientLocationService};
use clap::{Parser, Subcommand};
use serde::Serialize;
use infrastructure::{AppConfig, LocationIqGeocodingAdapter, init_logging};
use integration_locationiq::{CancellationToken, GeocodingClient, LocationIqClient, LookupResult};
use tracing::warn;

/// Hospital geocoding CLI
#[derive(Parser)]
#[command(name = "hospital-geocode")]
#[command(author, version, about = "Address geocoding for hospital records", long_about = None)]
struct Cli {
    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file, extension optional
    #[arg(short, long, env = "HOSPITAL_CONFIG", default_value = "config")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up an address and print every match
    ///
    /// Example: hospital-geocode lookup "221B Baker Street"
    Lookup {
        /// Free-text address
        text: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a patient address, falling back to the default location
    Resolve {
        /// Patient address as entered
        address: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the loaded configuration
    CheckConfig,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Cancel `token` on Ctrl+C
fn cancel_on_ctrl_c(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling lookup");
            token.cancel();
        }
    })
}

/// JSON shape printed by `lookup --json`
#[derive(Debug, Serialize)]
struct LookupOutcome<'a> {
    cancelled: bool,
    #[serde(flatten)]
    result: &'a LookupResult,
}

impl<'a> LookupOutcome<'a> {
    const fn from_lookup(result: &'a LookupResult, cancelled: bool) -> Self {
        Self { cancelled, result }
    }
}

fn print_matches(result: &LookupResult) {
    if result.is_empty() {
        println!("No matches");
        return;
    }

    for (i, m) in result.iter().enumerate() {
        println!("{}. {}", i + 1, m.display_name);
        println!("   {:.6}, {:.6}", m.latitude, m.longitude);
        if let Some(place_type) = &m.place_type {
            println!("   type: {place_type}");
        }
    }
}

fn print_patient_location(resolved: &PatientLocation) {
    match (&resolved.location, &resolved.label) {
        (Some(location), Some(label)) => println!("{label}\n   {location}"),
        (Some(location), None) => println!("{location} (default location)"),
        _ => println!("No location for '{}'", resolved.address),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config)?;

    let logging = match log_filter_from_verbosity(cli.verbose) {
        Some(filter) => config.logging.clone().with_filter(filter),
        None => config.logging.clone(),
    };
    init_logging(&logging)?;

    match cli.command {
        Commands::Lookup { text, json } => {
            let client = LocationIqClient::new(&config.locationiq)?;
            let token = CancellationToken::new();
            let signal = cancel_on_ctrl_c(token.clone());

            let result = client.lookup_with_cancellation(&text, &token).await;
            signal.abort();

            let outcome = LookupOutcome::from_lookup(&result, token.is_cancelled());
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else if outcome.cancelled {
                println!("Lookup cancelled");
            } else {
                print_matches(&result);
            }
        },

        Commands::Resolve { address, json } => {
            let adapter = LocationIqGeocodingAdapter::new(&config.locationiq)?;
            let mut service = PatientLocationService::new(Arc::new(adapter));
            if let Some(default) = config.patient_location.default_location {
                service = service.with_default_location(default);
            }

            let resolved = service.resolve(&address).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            } else {
                print_patient_location(&resolved);
            }
        },

        Commands::CheckConfig => {
            config.validate()?;

            println!("Configuration OK");
            println!("   endpoint: {}", config.locationiq.base_url);
            println!("   format: {}", config.locationiq.format);
            println!("   min interval: {}ms", config.locationiq.min_interval_ms);
            println!("   timeout: {}s", config.locationiq.timeout_secs);
            if config.locationiq.caching_enabled() {
                println!("   cache: {} minutes", config.locationiq.cache_ttl_minutes);
            } else {
                println!("   cache: disabled");
            }
            match config.patient_location.default_location {
                Some(location) => println!("   default location: {location}"),
                None => println!("   default location: none"),
            }
        },
    }

    Ok(())
}
