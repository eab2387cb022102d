//! Flood Risk Prediction Service
//!
//! Scores flood risk from rainfall, storm duration, soil saturation and
//! river level, either once from the command line or behind an HTTP
//! endpoint.
//!
//! Usage:
//!   cargo run --release -- serve                       # Endpoint on the configured port
//!   cargo run --release -- serve --port 9090           # Override the port
//!   cargo run --release -- predict --rainfall 120 --duration 36 --soil 70 --river 55
//!   cargo run --release -- predict ... --no-historical --seed 42
//!
//! Environment:
//!   FLOOD_RISK_CONFIG - path to flood_risk.toml (default: ./flood_risk.toml)
//!   FLOOD_RISK_LOG    - tracing filter (default: flood_risk_service=info)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use flood_risk_service::alert::{advisory, band};
use flood_risk_service::config::{self, ServiceConfig};
use flood_risk_service::endpoint;
use flood_risk_service::model::PredictionInput;
use flood_risk_service::scoring::{self, RiskScorer};

#[derive(Debug, Parser)]
#[command(name = "flood_risk_service", version, about = "Flood risk prediction service")]
struct Args {
    /// Config file (overrides FLOOD_RISK_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP prediction endpoint
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Score a single prediction and print the result
    Predict {
        /// Rainfall in millimeters
        #[arg(long, allow_negative_numbers = true)]
        rainfall: f64,
        /// Storm duration in hours
        #[arg(long, allow_negative_numbers = true)]
        duration: f64,
        /// Soil saturation in percent
        #[arg(long, allow_negative_numbers = true)]
        soil: f64,
        /// River level in percent
        #[arg(long, allow_negative_numbers = true)]
        river: f64,
        /// Score without historical grounding (wider jitter)
        #[arg(long, default_value_t = false)]
        no_historical: bool,
        /// Seed the jitter for a reproducible score
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    flood_risk_service::init_logging();
    let args = Args::parse();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "flood risk service starting");

    let mut service_config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };

    match args.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                service_config.server.port = port;
                service_config.validate()?;
            }
            serve(&service_config)
        }
        Command::Predict { rainfall, duration, soil, river, no_historical, seed } => {
            let input = PredictionInput::new(rainfall, duration, soil, river, !no_historical);
            predict(&input, seed.or(service_config.scoring.seed));
            Ok(())
        }
    }
}

fn serve(service_config: &ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("🌊 Flood Risk Prediction Service");
    println!("================================\n");
    endpoint::start_endpoint_server(service_config)?;
    Ok(())
}

fn predict(input: &PredictionInput, seed: Option<u64>) {
    let mut scorer = match seed {
        Some(seed) => RiskScorer::seeded(seed),
        None => RiskScorer::from_entropy(),
    };
    let risk = scorer.score(input);
    let severity = band(risk);

    println!("🌧️  Rainfall:        {:.1} mm", input.rainfall);
    println!("⏱️  Duration:        {:.1} hrs", input.duration);
    println!("🟫 Soil saturation: {:.0}%", input.soil_saturation);
    println!("🌊 River level:     {:.0}%", input.river_level);
    println!("📚 Historical data: {}", if input.use_historical { "included" } else { "excluded" });
    println!();
    println!("Base score: {:.3}", scoring::base_score(input));
    println!("Risk:       {:.3} ({:.0}%)", risk, risk * 100.0);
    println!("Band:       {}", severity);
    println!("⚠️  {}", advisory(risk).message());
}
