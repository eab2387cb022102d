/// flood_risk_service: flood risk prediction model and its HTTP endpoint.
///
/// # Module structure
///
/// ```text
/// flood_risk_service
/// ├── model       — shared data types (PredictionInput, RiskScore, domain maxima)
/// ├── scoring     — normalization, weighted base score, jitter blend, RiskScorer
/// ├── alert
/// │   ├── bands    — risk score → severity band (label, badge, map colour)
/// │   └── advisory — risk score → recommended action
/// ├── insights    — display datasets for the insight tabs and risk map
/// ├── config      — service configuration loader (flood_risk.toml)
/// └── endpoint    — JSON HTTP API over the scorer
/// ```

/// Public modules
pub mod alert;
pub mod config;
pub mod endpoint;
pub mod insights;
pub mod model;
pub mod scoring;

pub use alert::{RiskBand, band};
pub use model::{PredictionInput, RiskScore};
pub use scoring::{JitterSource, RiskScorer, score, score_with_draw};

/// Installs the `tracing` subscriber used by the binaries.
///
/// Filter comes from `FLOOD_RISK_LOG`, defaulting to this crate at info.
pub fn init_logging() {
    let filter = std::env::var("FLOOD_RISK_LOG")
        .unwrap_or_else(|_| "flood_risk_service=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}
