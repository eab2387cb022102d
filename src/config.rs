/// Service configuration loader - parses flood_risk.toml
///
/// Keeps the endpoint's bind address, worker count, jitter seed and the
/// default prediction inputs out of the code. Every field has a default, so
/// a missing file (or a file with only some sections) is fine; a file that
/// exists but does not parse is an error.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::PredictionInput;

/// Config path used when `FLOOD_RISK_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "flood_risk.toml";

/// Environment variable that overrides the config path.
pub const CONFIG_PATH_ENV: &str = "FLOOD_RISK_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Configuration structures
// ---------------------------------------------------------------------------

/// Root of flood_risk.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub scoring: ScoringConfig,
    pub defaults: DefaultInputs,
}

/// HTTP endpoint settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,

    /// Threads serving prediction requests
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            workers: 4,
        }
    }
}

/// Jitter and latency settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Seed for reproducible jitter. Unset means OS entropy per request.
    pub seed: Option<u64>,

    /// Artificial delay before answering /predict (0 = none).
    pub simulated_latency_ms: u64,
}

/// Inputs used for any field a /predict request leaves out.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct DefaultInputs {
    pub rainfall: f64,
    pub duration: f64,
    pub soil_saturation: f64,
    pub river_level: f64,
    pub use_historical: bool,
}

impl Default for DefaultInputs {
    fn default() -> Self {
        PredictionInput::default().into()
    }
}

impl From<PredictionInput> for DefaultInputs {
    fn from(input: PredictionInput) -> Self {
        Self {
            rainfall: input.rainfall,
            duration: input.duration,
            soil_saturation: input.soil_saturation,
            river_level: input.river_level,
            use_historical: input.use_historical,
        }
    }
}

impl From<DefaultInputs> for PredictionInput {
    fn from(defaults: DefaultInputs) -> Self {
        PredictionInput::new(
            defaults.rainfall,
            defaults.duration,
            defaults.soil_saturation,
            defaults.river_level,
            defaults.use_historical,
        )
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.server.workers == 0 {
            return Err(ConfigError::Invalid("server.workers must be at least 1".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parses and validates configuration text.
pub fn parse_config(contents: &str, path: &Path) -> Result<ServiceConfig, ConfigError> {
    let config: ServiceConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from `path`. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<ServiceConfig, ConfigError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        return Ok(ServiceConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&contents, path)?;
    tracing::info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Resolves the config path from `.env` / the environment and loads it.
pub fn load_config() -> Result<ServiceConfig, ConfigError> {
    dotenv::dotenv().ok();
    load_config_from(&config_path())
}

pub fn config_path() -> PathBuf {
    resolve_config_path(env::var(CONFIG_PATH_ENV).ok())
}

/// `FLOOD_RISK_CONFIG` wins over the default path when set.
fn resolve_config_path(env_value: Option<String>) -> PathBuf {
    env_value
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
