/// Shared data types for the flood risk model.
///
/// `PredictionInput` is the value object a caller builds for every scoring
/// call. `RiskScore` is the scorer's output, always within [0, 1].

use serde::{Deserialize, Serialize};

/// Modeled flood likelihood/severity, always within `[0.0, 1.0]`.
pub type RiskScore = f64;

/// Upper end of the rainfall slider, in millimeters.
pub const RAINFALL_MAX_MM: f64 = 200.0;

/// Upper end of the storm duration slider, in hours.
pub const DURATION_MAX_HOURS: f64 = 72.0;

/// Soil saturation and river level are both expressed as percentages.
pub const PERCENT_MAX: f64 = 100.0;

/// Conditions fed to the scorer for a single prediction.
///
/// Nothing here is validated. Values outside the intended domains
/// (negative rainfall, a 500 mm storm, a river at 140%) are accepted and
/// normalized by the scorer instead of rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    /// Rainfall in millimeters, intended domain [0, 200].
    pub rainfall: f64,

    /// Storm duration in hours, intended domain [1, 72].
    pub duration: f64,

    /// Soil saturation in percent, intended domain [0, 100].
    pub soil_saturation: f64,

    /// River level in percent of bank-full, intended domain [0, 100].
    pub river_level: f64,

    /// Ground the prediction in historical records (damps the jitter).
    pub use_historical: bool,
}

impl PredictionInput {
    pub fn new(
        rainfall: f64,
        duration: f64,
        soil_saturation: f64,
        river_level: f64,
        use_historical: bool,
    ) -> Self {
        Self {
            rainfall,
            duration,
            soil_saturation,
            river_level,
            use_historical,
        }
    }
}

impl Default for PredictionInput {
    /// Initial slider positions of the prediction panel.
    fn default() -> Self {
        Self::new(50.0, 24.0, 30.0, 40.0, true)
    }
}
