/// Flood risk scoring.
///
/// Maps a `PredictionInput` to a `RiskScore` in [0, 1] with a fixed-weight
/// linear model blended with a bounded random draw:
///
/// ```text
/// normalize  → rainfall/200, duration/72 (capped at 1), soil/100, river/100
/// base       → 0.4·rain + 0.2·duration + 0.2·soil + 0.2·river
/// blend      → historical:   base·0.9 + U·0.1
///              unanchored:   base·0.7 + U·0.3
/// clamp      → [0, 1]
/// ```
///
/// The random draw comes from an injected `JitterSource`, so two calls with
/// the same input only agree when the source is fixed or identically seeded.
/// Use `score_with_draw` when the draw is already known.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::{
    DURATION_MAX_HOURS, PERCENT_MAX, PredictionInput, RAINFALL_MAX_MM, RiskScore,
};

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

pub const RAINFALL_WEIGHT: f64 = 0.4;
pub const DURATION_WEIGHT: f64 = 0.2;
pub const SOIL_WEIGHT: f64 = 0.2;
pub const RIVER_WEIGHT: f64 = 0.2;

/// How much of the result is the deterministic base vs. the random draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JitterRegime {
    /// Historical records available: jitter contributes at most 10%.
    Historical,
    /// No historical context: jitter contributes up to 30%.
    Unanchored,
}

impl JitterRegime {
    pub fn for_input(input: &PredictionInput) -> Self {
        if input.use_historical {
            JitterRegime::Historical
        } else {
            JitterRegime::Unanchored
        }
    }

    pub fn base_weight(self) -> f64 {
        match self {
            JitterRegime::Historical => 0.9,
            JitterRegime::Unanchored => 0.7,
        }
    }

    pub fn jitter_weight(self) -> f64 {
        match self {
            JitterRegime::Historical => 0.1,
            JitterRegime::Unanchored => 0.3,
        }
    }
}

// ---------------------------------------------------------------------------
// Jitter sources
// ---------------------------------------------------------------------------

/// Supplies the uniform draw U blended into each score.
pub trait JitterSource {
    /// Next draw, expected in [0, 1).
    fn draw(&mut self) -> f64;
}

impl<R: RngCore> JitterSource for R {
    fn draw(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }
}

/// Jitter source that always returns the same draw. Used to pin scores in
/// tests and in the deterministic sweep tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(f64);

impl FixedJitter {
    /// Draws outside [0, 1] are clamped to the nearest end.
    pub fn new(draw: f64) -> Self {
        Self(clamp_unit(draw))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl JitterSource for FixedJitter {
    fn draw(&mut self) -> f64 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Inputs scaled against their domain maxima.
///
/// Rainfall and duration are capped at 1 but not floored. Soil saturation and
/// river level are scaled only, so negative or >100% readings pass through
/// and can pull `base` outside [0, 1]; the final clamp in `score_with_draw`
/// absorbs that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedInput {
    pub rainfall: f64,
    pub duration: f64,
    pub soil_saturation: f64,
    pub river_level: f64,
}

impl NormalizedInput {
    /// Fixed-weight linear combination of the normalized terms.
    pub fn weighted_sum(&self) -> f64 {
        RAINFALL_WEIGHT * self.rainfall
            + DURATION_WEIGHT * self.duration
            + SOIL_WEIGHT * self.soil_saturation
            + RIVER_WEIGHT * self.river_level
    }
}

pub fn normalize(input: &PredictionInput) -> NormalizedInput {
    NormalizedInput {
        rainfall: (input.rainfall / RAINFALL_MAX_MM).min(1.0),
        duration: (input.duration / DURATION_MAX_HOURS).min(1.0),
        soil_saturation: input.soil_saturation / PERCENT_MAX,
        river_level: input.river_level / PERCENT_MAX,
    }
}

/// Deterministic part of the score, before the jitter blend.
pub fn base_score(input: &PredictionInput) -> f64 {
    normalize(input).weighted_sum()
}

/// Scores `input` with a known draw `u`. Pure.
pub fn score_with_draw(input: &PredictionInput, u: f64) -> RiskScore {
    let base = base_score(input);
    let regime = JitterRegime::for_input(input);
    let risk = base * regime.base_weight() + u * regime.jitter_weight();

    tracing::trace!(base, u, risk, ?regime, "scored prediction");

    clamp_unit(risk)
}

/// Scores `input`, taking one draw from `jitter`.
pub fn score<J: JitterSource>(input: &PredictionInput, jitter: &mut J) -> RiskScore {
    let u = jitter.draw();
    score_with_draw(input, u)
}

/// `max`/`min` rather than `f64::clamp` so a NaN lands on 0.0.
fn clamp_unit(value: f64) -> f64 {
    value.max(0.0).min(1.0)
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// A scorer bound to its own jitter source.
///
/// Holds no state besides the source, so independent callers each build
/// their own rather than sharing one behind a lock.
#[derive(Debug, Clone)]
pub struct RiskScorer<J = ChaCha8Rng> {
    jitter: J,
}

impl<J: JitterSource> RiskScorer<J> {
    pub fn new(jitter: J) -> Self {
        Self { jitter }
    }

    pub fn score(&mut self, input: &PredictionInput) -> RiskScore {
        score(input, &mut self.jitter)
    }
}

impl RiskScorer<ChaCha8Rng> {
    /// Reproducible scorer: the same seed yields the same score sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl RiskScorer<FixedJitter> {
    pub fn fixed(draw: f64) -> Self {
        Self::new(FixedJitter::new(draw))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
