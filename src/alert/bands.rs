/// Severity banding for risk scores.
///
/// Each band covers a half-open range `[lower, upper)` except Severe, which
/// also includes 1.0. Scores below 0 (and NaN) fall to Minimal, scores above
/// 1 stay Severe, so `band` is total over every `f64`.

use serde::Serialize;
use std::fmt;

use crate::model::RiskScore;

/// Discrete severity category derived from a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskBand {
    Minimal,
    Low,
    Moderate,
    High,
    Severe,
}

impl RiskBand {
    /// All bands, most severe first.
    pub const ALL: [RiskBand; 5] = [
        RiskBand::Severe,
        RiskBand::High,
        RiskBand::Moderate,
        RiskBand::Low,
        RiskBand::Minimal,
    ];

    /// Inclusive lower edge of the band.
    pub fn lower_bound(self) -> f64 {
        match self {
            RiskBand::Severe => 0.8,
            RiskBand::High => 0.6,
            RiskBand::Moderate => 0.4,
            RiskBand::Low => 0.2,
            RiskBand::Minimal => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskBand::Severe => "Severe",
            RiskBand::High => "High",
            RiskBand::Moderate => "Moderate",
            RiskBand::Low => "Low",
            RiskBand::Minimal => "Minimal",
        }
    }

    /// Badge style used when the band is shown next to a prediction.
    pub fn badge_variant(self) -> &'static str {
        match self {
            RiskBand::Severe | RiskBand::High => "destructive",
            RiskBand::Moderate => "warning",
            RiskBand::Low | RiskBand::Minimal => "secondary",
        }
    }

    /// Fill colour for risk zones on the map legend.
    pub fn map_color(self) -> &'static str {
        match self {
            RiskBand::Severe => "#ef4444",
            RiskBand::High => "#f97316",
            RiskBand::Moderate => "#eab308",
            RiskBand::Low => "#22c55e",
            RiskBand::Minimal => "#3b82f6",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a risk score to its severity band. Pure and deterministic.
pub fn band(score: RiskScore) -> RiskBand {
    RiskBand::ALL
        .into_iter()
        .find(|b| score >= b.lower_bound())
        .unwrap_or(RiskBand::Minimal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_lower_edges_are_inclusive() {
        assert_eq!(band(0.8), RiskBand::Severe);
        assert_eq!(band(0.6), RiskBand::High);
        assert_eq!(band(0.4), RiskBand::Moderate);
        assert_eq!(band(0.2), RiskBand::Low);
        assert_eq!(band(0.0), RiskBand::Minimal);
    }

    #[test]
    fn test_band_upper_edges_are_exclusive() {
        assert_eq!(band(0.7999), RiskBand::High);
        assert_eq!(band(0.5999), RiskBand::Moderate);
        assert_eq!(band(0.3999), RiskBand::Low);
        assert_eq!(band(0.1999), RiskBand::Minimal);
    }

    #[test]
    fn test_top_band_includes_one() {
        assert_eq!(band(1.0), RiskBand::Severe);
    }

    #[test]
    fn test_out_of_range_scores() {
        assert_eq!(band(-0.5), RiskBand::Minimal);
        assert_eq!(band(f64::NAN), RiskBand::Minimal);
        assert_eq!(band(3.0), RiskBand::Severe);
    }

    #[test]
    fn test_band_is_idempotent() {
        for i in 0..=100 {
            let score = i as f64 / 100.0;
            assert_eq!(band(score), band(score));
        }
    }

    #[test]
    fn test_bands_ordered_by_severity() {
        assert!(RiskBand::Minimal < RiskBand::Low);
        assert!(RiskBand::High < RiskBand::Severe);

        let mut previous = band(0.0);
        for i in 0..=100 {
            let next = band(i as f64 / 100.0);
            assert!(next >= previous);
            previous = next;
        }
    }

    #[test]
    fn test_labels_and_badges() {
        assert_eq!(RiskBand::Severe.to_string(), "Severe");
        assert_eq!(RiskBand::Minimal.label(), "Minimal");
        assert_eq!(RiskBand::High.badge_variant(), "destructive");
        assert_eq!(RiskBand::Moderate.badge_variant(), "warning");
        assert_eq!(RiskBand::Low.badge_variant(), "secondary");
        assert_eq!(RiskBand::Severe.map_color(), "#ef4444");
    }
}
