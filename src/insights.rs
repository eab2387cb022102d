/// Display datasets for the dashboard's insight tabs and risk map.
///
/// These are fixed demonstration records. They are served as-is and never
/// feed the scorer; each tab gets its own record type instead of one loose
/// chart row shape.

use serde::Serialize;

use crate::alert::{RiskBand, band};

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// One month of the historical rainfall / flood event record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoricalMonth {
    pub month: &'static str,
    pub rainfall_mm: f64,
    pub flood_events: u32,
    pub risk: f64,
}

/// One day of the seven-day outlook.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastDay {
    pub day: &'static str,
    pub rainfall_mm: f64,
    pub risk: f64,
}

/// Observed vs. predicted risk for a past season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonYear {
    pub year: u16,
    pub actual: f64,
    pub predicted: f64,
}

/// Sample neighbourhood shown on the risk map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskRegion {
    pub id: u32,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub risk: f64,
}

impl RiskRegion {
    pub fn band(&self) -> RiskBand {
        band(self.risk)
    }

    /// Radius of the region's circle on the map, in meters.
    pub fn display_radius_m(&self) -> f64 {
        self.risk * 500.0 + 300.0
    }
}

// ---------------------------------------------------------------------------
// Fixture data
// ---------------------------------------------------------------------------

const fn month(month: &'static str, rainfall_mm: f64, flood_events: u32, risk: f64) -> HistoricalMonth {
    HistoricalMonth { month, rainfall_mm, flood_events, risk }
}

const fn day(day: &'static str, rainfall_mm: f64, risk: f64) -> ForecastDay {
    ForecastDay { day, rainfall_mm, risk }
}

const fn year(year: u16, actual: f64, predicted: f64) -> ComparisonYear {
    ComparisonYear { year, actual, predicted }
}

pub const HISTORICAL: [HistoricalMonth; 12] = [
    month("Jan", 45.0, 0, 0.2),
    month("Feb", 50.0, 0, 0.3),
    month("Mar", 65.0, 1, 0.4),
    month("Apr", 80.0, 2, 0.6),
    month("May", 120.0, 3, 0.8),
    month("Jun", 150.0, 4, 0.9),
    month("Jul", 130.0, 3, 0.7),
    month("Aug", 100.0, 2, 0.6),
    month("Sep", 85.0, 1, 0.5),
    month("Oct", 70.0, 1, 0.4),
    month("Nov", 55.0, 0, 0.3),
    month("Dec", 40.0, 0, 0.2),
];

pub const FORECAST: [ForecastDay; 7] = [
    day("Today", 20.0, 0.3),
    day("Tomorrow", 45.0, 0.5),
    day("Day 3", 80.0, 0.7),
    day("Day 4", 60.0, 0.6),
    day("Day 5", 30.0, 0.4),
    day("Day 6", 15.0, 0.2),
    day("Day 7", 10.0, 0.1),
];

pub const COMPARISON: [ComparisonYear; 6] = [
    year(2018, 0.4, 0.35),
    year(2019, 0.6, 0.55),
    year(2020, 0.8, 0.75),
    year(2021, 0.5, 0.6),
    year(2022, 0.7, 0.65),
    year(2023, 0.9, 0.85),
];

pub const REGIONS: [RiskRegion; 5] = [
    RiskRegion { id: 1, name: "Downtown", latitude: 30.7333, longitude: 76.7794, risk: 0.8 },
    RiskRegion { id: 2, name: "Riverside", latitude: 30.7433, longitude: 76.7894, risk: 0.9 },
    RiskRegion { id: 3, name: "Highland Park", latitude: 30.7233, longitude: 76.7694, risk: 0.3 },
    RiskRegion { id: 4, name: "Valley View", latitude: 30.7533, longitude: 76.7994, risk: 0.7 },
    RiskRegion { id: 5, name: "Meadowlands", latitude: 30.7133, longitude: 76.7594, risk: 0.5 },
];

// ---------------------------------------------------------------------------
// Dataset selection
// ---------------------------------------------------------------------------

/// The three insight tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Historical,
    Predictions,
    Comparison,
}

impl Dataset {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "historical" => Some(Dataset::Historical),
            "predictions" => Some(Dataset::Predictions),
            "comparison" => Some(Dataset::Comparison),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dataset::Historical => "historical",
            Dataset::Predictions => "predictions",
            Dataset::Comparison => "comparison",
        }
    }
}

/// Serializes the records behind a tab.
pub fn dataset_json(dataset: Dataset) -> Result<serde_json::Value, serde_json::Error> {
    match dataset {
        Dataset::Historical => serde_json::to_value(HISTORICAL),
        Dataset::Predictions => serde_json::to_value(FORECAST),
        Dataset::Comparison => serde_json::to_value(COMPARISON),
    }
}

/// Mean absolute difference between observed and predicted risk.
/// `None` for an empty slice.
pub fn mean_absolute_error(years: &[ComparisonYear]) -> Option<f64> {
    if years.is_empty() {
        return None;
    }
    let total: f64 = years.iter().map(|y| (y.actual - y.predicted).abs()).sum();
    Some(total / years.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_names_round_trip() {
        for dataset in [Dataset::Historical, Dataset::Predictions, Dataset::Comparison] {
            assert_eq!(Dataset::parse(dataset.name()), Some(dataset));
        }
        assert_eq!(Dataset::parse("forecast"), None);
    }

    #[test]
    fn test_fixture_risks_within_unit_interval() {
        assert!(HISTORICAL.iter().all(|m| (0.0..=1.0).contains(&m.risk)));
        assert!(FORECAST.iter().all(|d| (0.0..=1.0).contains(&d.risk)));
        assert!(REGIONS.iter().all(|r| (0.0..=1.0).contains(&r.risk)));
    }

    #[test]
    fn test_historical_peak_is_june() {
        let peak = HISTORICAL
            .iter()
            .max_by(|a, b| a.rainfall_mm.total_cmp(&b.rainfall_mm))
            .expect("twelve months");
        assert_eq!(peak.month, "Jun");
        assert_eq!(peak.flood_events, 4);
    }

    #[test]
    fn test_dataset_json_shapes() {
        let historical = dataset_json(Dataset::Historical).expect("serialize");
        let rows = historical.as_array().expect("array");
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0]["month"], "Jan");
        assert_eq!(rows[0]["flood_events"], 0);

        let comparison = dataset_json(Dataset::Comparison).expect("serialize");
        assert_eq!(comparison[5]["year"], 2023);
    }

    #[test]
    fn test_mean_absolute_error() {
        let mae = mean_absolute_error(&COMPARISON).expect("non-empty");
        // Every year is off by 0.05 except 2021 (0.1).
        assert!((mae - 0.35 / 6.0).abs() < 1e-9);
        assert_eq!(mean_absolute_error(&[]), None);
    }

    #[test]
    fn test_region_bands_and_radius() {
        let riverside = REGIONS.iter().find(|r| r.name == "Riverside").expect("present");
        assert_eq!(riverside.band(), RiskBand::Severe);
        assert!((riverside.display_radius_m() - 750.0).abs() < 1e-9);

        let highland = REGIONS.iter().find(|r| r.id == 3).expect("present");
        assert_eq!(highland.band(), RiskBand::Low);
    }
}
