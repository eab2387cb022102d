/// Recommended action for a risk score.
///
/// Coarser than the severity bands: High and Severe share one message, Low
/// and Minimal share another.

use serde::Serialize;

use crate::model::RiskScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Advisory {
    ImmediateAction,
    MonitorClosely,
    LowRisk,
}

impl Advisory {
    pub fn message(self) -> &'static str {
        match self {
            Advisory::ImmediateAction => "Immediate action recommended",
            Advisory::MonitorClosely => "Monitor situation closely",
            Advisory::LowRisk => "Low risk detected",
        }
    }
}

pub fn advisory(score: RiskScore) -> Advisory {
    if score >= 0.6 {
        Advisory::ImmediateAction
    } else if score >= 0.4 {
        Advisory::MonitorClosely
    } else {
        Advisory::LowRisk
    }
}
