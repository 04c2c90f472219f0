use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete risk tier reported alongside a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "Low Risk")]
    Low,
}

impl RiskLabel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLabel::High => "High Risk",
            RiskLabel::Moderate => "Moderate Risk",
            RiskLabel::Low => "Low Risk",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Response body shared by both scoring endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResponse {
    pub risk_score: f64,
    pub label: RiskLabel,
}

impl RiskResponse {
    pub fn new(score: f64, label: RiskLabel) -> Self {
        Self {
            risk_score: round_score(score),
            label,
        }
    }
}

/// Rounds to two decimal places for presentation. Labels are decided before rounding.
///
/// Rounds the exact decimal value of `score`, sending exact ties to the even digit.
pub fn round_score(score: f64) -> f64 {
    format!("{score:.2}").parse().unwrap_or(score)
}
