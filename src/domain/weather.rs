//! Weather snapshot and weather-impact types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current weather at the user's location, as returned by the weather
/// collaborator. Absent entirely when no coordinates were supplied or the
/// lookup failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    /// Human-readable conditions, e.g. "light rain".
    pub description: String,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Atmospheric pressure in hPa.
    pub pressure: f64,
    /// Visibility in km.
    pub visibility: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<f64>,
    /// Location name resolved by the weather service.
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

/// Ordered risk classification of current weather conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Raise the level to `to` if it is higher. Risk never downgrades within
    /// one evaluation.
    pub fn escalate(&mut self, to: RiskLevel) {
        if to > *self {
            *self = to;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherImpact {
    pub risk_level: RiskLevel,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    /// Stricter subset of issues meant for prominent display.
    pub alerts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn escalate_never_downgrades() {
        let mut risk = RiskLevel::High;
        risk.escalate(RiskLevel::Medium);
        assert_eq!(risk, RiskLevel::High);

        let mut risk = RiskLevel::Low;
        risk.escalate(RiskLevel::Medium);
        assert_eq!(risk, RiskLevel::Medium);
    }

    #[test]
    fn risk_level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
    }
}
