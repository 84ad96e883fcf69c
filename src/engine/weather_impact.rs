//! Weather-impact risk classification.
//!
//! Evaluates the current weather snapshot together with the user's own
//! temperature/humidity readings. Risk starts at `low` and only escalates;
//! every rule runs, and all matching issues, alerts and recommendations
//! accumulate in rule order.

use crate::domain::{RiskLevel, WeatherImpact, WeatherSnapshot};

pub fn classify(snapshot: &WeatherSnapshot, temperature: f64, humidity: f64) -> WeatherImpact {
    let mut risk = RiskLevel::Low;
    let mut issues: Vec<String> = Vec::new();
    let mut recommendations: Vec<String> = Vec::new();
    let mut alerts: Vec<String> = Vec::new();

    // Temperature rules use the user's reading, not the station's
    if temperature < 5.0 {
        issues.push("Frost risk: temperatures this low can damage plant tissue".to_string());
        alerts.push("Frost warning: protect sensitive plants immediately".to_string());
        recommendations
            .push("Cover plants with frost cloth or move containers indoors".to_string());
        risk.escalate(RiskLevel::High);
    } else if temperature > 35.0 {
        issues.push("Heat stress: temperatures this high wilt and scorch plants".to_string());
        alerts.push("Heat warning: plants are at risk of heat stress".to_string());
        recommendations.push("Provide shade and water more frequently".to_string());
        risk.escalate(RiskLevel::High);
    } else if !(10.0..=30.0).contains(&temperature) {
        issues.push("Temperature is outside the optimal growing range".to_string());
        risk.escalate(RiskLevel::Medium);
    }

    if humidity > 90.0 {
        issues.push("Excessive humidity increases the risk of fungal disease".to_string());
        recommendations.push("Improve air circulation around plants".to_string());
        risk.escalate(RiskLevel::Medium);
    }
    if humidity < 30.0 {
        issues.push("Low humidity may dehydrate plants".to_string());
        recommendations.push("Mist plants or place water trays nearby".to_string());
        risk.escalate(RiskLevel::Medium);
    }

    if snapshot.wind_speed > 15.0 {
        issues.push("High winds may break stems and topple tall plants".to_string());
        alerts.push("Wind warning: secure tall and climbing plants".to_string());
        recommendations.push("Stake tall plants and reinforce supports".to_string());
        risk.escalate(RiskLevel::Medium);
    }

    if snapshot.pressure < 1000.0 {
        issues.push("Low pressure indicates possible storm conditions".to_string());
        alerts.push("Storm warning: unsettled weather approaching".to_string());
        recommendations.push("Secure loose items and check drainage before rain".to_string());
        risk.escalate(RiskLevel::High);
    }

    if let Some(uv_index) = snapshot.uv_index {
        if uv_index > 8.0 {
            issues.push("High UV levels can scorch leaves".to_string());
            recommendations.push("Shade sensitive plants during midday".to_string());
            risk.escalate(RiskLevel::Medium);
        }
    }

    if snapshot.visibility < 1.0 {
        issues.push("Dense fog is limiting available light".to_string());
        recommendations
            .push("Monitor light absorption; supplement lighting if fog persists".to_string());
        risk.escalate(RiskLevel::Medium);
    }

    WeatherImpact {
        risk_level: risk,
        issues,
        recommendations,
        alerts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: 20.0,
            humidity: 55.0,
            description: "clear sky".to_string(),
            wind_speed: 3.0,
            pressure: 1013.0,
            visibility: 10.0,
            uv_index: None,
            location: "Testville".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn calm_conditions_are_low_risk_with_no_findings() {
        let impact = classify(&snapshot(), 20.0, 50.0);
        assert_eq!(impact.risk_level, RiskLevel::Low);
        assert!(impact.issues.is_empty());
        assert!(impact.recommendations.is_empty());
        assert!(impact.alerts.is_empty());
    }

    #[test]
    fn frost_is_always_high_risk() {
        let impact = classify(&snapshot(), 2.0, 50.0);
        assert_eq!(impact.risk_level, RiskLevel::High);
        assert!(impact.issues.iter().any(|i| i.contains("Frost")));
        assert!(impact.alerts.iter().any(|a| a.contains("Frost")));
    }

    #[test]
    fn heat_stress_is_high_risk() {
        let impact = classify(&snapshot(), 38.0, 50.0);
        assert_eq!(impact.risk_level, RiskLevel::High);
        assert!(impact.issues.iter().any(|i| i.contains("Heat stress")));
    }

    #[test]
    fn mildly_cold_is_medium_without_an_alert() {
        let impact = classify(&snapshot(), 8.0, 50.0);
        assert_eq!(impact.risk_level, RiskLevel::Medium);
        assert!(impact.alerts.is_empty());
    }

    #[test]
    fn storm_pressure_scenario() {
        let weather = WeatherSnapshot {
            pressure: 995.0,
            wind_speed: 5.0,
            visibility: 10.0,
            uv_index: Some(3.0),
            ..snapshot()
        };
        let impact = classify(&weather, 20.0, 50.0);
        assert_eq!(impact.risk_level, RiskLevel::High);
        assert_eq!(impact.issues.len(), 1);
        assert!(impact.issues[0].contains("storm"));
        assert!(impact.alerts.iter().any(|a| a.contains("Storm")));
    }

    #[test]
    fn medium_rules_never_downgrade_high_risk() {
        let weather = WeatherSnapshot {
            wind_speed: 20.0,
            ..snapshot()
        };
        // Frost (high) fires first, wind (medium) after
        let impact = classify(&weather, 2.0, 50.0);
        assert_eq!(impact.risk_level, RiskLevel::High);
        assert_eq!(impact.alerts.len(), 2);
    }

    #[test]
    fn all_matching_rules_accumulate_in_order() {
        let weather = WeatherSnapshot {
            wind_speed: 18.0,
            pressure: 990.0,
            visibility: 0.5,
            uv_index: Some(9.0),
            ..snapshot()
        };
        let impact = classify(&weather, 8.0, 95.0);
        assert_eq!(impact.risk_level, RiskLevel::High);
        // temp range, humidity, wind, pressure, uv, fog
        assert_eq!(impact.issues.len(), 6);
        assert!(impact.issues[0].contains("optimal growing range"));
        assert!(impact.issues[5].contains("fog"));
    }

    #[test]
    fn uv_rule_is_skipped_when_absent() {
        let weather = WeatherSnapshot {
            uv_index: None,
            ..snapshot()
        };
        let impact = classify(&weather, 20.0, 50.0);
        assert!(impact.issues.is_empty());
    }
}
