//! Rule-based fallback assessment.
//!
//! Substitutes for the generative AI path whenever that call fails. Readings
//! are checked against universal low/high cutoffs (not the per-plant display
//! ranges) in a fixed order; the headline reflects the last rule that fired.
//! Nutrient rules are skipped when the reading carries no NPK values.

use crate::domain::{Assessment, AssessmentSource, SensorReading};

use super::profiles;

/// Historical sentinel emitted as `problems[0]` by the fallback path. Legacy
/// clients key off this exact string; `Assessment::source` is the supported
/// discriminator.
pub const FALLBACK_PROBLEM: &str = "Unable to get AI analysis due to API issues";

const FAVORABLE: &str = "Conditions appear generally favorable";
const MONITOR: &str = "Conditions appear generally favorable. Monitor regularly.";

pub fn assess(reading: &SensorReading) -> Assessment {
    let profile = profiles::profile_for(reading.plant_type.as_deref());

    let mut assessment = FAVORABLE.to_string();
    let mut recommendations: Vec<String> = Vec::new();

    let mut fire = |headline: &str, recommendation: &str| {
        assessment = headline.to_string();
        recommendations.push(recommendation.to_string());
    };

    // Fixed rule order: pH, soil moisture, temperature, light, N, P, K.
    // The headline of the last firing rule wins.
    if reading.ph < 5.5 {
        fire(
            "Soil is too acidic for most plants",
            "Add agricultural lime to raise the soil pH",
        );
    } else if reading.ph > 7.5 {
        fire(
            "Soil is too alkaline for most plants",
            "Add elemental sulfur or organic matter to lower the soil pH",
        );
    }

    if reading.soil_moisture < 30.0 {
        fire(
            "Soil moisture is too low, plants may be dehydrated",
            "Increase watering frequency or check the irrigation system",
        );
    } else if reading.soil_moisture > 70.0 {
        fire(
            "Soil is waterlogged, roots may be starved of oxygen",
            "Reduce watering and improve soil drainage",
        );
    }

    if reading.temperature < 15.0 {
        fire(
            "Temperature is too low for optimal growth",
            "Protect plants from cold or move them somewhere warmer",
        );
    } else if reading.temperature > 30.0 {
        fire(
            "Temperature is too high for optimal growth",
            "Provide shade and improve ventilation during the hottest hours",
        );
    }

    if reading.light_intensity < 10000.0 {
        fire(
            "Light levels are insufficient for healthy growth",
            "Move plants to a brighter spot or add supplemental grow lights",
        );
    } else if reading.light_intensity > 30000.0 {
        fire(
            "Light intensity is excessive",
            "Provide partial shade during peak daylight hours",
        );
    }

    if let Some(nitrogen) = reading.nitrogen {
        if nitrogen < 80.0 {
            fire(
                "Nitrogen deficiency is limiting leaf growth",
                "Apply a nitrogen-rich fertilizer such as blood meal",
            );
        } else if nitrogen > 250.0 {
            fire(
                "Nitrogen levels are excessively high",
                "Hold off nitrogen fertilizer and flush the soil with water",
            );
        }
    }

    if let Some(phosphorus) = reading.phosphorus {
        if phosphorus < 40.0 {
            fire(
                "Phosphorus deficiency detected",
                "Apply bone meal or another phosphate fertilizer",
            );
        } else if phosphorus > 100.0 {
            fire(
                "Phosphorus levels are excessively high",
                "Avoid phosphate fertilizers until levels fall back",
            );
        }
    }

    if let Some(potassium) = reading.potassium {
        if potassium < 100.0 {
            fire(
                "Potassium deficiency detected",
                "Apply potash or another potassium-rich fertilizer",
            );
        } else if potassium > 250.0 {
            fire(
                "Potassium levels are excessively high",
                "Cut back potassium inputs and leach the soil",
            );
        }
    }

    if recommendations.is_empty() {
        recommendations.push(MONITOR.to_string());
    }

    Assessment {
        assessment,
        problems: vec![FALLBACK_PROBLEM.to_string()],
        recommendations,
        optimal_conditions: profile.clone(),
        preventative_care: None,
        source: AssessmentSource::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> SensorReading {
        SensorReading {
            temperature: 22.0,
            humidity: 65.0,
            soil_moisture: 55.0,
            ph: 6.5,
            light_intensity: 20000.0,
            nitrogen: Some(150.0),
            phosphorus: Some(60.0),
            potassium: Some(180.0),
            plant_type: None,
        }
    }

    #[test]
    fn favorable_conditions_yield_the_monitor_recommendation_only() {
        let result = assess(&reading());
        assert_eq!(result.assessment, FAVORABLE);
        assert_eq!(result.recommendations, vec![MONITOR.to_string()]);
        assert_eq!(result.source, AssessmentSource::Fallback);
    }

    #[test]
    fn fallback_always_carries_the_sentinel_problem() {
        let result = assess(&reading());
        assert_eq!(result.problems, vec![FALLBACK_PROBLEM.to_string()]);
    }

    #[test]
    fn acidic_soil_mentions_acidity_and_recommends_lime() {
        let result = assess(&SensorReading {
            ph: 4.8,
            ..reading()
        });
        assert!(result.assessment.contains("acidic"));
        assert!(result.recommendations.iter().any(|r| r.contains("lime")));
    }

    #[test]
    fn alkaline_soil_mentions_alkalinity() {
        let result = assess(&SensorReading {
            ph: 8.2,
            ..reading()
        });
        assert!(result.assessment.contains("alkaline"));
    }

    #[test]
    fn cutoffs_are_exclusive_at_the_boundary() {
        let result = assess(&SensorReading {
            ph: 5.5,
            soil_moisture: 30.0,
            temperature: 15.0,
            light_intensity: 10000.0,
            ..reading()
        });
        assert_eq!(result.assessment, FAVORABLE);
    }

    #[test]
    fn cold_tomato_scenario() {
        // 12°C is below the 15°C cutoff; everything else is in range
        let result = assess(&SensorReading {
            temperature: 12.0,
            humidity: 50.0,
            soil_moisture: 45.0,
            ph: 6.8,
            light_intensity: 18000.0,
            nitrogen: None,
            phosphorus: None,
            potassium: None,
            plant_type: Some("tomato".to_string()),
        });
        assert_eq!(result.assessment, "Temperature is too low for optimal growth");
        assert_eq!(
            result.optimal_conditions,
            crate::engine::profiles::profile_for(Some("tomato")).clone()
        );
    }

    #[test]
    fn later_rules_overwrite_the_headline_and_recommendations_accumulate() {
        let result = assess(&SensorReading {
            ph: 4.0,
            potassium: Some(50.0),
            ..reading()
        });
        assert_eq!(result.assessment, "Potassium deficiency detected");
        assert!(result.recommendations.iter().any(|r| r.contains("lime")));
        assert!(result.recommendations.iter().any(|r| r.contains("potash")));
        assert_eq!(result.recommendations.len(), 2);
    }

    #[test]
    fn nutrient_rules_are_skipped_when_npk_is_absent() {
        let result = assess(&SensorReading {
            nitrogen: None,
            phosphorus: None,
            potassium: None,
            ..reading()
        });
        assert_eq!(result.recommendations, vec![MONITOR.to_string()]);
    }

    #[test]
    fn humidity_is_not_checked_by_the_fallback_rules() {
        let result = assess(&SensorReading {
            humidity: 5.0,
            ..reading()
        });
        assert_eq!(result.assessment, FAVORABLE);
    }
}
