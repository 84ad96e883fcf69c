//! Static per-plant-type optimal-range table.
//!
//! Profiles are display data: the fallback engine evaluates readings against
//! universal cutoffs, while these ranges are what the user sees as "optimal
//! conditions" for their crop. Initialized once, never mutated.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::domain::PlantProfile;

#[allow(clippy::too_many_arguments)]
fn profile(
    temperature: &str,
    humidity: &str,
    soil_moisture: &str,
    ph: &str,
    light_intensity: &str,
    nitrogen: &str,
    phosphorus: &str,
    potassium: &str,
) -> PlantProfile {
    PlantProfile {
        temperature: temperature.to_string(),
        humidity: humidity.to_string(),
        soil_moisture: soil_moisture.to_string(),
        ph: ph.to_string(),
        light_intensity: light_intensity.to_string(),
        nitrogen: nitrogen.to_string(),
        phosphorus: phosphorus.to_string(),
        potassium: potassium.to_string(),
    }
}

fn table() -> &'static HashMap<&'static str, PlantProfile> {
    static TABLE: OnceLock<HashMap<&'static str, PlantProfile>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut m = HashMap::new();
        m.insert(
            "default",
            // Generic profile for unrecognized crops
            profile(
                "18-28°C",
                "50-70%",
                "40-60%",
                "6.0-7.0",
                "15000-25000 lux",
                "100-200 ppm",
                "50-100 ppm",
                "150-250 ppm",
            ),
        );
        m.insert(
            "tomato",
            profile(
                "18-27°C",
                "60-80%",
                "60-80%",
                "6.0-6.8",
                "20000-30000 lux",
                "100-200 ppm",
                "50-80 ppm",
                "150-250 ppm",
            ),
        );
        m.insert(
            "lettuce",
            profile(
                "15-22°C",
                "50-70%",
                "60-80%",
                "6.0-7.0",
                "10000-20000 lux",
                "80-150 ppm",
                "40-60 ppm",
                "120-200 ppm",
            ),
        );
        m.insert(
            "pepper",
            profile(
                "21-29°C",
                "50-70%",
                "50-70%",
                "5.8-6.8",
                "20000-30000 lux",
                "100-180 ppm",
                "45-85 ppm",
                "150-250 ppm",
            ),
        );
        m.insert(
            "cucumber",
            profile(
                "22-28°C",
                "60-80%",
                "60-80%",
                "5.5-7.0",
                "18000-28000 lux",
                "120-200 ppm",
                "50-90 ppm",
                "160-240 ppm",
            ),
        );
        m.insert(
            "spinach",
            profile(
                "10-21°C",
                "45-65%",
                "55-75%",
                "6.5-7.5",
                "10000-18000 lux",
                "90-160 ppm",
                "40-70 ppm",
                "120-200 ppm",
            ),
        );
        m.insert(
            "strawberry",
            profile(
                "15-26°C",
                "60-75%",
                "55-75%",
                "5.5-6.5",
                "15000-25000 lux",
                "80-140 ppm",
                "40-70 ppm",
                "120-220 ppm",
            ),
        );
        m.insert(
            "wheat",
            profile(
                "12-25°C",
                "40-60%",
                "35-55%",
                "6.0-7.5",
                "20000-30000 lux",
                "100-180 ppm",
                "40-80 ppm",
                "100-180 ppm",
            ),
        );
        m.insert(
            "rice",
            profile(
                "20-30°C",
                "60-80%",
                "70-90%",
                "5.5-6.5",
                "18000-28000 lux",
                "100-200 ppm",
                "40-80 ppm",
                "100-200 ppm",
            ),
        );
        m
    })
}

/// Resolve the profile for a plant type. Matching is exact on the trimmed,
/// lower-cased identifier; anything unrecognized (or absent) resolves to the
/// `default` profile.
pub fn profile_for(plant_type: Option<&str>) -> &'static PlantProfile {
    let t = table();
    plant_type
        .map(|p| p.trim().to_lowercase())
        .and_then(|key| t.get(key.as_str()))
        .unwrap_or_else(|| &t["default"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::range::parse_range;

    #[test]
    fn lookup_is_case_insensitive() {
        let lower = profile_for(Some("tomato"));
        assert_eq!(profile_for(Some("TOMATO")), lower);
        assert_eq!(profile_for(Some("Tomato")), lower);
        assert_eq!(profile_for(Some("  tomato  ")), lower);
    }

    #[test]
    fn unrecognized_plant_resolves_to_default() {
        let default = profile_for(None);
        assert_eq!(profile_for(Some("kumquat")), default);
        assert_eq!(profile_for(Some("")), default);
    }

    #[test]
    fn no_partial_matching() {
        assert_eq!(profile_for(Some("tomatoes")), profile_for(None));
    }

    #[test]
    fn every_entry_parses_as_a_well_ordered_range() {
        for (name, profile) in table() {
            for (quantity, entry) in profile.entries() {
                let (min, max) = parse_range(entry)
                    .unwrap_or_else(|| panic!("{name}/{quantity}: unparseable range {entry:?}"));
                assert!(min <= max, "{name}/{quantity}: {entry:?} has min > max");
            }
        }
    }
}
