//! Plant profile: the optimal-range table shown back to the user.

use serde::{Deserialize, Serialize};

/// Optimal growing ranges for one plant type. Each value is a human-readable
/// closed interval with a unit suffix, e.g. `"18-25°C"` or `"50-70%"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantProfile {
    pub temperature: String,
    pub humidity: String,
    pub soil_moisture: String,
    pub ph: String,
    pub light_intensity: String,
    pub nitrogen: String,
    pub phosphorus: String,
    pub potassium: String,
}

impl PlantProfile {
    /// Iterate over (quantity name, range string) pairs in display order.
    #[allow(dead_code)]
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("temperature", &self.temperature),
            ("humidity", &self.humidity),
            ("soilMoisture", &self.soil_moisture),
            ("ph", &self.ph),
            ("lightIntensity", &self.light_intensity),
            ("nitrogen", &self.nitrogen),
            ("phosphorus", &self.phosphorus),
            ("potassium", &self.potassium),
        ]
    }
}
