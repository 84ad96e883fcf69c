//! Sensor reading input types and request validation.

use serde::Deserialize;

/// Raw analyze request body as sent by the web form. Every field is optional
/// at the wire level so validation can report the full set of missing fields
/// instead of failing on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub soil_moisture: Option<f64>,
    pub ph: Option<f64>,
    pub light_intensity: Option<f64>,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub plant_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A validated sensor reading. NPK levels stay optional: older sensor kits
/// report only the five base quantities, and the nutrient rules are skipped
/// for them rather than guessed.
#[derive(Debug, Clone)]
pub struct SensorReading {
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
    pub ph: f64,
    pub light_intensity: f64,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub plant_type: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl AnalyzeRequest {
    /// Validate the request into a reading plus optional coordinates.
    ///
    /// Returns the wire-format names of all missing required fields at once.
    /// Coordinates count only when both halves are present.
    pub fn validate(self) -> Result<(SensorReading, Option<Coordinates>), Vec<String>> {
        let mut missing = Vec::new();

        if self.temperature.is_none() {
            missing.push("temperature".to_string());
        }
        if self.humidity.is_none() {
            missing.push("humidity".to_string());
        }
        if self.soil_moisture.is_none() {
            missing.push("soilMoisture".to_string());
        }
        if self.ph.is_none() {
            missing.push("ph".to_string());
        }
        if self.light_intensity.is_none() {
            missing.push("lightIntensity".to_string());
        }

        // Any None here means `missing` is non-empty
        let (
            Some(temperature),
            Some(humidity),
            Some(soil_moisture),
            Some(ph),
            Some(light_intensity),
        ) = (
            self.temperature,
            self.humidity,
            self.soil_moisture,
            self.ph,
            self.light_intensity,
        )
        else {
            return Err(missing);
        };

        let reading = SensorReading {
            temperature,
            humidity,
            soil_moisture,
            ph,
            light_intensity,
            nitrogen: self.nitrogen,
            phosphorus: self.phosphorus,
            potassium: self.potassium,
            plant_type: self.plant_type,
        };

        let coordinates = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        };

        Ok((reading, coordinates))
    }
}
