//! Client for the generative-language (Gemini) API.
//!
//! Builds a prompt embedding the sensor readings, requests a JSON reply,
//! and parses the model's free text into the unified assessment shape.
//! Every failure here is recoverable: the caller logs it and runs the
//! rule-based fallback engine instead.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt::Write as _;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::Settings;
use crate::domain::{Assessment, AssessmentSource, PlantProfile, SensorReading, WeatherSnapshot};
use crate::engine::profiles;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("no Gemini API key configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("malformed reply: {0}")]
    MalformedReply(String),

    #[error("assessment JSON did not parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the Gemini generateContent endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    model: String,
}

/// Assessment fields as requested from the model. Lists default to empty so
/// a sparse but valid reply still produces a usable assessment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AiPayload {
    assessment: String,
    #[serde(default)]
    problems: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    optimal_conditions: Option<PlantProfile>,
    #[serde(default)]
    preventative_care: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl GeminiClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.gemini_timeout_seconds))
            .build()?;

        if settings.gemini_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set - every request will use the fallback engine");
        }

        Ok(Self {
            client,
            base_url: settings.gemini_api_url.clone(),
            api_key: settings.gemini_api_key.clone(),
            model: settings.gemini_model.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ask the model for a plant-health assessment.
    #[instrument(skip(self, reading, weather))]
    pub async fn analyze(
        &self,
        reading: &SensorReading,
        weather: Option<&WeatherSnapshot>,
        request_id: Option<&str>,
    ) -> Result<Assessment, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::NotConfigured)?;

        let mut url = self
            .base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| AiError::MalformedReply(format!("bad endpoint URL: {e}")))?;
        url.query_pairs_mut().append_pair("key", api_key);

        let prompt = build_prompt(reading, weather);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        debug!(model = %self.model, "Gemini request");

        let mut req = self.client.post(url).json(&body);
        if let Some(rid) = request_id {
            req = req.header("x-request-id", rid);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            // Quota and model errors land here; the orchestrator falls back
            let message = response
                .json::<GeminiErrorBody>()
                .await
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("Gemini error: {status}"));
            return Err(AiError::Status { status, message });
        }

        let reply: GenerateContentResponse = response.json().await?;
        let text = reply
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| AiError::MalformedReply("no candidates in reply".to_string()))?;

        let json = extract_json(text)
            .ok_or_else(|| AiError::MalformedReply("no JSON object in reply".to_string()))?;
        let payload: AiPayload = serde_json::from_str(json)?;

        let optimal_conditions = payload
            .optimal_conditions
            .unwrap_or_else(|| profiles::profile_for(reading.plant_type.as_deref()).clone());

        Ok(Assessment {
            assessment: payload.assessment,
            problems: payload.problems,
            recommendations: payload.recommendations,
            optimal_conditions,
            preventative_care: payload.preventative_care,
            source: AssessmentSource::Ai,
        })
    }

    /// Cheap reachability probe of the models endpoint.
    pub async fn health_check(&self) -> Result<(), AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::NotConfigured)?;

        let mut url = self
            .base_url
            .join("v1beta/models")
            .map_err(|e| AiError::MalformedReply(format!("bad endpoint URL: {e}")))?;
        url.query_pairs_mut().append_pair("key", api_key);

        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(5))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AiError::Status {
                status,
                message: "models endpoint unavailable".to_string(),
            })
        }
    }
}

/// Prompt embedding the readings plus the JSON shape the model must return.
fn build_prompt(reading: &SensorReading, weather: Option<&WeatherSnapshot>) -> String {
    let plant = reading.plant_type.as_deref().unwrap_or("unknown crop");

    let mut prompt = format!(
        "You are an agronomy assistant. Assess the health of a {plant} given these sensor readings:\n\
         - Temperature: {}°C\n\
         - Humidity: {}%\n\
         - Soil moisture: {}%\n\
         - Soil pH: {}\n\
         - Light intensity: {} lux\n",
        reading.temperature,
        reading.humidity,
        reading.soil_moisture,
        reading.ph,
        reading.light_intensity,
    );

    if let Some(n) = reading.nitrogen {
        let _ = writeln!(prompt, "- Nitrogen: {n} ppm");
    }
    if let Some(p) = reading.phosphorus {
        let _ = writeln!(prompt, "- Phosphorus: {p} ppm");
    }
    if let Some(k) = reading.potassium {
        let _ = writeln!(prompt, "- Potassium: {k} ppm");
    }

    if let Some(w) = weather {
        let _ = writeln!(
            prompt,
            "Current weather at the site ({}): {}, {}°C, humidity {}%, wind {} m/s, pressure {} hPa.",
            w.location, w.description, w.temperature, w.humidity, w.wind_speed, w.pressure,
        );
    }

    prompt.push_str(
        "\nReply with ONLY a JSON object, no prose, matching exactly this shape:\n\
         {\n\
           \"assessment\": \"one-line health summary\",\n\
           \"problems\": [\"detected problem\"],\n\
           \"recommendations\": [\"actionable recommendation\"],\n\
           \"optimalConditions\": {\n\
             \"temperature\": \"18-25°C\", \"humidity\": \"50-70%\",\n\
             \"soilMoisture\": \"40-60%\", \"ph\": \"6.0-7.0\",\n\
             \"lightIntensity\": \"15000-25000 lux\", \"nitrogen\": \"100-200 ppm\",\n\
             \"phosphorus\": \"50-100 ppm\", \"potassium\": \"150-250 ppm\"\n\
           },\n\
           \"preventativeCare\": [\"preventative measure\"]\n\
         }\n",
    );

    prompt
}

/// Extract the JSON object from a model reply, stripping optional markdown
/// code fences around it.
fn extract_json(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed).trim();

    // Models occasionally wrap the object in prose anyway
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (start < end).then(|| &trimmed[start..=end])
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
            phosphorus: None,
            potassium: None,
            plant_type: Some("tomato".to_string()),
        }
    }

    #[test]
    fn extract_json_handles_fenced_and_bare_replies() {
        let object = r#"{"assessment":"ok"}"#;
        let fenced = format!("```json\n{object}\n```");
        let bare_fence = format!("```\n{object}\n```");
        let with_prose = format!("Here is the result:\n{object}\nHope that helps!");

        assert_eq!(extract_json(&fenced), Some(object));
        assert_eq!(extract_json(&bare_fence), Some(object));
        assert_eq!(extract_json(object), Some(object));
        assert_eq!(extract_json(&with_prose), Some(object));
    }

    #[test]
    fn extract_json_rejects_replies_without_an_object() {
        assert_eq!(extract_json("I cannot assess this."), None);
        assert_eq!(extract_json(""), None);
    }

    #[test]
    fn sparse_payload_parses_with_empty_lists() {
        let payload: AiPayload = serde_json::from_str(r#"{"assessment":"Healthy"}"#).unwrap();
        assert_eq!(payload.assessment, "Healthy");
        assert!(payload.problems.is_empty());
        assert!(payload.optimal_conditions.is_none());
    }

    #[test]
    fn prompt_embeds_readings_and_skips_absent_nutrients() {
        let prompt = build_prompt(&reading(), None);
        assert!(prompt.contains("tomato"));
        assert!(prompt.contains("22°C"));
        assert!(prompt.contains("Nitrogen: 150 ppm"));
        assert!(!prompt.contains("Phosphorus:"));
        assert!(prompt.contains("optimalConditions"));
    }

    #[test]
    fn prompt_includes_weather_when_present() {
        let weather = WeatherSnapshot {
            temperature: 18.0,
            humidity: 70.0,
            description: "light rain".to_string(),
            wind_speed: 4.0,
            pressure: 1008.0,
            visibility: 8.0,
            uv_index: None,
            location: "Leeds".to_string(),
            timestamp: chrono::Utc::now(),
        };
        let prompt = build_prompt(&reading(), Some(&weather));
        assert!(prompt.contains("light rain"));
        assert!(prompt.contains("Leeds"));
    }
}
