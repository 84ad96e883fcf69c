//! Client for the OpenWeatherMap current-weather API.
//!
//! Lookup failures are never fatal to a request: the orchestrator logs them
//! and proceeds without a snapshot. Transient failures (network, 5xx) are
//! retried briefly with exponential backoff.

use backoff::ExponentialBackoff;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::Settings;
use crate::domain::WeatherSnapshot;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("no weather API key configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned {0}")]
    Status(StatusCode),
}

/// Client for the current-weather endpoint.
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

/// Wire shape of the current-weather response, reduced to what we use.
#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmCondition>,
    wind: OwmWind,
    /// Meters; the API caps it at 10 km and omits it in some regions.
    visibility: Option<f64>,
    /// Only present on station feeds that report UV.
    uvi: Option<f64>,
    name: String,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

impl WeatherClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.weather_timeout_seconds))
            .build()?;

        if settings.weather_api_key.is_none() {
            tracing::warn!(
                "OPENWEATHER_API_KEY not set - responses will carry no weather sections"
            );
        }

        Ok(Self {
            client,
            base_url: settings.weather_api_url.clone(),
            api_key: settings.weather_api_key.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch current weather for the given coordinates.
    #[instrument(skip(self))]
    pub async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::NotConfigured)?;

        let mut url = self
            .base_url
            .join("data/2.5/weather")
            .map_err(|_| WeatherError::NotConfigured)?;
        url.query_pairs_mut()
            .append_pair("lat", &latitude.to_string())
            .append_pair("lon", &longitude.to_string())
            .append_pair("appid", api_key)
            .append_pair("units", "metric");

        debug!("weather lookup");

        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(15)),
            ..Default::default()
        };

        let raw: OwmResponse = backoff::future::retry(backoff, || async {
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| backoff::Error::transient(WeatherError::Transport(e)))?;

            let status = response.status();
            if status.is_success() {
                response
                    .json::<OwmResponse>()
                    .await
                    .map_err(|e| backoff::Error::permanent(WeatherError::Transport(e)))
            } else if status.is_server_error() {
                Err(backoff::Error::transient(WeatherError::Status(status)))
            } else {
                // 4xx (bad key, bad coordinates) will not improve on retry
                Err(backoff::Error::permanent(WeatherError::Status(status)))
            }
        })
        .await?;

        Ok(snapshot_from(raw))
    }
}

fn snapshot_from(raw: OwmResponse) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: raw.main.temp,
        humidity: raw.main.humidity,
        description: raw
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_default(),
        wind_speed: raw.wind.speed,
        pressure: raw.main.pressure,
        visibility: raw.visibility.map(|meters| meters / 1000.0).unwrap_or(10.0),
        uv_index: raw.uvi,
        location: raw.name,
        timestamp: DateTime::from_timestamp(raw.dt, 0).unwrap_or_else(Utc::now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_the_wire_response_into_a_snapshot() {
        let raw: OwmResponse = serde_json::from_str(
            r#"{
                "main": {"temp": 17.3, "humidity": 62, "pressure": 1009},
                "weather": [{"description": "scattered clouds"}],
                "wind": {"speed": 4.2},
                "visibility": 8000,
                "name": "Oslo",
                "dt": 1700000000
            }"#,
        )
        .unwrap();

        let snapshot = snapshot_from(raw);
        assert_eq!(snapshot.temperature, 17.3);
        assert_eq!(snapshot.description, "scattered clouds");
        assert_eq!(snapshot.visibility, 8.0);
        assert!(snapshot.uv_index.is_none());
        assert_eq!(snapshot.location, "Oslo");
        assert_eq!(snapshot.timestamp.timestamp(), 1700000000);
    }

    #[test]
    fn missing_visibility_defaults_to_the_api_maximum() {
        let raw: OwmResponse = serde_json::from_str(
            r#"{
                "main": {"temp": 20, "humidity": 50, "pressure": 1013},
                "weather": [],
                "wind": {"speed": 1.0},
                "name": "",
                "dt": 0
            }"#,
        )
        .unwrap();

        let snapshot = snapshot_from(raw);
        assert_eq!(snapshot.visibility, 10.0);
        assert_eq!(snapshot.description, "");
    }
}
