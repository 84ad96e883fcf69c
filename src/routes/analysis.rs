//! Plant-health analysis endpoint.
//!
//! Orchestrates one request: validate the readings, optionally fetch
//! weather for the supplied coordinates, try the generative AI path, fall
//! back to the rule engine on any AI failure, then merge the deterministic
//! weather-impact classification into the response.

use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::{AnalyzeRequest, Assessment, WeatherImpact, WeatherSnapshot};
use crate::engine::{fallback, weather_impact};
use crate::error::{ApiError, ApiResult};
use crate::middleware::request_id::X_REQUEST_ID;

/// Helper to extract request ID from headers.
fn get_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub assessment: Assessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_data: Option<WeatherSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_impact: Option<WeatherImpact>,
}

/// Analyze a set of sensor readings.
///
/// POST /api/analyze
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let request_id = get_request_id(&headers);

    let (reading, coordinates) = req.validate().map_err(ApiError::Validation)?;

    // Weather is best-effort: a failed lookup only drops the weather sections
    let weather = match coordinates {
        Some(c) => match state.weather.current(c.latitude, c.longitude).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "Weather lookup failed, continuing without weather");
                None
            }
        },
        None => None,
    };

    let assessment = match state
        .gemini
        .analyze(&reading, weather.as_ref(), request_id.as_deref())
        .await
    {
        Ok(assessment) => assessment,
        Err(e) => {
            tracing::warn!(error = %e, "AI analysis unavailable, using rule-based fallback");
            fallback::assess(&reading)
        }
    };

    let weather_impact = weather
        .as_ref()
        .map(|w| weather_impact::classify(w, reading.temperature, reading.humidity));

    Ok(Json(AnalyzeResponse {
        assessment,
        weather_data: weather,
        weather_impact,
    }))
}
