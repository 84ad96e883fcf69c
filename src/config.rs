use anyhow::{Context, Result};
use std::env;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    #[allow(dead_code)]
    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Request body cap for the analyze endpoint
    pub max_body_bytes: usize,

    // Gemini (generative AI)
    pub gemini_api_url: Url,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_timeout_seconds: u64,

    // OpenWeatherMap
    pub weather_api_url: Url,
    pub weather_api_key: Option<String>,
    pub weather_timeout_seconds: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_body_bytes = env::var("MAX_BODY_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(64 * 1024); // sensor payloads are tiny

        // Gemini. A missing key is not fatal: the rule-based fallback engine
        // serves every request until a key is configured.
        let gemini_api_url = env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
        let gemini_api_url =
            Url::parse(&gemini_api_url).context("GEMINI_API_URL is not a valid URL")?;
        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty());
        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());
        let gemini_timeout_seconds = env::var("GEMINI_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        // OpenWeatherMap. Also optional: without a key the response simply
        // carries no weatherData/weatherImpact sections.
        let weather_api_url = env::var("OPENWEATHER_API_URL")
            .unwrap_or_else(|_| "https://api.openweathermap.org".to_string());
        let weather_api_url =
            Url::parse(&weather_api_url).context("OPENWEATHER_API_URL is not a valid URL")?;
        let weather_api_key = env::var("OPENWEATHER_API_KEY").ok().filter(|s| !s.is_empty());
        let weather_timeout_seconds = env::var("WEATHER_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            max_body_bytes,
            gemini_api_url,
            gemini_api_key,
            gemini_model,
            gemini_timeout_seconds,
            weather_api_url,
            weather_api_key,
            weather_timeout_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parsing_is_case_insensitive() {
        assert_eq!(Environment::from_str("PROD"), Environment::Prod);
        assert_eq!(Environment::from_str("production"), Environment::Prod);
        assert_eq!(Environment::from_str("Staging"), Environment::Staging);
        assert_eq!(Environment::from_str("anything-else"), Environment::Dev);
    }
}
