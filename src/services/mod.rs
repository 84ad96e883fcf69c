//! Service layer modules for external integrations.
//!
//! Contains the clients for the generative-AI (Gemini) and weather
//! (OpenWeatherMap) collaborators. Both degrade gracefully: the AI path
//! falls back to the rule engine, the weather path to an absent snapshot.

pub mod gemini;
pub mod weather;

pub use gemini::{AiError, GeminiClient};
pub use weather::WeatherClient;
