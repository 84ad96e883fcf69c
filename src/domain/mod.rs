//! Domain types and DTOs
//!
//! Data structures flowing between the web form, the assessment engines and
//! the external collaborators. Everything here is request-scoped; the only
//! long-lived data is the static plant profile table in `engine::profiles`.

pub mod assessment;
pub mod plants;
pub mod sensors;
pub mod weather;

// Re-export commonly used types
pub use assessment::{Assessment, AssessmentSource};
pub use plants::PlantProfile;
pub use sensors::{AnalyzeRequest, Coordinates, SensorReading};
pub use weather::{RiskLevel, WeatherImpact, WeatherSnapshot};
