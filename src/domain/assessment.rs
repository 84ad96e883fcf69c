//! Unified plant-health assessment result.
//!
//! The same shape is produced whether the analysis came from the generative
//! AI service or from the rule-based fallback engine; downstream code keys
//! off `source` rather than inspecting the content.

use serde::{Deserialize, Serialize};

use super::plants::PlantProfile;

/// Which path produced an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentSource {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// One-line health headline.
    pub assessment: String,
    /// Detected problems. Legacy clients detect the fallback path by the
    /// sentinel string in the first entry; `source` is the supported way.
    pub problems: Vec<String>,
    pub recommendations: Vec<String>,
    /// Optimal ranges for the resolved plant profile, for display.
    pub optimal_conditions: PlantProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preventative_care: Option<Vec<String>>,
    pub source: AssessmentSource,
}
