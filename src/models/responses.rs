use serde::{Deserialize, Serialize};
use crate::core::currency::format_inr;
use crate::models::domain::{Notice, Recommendation, StoredProfile};

/// Where a set of recommendations came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Remote,
    Fallback,
}

/// A recommendation with its amounts formatted for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationCard {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    #[serde(rename = "premiumDisplay")]
    pub premium_display: String,
    #[serde(rename = "coverageDisplay")]
    pub coverage_display: String,
}

impl From<Recommendation> for RecommendationCard {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            premium_display: format_inr(recommendation.premium),
            coverage_display: format_inr(recommendation.coverage),
            recommendation,
        }
    }
}

/// Response for the recommendation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(rename = "generationId")]
    pub generation_id: String,
    pub source: RecommendationSource,
    pub recommendations: Vec<RecommendationCard>,
}

/// Response listing which required profile fields are missing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingFieldsResponse {
    pub complete: bool,
    #[serde(rename = "missingFields")]
    pub missing_fields: Vec<String>,
}

/// Returned when generation is attempted on an incomplete profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncompleteProfileResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "missingFields")]
    pub missing_fields: Vec<String>,
}

/// Response for a profile write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSavedResponse {
    pub profile: StoredProfile,
    pub notice: Notice,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
