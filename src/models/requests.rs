use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::HealthProfile;

/// Request to generate recommendations for an inline profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub profile: HealthProfile,
}

/// Request to toggle one disease tag on a family member
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ToggleDiseaseRequest {
    #[validate(length(min = 1, max = 64))]
    pub disease: String,
}

/// Account identifier taken from the URL path
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AccountPath {
    #[validate(length(min = 1, max = 128))]
    pub account_id: String,
}
