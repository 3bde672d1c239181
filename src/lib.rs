//! MediNest - health-insurance recommendation service
//!
//! This library checks health profiles for completeness and turns complete
//! profiles into three plan recommendations, asking a remote model first and
//! falling back to a deterministic local heuristic.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{is_complete, missing_fields, local_recommendations, GenerationOutcome, RecommendationGenerator};
pub use models::{HealthProfile, FamilyMember, DiseaseSet, Recommendation, RecommendationSource};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        assert!(!is_complete(None));
        assert_eq!(local_recommendations(&HealthProfile::default()).len(), 3);
    }
}
