// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgeField, DiseaseSet, FamilyMember, Gender, HealthProfile, InsurancePlan, MemberGender, Notice,
    NoticeKind, Recommendation, Relation, StoredProfile, DISEASE_OPTIONS, NO_DISEASE,
};
pub use requests::{AccountPath, RecommendationRequest, ToggleDiseaseRequest};
pub use responses::{
    ErrorResponse, HealthResponse, IncompleteProfileResponse, MissingFieldsResponse,
    ProfileSavedResponse, RecommendationCard, RecommendationResponse, RecommendationSource,
};
