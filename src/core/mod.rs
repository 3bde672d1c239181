// Core exports
pub mod catalog;
pub mod currency;
pub mod fallback;
pub mod generator;
pub mod prompt;
pub mod validator;

pub use currency::format_inr;
pub use fallback::{local_recommendations, ConditionSignals};
pub use generator::{GenerationOutcome, RecommendationGenerator, RECOMMENDATION_COUNT};
pub use prompt::build_prompt;
pub use validator::{is_complete, missing_fields, RequiredField};
