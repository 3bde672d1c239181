use std::sync::Arc;
use crate::core::{fallback::local_recommendations, prompt::build_prompt};
use crate::models::{HealthProfile, Recommendation, RecommendationSource};
use crate::services::{InferenceError, InferenceTransport};

/// Number of recommendations every generation returns
pub const RECOMMENDATION_COUNT: usize = 3;

/// Result of one generation call
///
/// Either the remote model's records, or the local heuristic's records
/// together with the reason the remote path was abandoned.
#[derive(Debug)]
pub enum GenerationOutcome {
    Remote(Vec<Recommendation>),
    Fallback {
        recommendations: Vec<Recommendation>,
        cause: InferenceError,
    },
}

impl GenerationOutcome {
    pub fn source(&self) -> RecommendationSource {
        match self {
            GenerationOutcome::Remote(_) => RecommendationSource::Remote,
            GenerationOutcome::Fallback { .. } => RecommendationSource::Fallback,
        }
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        match self {
            GenerationOutcome::Remote(recommendations) => recommendations,
            GenerationOutcome::Fallback { recommendations, .. } => recommendations,
        }
    }

    pub fn into_recommendations(self) -> Vec<Recommendation> {
        match self {
            GenerationOutcome::Remote(recommendations) => recommendations,
            GenerationOutcome::Fallback { recommendations, .. } => recommendations,
        }
    }
}

/// Remove a surrounding Markdown code fence, optionally tagged `json`
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"));

    match inner {
        Some(inner) => inner.trim_end().strip_suffix("```").unwrap_or(inner).trim(),
        None => trimmed,
    }
}

/// Decode generated text into exactly three well-formed recommendations
pub fn parse_recommendations(text: &str) -> Result<Vec<Recommendation>, InferenceError> {
    let value: serde_json::Value = serde_json::from_str(strip_code_fence(text))?;

    let items = value
        .as_array()
        .ok_or_else(|| InferenceError::InvalidShape("expected a JSON array".to_string()))?;

    if items.len() != RECOMMENDATION_COUNT {
        return Err(InferenceError::InvalidShape(format!(
            "expected {} recommendations, got {}",
            RECOMMENDATION_COUNT,
            items.len()
        )));
    }

    let recommendations: Vec<Recommendation> = serde_json::from_value(value)?;

    if let Some(rec) = recommendations.iter().find(|r| r.score > 100) {
        return Err(InferenceError::InvalidShape(format!(
            "score {} of '{}' is out of range",
            rec.score, rec.name
        )));
    }

    Ok(recommendations)
}

/// Produces recommendations for complete profiles
///
/// Makes at most one remote attempt through the configured transport and
/// answers from the local heuristic whenever that attempt fails. Callers
/// must check `validator::is_complete` first; the generator does not.
#[derive(Clone, Default)]
pub struct RecommendationGenerator {
    transport: Option<Arc<dyn InferenceTransport>>,
}

impl RecommendationGenerator {
    pub fn new(transport: Arc<dyn InferenceTransport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// Generator that always answers from the local heuristic
    pub fn local_only() -> Self {
        Self { transport: None }
    }

    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    pub async fn generate(&self, profile: &HealthProfile) -> GenerationOutcome {
        match self.try_remote(profile).await {
            Ok(recommendations) => GenerationOutcome::Remote(recommendations),
            Err(cause) => {
                tracing::warn!("Remote recommendations unavailable, using local fallback: {}", cause);
                GenerationOutcome::Fallback {
                    recommendations: local_recommendations(profile),
                    cause,
                }
            }
        }
    }

    async fn try_remote(&self, profile: &HealthProfile) -> Result<Vec<Recommendation>, InferenceError> {
        let transport = self.transport.as_ref().ok_or(InferenceError::NotConfigured)?;
        let text = transport.complete(&build_prompt(profile)).await?;
        parse_recommendations(&text)
    }
}

impl std::fmt::Debug for RecommendationGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationGenerator")
            .field("remote", &self.has_transport())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("```\n[1]\n```\n"), "[1]");
        assert_eq!(strip_code_fence("  [1]  "), "[1]");
        assert_eq!(strip_code_fence("```json[1]"), "[1]");
    }

    #[test]
    fn test_parse_rejects_non_array_and_empty() {
        assert!(matches!(parse_recommendations("not json"), Err(InferenceError::Parse(_))));
        assert!(matches!(parse_recommendations("{}"), Err(InferenceError::InvalidShape(_))));
        assert!(matches!(parse_recommendations("[]"), Err(InferenceError::InvalidShape(_))));
    }

    #[test]
    fn test_parse_rejects_records_missing_fields() {
        let text = r#"[{"name":"A"},{"name":"B"},{"name":"C"}]"#;
        assert!(matches!(parse_recommendations(text), Err(InferenceError::Parse(_))));
    }

    #[tokio::test]
    async fn test_local_only_generator_falls_back() {
        let generator = RecommendationGenerator::local_only();
        let outcome = generator.generate(&HealthProfile::default()).await;

        assert_eq!(outcome.source(), RecommendationSource::Fallback);
        assert!(matches!(
            outcome,
            GenerationOutcome::Fallback { cause: InferenceError::NotConfigured, .. }
        ));
        assert_eq!(outcome.recommendations().len(), RECOMMENDATION_COUNT);
    }
}
