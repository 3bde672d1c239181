use actix_web::{http::StatusCode, web, HttpResponse};
use crate::core::{is_complete, missing_fields};
use crate::models::{
    HealthProfile, IncompleteProfileResponse, RecommendationCard, RecommendationRequest,
    RecommendationResponse,
};
use crate::routes::profiles::{parse_account_id, store_error_response};
use crate::routes::{error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/recommendations", web::post().to(recommend_for_profile))
        .route("/accounts/{account_id}/recommendations", web::post().to(recommend_for_account));
}

/// Gate on completeness, then generate
///
/// Incomplete profiles get 422 with the ordered list of missing fields and
/// never reach the generator.
async fn recommend(state: &AppState, profile: Option<&HealthProfile>) -> HttpResponse {
    let profile = match profile {
        Some(profile) if is_complete(Some(profile)) => profile,
        _ => {
            let missing: Vec<String> = missing_fields(profile).into_iter().map(String::from).collect();
            tracing::info!("Recommendation requested for incomplete profile, missing: {:?}", missing);
            return HttpResponse::build(StatusCode::UNPROCESSABLE_ENTITY).json(IncompleteProfileResponse {
                error: "Profile incomplete".to_string(),
                message: "Please complete your profile to get personalized AI recommendations.".to_string(),
                missing_fields: missing,
            });
        }
    };

    let generation_id = uuid::Uuid::new_v4().to_string();
    let outcome = state.generator.generate(profile).await;
    let source = outcome.source();

    tracing::info!(
        "Generated {} recommendations ({:?}) for generation {}",
        outcome.recommendations().len(),
        source,
        generation_id
    );

    HttpResponse::Ok().json(RecommendationResponse {
        generation_id,
        source,
        recommendations: outcome
            .into_recommendations()
            .into_iter()
            .map(RecommendationCard::from)
            .collect(),
    })
}

/// Generate recommendations for a profile sent in the request
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "profile": { "fullName": "string", "age": "40", "gender": "male", "city": "string", "conditions": "string" }
/// }
/// ```
async fn recommend_for_profile(
    state: web::Data<AppState>,
    req: web::Json<RecommendationRequest>,
) -> HttpResponse {
    recommend(&state, Some(&req.profile)).await
}

/// Generate recommendations for the profile stored under an account
///
/// POST /api/v1/accounts/{account_id}/recommendations
async fn recommend_for_account(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let account_id = match parse_account_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.profiles.get(&account_id).await {
        Ok(stored) => recommend(&state, stored.as_ref().map(|s| &s.profile)).await,
        Err(e) => {
            tracing::error!("Failed to load profile for {}: {}", account_id, e);
            store_error_response(e)
        }
    }
}
