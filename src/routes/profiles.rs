use actix_web::{http::StatusCode, web, HttpResponse};
use validator::Validate;
use crate::core::{is_complete, missing_fields};
use crate::models::{
    AccountPath, HealthProfile, MissingFieldsResponse, Notice, ProfileSavedResponse,
    ToggleDiseaseRequest,
};
use crate::routes::{error_response, AppState};
use crate::services::StoreError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/accounts/{account_id}/profile", web::get().to(get_profile))
        .route("/accounts/{account_id}/profile", web::put().to(save_profile))
        .route("/accounts/{account_id}/profile", web::delete().to(delete_profile))
        .route("/accounts/{account_id}/profile/missing-fields", web::get().to(get_missing_fields))
        .route(
            "/accounts/{account_id}/profile/family/{index}/diseases",
            web::post().to(toggle_family_disease),
        );
}

/// Validate the account id taken from the path
pub(crate) fn parse_account_id(raw: String) -> Result<String, HttpResponse> {
    let path = AccountPath { account_id: raw };
    match path.validate() {
        Ok(()) => Ok(path.account_id),
        Err(errors) => Err(error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())),
    }
}

/// Map a store failure onto an HTTP response
pub(crate) fn store_error_response(err: StoreError) -> HttpResponse {
    match err {
        StoreError::InvalidInput(message) => {
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Invalid profile",
                "message": message,
                "status_code": 400,
                "notice": Notice::error(message.clone()),
            }))
        }
        StoreError::NotFound(message) => error_response(StatusCode::NOT_FOUND, "Not found", message),
        full @ StoreError::CapacityExceeded(_) => {
            tracing::warn!("{}", full);
            error_response(StatusCode::INSUFFICIENT_STORAGE, "Profile store full", full.to_string())
        }
        other => {
            tracing::error!("Profile store failure: {}", other);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Profile store unavailable", other.to_string())
        }
    }
}

/// GET /api/v1/accounts/{account_id}/profile
async fn get_profile(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let account_id = match parse_account_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.profiles.get(&account_id).await {
        Ok(Some(stored)) => HttpResponse::Ok().json(stored),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "Profile not found",
            format!("No profile stored for account {}", account_id),
        ),
        Err(e) => store_error_response(e),
    }
}

/// PUT /api/v1/accounts/{account_id}/profile
///
/// Request body is a full profile:
/// ```json
/// {
///   "fullName": "string",
///   "age": "40",
///   "gender": "male|female|other",
///   "city": "string",
///   "conditions": "string",
///   "hospital": "string",
///   "familyMembers": [{"name": "string", "age": "12", "relation": "child", "gender": "Female", "diseases": ["None"]}]
/// }
/// ```
async fn save_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<HealthProfile>,
) -> HttpResponse {
    let account_id = match parse_account_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.profiles.set(&account_id, body.into_inner()).await {
        Ok(profile) => {
            tracing::info!("Saved profile for account {}", account_id);
            HttpResponse::Ok().json(ProfileSavedResponse {
                profile,
                notice: Notice::success("Profile saved successfully!"),
            })
        }
        Err(e) => store_error_response(e),
    }
}

/// DELETE /api/v1/accounts/{account_id}/profile
async fn delete_profile(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let account_id = match parse_account_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.profiles.remove(&account_id).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => error_response(
            StatusCode::NOT_FOUND,
            "Profile not found",
            format!("No profile stored for account {}", account_id),
        ),
        Err(e) => store_error_response(e),
    }
}

/// GET /api/v1/accounts/{account_id}/profile/missing-fields
///
/// An account without a stored profile reports every required field.
async fn get_missing_fields(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let account_id = match parse_account_id(path.into_inner()) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let stored = match state.profiles.get(&account_id).await {
        Ok(stored) => stored,
        Err(e) => return store_error_response(e),
    };
    let profile = stored.as_ref().map(|s| &s.profile);

    HttpResponse::Ok().json(MissingFieldsResponse {
        complete: is_complete(profile),
        missing_fields: missing_fields(profile).into_iter().map(String::from).collect(),
    })
}

/// POST /api/v1/accounts/{account_id}/profile/family/{index}/diseases
///
/// Request body:
/// ```json
/// { "disease": "Diabetes" }
/// ```
async fn toggle_family_disease(
    state: web::Data<AppState>,
    path: web::Path<(String, usize)>,
    req: web::Json<ToggleDiseaseRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }
    if req.disease.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", "disease must not be blank");
    }

    let (raw_account_id, index) = path.into_inner();
    let account_id = match parse_account_id(raw_account_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let mut profile = match state.profiles.get(&account_id).await {
        Ok(Some(stored)) => stored.profile,
        Ok(None) => {
            return error_response(
                StatusCode::NOT_FOUND,
                "Profile not found",
                format!("No profile stored for account {}", account_id),
            )
        }
        Err(e) => return store_error_response(e),
    };

    let Some(member) = profile.family_members.get_mut(index) else {
        return error_response(
            StatusCode::NOT_FOUND,
            "Family member not found",
            format!("No family member at position {}", index),
        );
    };
    member.diseases.toggle(&req.disease);

    tracing::debug!(
        "Toggled '{}' for family member {} of {}: {:?}",
        req.disease,
        index,
        account_id,
        member.diseases.tags()
    );

    match state.profiles.set(&account_id, profile).await {
        Ok(stored) => HttpResponse::Ok().json(stored),
        Err(e) => store_error_response(e),
    }
}
