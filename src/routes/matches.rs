use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::error::ApiError;
use crate::models::{FindMatchesRequest, FindMatchesResponse, HealthResponse, LearnerProfile};
use crate::routes::{resolve_user, AppState};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "profile": { "subjects": [], "topics": [], "schedule": [], "learningStyle": "Visual" },
///   "groups": [ { "subject": "...", "topic": "...", "schedule": "..." } ],
///   "limit": 20
/// }
/// ```
///
/// `profile` falls back to the signed-in learner's stored profile and
/// `groups` to every group in the repository.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
    http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return Err(errors.into());
    }

    let req = req.into_inner();

    let profile = match req.profile {
        Some(profile) => profile,
        None => stored_profile(&state, &http_req)?,
    };

    let groups = match req.groups {
        Some(groups) => groups,
        None => state.groups.list_groups()?,
    };

    let limit = req
        .limit
        .unwrap_or(state.matching.default_limit)
        .min(state.matching.max_limit) as usize;

    let mut result = state.matcher.find_matches(&profile, &groups);
    result.matches.truncate(limit);

    tracing::info!(
        "Returning {} matches (from {} candidates, limit {})",
        result.matches.len(),
        result.total_candidates,
        limit
    );

    Ok(HttpResponse::Ok().json(FindMatchesResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
    }))
}

fn stored_profile(state: &AppState, http_req: &HttpRequest) -> Result<LearnerProfile, ApiError> {
    let missing = || ApiError::InvalidInput("Missing learner profile: send `profile` or sign in".to_string());

    let email = resolve_user(state.sessions.as_ref(), http_req).ok_or_else(missing)?;
    let learner = state.accounts.get(&email).ok_or_else(missing)?;

    tracing::debug!("Using stored profile for {}", email);
    Ok(learner.profile)
}
