use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::ApiError;
use crate::models::LearnerProfile;
use crate::routes::{resolve_user, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/profile", web::get().to(get_profile))
        .route("/profile", web::put().to(update_profile));
}

/// GET /api/v1/profile
async fn get_profile(state: web::Data<AppState>, http_req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let email = resolve_user(state.sessions.as_ref(), &http_req).ok_or(ApiError::Unauthorized)?;
    let learner = state
        .accounts
        .get(&email)
        .ok_or_else(|| ApiError::NotFound(format!("No account for {}", email)))?;

    Ok(HttpResponse::Ok().json(learner))
}

/// PUT /api/v1/profile
///
/// Replaces the signed-in learner's profile wholesale.
async fn update_profile(
    state: web::Data<AppState>,
    req: web::Json<LearnerProfile>,
    http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let email = resolve_user(state.sessions.as_ref(), &http_req).ok_or(ApiError::Unauthorized)?;
    let learner = state.accounts.update_profile(&email, req.into_inner())?;

    Ok(HttpResponse::Ok().json(learner))
}
