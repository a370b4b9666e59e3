use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::error::ApiError;
use crate::models::CreateGroupRequest;
use crate::routes::{resolve_user, AppState};
use crate::services::NewGroup;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/groups", web::get().to(list_groups))
        .route("/groups", web::post().to(create_group))
        .route("/groups/mine", web::get().to(my_groups))
        .route("/groups/{id}/join", web::post().to(join_group));
}

/// GET /api/v1/groups
async fn list_groups(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let groups = state.groups.list_groups()?;
    Ok(HttpResponse::Ok().json(groups))
}

/// POST /api/v1/groups
///
/// The signed-in learner becomes the group's first member.
async fn create_group(
    state: web::Data<AppState>,
    req: web::Json<CreateGroupRequest>,
    http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let creator = resolve_user(state.sessions.as_ref(), &http_req).ok_or(ApiError::Unauthorized)?;
    req.validate()?;

    let req = req.into_inner();
    let group = state.groups.create_group(NewGroup {
        name: req.name,
        subject: req.subject,
        topic: req.topic,
        schedule: req.schedule,
        learning_style: req.learning_style.filter(|style| !style.trim().is_empty()),
        creator,
    })?;

    Ok(HttpResponse::Created().json(group))
}

/// GET /api/v1/groups/mine
async fn my_groups(state: web::Data<AppState>, http_req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let email = resolve_user(state.sessions.as_ref(), &http_req).ok_or(ApiError::Unauthorized)?;
    let groups = state.groups.groups_for(&email)?;

    Ok(HttpResponse::Ok().json(groups))
}

/// POST /api/v1/groups/{id}/join
async fn join_group(
    state: web::Data<AppState>,
    path: web::Path<String>,
    http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let email = resolve_user(state.sessions.as_ref(), &http_req).ok_or(ApiError::Unauthorized)?;
    let group = state.groups.join_group(&path.into_inner(), &email)?;

    Ok(HttpResponse::Ok().json(group))
}
