use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::error::ApiError;
use crate::models::{ExtendSessionRequest, LoginRequest, LoginResponse, RegisterRequest, SessionResponse};
use crate::routes::{bearer_token, AppState};
use crate::services::{AuthSession, SessionState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/register", web::post().to(register))
        .route("/auth/login", web::post().to(login))
        .route("/auth/logout", web::post().to(logout))
        .route("/auth/session", web::get().to(session_status))
        .route("/auth/activity", web::post().to(record_activity))
        .route("/auth/extend", web::post().to(extend_session));
}

fn login_response(session: AuthSession, name: String) -> LoginResponse {
    LoginResponse {
        token: session.token,
        email: session.user,
        name,
        expires_at: session.expires_at,
    }
}

fn session_response(state: &AppState, session: &SessionState) -> SessionResponse {
    SessionResponse {
        state: session.label().to_string(),
        is_logged_in: session.is_authenticated(),
        user: session.user().map(str::to_string),
        expiry: session.expiry(state.sessions.now()),
    }
}

/// Register and sign in
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let learner = state.accounts.register(&req.email, &req.name, &req.password)?;
    let session = state.sessions.login(&learner.email, false)?;

    Ok(HttpResponse::Created().json(login_response(session, learner.name)))
}

async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let learner = match state.accounts.authenticate(&req.email, &req.password) {
        Some(learner) => learner,
        None => {
            tracing::info!("Failed login for {}", req.email);
            return Err(ApiError::InvalidCredentials);
        }
    };

    let session = state.sessions.login(&learner.email, req.remember_me)?;
    Ok(HttpResponse::Ok().json(login_response(session, learner.name)))
}

async fn logout(state: web::Data<AppState>, http_req: HttpRequest) -> Result<HttpResponse, ApiError> {
    if let Some(token) = bearer_token(&http_req) {
        state.sessions.logout(token)?;
    }
    Ok(HttpResponse::NoContent().finish())
}

async fn session_status(state: web::Data<AppState>, http_req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let session = match bearer_token(&http_req) {
        Some(token) => state.sessions.state(token)?,
        None => SessionState::Anonymous,
    };

    Ok(HttpResponse::Ok().json(session_response(&state, &session)))
}

/// Activity ping from the client; refreshes the session at most once per
/// refresh interval
async fn record_activity(state: web::Data<AppState>, http_req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let token = bearer_token(&http_req).ok_or(ApiError::Unauthorized)?;
    let session = state.sessions.record_activity(token)?;

    if !session.is_authenticated() {
        return Err(ApiError::Unauthorized);
    }

    Ok(HttpResponse::Ok().json(session_response(&state, &session)))
}

async fn extend_session(
    state: web::Data<AppState>,
    req: web::Json<ExtendSessionRequest>,
    http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let token = bearer_token(&http_req).ok_or(ApiError::Unauthorized)?;

    let by = chrono::Duration::minutes(i64::from(req.additional_minutes));
    let session = SessionState::Authenticated(state.sessions.extend(token, by)?);

    Ok(HttpResponse::Ok().json(session_response(&state, &session)))
}
