// Route exports
pub mod auth;
pub mod groups;
pub mod matches;
pub mod profile;

use actix_web::{http::header, web, HttpRequest};
use std::sync::Arc;

use crate::config::{MatchingSettings, Settings};
use crate::core::Matcher;
use crate::models::ScoringWeights;
use crate::services::{AccountStore, Clock, GroupRepository, InMemoryStore, SessionManager, SessionPolicy, SessionQuery};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub groups: Arc<dyn GroupRepository>,
    pub accounts: Arc<AccountStore>,
    pub sessions: Arc<SessionManager>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

impl AppState {
    /// Wire up in-memory collaborators from settings
    pub fn from_settings(
        settings: &Settings,
        clock: Arc<dyn Clock>,
        groups: Arc<dyn GroupRepository>,
    ) -> Self {
        let weights = ScoringWeights::from(&settings.scoring.weights);
        let sessions = SessionManager::new(
            clock,
            Arc::new(InMemoryStore::new()),
            SessionPolicy::from(&settings.session),
        );

        Self {
            groups,
            accounts: Arc::new(AccountStore::new()),
            sessions: Arc::new(sessions),
            matcher: Matcher::new(weights, settings.matching.min_score),
            matching: settings.matching.clone(),
        }
    }
}

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Email of the signed-in learner making the request, if any
pub fn resolve_user(sessions: &dyn SessionQuery, req: &HttpRequest) -> Option<String> {
    sessions.current_user(bearer_token(req)?)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(groups::configure)
            .configure(auth::configure)
            .configure(profile::configure),
    );
}
