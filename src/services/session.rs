use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::services::store::{get_json, set_json, KeyValueStore, StoreError, StoreKey};

/// Errors that can occur with session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Not logged in")]
    NotAuthenticated,
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.write() {
            *now += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.read().map(|now| *now).unwrap_or_else(|_| Utc::now())
    }
}

/// Expiry rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionPolicy {
    /// Lifetime of a fresh session, and of a session refreshed by activity
    pub expiry: Duration,
    /// Lifetime multiplier for "remember me" logins
    pub remember_me_factor: i32,
    /// Minimum time between activity refreshes
    pub refresh_interval: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            expiry: Duration::minutes(30),
            remember_me_factor: 24,
            refresh_interval: Duration::minutes(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: String,
    pub token: String,
    #[serde(rename = "lastLogin")]
    pub last_login: DateTime<Utc>,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
    #[serde(rename = "lastRefresh")]
    pub last_refresh: DateTime<Utc>,
}

/// Session lifecycle
///
/// ```text
/// Anonymous --login--> Authenticated --tick(now > expiresAt)--> Expired
///     ^                     |  ^                                   |
///     +------logout---------+  +-- activity / extend               |
///     +------------------------logout------------------------------+
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SessionState {
    Anonymous,
    Authenticated(AuthSession),
    Expired { user: String },
}

impl SessionState {
    pub fn login(
        user: &str,
        token: String,
        now: DateTime<Utc>,
        policy: &SessionPolicy,
        remember_me: bool,
    ) -> Self {
        let lifetime = if remember_me {
            policy.expiry * policy.remember_me_factor
        } else {
            policy.expiry
        };

        SessionState::Authenticated(AuthSession {
            user: user.to_string(),
            token,
            last_login: now,
            expires_at: now + lifetime,
            last_refresh: now,
        })
    }

    pub fn logout(self) -> Self {
        SessionState::Anonymous
    }

    pub fn tick(self, now: DateTime<Utc>) -> Self {
        match self {
            SessionState::Authenticated(session) if now > session.expires_at => {
                SessionState::Expired { user: session.user }
            }
            other => other,
        }
    }

    /// User activity: refreshes the expiry at most once per refresh interval
    pub fn activity(self, now: DateTime<Utc>, policy: &SessionPolicy) -> Self {
        match self.tick(now) {
            SessionState::Authenticated(mut session)
                if now - session.last_refresh >= policy.refresh_interval =>
            {
                session.expires_at = session.expires_at.max(now + policy.expiry);
                session.last_refresh = now;
                SessionState::Authenticated(session)
            }
            other => other,
        }
    }

    pub fn extend(self, now: DateTime<Utc>, by: Duration) -> Self {
        match self.tick(now) {
            SessionState::Authenticated(mut session) => {
                session.expires_at = now + by;
                SessionState::Authenticated(session)
            }
            other => other,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated(session) => Some(&session.user),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Anonymous => "anonymous",
            SessionState::Authenticated(_) => "authenticated",
            SessionState::Expired { .. } => "expired",
        }
    }

    pub fn expiry(&self, now: DateTime<Utc>) -> SessionExpiry {
        match self {
            SessionState::Authenticated(session) => {
                let remaining_ms = (session.expires_at - now).num_milliseconds().max(0);
                SessionExpiry {
                    is_valid: remaining_ms > 0,
                    expires_at: Some(session.expires_at),
                    remaining_ms,
                    remaining_minutes: remaining_ms / 60_000,
                }
            }
            _ => SessionExpiry::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionExpiry {
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    #[serde(rename = "expiresAt")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(rename = "remainingMs")]
    pub remaining_ms: i64,
    #[serde(rename = "remainingMinutes")]
    pub remaining_minutes: i64,
}

/// Read-only view of "who is asking", all the matching core needs
pub trait SessionQuery: Send + Sync {
    fn is_logged_in(&self, token: &str) -> bool;
    fn current_user(&self, token: &str) -> Option<String>;
}

/// Token-keyed sessions persisted as JSON in a [`KeyValueStore`]
pub struct SessionManager {
    clock: Arc<dyn Clock>,
    store: Arc<dyn KeyValueStore>,
    policy: SessionPolicy,
}

impl SessionManager {
    pub fn new(clock: Arc<dyn Clock>, store: Arc<dyn KeyValueStore>, policy: SessionPolicy) -> Self {
        Self { clock, store, policy }
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn load(&self, token: &str) -> Result<SessionState, SessionError> {
        let state = get_json(self.store.as_ref(), &StoreKey::session(token))?;
        Ok(state.unwrap_or(SessionState::Anonymous))
    }

    fn save(&self, token: &str, state: &SessionState) -> Result<(), SessionError> {
        let key = StoreKey::session(token);
        match state {
            SessionState::Anonymous => self.store.remove(&key)?,
            _ => set_json(self.store.as_ref(), &key, state)?,
        }
        Ok(())
    }

    /// Start a session for an already-authenticated user
    pub fn login(&self, user: &str, remember_me: bool) -> Result<AuthSession, SessionError> {
        let token = format!("auth_{}", uuid::Uuid::new_v4().simple());
        let state = SessionState::login(user, token.clone(), self.now(), &self.policy, remember_me);
        self.save(&token, &state)?;

        tracing::info!("Session started for {} (remember me: {})", user, remember_me);

        match state {
            SessionState::Authenticated(session) => Ok(session),
            _ => Err(SessionError::NotAuthenticated),
        }
    }

    pub fn logout(&self, token: &str) -> Result<(), SessionError> {
        let state = self.load(token)?.logout();
        self.save(token, &state)
    }

    /// Current state, applying expiry
    pub fn state(&self, token: &str) -> Result<SessionState, SessionError> {
        let before = self.load(token)?;
        let after = before.clone().tick(self.now());

        if after != before {
            tracing::info!("Session expired for {}", expired_user(&after));
            self.save(token, &after)?;
        }

        Ok(after)
    }

    pub fn record_activity(&self, token: &str) -> Result<SessionState, SessionError> {
        let before = self.load(token)?;
        let after = before.clone().activity(self.now(), &self.policy);

        if after != before {
            self.save(token, &after)?;
        }

        Ok(after)
    }

    pub fn extend(&self, token: &str, by: Duration) -> Result<AuthSession, SessionError> {
        match self.load(token)?.extend(self.now(), by) {
            SessionState::Authenticated(session) => {
                let state = SessionState::Authenticated(session.clone());
                self.save(token, &state)?;
                tracing::debug!("Session for {} extended to {}", session.user, session.expires_at);
                Ok(session)
            }
            expired @ SessionState::Expired { .. } => {
                self.save(token, &expired)?;
                Err(SessionError::NotAuthenticated)
            }
            SessionState::Anonymous => Err(SessionError::NotAuthenticated),
        }
    }

    pub fn expiry(&self, token: &str) -> Result<SessionExpiry, SessionError> {
        Ok(self.state(token)?.expiry(self.now()))
    }

    /// Drop every session that is no longer authenticated
    pub fn sweep_expired(&self) -> Result<usize, SessionError> {
        let now = self.now();
        let mut removed = 0;

        for key in self.store.keys(StoreKey::SESSION_PREFIX)? {
            let state: Option<SessionState> = get_json(self.store.as_ref(), &key)?;
            let alive = state.map(|s| s.tick(now).is_authenticated()).unwrap_or(false);

            if !alive {
                self.store.remove(&key)?;
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::info!("Swept {} expired sessions", removed);
        }

        Ok(removed)
    }
}

fn expired_user(state: &SessionState) -> &str {
    match state {
        SessionState::Expired { user } => user,
        _ => "unknown user",
    }
}

impl SessionQuery for SessionManager {
    fn is_logged_in(&self, token: &str) -> bool {
        match self.state(token) {
            Ok(state) => state.is_authenticated(),
            Err(e) => {
                tracing::warn!("Failed to read session, treating as logged out: {}", e);
                false
            }
        }
    }

    fn current_user(&self, token: &str) -> Option<String> {
        match self.state(token) {
            Ok(state) => state.user().map(str::to_string),
            Err(e) => {
                tracing::warn!("Failed to read session, treating as logged out: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::InMemoryStore;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 0).unwrap()
    }

    fn create_manager() -> (Arc<ManualClock>, SessionManager) {
        let clock = Arc::new(ManualClock::new(start()));
        let manager = SessionManager::new(
            clock.clone(),
            Arc::new(InMemoryStore::new()),
            SessionPolicy::default(),
        );
        (clock, manager)
    }

    #[test]
    fn test_login_sets_expiry() {
        let policy = SessionPolicy::default();
        let state = SessionState::login("alex@university.edu", "t".to_string(), start(), &policy, false);

        match state {
            SessionState::Authenticated(session) => {
                assert_eq!(session.expires_at, start() + Duration::minutes(30));
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_remember_me_lasts_longer() {
        let policy = SessionPolicy::default();
        let state = SessionState::login("alex@university.edu", "t".to_string(), start(), &policy, true);

        let expiry = state.expiry(start());
        assert_eq!(expiry.remaining_minutes, 30 * 24);
    }

    #[test]
    fn test_tick_expires_strictly_after_deadline() {
        let policy = SessionPolicy::default();
        let state = SessionState::login("alex@university.edu", "t".to_string(), start(), &policy, false);

        let at_deadline = state.clone().tick(start() + Duration::minutes(30));
        assert!(at_deadline.is_authenticated());

        let after = state.tick(start() + Duration::minutes(30) + Duration::seconds(1));
        assert_eq!(
            after,
            SessionState::Expired {
                user: "alex@university.edu".to_string()
            }
        );
    }

    #[test]
    fn test_activity_is_debounced() {
        let policy = SessionPolicy::default();
        let state = SessionState::login("alex@university.edu", "t".to_string(), start(), &policy, false);

        // too soon: nothing changes
        let soon = state.clone().activity(start() + Duration::minutes(2), &policy);
        assert_eq!(soon, state);

        let later = start() + Duration::minutes(10);
        match state.activity(later, &policy) {
            SessionState::Authenticated(session) => {
                assert_eq!(session.expires_at, later + Duration::minutes(30));
                assert_eq!(session.last_refresh, later);
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_activity_never_shortens_remembered_session() {
        let policy = SessionPolicy::default();
        let state = SessionState::login("alex@university.edu", "t".to_string(), start(), &policy, true);

        match state.activity(start() + Duration::minutes(10), &policy) {
            SessionState::Authenticated(session) => {
                assert_eq!(session.expires_at, start() + Duration::hours(12));
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_activity_does_not_revive_expired_session() {
        let policy = SessionPolicy::default();
        let state = SessionState::login("alex@university.edu", "t".to_string(), start(), &policy, false);

        let state = state.activity(start() + Duration::hours(1), &policy);
        assert!(!state.is_authenticated());
        assert_eq!(state.label(), "expired");
    }

    #[test]
    fn test_logout_from_any_state() {
        assert_eq!(SessionState::Expired { user: "x".to_string() }.logout(), SessionState::Anonymous);
        assert_eq!(SessionState::Anonymous.logout(), SessionState::Anonymous);
    }

    #[test]
    fn test_manager_login_and_query() {
        let (_clock, manager) = create_manager();
        let session = manager.login("jamie@university.edu", false).unwrap();

        assert!(session.token.starts_with("auth_"));
        assert!(manager.is_logged_in(&session.token));
        assert_eq!(
            manager.current_user(&session.token),
            Some("jamie@university.edu".to_string())
        );
        assert!(!manager.is_logged_in("auth_unknown"));
    }

    #[test]
    fn test_manager_expiry_and_extend() {
        let (clock, manager) = create_manager();
        let session = manager.login("jamie@university.edu", false).unwrap();

        clock.advance(Duration::minutes(20));
        let extended = manager.extend(&session.token, Duration::minutes(60)).unwrap();
        assert_eq!(extended.expires_at, manager.now() + Duration::minutes(60));

        clock.advance(Duration::minutes(61));
        assert!(!manager.is_logged_in(&session.token));
        assert_eq!(manager.state(&session.token).unwrap().label(), "expired");
        assert!(matches!(
            manager.extend(&session.token, Duration::minutes(30)),
            Err(SessionError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_manager_logout() {
        let (_clock, manager) = create_manager();
        let session = manager.login("jamie@university.edu", false).unwrap();

        manager.logout(&session.token).unwrap();

        assert!(!manager.is_logged_in(&session.token));
        assert_eq!(manager.state(&session.token).unwrap(), SessionState::Anonymous);
    }

    #[test]
    fn test_sweep_removes_only_dead_sessions() {
        let (clock, manager) = create_manager();
        let short = manager.login("alex@university.edu", false).unwrap();
        let long = manager.login("casey@university.edu", true).unwrap();

        clock.advance(Duration::hours(1));

        assert_eq!(manager.sweep_expired().unwrap(), 1);
        assert!(!manager.is_logged_in(&short.token));
        assert!(manager.is_logged_in(&long.token));
    }

    #[test]
    fn test_session_state_json_shape() {
        let json = serde_json::to_value(SessionState::Expired { user: "a@b.c".to_string() }).unwrap();
        assert_eq!(json["state"], "expired");
        assert_eq!(json["user"], "a@b.c");
    }
}
