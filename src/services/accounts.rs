use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

use crate::models::{Learner, LearnerProfile};

/// Errors that can occur with account operations
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User already exists with this email: {0}")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Account store unavailable")]
    Unavailable,
}

#[derive(Debug, Clone)]
struct Account {
    learner: Learner,
    password: String,
}

/// In-memory learner directory
///
/// Credentials are compared in plain text; this directory backs a
/// demonstration login and is not a security boundary.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, email: &str, name: &str, password: &str) -> Result<Learner, AccountError> {
        let key = normalize_email(email);
        let mut accounts = self.accounts.write().map_err(|_| AccountError::Unavailable)?;

        if accounts.contains_key(&key) {
            return Err(AccountError::AlreadyExists(key));
        }

        let learner = Learner {
            email: key.clone(),
            name: name.trim().to_string(),
            profile: LearnerProfile::default(),
        };

        accounts.insert(
            key,
            Account {
                learner: learner.clone(),
                password: password.to_string(),
            },
        );

        tracing::info!("Registered learner {}", learner.email);
        Ok(learner)
    }

    /// Learner for matching credentials, `None` otherwise
    pub fn authenticate(&self, email: &str, password: &str) -> Option<Learner> {
        let accounts = self.accounts.read().ok()?;
        accounts
            .get(&normalize_email(email))
            .filter(|account| account.password == password)
            .map(|account| account.learner.clone())
    }

    pub fn get(&self, email: &str) -> Option<Learner> {
        let accounts = self.accounts.read().ok()?;
        accounts
            .get(&normalize_email(email))
            .map(|account| account.learner.clone())
    }

    /// Replace a learner's profile wholesale
    pub fn update_profile(&self, email: &str, profile: LearnerProfile) -> Result<Learner, AccountError> {
        let key = normalize_email(email);
        let mut accounts = self.accounts.write().map_err(|_| AccountError::Unavailable)?;

        let account = accounts
            .get_mut(&key)
            .ok_or_else(|| AccountError::NotFound(key.clone()))?;
        account.learner.profile = profile;

        tracing::debug!("Updated profile for {}", key);
        Ok(account.learner.clone())
    }
}
