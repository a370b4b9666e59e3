use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Group, LearnerProfile};

/// Request to rank groups for a learner
///
/// Both fields are optional on the wire: a missing profile falls back to
/// the signed-in learner's stored profile, missing groups fall back to the
/// group repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[serde(default)]
    pub profile: Option<LearnerProfile>,
    #[serde(default)]
    pub groups: Option<Vec<Group>>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to create a new study group
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub topic: String,
    #[validate(length(min = 1))]
    pub schedule: String,
    #[serde(rename = "learningStyle", default)]
    pub learning_style: Option<String>,
}

/// Request to register a learner account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Request to sign in
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(rename = "rememberMe", default)]
    pub remember_me: bool,
}

/// Request to push the current session expiry forward
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExtendSessionRequest {
    #[validate(range(min = 1, max = 1440))]
    #[serde(rename = "additionalMinutes", default = "default_extension_minutes")]
    pub additional_minutes: u32,
}

fn default_extension_minutes() -> u32 {
    30
}
