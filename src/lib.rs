//! Study Match - study group recommendation service
//!
//! Scores how well each study group fits a learner's profile, ranks the
//! candidates and keeps the ones worth recommending. Also carries the
//! session handling and group catalogue behind the HTTP API.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_match_score, Matcher};
pub use error::ApiError;
pub use models::{FindMatchesRequest, FindMatchesResponse, Group, LearnerProfile, ScoredGroup, ScoringWeights};
