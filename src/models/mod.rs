// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Group, Learner, LearnerProfile, ScoredGroup, ScoringWeights};
pub use requests::{CreateGroupRequest, ExtendSessionRequest, FindMatchesRequest, LoginRequest, RegisterRequest};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse, LoginResponse, SessionResponse};
