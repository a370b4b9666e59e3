// Core algorithm exports
pub mod criteria;
pub mod matcher;
pub mod schedule;
pub mod scoring;

pub use criteria::{matches_subject, matches_topic, style_fit, StyleFit};
pub use matcher::{Matcher, MatchResult, DEFAULT_MIN_SCORE};
pub use schedule::{calculate_schedule_points, AvailabilitySlot, Day, TimeOfDay};
pub use scoring::{calculate_match_score, score_breakdown, ScoreBreakdown};
