use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Learner profile used as the left-hand side of every match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnerProfile {
    #[serde(default)]
    pub subjects: BTreeSet<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Availability tokens such as "Monday Evening"
    #[serde(default)]
    pub schedule: Vec<String>,
    #[serde(rename = "learningStyle", default)]
    pub learning_style: Option<String>,
}

impl LearnerProfile {
    /// Learning style, treating an empty label as unset
    pub fn style(&self) -> Option<&str> {
        self.learning_style.as_deref().filter(|style| !style.is_empty())
    }
}

/// Study group as stored by the group repository
///
/// Any `matchScore` present in incoming JSON is ignored; scores only
/// exist on [`ScoredGroup`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub topic: String,
    /// Free text, e.g. "Mondays and Wednesdays, 7-9pm"
    #[serde(default)]
    pub schedule: String,
    #[serde(rename = "learningStyle", default)]
    pub learning_style: Option<String>,
    #[serde(default)]
    pub members: BTreeSet<String>,
    #[serde(rename = "meetingLink", default, skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
}

impl Group {
    /// Learning style, treating an empty label as unset
    pub fn style(&self) -> Option<&str> {
        self.learning_style.as_deref().filter(|style| !style.is_empty())
    }
}

/// Group annotated with its compatibility score for one learner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredGroup {
    #[serde(flatten)]
    pub group: Group,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
}

/// Maximum points per criterion
///
/// The final score is the earned points normalized by the sum of these
/// maxima, so the defaults (summing to 100) map points straight to percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub subject: f64,
    pub topic: f64,
    pub schedule: f64,
    pub learning_style: f64,
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.subject + self.topic + self.schedule + self.learning_style
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            subject: 30.0,
            topic: 30.0,
            schedule: 25.0,
            learning_style: 15.0,
        }
    }
}

/// Public view of a registered learner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Learner {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub profile: LearnerProfile,
}
