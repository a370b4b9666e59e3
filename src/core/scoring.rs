use serde::Serialize;
use crate::models::{Group, LearnerProfile, ScoringWeights};
use crate::core::{
    criteria::{matches_subject, matches_topic, style_fit},
    schedule::calculate_schedule_points,
};

/// Points earned per criterion, before normalization
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub subject: f64,
    pub topic: f64,
    pub schedule: f64,
    pub learning_style: f64,
}

impl ScoreBreakdown {
    pub fn earned(&self) -> f64 {
        self.subject + self.topic + self.schedule + self.learning_style
    }
}

/// Per-criterion points for a learner/group pair
///
/// Each criterion is capped at its own maximum; overflow never spills
/// into another criterion.
pub fn score_breakdown(
    profile: &LearnerProfile,
    group: &Group,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let subject = if matches_subject(profile, group) { weights.subject } else { 0.0 };
    let topic = if matches_topic(profile, group) { weights.topic } else { 0.0 };
    let schedule = calculate_schedule_points(&profile.schedule, &group.schedule, weights.schedule);
    let learning_style = style_fit(profile, group).points(weights.learning_style);

    ScoreBreakdown {
        subject,
        topic,
        schedule,
        learning_style,
    }
}

/// Calculate the compatibility score (0-100) between a learner and a group
///
/// score = round(100 * earned / (subject + topic + schedule + learning_style))
///
/// The learning-style maximum stays in the denominator even when the
/// learner has no style set.
pub fn calculate_match_score(
    profile: &LearnerProfile,
    group: &Group,
    weights: &ScoringWeights,
) -> u8 {
    let max_points = weights.total();
    if max_points <= 0.0 {
        return 0;
    }

    let earned = score_breakdown(profile, group, weights).earned();
    let percent = (earned / max_points * 100.0).round();

    percent.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile(style: Option<&str>) -> LearnerProfile {
        LearnerProfile {
            subjects: ["Computer Science".to_string(), "Mathematics".to_string()]
                .into_iter()
                .collect(),
            topics: vec!["Data Structures".to_string(), "Calculus".to_string()],
            schedule: vec!["Monday Evening".to_string(), "Wednesday Morning".to_string()],
            learning_style: style.map(str::to_string),
        }
    }

    fn create_test_group(subject: &str, topic: &str, schedule: &str, style: Option<&str>) -> Group {
        Group {
            id: "1".to_string(),
            name: "Test Group".to_string(),
            subject: subject.to_string(),
            topic: topic.to_string(),
            schedule: schedule.to_string(),
            learning_style: style.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_breakdown() {
        let profile = create_test_profile(Some("Visual"));
        let group = create_test_group(
            "Computer Science",
            "Data Structures",
            "Monday evening and Wednesday morning",
            Some("Visual"),
        );

        let breakdown = score_breakdown(&profile, &group, &ScoringWeights::default());

        assert_eq!(breakdown.subject, 30.0);
        assert_eq!(breakdown.topic, 30.0);
        assert_eq!(breakdown.schedule, 10.0);
        assert_eq!(breakdown.learning_style, 15.0);
        assert_eq!(calculate_match_score(&profile, &group, &ScoringWeights::default()), 85);
    }

    #[test]
    fn test_unset_style_keeps_denominator() {
        let profile = create_test_profile(None);
        let group = create_test_group("Computer Science", "Data Structures", "", Some("Visual"));

        // 60 of 100, not 60 of 85
        assert_eq!(calculate_match_score(&profile, &group, &ScoringWeights::default()), 60);
    }

    #[test]
    fn test_partial_style_credit() {
        let group = create_test_group("Biology", "Genetics", "", Some("Group discussion"));

        let auditory = create_test_profile(Some("Auditory"));
        assert_eq!(calculate_match_score(&auditory, &group, &ScoringWeights::default()), 10);

        let kinesthetic = create_test_profile(Some("Kinesthetic"));
        assert_eq!(calculate_match_score(&kinesthetic, &group, &ScoringWeights::default()), 5);
    }

    #[test]
    fn test_custom_weights_normalize() {
        let weights = ScoringWeights {
            subject: 50.0,
            topic: 0.0,
            schedule: 0.0,
            learning_style: 0.0,
        };
        let profile = create_test_profile(None);
        let group = create_test_group("Mathematics", "", "", None);

        assert_eq!(calculate_match_score(&profile, &group, &weights), 100);
    }

    #[test]
    fn test_zero_weights_score_zero() {
        let weights = ScoringWeights {
            subject: 0.0,
            topic: 0.0,
            schedule: 0.0,
            learning_style: 0.0,
        };
        let profile = create_test_profile(Some("Visual"));
        let group = create_test_group("Mathematics", "Calculus", "Monday evening", Some("Visual"));

        assert_eq!(calculate_match_score(&profile, &group, &weights), 0);
    }
}
