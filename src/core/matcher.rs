use crate::models::{Group, LearnerProfile, ScoredGroup, ScoringWeights};
use crate::core::scoring::calculate_match_score;

/// Groups scoring below this are not recommended
pub const DEFAULT_MIN_SCORE: u8 = 40;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredGroup>,
    pub total_candidates: usize,
}

/// Ranks candidate groups for a learner
///
/// # Pipeline Stages
/// 1. Score every group against the profile
/// 2. Stable sort by score, highest first
/// 3. Drop groups below the minimum score
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    min_score: u8,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, min_score: u8) -> Self {
        Self { weights, min_score }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_MIN_SCORE)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn min_score(&self) -> u8 {
        self.min_score
    }

    /// Compatibility score for a single group
    pub fn score(&self, profile: &LearnerProfile, group: &Group) -> u8 {
        calculate_match_score(profile, group, &self.weights)
    }

    /// Find the groups worth recommending to a learner
    ///
    /// Groups with equal scores keep their input order. The input slice is
    /// left untouched.
    pub fn find_matches(&self, profile: &LearnerProfile, groups: &[Group]) -> MatchResult {
        let total_candidates = groups.len();

        let mut scored: Vec<ScoredGroup> = groups
            .iter()
            .map(|group| ScoredGroup {
                match_score: self.score(profile, group),
                group: group.clone(),
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        scored.retain(|scored| scored.match_score >= self.min_score);

        tracing::debug!(
            "Ranked {} groups, {} at or above {}",
            total_candidates,
            scored.len(),
            self.min_score
        );

        MatchResult {
            matches: scored,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_group(id: &str, subject: &str, topic: &str, schedule: &str, style: &str) -> Group {
        Group {
            id: id.to_string(),
            name: format!("Group {}", id),
            subject: subject.to_string(),
            topic: topic.to_string(),
            schedule: schedule.to_string(),
            learning_style: Some(style.to_string()),
            members: Default::default(),
            meeting_link: None,
        }
    }

    fn create_profile() -> LearnerProfile {
        LearnerProfile {
            subjects: ["Computer Science".to_string(), "Mathematics".to_string()]
                .into_iter()
                .collect(),
            topics: vec![
                "Data Structures".to_string(),
                "Algorithms".to_string(),
                "Calculus".to_string(),
            ],
            schedule: vec![
                "Monday Evening".to_string(),
                "Tuesday Evening".to_string(),
                "Wednesday Morning".to_string(),
                "Friday Afternoon".to_string(),
            ],
            learning_style: Some("Visual".to_string()),
        }
    }

    #[test]
    fn test_find_matches_basic() {
        let matcher = Matcher::with_default_weights();
        let groups = vec![
            create_group("1", "Computer Science", "Data Structures", "Mondays and Wednesdays, 7-9pm", "Visual"),
            create_group("2", "Chemistry", "Organic Chemistry", "Tuesdays, 6-8pm", "Group discussion"),
            create_group("3", "Mathematics", "Calculus II", "Fridays, 2-4pm", "Reading/Writing"),
        ];

        let result = matcher.find_matches(&create_profile(), &groups);

        assert_eq!(result.total_candidates, 3);
        let ids: Vec<&str> = result.matches.iter().map(|m| m.group.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(result.matches[0].match_score, 79);
        assert_eq!(result.matches[1].match_score, 67);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let matcher = Matcher::with_default_weights();
        let groups = vec![
            create_group("a", "Chemistry", "Organic Chemistry", "Tuesdays", "Visual"),
            create_group("b", "Computer Science", "Algorithms", "Monday evening", "Visual"),
        ];
        let before = groups.clone();

        let _ = matcher.find_matches(&create_profile(), &groups);

        assert_eq!(groups, before);
    }

    #[test]
    fn test_custom_threshold() {
        let matcher = Matcher::new(ScoringWeights::default(), 80);
        let groups = vec![create_group(
            "1",
            "Computer Science",
            "Data Structures",
            "Mondays and Wednesdays, 7-9pm",
            "Visual",
        )];

        let result = matcher.find_matches(&create_profile(), &groups);

        assert!(result.matches.is_empty());
        assert_eq!(result.total_candidates, 1);
    }

    #[test]
    fn test_empty_candidates() {
        let matcher = Matcher::default();
        let result = matcher.find_matches(&create_profile(), &[]);

        assert!(result.matches.is_empty());
        assert_eq!(result.total_candidates, 0);
    }
}
