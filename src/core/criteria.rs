use crate::models::{Group, LearnerProfile};

/// Group style and learner style pairs that earn partial credit
const COMPATIBLE_STYLES: [(&str, &str); 2] = [
    ("Group discussion", "Auditory"),
    ("Visual", "Reading/Writing"),
];

/// How a learner's style lines up with a group's
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFit {
    /// Learner has no style set
    Unset,
    Exact,
    Compatible,
    Different,
}

impl StyleFit {
    /// Points earned out of the learning-style maximum
    ///
    /// With the default maximum of 15 this is 15 / 10 / 5 / 0.
    pub fn points(self, max: f64) -> f64 {
        match self {
            StyleFit::Unset => 0.0,
            StyleFit::Exact => max,
            StyleFit::Compatible => max * 2.0 / 3.0,
            StyleFit::Different => max / 3.0,
        }
    }
}

/// Subject criterion: exact, case-sensitive membership
#[inline]
pub fn matches_subject(profile: &LearnerProfile, group: &Group) -> bool {
    profile.subjects.contains(&group.subject)
}

/// Topic criterion: any learner topic contained in the group topic or the
/// other way round, ignoring case. An empty topic is contained in every
/// topic.
#[inline]
pub fn matches_topic(profile: &LearnerProfile, group: &Group) -> bool {
    let group_topic = group.topic.to_lowercase();

    profile
        .topics
        .iter()
        .map(|topic| topic.to_lowercase())
        .any(|topic| group_topic.contains(&topic) || topic.contains(&group_topic))
}

/// Learning-style criterion
pub fn style_fit(profile: &LearnerProfile, group: &Group) -> StyleFit {
    let Some(learner_style) = profile.style() else {
        return StyleFit::Unset;
    };

    match group.style() {
        Some(group_style) if group_style == learner_style => StyleFit::Exact,
        Some(group_style)
            if COMPATIBLE_STYLES
                .iter()
                .any(|&(g, l)| g == group_style && l == learner_style) =>
        {
            StyleFit::Compatible
        }
        _ => StyleFit::Different,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(style: Option<&str>) -> LearnerProfile {
        LearnerProfile {
            subjects: ["Computer Science".to_string()].into_iter().collect(),
            topics: vec!["Data Structures".to_string()],
            schedule: vec![],
            learning_style: style.map(str::to_string),
        }
    }

    fn group(subject: &str, topic: &str, style: Option<&str>) -> Group {
        Group {
            subject: subject.to_string(),
            topic: topic.to_string(),
            learning_style: style.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_subject_is_case_sensitive() {
        let p = profile(None);
        assert!(matches_subject(&p, &group("Computer Science", "", None)));
        assert!(!matches_subject(&p, &group("computer science", "", None)));
    }

    #[test]
    fn test_topic_substring_either_direction() {
        let mut p = profile(None);
        assert!(matches_topic(&p, &group("", "Advanced data structures", None)));

        p.topics = vec!["Calculus II midterm prep".to_string()];
        assert!(matches_topic(&p, &group("", "calculus ii", None)));

        assert!(!matches_topic(&p, &group("", "Organic Chemistry", None)));
    }

    #[test]
    fn test_empty_topic_matches_anything() {
        let mut p = profile(None);
        assert!(matches_topic(&p, &group("", "", None)));

        p.topics = vec![String::new()];
        assert!(matches_topic(&p, &group("", "Optics", None)));

        p.topics.clear();
        assert!(!matches_topic(&p, &group("", "", None)));
    }

    #[test]
    fn test_topic_whitespace_is_significant() {
        let p = profile(None);
        assert!(!matches_topic(&p, &group("", "Data  Structures", None)));
        assert!(matches_topic(&p, &group("", "data structures ", None)));
    }

    #[test]
    fn test_style_points() {
        assert_eq!(StyleFit::Exact.points(15.0), 15.0);
        assert_eq!(StyleFit::Compatible.points(15.0), 10.0);
        assert_eq!(StyleFit::Different.points(15.0), 5.0);
        assert_eq!(StyleFit::Unset.points(15.0), 0.0);
    }

    #[test]
    fn test_style_fit() {
        assert_eq!(style_fit(&profile(None), &group("", "", Some("Visual"))), StyleFit::Unset);
        assert_eq!(style_fit(&profile(Some("Visual")), &group("", "", Some("Visual"))), StyleFit::Exact);
        assert_eq!(
            style_fit(&profile(Some("Auditory")), &group("", "", Some("Group discussion"))),
            StyleFit::Compatible
        );
        assert_eq!(
            style_fit(&profile(Some("Reading/Writing")), &group("", "", Some("Visual"))),
            StyleFit::Compatible
        );
        // pairs are directional
        assert_eq!(
            style_fit(&profile(Some("Visual")), &group("", "", Some("Reading/Writing"))),
            StyleFit::Different
        );
        assert_eq!(style_fit(&profile(Some("Visual")), &group("", "", None)), StyleFit::Different);
    }
}
