use std::sync::RwLock;
use thiserror::Error;

use crate::models::Group;

/// Errors that can occur with group storage
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Repository unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Group not found: {0}")]
    NotFound(String),
}

/// Fields supplied when creating a group
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub name: String,
    pub subject: String,
    pub topic: String,
    pub schedule: String,
    pub learning_style: Option<String>,
    pub creator: String,
}

/// Group storage; the matcher only ever reads from it
pub trait GroupRepository: Send + Sync {
    fn list_groups(&self) -> Result<Vec<Group>, RepositoryError>;
    fn create_group(&self, fields: NewGroup) -> Result<Group, RepositoryError>;
    /// Add a member to a group; joining twice is a no-op
    fn join_group(&self, id: &str, email: &str) -> Result<Group, RepositoryError>;
    /// Groups the learner belongs to, in catalogue order
    fn groups_for(&self, email: &str) -> Result<Vec<Group>, RepositoryError>;
}

/// Video room for a group, named after the group without whitespace
pub fn meeting_link(name: &str) -> String {
    let room: String = name.split_whitespace().collect();
    format!("https://meet.jit.si/{}", room)
}

/// Process-local group storage, insertion ordered
#[derive(Debug, Default)]
pub struct InMemoryGroupRepository {
    groups: RwLock<Vec<Group>>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_groups(groups: Vec<Group>) -> Self {
        Self {
            groups: RwLock::new(groups),
        }
    }

    /// Repository preloaded with a few sample groups
    pub fn seeded() -> Self {
        let sample = |id: &str, name: &str, members: &[&str], subject: &str, topic: &str, schedule: &str, style: &str| Group {
            id: id.to_string(),
            name: name.to_string(),
            subject: subject.to_string(),
            topic: topic.to_string(),
            schedule: schedule.to_string(),
            learning_style: Some(style.to_string()),
            members: members.iter().map(|m| m.to_string()).collect(),
            meeting_link: Some(meeting_link(name)),
        };

        Self::with_groups(vec![
            sample(
                "1",
                "Data Structures Study Group",
                &["alex@university.edu", "jamie@university.edu"],
                "Computer Science",
                "Data Structures",
                "Mondays and Wednesdays, 7-9pm",
                "Visual",
            ),
            sample(
                "2",
                "Organic Chemistry",
                &["taylor@university.edu", "jordan@university.edu"],
                "Chemistry",
                "Organic Chemistry",
                "Tuesdays, 6-8pm",
                "Group discussion",
            ),
            sample(
                "3",
                "Calculus II Group",
                &["casey@university.edu"],
                "Mathematics",
                "Calculus II",
                "Fridays, 2-4pm",
                "Reading/Writing",
            ),
            sample(
                "4",
                "Algorithm Design",
                &["riley@university.edu", "quinn@university.edu"],
                "Computer Science",
                "Algorithms",
                "Tuesday and Thursday evenings",
                "Kinesthetic",
            ),
        ])
    }
}

impl GroupRepository for InMemoryGroupRepository {
    fn list_groups(&self) -> Result<Vec<Group>, RepositoryError> {
        let groups = self
            .groups
            .read()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))?;
        Ok(groups.clone())
    }

    fn create_group(&self, fields: NewGroup) -> Result<Group, RepositoryError> {
        let name = fields.name.trim();
        if name.is_empty() {
            return Err(RepositoryError::InvalidInput("group name is required".to_string()));
        }

        let group = Group {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            subject: fields.subject,
            topic: fields.topic,
            schedule: fields.schedule,
            learning_style: fields.learning_style,
            members: [fields.creator].into_iter().collect(),
            meeting_link: Some(meeting_link(name)),
        };

        let mut groups = self
            .groups
            .write()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))?;
        groups.push(group.clone());

        tracing::info!("Created group {} ({})", group.name, group.id);
        Ok(group)
    }

    fn join_group(&self, id: &str, email: &str) -> Result<Group, RepositoryError> {
        let mut groups = self
            .groups
            .write()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))?;

        let group = groups
            .iter_mut()
            .find(|group| group.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        if group.members.insert(email.to_string()) {
            tracing::info!("{} joined group {} ({})", email, group.name, group.id);
        }

        Ok(group.clone())
    }

    fn groups_for(&self, email: &str) -> Result<Vec<Group>, RepositoryError> {
        let groups = self
            .groups
            .read()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))?;

        Ok(groups
            .iter()
            .filter(|group| group.members.contains(email))
            .cloned()
            .collect())
    }
}
