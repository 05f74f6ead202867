//! Project entity
//!
//! Exactly one project per team, created together with its team and
//! destroyed with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::team::TeamId;

/// Project identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Create a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Project entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    title: String,
    description: String,
    deadline: DateTime<Utc>,
    status: ProjectStatus,
    /// The team this project belongs to (1:1, same lifetime)
    team_id: TeamId,
    /// Optimistic concurrency token, managed by the persistence gateway
    #[serde(default)]
    version: u64,
}

impl Project {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: DateTime<Utc>,
        team_id: TeamId,
    ) -> Self {
        Self {
            id: ProjectId::new(),
            title: title.into(),
            description: description.into(),
            deadline,
            status: ProjectStatus::NotStarted,
            team_id,
            version: 0,
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }

    /// Set the concurrency token; called by gateway implementations only
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}
