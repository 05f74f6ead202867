//! Team entity and its id newtype

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assignment::AssignmentStatus;
use super::validation::{TeamValidationError, validate_team_name};
use crate::domain::person::{CoordinatorId, StudentId, SupervisorId};

/// Team identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(Uuid);

impl TeamId {
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

impl Default for TeamId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team entity
///
/// Holds identifier fields only; members are referenced by id, never by
/// live back-references. The composition validator guards every change to
/// the member set, so a committed team always has 1-5 members and a leader
/// drawn from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    /// Unique across all teams
    name: String,
    supervisor_id: SupervisorId,
    #[serde(skip_serializing_if = "Option::is_none")]
    coordinator_id: Option<CoordinatorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    team_leader_id: Option<StudentId>,
    assignment_status: AssignmentStatus,
    member_ids: Vec<StudentId>,
    /// Optimistic concurrency token, managed by the persistence gateway
    #[serde(default)]
    version: u64,
}

impl Team {
    pub fn new(
        name: impl Into<String>,
        supervisor_id: SupervisorId,
        coordinator_id: Option<CoordinatorId>,
        team_leader_id: Option<StudentId>,
    ) -> Result<Self, TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;

        Ok(Self {
            id: TeamId::new(),
            name,
            supervisor_id,
            coordinator_id,
            team_leader_id,
            assignment_status: AssignmentStatus::Pending,
            member_ids: Vec::new(),
            version: 0,
        })
    }

    // Getters

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supervisor_id(&self) -> SupervisorId {
        self.supervisor_id
    }

    pub fn coordinator_id(&self) -> Option<CoordinatorId> {
        self.coordinator_id
    }

    pub fn team_leader_id(&self) -> Option<StudentId> {
        self.team_leader_id
    }

    pub fn assignment_status(&self) -> AssignmentStatus {
        self.assignment_status
    }

    pub fn member_ids(&self) -> &[StudentId] {
        &self.member_ids
    }

    pub fn member_count(&self) -> usize {
        self.member_ids.len()
    }

    pub fn contains_member(&self, student_id: StudentId) -> bool {
        self.member_ids.contains(&student_id)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    // Mutators

    /// Add a student to the member set; ignored if already present
    pub fn add_member(&mut self, student_id: StudentId) {
        if !self.contains_member(student_id) {
            self.member_ids.push(student_id);
        }
    }

    /// Remove a student from the member set; returns whether it was present
    pub fn remove_member(&mut self, student_id: StudentId) -> bool {
        let before = self.member_ids.len();
        self.member_ids.retain(|id| *id != student_id);
        self.member_ids.len() < before
    }

    /// Unset the team leader; used when the leader leaves the team so the
    /// leader always stays an element of the member set
    pub fn clear_team_leader(&mut self) {
        self.team_leader_id = None;
    }

    pub fn set_assignment_status(&mut self, status: AssignmentStatus) {
        self.assignment_status = status;
    }

    /// Set the concurrency token; called by gateway implementations only
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}
