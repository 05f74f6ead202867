//! Person entities and their id newtypes

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{PersonValidationError, validate_contact, validate_display_name};
use crate::domain::team::TeamId;

/// Coordinator identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinatorId(Uuid);

impl CoordinatorId {
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

impl Default for CoordinatorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CoordinatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supervisor identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupervisorId(Uuid);

impl SupervisorId {
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

impl Default for SupervisorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SupervisorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Student identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(Uuid);

impl StudentId {
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

impl Default for StudentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named capability tag owned by a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    name: String,
}

impl Capability {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Coordinator entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinator {
    id: CoordinatorId,
    name: String,
    contact: String,
    /// Opaque pre-hashed credential - never exposed in serialization
    #[serde(skip_serializing)]
    #[serde(default)]
    password_hash: String,
}

impl Coordinator {
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, PersonValidationError> {
        let name = name.into();
        let contact = contact.into();
        validate_display_name(&name)?;
        validate_contact(&contact)?;

        Ok(Self {
            id: CoordinatorId::new(),
            name,
            contact,
            password_hash: password_hash.into(),
        })
    }

    pub fn id(&self) -> CoordinatorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

/// Supervisor entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supervisor {
    id: SupervisorId,
    name: String,
    contact: String,
    /// Opaque pre-hashed credential - never exposed in serialization
    #[serde(skip_serializing)]
    #[serde(default)]
    password_hash: String,
    /// Coordinator this supervisor reports to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    coordinator_id: Option<CoordinatorId>,
}

impl Supervisor {
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        password_hash: impl Into<String>,
        coordinator_id: Option<CoordinatorId>,
    ) -> Result<Self, PersonValidationError> {
        let name = name.into();
        let contact = contact.into();
        validate_display_name(&name)?;
        validate_contact(&contact)?;

        Ok(Self {
            id: SupervisorId::new(),
            name,
            contact,
            password_hash: password_hash.into(),
            coordinator_id,
        })
    }

    pub fn id(&self) -> SupervisorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn coordinator_id(&self) -> Option<CoordinatorId> {
        self.coordinator_id
    }
}

/// Student entity
///
/// `team_id` is the single back-reference a student holds; it always
/// matches the member set of the team it points at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    id: StudentId,
    name: String,
    contact: String,
    /// Opaque pre-hashed credential - never exposed in serialization
    #[serde(skip_serializing)]
    #[serde(default)]
    password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    team_id: Option<TeamId>,
    #[serde(default)]
    capabilities: Vec<Capability>,
    /// Optimistic concurrency token, managed by the persistence gateway
    #[serde(default)]
    version: u64,
}

impl Student {
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, PersonValidationError> {
        let name = name.into();
        let contact = contact.into();
        validate_display_name(&name)?;
        validate_contact(&contact)?;

        Ok(Self {
            id: StudentId::new(),
            name,
            contact,
            password_hash: password_hash.into(),
            team_id: None,
            capabilities: Vec::new(),
            version: 0,
        })
    }

    /// Add a capability tag (builder pattern)
    pub fn with_capability(mut self, name: impl Into<String>) -> Self {
        self.capabilities.push(Capability::new(name));
        self
    }

    // Getters

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn is_assigned(&self) -> bool {
        self.team_id.is_some()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    // Mutators

    /// Point this student at a team
    pub fn set_team(&mut self, team_id: TeamId) {
        self.team_id = Some(team_id);
    }

    /// Detach this student from its team
    pub fn clear_team(&mut self) {
        self.team_id = None;
    }

    /// Set the concurrency token; called by gateway implementations only
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}
