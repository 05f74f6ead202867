//! Actor identity and the authorization guard
//!
//! Every operation takes an explicit [`Actor`] supplied by the calling
//! layer; the core never infers who is acting. [`authorize`] is a pure
//! predicate over (role, actor id, resource owner, action).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;
use super::person::SupervisorId;

/// Role of the acting user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Coordinator,
    Supervisor,
    Student,
}

impl Role {
    /// Check if this role can manage team composition (create, delete,
    /// add/remove/swap members) and view all teams
    pub fn can_manage_teams(&self) -> bool {
        matches!(self, Self::Admin | Self::Coordinator)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Coordinator => write!(f, "coordinator"),
            Self::Supervisor => write!(f, "supervisor"),
            Self::Student => write!(f, "student"),
        }
    }
}

/// Who is invoking an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: Uuid,
    role: Role,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Action an actor requests on a team resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamAction {
    CreateTeam,
    DeleteTeam,
    AddMember,
    RemoveMember,
    SwapMembers,
    ViewAllTeams,
    ViewSupervisorTeams,
    AcceptAssignment,
    RefuseAssignment,
}

impl TeamAction {
    fn describe(&self) -> &'static str {
        match self {
            Self::CreateTeam => "create teams",
            Self::DeleteTeam => "delete teams",
            Self::AddMember => "add members",
            Self::RemoveMember => "remove members",
            Self::SwapMembers => "swap members",
            Self::ViewAllTeams => "view all teams",
            Self::ViewSupervisorTeams => "view teams for this supervisor",
            Self::AcceptAssignment => "accept this assignment",
            Self::RefuseAssignment => "refuse this assignment",
        }
    }
}

/// Authorize `actor` to perform `action`.
///
/// `resource_owner` is the supervisor the action targets: the supervisor
/// whose teams are being queried, or the supervisor a team is assigned to.
/// It is ignored for coordinator-level actions.
pub fn authorize(
    actor: &Actor,
    action: TeamAction,
    resource_owner: Option<SupervisorId>,
) -> Result<(), DomainError> {
    let allowed = match action {
        TeamAction::CreateTeam
        | TeamAction::DeleteTeam
        | TeamAction::AddMember
        | TeamAction::RemoveMember
        | TeamAction::SwapMembers
        | TeamAction::ViewAllTeams => actor.role().can_manage_teams(),
        TeamAction::ViewSupervisorTeams
        | TeamAction::AcceptAssignment
        | TeamAction::RefuseAssignment => match actor.role() {
            Role::Admin => true,
            Role::Supervisor => resource_owner.is_some_and(|owner| owner.as_uuid() == actor.id()),
            _ => false,
        },
    };

    if allowed {
        Ok(())
    } else {
        Err(DomainError::authorization(format!(
            "Role '{}' is not allowed to {}",
            actor.role(),
            action.describe()
        )))
    }
}
