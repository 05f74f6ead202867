//! Domain layer - Core business logic and entities

pub mod actor;
pub mod error;
pub mod gateway;
pub mod person;
pub mod project;
pub mod team;

pub use actor::{Actor, Role, TeamAction, authorize};
pub use error::DomainError;
pub use gateway::{Mutation, PersistenceGateway};
pub use person::{
    Capability, Coordinator, CoordinatorId, PersonValidationError, Student, StudentId, Supervisor,
    SupervisorId,
};
pub use project::{Project, ProjectId, ProjectStatus};
pub use team::{
    AssignmentStatus, CompositionError, MAX_TEAM_SIZE, MIN_TEAM_SIZE, Team, TeamId,
    TeamValidationError, TransitionError, validate_add_member, validate_create,
    validate_remove_member, validate_swap, validate_team_name,
};
