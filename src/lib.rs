//! SuperSee - Team composition and assignment coordination
//!
//! Core service for assigning students to fixed-size teams, attaching a
//! project to each team, and routing each team to a supervisor who accepts
//! or refuses the assignment. The HTTP/API layer consuming this crate is
//! responsible for authentication and for mapping [`DomainError`] kinds to
//! protocol responses.

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    Actor, AssignmentStatus, Capability, Coordinator, CoordinatorId, DomainError, Mutation,
    PersistenceGateway, Project, ProjectId, ProjectStatus, Role, Student, StudentId, Supervisor,
    SupervisorId, Team, TeamAction, TeamId, authorize,
};
pub use infrastructure::coordination::{CreateTeamRequest, TeamCoordinationService, TeamDetails};
pub use infrastructure::gateway::InMemoryGateway;
