//! Persistence gateway contract
//!
//! The coordination service reads through typed lookups and writes through
//! one atomic `commit` of a mutation batch. Implementations must apply the
//! whole batch or none of it, and must reject batches built from stale
//! reads so that two invocations racing on the same team or student cannot
//! both commit.

use std::fmt::Debug;

use async_trait::async_trait;

use super::error::DomainError;
use super::person::{Student, StudentId, Supervisor, SupervisorId};
use super::project::{Project, ProjectId};
use super::team::{Team, TeamId};

/// One durable change, applied as part of an atomic batch
#[derive(Debug, Clone)]
pub enum Mutation {
    UpsertTeam(Team),
    UpsertStudent(Student),
    UpsertProject(Project),
    DeleteTeam(TeamId),
    DeleteProject(ProjectId),
}

/// Lookup and durable-write primitives the coordination service depends on
#[async_trait]
pub trait PersistenceGateway: Send + Sync + Debug {
    /// Find a team by id
    async fn find_team(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// Find a team by its unique name
    async fn find_team_by_name(&self, name: &str) -> Result<Option<Team>, DomainError>;

    /// List every team
    async fn list_teams(&self) -> Result<Vec<Team>, DomainError>;

    /// List the teams assigned to one supervisor
    async fn list_teams_for_supervisor(
        &self,
        supervisor_id: SupervisorId,
    ) -> Result<Vec<Team>, DomainError>;

    /// Find a student by id
    async fn find_student(&self, id: StudentId) -> Result<Option<Student>, DomainError>;

    /// Resolve a batch of student ids; missing ids are silently absent from
    /// the result
    async fn list_students(&self, ids: &[StudentId]) -> Result<Vec<Student>, DomainError>;

    /// List students that currently belong to no team
    async fn list_unassigned_students(&self) -> Result<Vec<Student>, DomainError>;

    /// Find a supervisor by id
    async fn find_supervisor(&self, id: SupervisorId) -> Result<Option<Supervisor>, DomainError>;

    /// Find the project owned by a team
    async fn find_project_for_team(&self, team_id: TeamId) -> Result<Option<Project>, DomainError>;

    /// Apply a batch of mutations atomically.
    ///
    /// Each upserted entity carries the version it was read at (0 for fresh
    /// records); a version mismatch on any mutation fails the whole batch
    /// with [`DomainError::Conflict`] and leaves every record untouched.
    /// On success every upserted record is stored at its carried version
    /// plus one, so callers can derive the committed version without a
    /// re-read.
    async fn commit(&self, mutations: Vec<Mutation>) -> Result<(), DomainError>;
}
