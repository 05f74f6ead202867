//! In-memory persistence gateway
//!
//! Thread-safe reference implementation backed by `RwLock`-guarded maps.
//! Commits are validated and applied under one write lock, which gives the
//! all-or-nothing and stale-read-rejection guarantees of the gateway
//! contract. Data is lost when the process terminates.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::person::{Student, StudentId, Supervisor, SupervisorId};
use crate::domain::project::{Project, ProjectId};
use crate::domain::team::{Team, TeamId};
use crate::domain::{DomainError, Mutation, PersistenceGateway};

#[derive(Debug, Default)]
struct State {
    supervisors: HashMap<SupervisorId, Supervisor>,
    students: HashMap<StudentId, Student>,
    teams: HashMap<TeamId, Team>,
    projects: HashMap<ProjectId, Project>,
}

/// In-memory implementation of [`PersistenceGateway`]
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    state: RwLock<State>,
}

impl InMemoryGateway {
    /// Creates a new empty gateway
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a supervisor (builder pattern)
    pub fn with_supervisor(self, supervisor: Supervisor) -> Self {
        {
            let mut state = self.state.write().unwrap();
            state.supervisors.insert(supervisor.id(), supervisor);
        }
        self
    }

    /// Seed a student (builder pattern)
    pub fn with_student(self, mut student: Student) -> Self {
        {
            let mut state = self.state.write().unwrap();
            student.set_version(1);
            state.students.insert(student.id(), student);
        }
        self
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>, DomainError> {
        self.state
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>, DomainError> {
        self.state
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

/// Version a mutation must have been read at for the commit to be valid
fn expected_version(state: &State, mutation: &Mutation) -> Option<u64> {
    match mutation {
        Mutation::UpsertTeam(team) => {
            Some(state.teams.get(&team.id()).map_or(0, Team::version))
        }
        Mutation::UpsertStudent(student) => {
            Some(state.students.get(&student.id()).map_or(0, Student::version))
        }
        Mutation::UpsertProject(project) => {
            Some(state.projects.get(&project.id()).map_or(0, Project::version))
        }
        Mutation::DeleteTeam(_) | Mutation::DeleteProject(_) => None,
    }
}

fn mutation_version(mutation: &Mutation) -> Option<u64> {
    match mutation {
        Mutation::UpsertTeam(team) => Some(team.version()),
        Mutation::UpsertStudent(student) => Some(student.version()),
        Mutation::UpsertProject(project) => Some(project.version()),
        Mutation::DeleteTeam(_) | Mutation::DeleteProject(_) => None,
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn find_team(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        Ok(self.read()?.teams.get(&id).cloned())
    }

    async fn find_team_by_name(&self, name: &str) -> Result<Option<Team>, DomainError> {
        Ok(self
            .read()?
            .teams
            .values()
            .find(|team| team.name() == name)
            .cloned())
    }

    async fn list_teams(&self) -> Result<Vec<Team>, DomainError> {
        let mut teams: Vec<Team> = self.read()?.teams.values().cloned().collect();
        teams.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(teams)
    }

    async fn list_teams_for_supervisor(
        &self,
        supervisor_id: SupervisorId,
    ) -> Result<Vec<Team>, DomainError> {
        let mut teams: Vec<Team> = self
            .read()?
            .teams
            .values()
            .filter(|team| team.supervisor_id() == supervisor_id)
            .cloned()
            .collect();
        teams.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(teams)
    }

    async fn find_student(&self, id: StudentId) -> Result<Option<Student>, DomainError> {
        Ok(self.read()?.students.get(&id).cloned())
    }

    async fn list_students(&self, ids: &[StudentId]) -> Result<Vec<Student>, DomainError> {
        let state = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.students.get(id).cloned())
            .collect())
    }

    async fn list_unassigned_students(&self) -> Result<Vec<Student>, DomainError> {
        let mut students: Vec<Student> = self
            .read()?
            .students
            .values()
            .filter(|student| !student.is_assigned())
            .cloned()
            .collect();
        students.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(students)
    }

    async fn find_supervisor(&self, id: SupervisorId) -> Result<Option<Supervisor>, DomainError> {
        Ok(self.read()?.supervisors.get(&id).cloned())
    }

    async fn find_project_for_team(&self, team_id: TeamId) -> Result<Option<Project>, DomainError> {
        Ok(self
            .read()?
            .projects
            .values()
            .find(|project| project.team_id() == team_id)
            .cloned())
    }

    async fn commit(&self, mutations: Vec<Mutation>) -> Result<(), DomainError> {
        let mut state = self.write()?;

        // Validation phase: every upsert must carry the version it was read
        // at, otherwise another commit got there first.
        for mutation in &mutations {
            let Some(actual) = mutation_version(mutation) else {
                continue;
            };
            let expected = expected_version(&state, mutation).unwrap_or(0);

            if expected != actual {
                return Err(DomainError::conflict(format!(
                    "Concurrent write detected: record was at version {expected}, batch was read at version {actual}"
                )));
            }
        }

        // Apply phase: nothing can fail past this point.
        for mutation in mutations {
            match mutation {
                Mutation::UpsertTeam(mut team) => {
                    team.set_version(team.version() + 1);
                    state.teams.insert(team.id(), team);
                }
                Mutation::UpsertStudent(mut student) => {
                    student.set_version(student.version() + 1);
                    state.students.insert(student.id(), student);
                }
                Mutation::UpsertProject(mut project) => {
                    project.set_version(project.version() + 1);
                    state.projects.insert(project.id(), project);
                }
                Mutation::DeleteTeam(id) => {
                    state.teams.remove(&id);
                }
                Mutation::DeleteProject(id) => {
                    state.projects.remove(&id);
                }
            }
        }

        Ok(())
    }
}
