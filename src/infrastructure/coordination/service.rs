//! Coordination service for team composition and assignment
//!
//! Orchestrates the authorization guard, the composition validator and the
//! assignment state machine against the persistence gateway. Every public
//! operation is read-validate-write atomic: no write is issued before
//! authorization and validation pass, and all writes of one operation go
//! into a single gateway commit.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::person::{Student, StudentId, SupervisorId};
use crate::domain::project::Project;
use crate::domain::team::{
    AssignmentStatus, Team, TeamId, validate_add_member, validate_create, validate_remove_member,
    validate_swap,
};
use crate::domain::{Actor, DomainError, Mutation, PersistenceGateway, TeamAction, authorize};

/// Request for creating a team together with its project
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub supervisor_id: SupervisorId,
    pub team_name: String,
    pub project_title: String,
    pub project_description: String,
    pub deadline: DateTime<Utc>,
    pub student_ids: Vec<StudentId>,
    pub team_leader_id: StudentId,
}

/// A team with its project and resolved members
#[derive(Debug, Clone, Serialize)]
pub struct TeamDetails {
    pub team: Team,
    pub project: Option<Project>,
    pub members: Vec<Student>,
}

/// Service implementing the team composition and assignment operations
#[derive(Debug)]
pub struct TeamCoordinationService<G: PersistenceGateway> {
    gateway: Arc<G>,
}

impl<G: PersistenceGateway> TeamCoordinationService<G> {
    /// Create a new coordination service
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Create a team and its project in one atomic operation.
    ///
    /// The team starts `Pending`, inherits the supervisor's coordinator,
    /// and every member's team back-reference is set in the same commit.
    pub async fn create_team_with_project(
        &self,
        actor: &Actor,
        request: CreateTeamRequest,
    ) -> Result<TeamDetails, DomainError> {
        info!(
            team_name = %request.team_name,
            supervisor_id = %request.supervisor_id,
            members = request.student_ids.len(),
            "Creating team with project"
        );

        authorize(actor, TeamAction::CreateTeam, None)?;

        let supervisor = self
            .gateway
            .find_supervisor(request.supervisor_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Supervisor not found"))?;

        let existing_names: Vec<String> = self
            .gateway
            .list_teams()
            .await?
            .iter()
            .map(|team| team.name().to_string())
            .collect();
        let students = self.gateway.list_students(&request.student_ids).await?;

        validate_create(
            &request.student_ids,
            request.team_leader_id,
            &request.team_name,
            &existing_names,
            &students,
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        let mut team = Team::new(
            &request.team_name,
            supervisor.id(),
            supervisor.coordinator_id(),
            Some(request.team_leader_id),
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        let mut members = Vec::with_capacity(students.len());

        for mut student in students {
            team.add_member(student.id());
            student.set_team(team.id());
            members.push(student);
        }

        let mut project = Project::new(
            &request.project_title,
            &request.project_description,
            request.deadline,
            team.id(),
        );

        let mut mutations = vec![
            Mutation::UpsertTeam(team.clone()),
            Mutation::UpsertProject(project.clone()),
        ];
        mutations.extend(members.iter().cloned().map(Mutation::UpsertStudent));
        self.gateway.commit(mutations).await?;

        // Hand back the committed versions so the caller can feed the
        // returned entities straight into the next mutation.
        team.set_version(team.version() + 1);
        project.set_version(project.version() + 1);
        for member in &mut members {
            member.set_version(member.version() + 1);
        }

        Ok(TeamDetails {
            team,
            project: Some(project),
            members,
        })
    }

    /// Add an unassigned student to a team with room left
    pub async fn add_student_to_team(
        &self,
        actor: &Actor,
        team_id: TeamId,
        student_id: StudentId,
    ) -> Result<(), DomainError> {
        info!(team_id = %team_id, student_id = %student_id, "Adding student to team");

        authorize(actor, TeamAction::AddMember, None)?;

        let mut team = self
            .gateway
            .find_team(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team not found"))?;

        let mut student = self
            .gateway
            .find_student(student_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Student not found"))?;

        validate_add_member(team.member_count(), !student.is_assigned())
            .map_err(|e| DomainError::validation(e.to_string()))?;

        team.add_member(student.id());
        student.set_team(team.id());

        self.gateway
            .commit(vec![
                Mutation::UpsertTeam(team),
                Mutation::UpsertStudent(student),
            ])
            .await
    }

    /// Remove a member from a team that stays above the minimum size
    pub async fn remove_student_from_team(
        &self,
        actor: &Actor,
        team_id: TeamId,
        student_id: StudentId,
    ) -> Result<(), DomainError> {
        info!(team_id = %team_id, student_id = %student_id, "Removing student from team");

        authorize(actor, TeamAction::RemoveMember, None)?;

        let mut team = self
            .gateway
            .find_team(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team not found"))?;

        validate_remove_member(team.member_count(), team.contains_member(student_id))
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let mut student = self
            .gateway
            .find_student(student_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Student not found"))?;

        team.remove_member(student_id);

        if team.team_leader_id() == Some(student_id) {
            team.clear_team_leader();
        }

        student.clear_team();

        self.gateway
            .commit(vec![
                Mutation::UpsertTeam(team),
                Mutation::UpsertStudent(student),
            ])
            .await
    }

    /// Delete a team, its project, and the team back-reference of every
    /// former member, in one commit
    pub async fn delete_team(&self, actor: &Actor, team_id: TeamId) -> Result<(), DomainError> {
        info!(team_id = %team_id, "Deleting team");

        authorize(actor, TeamAction::DeleteTeam, None)?;

        let team = self
            .gateway
            .find_team(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team not found"))?;

        let project = self.gateway.find_project_for_team(team.id()).await?;
        let members = self.gateway.list_students(team.member_ids()).await?;

        let mut mutations = vec![Mutation::DeleteTeam(team.id())];

        if let Some(project) = project {
            mutations.push(Mutation::DeleteProject(project.id()));
        }

        for mut member in members {
            member.clear_team();
            mutations.push(Mutation::UpsertStudent(member));
        }

        self.gateway.commit(mutations).await
    }

    /// Exchange one member each between two teams.
    ///
    /// Both teams keep their size; both students' back-references move in
    /// the same commit. Swapping a team with itself is a membership-checked
    /// no-op.
    pub async fn swap_members_between_teams(
        &self,
        actor: &Actor,
        team1_id: TeamId,
        student1_id: StudentId,
        team2_id: TeamId,
        student2_id: StudentId,
    ) -> Result<(), DomainError> {
        info!(
            team1_id = %team1_id,
            student1_id = %student1_id,
            team2_id = %team2_id,
            student2_id = %student2_id,
            "Swapping members between teams"
        );

        authorize(actor, TeamAction::SwapMembers, None)?;

        let mut team1 = self
            .gateway
            .find_team(team1_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team 1 not found"))?;

        let mut team2 = self
            .gateway
            .find_team(team2_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team 2 not found"))?;

        validate_swap(
            team1.member_ids(),
            student1_id,
            team2.member_ids(),
            student2_id,
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        if team1_id == team2_id {
            return Ok(());
        }

        let mut student1 = self
            .gateway
            .find_student(student1_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Student 1 not found"))?;

        let mut student2 = self
            .gateway
            .find_student(student2_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Student 2 not found"))?;

        team1.remove_member(student1_id);
        team2.remove_member(student2_id);
        team1.add_member(student2_id);
        team2.add_member(student1_id);

        if team1.team_leader_id() == Some(student1_id) {
            team1.clear_team_leader();
        }
        if team2.team_leader_id() == Some(student2_id) {
            team2.clear_team_leader();
        }

        student1.set_team(team2.id());
        student2.set_team(team1.id());

        self.gateway
            .commit(vec![
                Mutation::UpsertTeam(team1),
                Mutation::UpsertTeam(team2),
                Mutation::UpsertStudent(student1),
                Mutation::UpsertStudent(student2),
            ])
            .await
    }

    /// List every team with its project and members
    pub async fn get_all_teams_with_details(
        &self,
        actor: &Actor,
    ) -> Result<Vec<TeamDetails>, DomainError> {
        debug!("Listing all teams with details");

        authorize(actor, TeamAction::ViewAllTeams, None)?;

        let teams = self.gateway.list_teams().await?;
        let mut details = Vec::with_capacity(teams.len());

        for team in teams {
            details.push(self.load_details(team).await?);
        }

        Ok(details)
    }

    /// List one supervisor's teams with project and members
    pub async fn get_teams_for_supervisor(
        &self,
        actor: &Actor,
        supervisor_id: SupervisorId,
    ) -> Result<Vec<TeamDetails>, DomainError> {
        debug!(supervisor_id = %supervisor_id, "Listing teams for supervisor");

        let supervisor = self
            .gateway
            .find_supervisor(supervisor_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Supervisor not found"))?;

        authorize(actor, TeamAction::ViewSupervisorTeams, Some(supervisor.id()))?;

        let teams = self
            .gateway
            .list_teams_for_supervisor(supervisor.id())
            .await?;
        let mut details = Vec::with_capacity(teams.len());

        for team in teams {
            details.push(self.load_details(team).await?);
        }

        Ok(details)
    }

    /// Accept a pending assignment
    pub async fn accept_assignment(
        &self,
        actor: &Actor,
        team_id: TeamId,
    ) -> Result<(), DomainError> {
        info!(team_id = %team_id, "Accepting assignment");
        self.decide_assignment(actor, team_id, AssignmentStatus::Accepted)
            .await
    }

    /// Refuse a pending assignment
    pub async fn refuse_assignment(
        &self,
        actor: &Actor,
        team_id: TeamId,
    ) -> Result<(), DomainError> {
        info!(team_id = %team_id, "Refusing assignment");
        self.decide_assignment(actor, team_id, AssignmentStatus::Refused)
            .await
    }

    /// List students that currently belong to no team
    pub async fn list_available_students(
        &self,
        actor: &Actor,
    ) -> Result<Vec<Student>, DomainError> {
        debug!("Listing available students");

        authorize(actor, TeamAction::ViewAllTeams, None)?;

        self.gateway.list_unassigned_students().await
    }

    async fn decide_assignment(
        &self,
        actor: &Actor,
        team_id: TeamId,
        target: AssignmentStatus,
    ) -> Result<(), DomainError> {
        let mut team = self
            .gateway
            .find_team(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team not found"))?;

        let action = if target == AssignmentStatus::Accepted {
            TeamAction::AcceptAssignment
        } else {
            TeamAction::RefuseAssignment
        };
        authorize(actor, action, Some(team.supervisor_id()))?;

        let next = team
            .assignment_status()
            .transition(target)
            .map_err(|e| DomainError::state_conflict(e.to_string()))?;
        team.set_assignment_status(next);

        self.gateway.commit(vec![Mutation::UpsertTeam(team)]).await
    }

    async fn load_details(&self, team: Team) -> Result<TeamDetails, DomainError> {
        let project = self.gateway.find_project_for_team(team.id()).await?;
        let members = self.gateway.list_students(team.member_ids()).await?;

        Ok(TeamDetails {
            team,
            project,
            members,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::person::{Coordinator, Supervisor};
    use crate::domain::project::ProjectStatus;
    use crate::domain::{Role, team::MAX_TEAM_SIZE};
    use crate::infrastructure::gateway::InMemoryGateway;
    use uuid::Uuid;

    struct Fixture {
        gateway: Arc<InMemoryGateway>,
        service: TeamCoordinationService<InMemoryGateway>,
        coordinator: Actor,
        supervisor_id: SupervisorId,
        student_ids: Vec<StudentId>,
    }

    fn fixture(student_count: usize) -> Fixture {
        let coordinator = Coordinator::new("Khaldoon", "khaldoon@example.com", "hash").unwrap();
        let supervisor = Supervisor::new(
            "Dr. Ahmed",
            "ahmed@example.com",
            "hash123",
            Some(coordinator.id()),
        )
        .unwrap();
        let supervisor_id = supervisor.id();

        let mut gateway = InMemoryGateway::new().with_supervisor(supervisor);
        let mut student_ids = Vec::with_capacity(student_count);

        for i in 0..student_count {
            let student = Student::new(
                format!("Student {i}"),
                format!("student{i}@example.com"),
                format!("hash-{i}"),
            )
            .unwrap();
            student_ids.push(student.id());
            gateway = gateway.with_student(student);
        }

        let gateway = Arc::new(gateway);

        Fixture {
            gateway: gateway.clone(),
            service: TeamCoordinationService::new(gateway),
            coordinator: Actor::new(Uuid::new_v4(), Role::Coordinator),
            supervisor_id,
            student_ids,
        }
    }

    fn create_request(fixture: &Fixture, name: &str, member_ids: Vec<StudentId>) -> CreateTeamRequest {
        CreateTeamRequest {
            supervisor_id: fixture.supervisor_id,
            team_name: name.to_string(),
            project_title: format!("{name} project"),
            project_description: "Capstone work".to_string(),
            deadline: Utc::now(),
            team_leader_id: member_ids[0],
            student_ids: member_ids,
        }
    }

    async fn create_team(fixture: &Fixture, name: &str, member_ids: Vec<StudentId>) -> TeamDetails {
        fixture
            .service
            .create_team_with_project(&fixture.coordinator, create_request(fixture, name, member_ids))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_team_with_project() {
        let fx = fixture(3);

        let details = create_team(&fx, "Alpha", fx.student_ids.clone()).await;

        assert_eq!(details.team.name(), "Alpha");
        assert!(details.team.assignment_status().is_pending());
        assert_eq!(details.team.member_count(), 3);
        assert_eq!(details.team.team_leader_id(), Some(fx.student_ids[0]));

        let project = details.project.as_ref().unwrap();
        assert_eq!(project.status(), ProjectStatus::NotStarted);
        assert_eq!(project.team_id(), details.team.id());

        // Committed state carries the membership back-references
        for id in &fx.student_ids {
            let student = fx.gateway.find_student(*id).await.unwrap().unwrap();
            assert_eq!(student.team_id(), Some(details.team.id()));
        }
    }

    #[tokio::test]
    async fn test_create_returns_committed_versions() {
        let fx = fixture(2);
        let details = create_team(&fx, "Alpha", fx.student_ids.clone()).await;

        let stored_team = fx.gateway.find_team(details.team.id()).await.unwrap().unwrap();
        assert_eq!(details.team.version(), stored_team.version());

        let stored_project = fx
            .gateway
            .find_project_for_team(details.team.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            details.project.as_ref().unwrap().version(),
            stored_project.version()
        );

        for member in &details.members {
            let stored = fx.gateway.find_student(member.id()).await.unwrap().unwrap();
            assert_eq!(member.version(), stored.version());
        }

        // The returned team can go straight into the next mutation without
        // a spurious conflict.
        fx.gateway
            .commit(vec![Mutation::UpsertTeam(details.team.clone())])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_team_inherits_supervisors_coordinator() {
        let fx = fixture(1);
        let details = create_team(&fx, "Alpha", fx.student_ids.clone()).await;

        assert_eq!(details.team.supervisor_id(), fx.supervisor_id);
        assert!(details.team.coordinator_id().is_some());
    }

    #[tokio::test]
    async fn test_create_team_with_zero_members() {
        let fx = fixture(0);
        let mut request = create_request(&fx, "Alpha", vec![StudentId::new()]);
        request.student_ids = Vec::new();

        let result = fx
            .service
            .create_team_with_project(&fx.coordinator, request)
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_team_with_six_members() {
        let fx = fixture(6);
        let result = fx
            .service
            .create_team_with_project(
                &fx.coordinator,
                create_request(&fx, "Alpha", fx.student_ids.clone()),
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_team_duplicate_name() {
        let fx = fixture(2);
        create_team(&fx, "Alpha", vec![fx.student_ids[0]]).await;

        let result = fx
            .service
            .create_team_with_project(
                &fx.coordinator,
                create_request(&fx, "Alpha", vec![fx.student_ids[1]]),
            )
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_team_leader_outside_team() {
        let fx = fixture(2);
        let mut request = create_request(&fx, "Alpha", vec![fx.student_ids[0]]);
        request.team_leader_id = fx.student_ids[1];

        let result = fx
            .service
            .create_team_with_project(&fx.coordinator, request)
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_team_with_duplicated_student() {
        let fx = fixture(1);
        let ids = vec![fx.student_ids[0], fx.student_ids[0]];

        let result = fx
            .service
            .create_team_with_project(&fx.coordinator, create_request(&fx, "Alpha", ids))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        // Nothing was committed for the rejected request
        assert!(fx.gateway.find_team_by_name("Alpha").await.unwrap().is_none());
        let student = fx
            .gateway
            .find_student(fx.student_ids[0])
            .await
            .unwrap()
            .unwrap();
        assert!(student.team_id().is_none());
    }

    #[tokio::test]
    async fn test_create_team_with_unknown_student() {
        let fx = fixture(1);
        let mut ids = fx.student_ids.clone();
        ids.push(StudentId::new());

        let result = fx
            .service
            .create_team_with_project(&fx.coordinator, create_request(&fx, "Alpha", ids))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_team_with_assigned_student() {
        let fx = fixture(2);
        create_team(&fx, "Alpha", vec![fx.student_ids[0]]).await;

        let result = fx
            .service
            .create_team_with_project(
                &fx.coordinator,
                create_request(&fx, "Beta", vec![fx.student_ids[0], fx.student_ids[1]]),
            )
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_team_unknown_supervisor() {
        let fx = fixture(1);
        let mut request = create_request(&fx, "Alpha", fx.student_ids.clone());
        request.supervisor_id = SupervisorId::new();

        let result = fx
            .service
            .create_team_with_project(&fx.coordinator, request)
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_team_denied_for_students_and_supervisors() {
        let fx = fixture(1);

        for role in [Role::Student, Role::Supervisor] {
            let actor = Actor::new(Uuid::new_v4(), role);
            let result = fx
                .service
                .create_team_with_project(&actor, create_request(&fx, "Alpha", fx.student_ids.clone()))
                .await;
            assert!(matches!(result, Err(DomainError::Authorization { .. })));
        }
    }

    #[tokio::test]
    async fn test_add_student_to_team() {
        let fx = fixture(2);
        let details = create_team(&fx, "Alpha", vec![fx.student_ids[0]]).await;

        fx.service
            .add_student_to_team(&fx.coordinator, details.team.id(), fx.student_ids[1])
            .await
            .unwrap();

        let team = fx.gateway.find_team(details.team.id()).await.unwrap().unwrap();
        assert_eq!(team.member_count(), 2);

        let student = fx
            .gateway
            .find_student(fx.student_ids[1])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(student.team_id(), Some(team.id()));
    }

    #[tokio::test]
    async fn test_add_student_to_full_team() {
        let fx = fixture(MAX_TEAM_SIZE + 1);
        let details = create_team(&fx, "Alpha", fx.student_ids[..MAX_TEAM_SIZE].to_vec()).await;

        let result = fx
            .service
            .add_student_to_team(&fx.coordinator, details.team.id(), fx.student_ids[MAX_TEAM_SIZE])
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_add_assigned_student() {
        let fx = fixture(2);
        let alpha = create_team(&fx, "Alpha", vec![fx.student_ids[0]]).await;
        create_team(&fx, "Beta", vec![fx.student_ids[1]]).await;

        let result = fx
            .service
            .add_student_to_team(&fx.coordinator, alpha.team.id(), fx.student_ids[1])
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_add_student_unknown_team() {
        let fx = fixture(1);
        let result = fx
            .service
            .add_student_to_team(&fx.coordinator, TeamId::new(), fx.student_ids[0])
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_student_from_team() {
        let fx = fixture(2);
        let details = create_team(&fx, "Alpha", fx.student_ids.clone()).await;

        fx.service
            .remove_student_from_team(&fx.coordinator, details.team.id(), fx.student_ids[1])
            .await
            .unwrap();

        let team = fx.gateway.find_team(details.team.id()).await.unwrap().unwrap();
        assert_eq!(team.member_count(), 1);

        let student = fx
            .gateway
            .find_student(fx.student_ids[1])
            .await
            .unwrap()
            .unwrap();
        assert!(student.team_id().is_none());
    }

    #[tokio::test]
    async fn test_remove_last_member() {
        let fx = fixture(1);
        let details = create_team(&fx, "Alpha", fx.student_ids.clone()).await;

        let result = fx
            .service
            .remove_student_from_team(&fx.coordinator, details.team.id(), fx.student_ids[0])
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_remove_non_member() {
        let fx = fixture(3);
        let details = create_team(&fx, "Alpha", fx.student_ids[..2].to_vec()).await;

        let result = fx
            .service
            .remove_student_from_team(&fx.coordinator, details.team.id(), fx.student_ids[2])
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_remove_leader_clears_leadership() {
        let fx = fixture(2);
        let details = create_team(&fx, "Alpha", fx.student_ids.clone()).await;
        assert_eq!(details.team.team_leader_id(), Some(fx.student_ids[0]));

        fx.service
            .remove_student_from_team(&fx.coordinator, details.team.id(), fx.student_ids[0])
            .await
            .unwrap();

        let team = fx.gateway.find_team(details.team.id()).await.unwrap().unwrap();
        assert!(team.team_leader_id().is_none());
    }

    #[tokio::test]
    async fn test_delete_team_cascades() {
        let fx = fixture(2);
        let details = create_team(&fx, "Alpha", fx.student_ids.clone()).await;
        let team_id = details.team.id();

        fx.service.delete_team(&fx.coordinator, team_id).await.unwrap();

        assert!(fx.gateway.find_team(team_id).await.unwrap().is_none());
        assert!(
            fx.gateway
                .find_project_for_team(team_id)
                .await
                .unwrap()
                .is_none()
        );

        for id in &fx.student_ids {
            let student = fx.gateway.find_student(*id).await.unwrap().unwrap();
            assert!(student.team_id().is_none());
        }
    }

    #[tokio::test]
    async fn test_delete_unknown_team() {
        let fx = fixture(0);
        let result = fx.service.delete_team(&fx.coordinator, TeamId::new()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_swap_members_between_teams() {
        let fx = fixture(4);
        let alpha = create_team(&fx, "Alpha", fx.student_ids[..2].to_vec()).await;
        let beta = create_team(&fx, "Beta", fx.student_ids[2..].to_vec()).await;

        fx.service
            .swap_members_between_teams(
                &fx.coordinator,
                alpha.team.id(),
                fx.student_ids[1],
                beta.team.id(),
                fx.student_ids[3],
            )
            .await
            .unwrap();

        let alpha_after = fx.gateway.find_team(alpha.team.id()).await.unwrap().unwrap();
        let beta_after = fx.gateway.find_team(beta.team.id()).await.unwrap().unwrap();

        assert_eq!(alpha_after.member_count(), 2);
        assert_eq!(beta_after.member_count(), 2);
        assert!(alpha_after.contains_member(fx.student_ids[3]));
        assert!(beta_after.contains_member(fx.student_ids[1]));

        let s1 = fx.gateway.find_student(fx.student_ids[1]).await.unwrap().unwrap();
        let s3 = fx.gateway.find_student(fx.student_ids[3]).await.unwrap().unwrap();
        assert_eq!(s1.team_id(), Some(beta.team.id()));
        assert_eq!(s3.team_id(), Some(alpha.team.id()));
    }

    #[tokio::test]
    async fn test_swap_with_non_member() {
        let fx = fixture(4);
        let alpha = create_team(&fx, "Alpha", fx.student_ids[..2].to_vec()).await;
        let beta = create_team(&fx, "Beta", fx.student_ids[2..].to_vec()).await;

        // student 2 belongs to Beta, not Alpha
        let result = fx
            .service
            .swap_members_between_teams(
                &fx.coordinator,
                alpha.team.id(),
                fx.student_ids[2],
                beta.team.id(),
                fx.student_ids[3],
            )
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_swap_with_missing_team() {
        let fx = fixture(2);
        let alpha = create_team(&fx, "Alpha", fx.student_ids.clone()).await;

        let result = fx
            .service
            .swap_members_between_teams(
                &fx.coordinator,
                alpha.team.id(),
                fx.student_ids[0],
                TeamId::new(),
                fx.student_ids[1],
            )
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_swap_within_same_team_is_noop() {
        let fx = fixture(2);
        let alpha = create_team(&fx, "Alpha", fx.student_ids.clone()).await;

        fx.service
            .swap_members_between_teams(
                &fx.coordinator,
                alpha.team.id(),
                fx.student_ids[0],
                alpha.team.id(),
                fx.student_ids[1],
            )
            .await
            .unwrap();

        let team = fx.gateway.find_team(alpha.team.id()).await.unwrap().unwrap();
        assert_eq!(team.member_count(), 2);
    }

    #[tokio::test]
    async fn test_accept_assignment() {
        let fx = fixture(1);
        let details = create_team(&fx, "Alpha", fx.student_ids.clone()).await;
        let supervisor = Actor::new(fx.supervisor_id.as_uuid(), Role::Supervisor);

        fx.service
            .accept_assignment(&supervisor, details.team.id())
            .await
            .unwrap();

        let team = fx.gateway.find_team(details.team.id()).await.unwrap().unwrap();
        assert_eq!(team.assignment_status(), AssignmentStatus::Accepted);
    }

    #[tokio::test]
    async fn test_refuse_assignment() {
        let fx = fixture(1);
        let details = create_team(&fx, "Alpha", fx.student_ids.clone()).await;
        let supervisor = Actor::new(fx.supervisor_id.as_uuid(), Role::Supervisor);

        fx.service
            .refuse_assignment(&supervisor, details.team.id())
            .await
            .unwrap();

        let team = fx.gateway.find_team(details.team.id()).await.unwrap().unwrap();
        assert_eq!(team.assignment_status(), AssignmentStatus::Refused);
    }

    #[tokio::test]
    async fn test_accept_twice_conflicts() {
        let fx = fixture(1);
        let details = create_team(&fx, "Alpha", fx.student_ids.clone()).await;
        let supervisor = Actor::new(fx.supervisor_id.as_uuid(), Role::Supervisor);

        fx.service
            .accept_assignment(&supervisor, details.team.id())
            .await
            .unwrap();

        let result = fx
            .service
            .accept_assignment(&supervisor, details.team.id())
            .await;
        assert!(matches!(result, Err(DomainError::StateConflict { .. })));

        let refuse = fx
            .service
            .refuse_assignment(&supervisor, details.team.id())
            .await;
        assert!(matches!(refuse, Err(DomainError::StateConflict { .. })));
    }

    #[tokio::test]
    async fn test_only_owning_supervisor_or_admin_decides() {
        let fx = fixture(1);
        let details = create_team(&fx, "Alpha", fx.student_ids.clone()).await;

        let stranger = Actor::new(Uuid::new_v4(), Role::Supervisor);
        let result = fx.service.accept_assignment(&stranger, details.team.id()).await;
        assert!(matches!(result, Err(DomainError::Authorization { .. })));

        let coordinator_refused = fx
            .service
            .accept_assignment(&fx.coordinator, details.team.id())
            .await;
        assert!(matches!(
            coordinator_refused,
            Err(DomainError::Authorization { .. })
        ));

        let admin = Actor::new(Uuid::new_v4(), Role::Admin);
        fx.service
            .accept_assignment(&admin, details.team.id())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_get_all_teams_with_details() {
        let fx = fixture(2);
        create_team(&fx, "Alpha", vec![fx.student_ids[0]]).await;
        create_team(&fx, "Beta", vec![fx.student_ids[1]]).await;

        let details = fx
            .service
            .get_all_teams_with_details(&fx.coordinator)
            .await
            .unwrap();

        assert_eq!(details.len(), 2);
        assert!(details.iter().all(|d| d.project.is_some()));
        assert!(details.iter().all(|d| d.members.len() == 1));
    }

    #[tokio::test]
    async fn test_get_all_teams_denied_for_supervisor() {
        let fx = fixture(0);
        let supervisor = Actor::new(fx.supervisor_id.as_uuid(), Role::Supervisor);

        let result = fx.service.get_all_teams_with_details(&supervisor).await;
        assert!(matches!(result, Err(DomainError::Authorization { .. })));
    }

    #[tokio::test]
    async fn test_get_teams_for_supervisor() {
        let fx = fixture(1);
        create_team(&fx, "Alpha", fx.student_ids.clone()).await;
        let supervisor = Actor::new(fx.supervisor_id.as_uuid(), Role::Supervisor);

        let details = fx
            .service
            .get_teams_for_supervisor(&supervisor, fx.supervisor_id)
            .await
            .unwrap();

        assert_eq!(details.len(), 1);
        assert_eq!(details[0].team.name(), "Alpha");
    }

    #[tokio::test]
    async fn test_supervisor_cannot_view_other_supervisors_teams() {
        let fx = fixture(0);
        let stranger = Actor::new(Uuid::new_v4(), Role::Supervisor);

        let result = fx
            .service
            .get_teams_for_supervisor(&stranger, fx.supervisor_id)
            .await;
        assert!(matches!(result, Err(DomainError::Authorization { .. })));

        // An admin querying the same succeeds
        let admin = Actor::new(Uuid::new_v4(), Role::Admin);
        assert!(
            fx.service
                .get_teams_for_supervisor(&admin, fx.supervisor_id)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_get_teams_for_unknown_supervisor() {
        let fx = fixture(0);
        let admin = Actor::new(Uuid::new_v4(), Role::Admin);

        let result = fx
            .service
            .get_teams_for_supervisor(&admin, SupervisorId::new())
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_available_students() {
        let fx = fixture(3);
        create_team(&fx, "Alpha", vec![fx.student_ids[0]]).await;

        let available = fx
            .service
            .list_available_students(&fx.coordinator)
            .await
            .unwrap();

        assert_eq!(available.len(), 2);
        assert!(available.iter().all(|s| !s.is_assigned()));
    }

    #[tokio::test]
    async fn test_team_details_serialization_hides_password_hashes() {
        let fx = fixture(2);
        let details = create_team(&fx, "Alpha", fx.student_ids.clone()).await;

        let json = serde_json::to_string(&details).unwrap();
        assert!(json.contains("Alpha"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("hash-0"));
    }
}
