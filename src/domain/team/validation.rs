//! Team composition validation
//!
//! Pure checks behind every mutation of a team's member set. They take
//! already-resolved facts (sizes, membership, fetched students) so that the
//! service can read once and validate without further I/O.

use thiserror::Error;

use crate::domain::person::{Student, StudentId};

/// Smallest committed team
pub const MIN_TEAM_SIZE: usize = 1;
/// Largest committed team
pub const MAX_TEAM_SIZE: usize = 5;

/// Errors that can occur when validating a team's name
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),
}

const MAX_TEAM_NAME_LENGTH: usize = 100;

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.len() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

/// Errors that can occur when validating team composition
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompositionError {
    #[error("A team must have between {MIN_TEAM_SIZE} and {MAX_TEAM_SIZE} members")]
    SizeOutOfBounds,

    #[error("The team leader must be a member of the team")]
    LeaderNotMember,

    #[error("A team with the name '{0}' already exists")]
    DuplicateName(String),

    #[error("The same student cannot be listed twice")]
    DuplicateStudents,

    #[error("One or more students not found")]
    UnknownStudents,

    #[error("One or more students are already assigned to a team")]
    StudentsAlreadyAssigned,

    #[error("Team cannot have more than {MAX_TEAM_SIZE} members")]
    TeamFull,

    #[error("Student is already in a team")]
    StudentAlreadyAssigned,

    #[error("Team cannot have fewer than {MIN_TEAM_SIZE} members")]
    TeamAtMinimum,

    #[error("Student is not a member of this team")]
    NotAMember,
}

/// Validate the membership of a team about to be created.
///
/// `students` are the records resolved from `student_ids`; a missing id
/// shows up as a length mismatch.
pub fn validate_create(
    student_ids: &[StudentId],
    leader_id: StudentId,
    team_name: &str,
    existing_names: &[String],
    students: &[Student],
) -> Result<(), CompositionError> {
    if student_ids.len() < MIN_TEAM_SIZE || student_ids.len() > MAX_TEAM_SIZE {
        return Err(CompositionError::SizeOutOfBounds);
    }

    if student_ids
        .iter()
        .enumerate()
        .any(|(i, id)| student_ids[..i].contains(id))
    {
        return Err(CompositionError::DuplicateStudents);
    }

    if !student_ids.contains(&leader_id) {
        return Err(CompositionError::LeaderNotMember);
    }

    if existing_names.iter().any(|name| name == team_name) {
        return Err(CompositionError::DuplicateName(team_name.to_string()));
    }

    if students.len() != student_ids.len() {
        return Err(CompositionError::UnknownStudents);
    }

    if students.iter().any(Student::is_assigned) {
        return Err(CompositionError::StudentsAlreadyAssigned);
    }

    Ok(())
}

/// Validate adding one student to an existing team
pub fn validate_add_member(
    current_size: usize,
    student_is_unassigned: bool,
) -> Result<(), CompositionError> {
    if current_size >= MAX_TEAM_SIZE {
        return Err(CompositionError::TeamFull);
    }

    if !student_is_unassigned {
        return Err(CompositionError::StudentAlreadyAssigned);
    }

    Ok(())
}

/// Validate removing one student from an existing team
pub fn validate_remove_member(
    current_size: usize,
    student_is_member: bool,
) -> Result<(), CompositionError> {
    if current_size <= MIN_TEAM_SIZE {
        return Err(CompositionError::TeamAtMinimum);
    }

    if !student_is_member {
        return Err(CompositionError::NotAMember);
    }

    Ok(())
}

/// Validate exchanging one member each between two teams.
///
/// A swap never changes either team's size, so no size re-check is needed.
pub fn validate_swap(
    team1_members: &[StudentId],
    student1_id: StudentId,
    team2_members: &[StudentId],
    student2_id: StudentId,
) -> Result<(), CompositionError> {
    if !team1_members.contains(&student1_id) || !team2_members.contains(&student2_id) {
        return Err(CompositionError::NotAMember);
    }

    Ok(())
}
