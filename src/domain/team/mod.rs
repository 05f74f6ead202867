//! Team domain module
//!
//! A team is a group of 1-5 students supervised by exactly one supervisor,
//! with an optional team leader, one assignment status, and one project.

mod assignment;
mod entity;
mod validation;

pub use assignment::{AssignmentStatus, TransitionError};
pub use entity::{Team, TeamId};
pub use validation::{
    CompositionError, MAX_TEAM_SIZE, MIN_TEAM_SIZE, TeamValidationError, validate_add_member,
    validate_create, validate_remove_member, validate_swap, validate_team_name,
};
