//! People: coordinators, supervisors, students

mod entity;
mod validation;

pub use entity::{Capability, Coordinator, CoordinatorId, Student, StudentId, Supervisor, SupervisorId};
pub use validation::{PersonValidationError, validate_contact, validate_display_name};
