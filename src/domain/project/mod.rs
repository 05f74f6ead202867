//! Project domain module

mod entity;

pub use entity::{Project, ProjectId, ProjectStatus};
