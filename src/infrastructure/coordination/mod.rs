//! Team coordination service

mod service;

pub use service::{CreateTeamRequest, TeamCoordinationService, TeamDetails};
