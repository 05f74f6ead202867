//! Infrastructure layer - gateway implementations, services, logging

pub mod coordination;
pub mod gateway;
pub mod logging;
