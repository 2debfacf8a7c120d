//! Database models and DTOs for all domain entities.

pub mod project;
pub mod user;
