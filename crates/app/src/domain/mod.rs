//! Pantry Domain Concerns

pub mod recipes;
pub mod users;
