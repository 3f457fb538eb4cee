//! Recipes

pub mod data;
pub mod errors;
mod json;
pub mod records;
mod repository;
pub mod service;

#[cfg(test)]
mod contract;

pub use errors::{RecipeValidationError, RecipesServiceError};
pub use json::JsonRecipesService;
pub use service::*;
