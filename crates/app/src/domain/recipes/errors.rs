//! Recipes service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// A draft broke a field rule. Raised before any storage access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecipeValidationError {
    #[error("recipe name is required")]
    MissingName,

    #[error("at least one ingredient is required")]
    MissingIngredients,

    #[error("ingredients must not be blank")]
    BlankIngredient,

    #[error("instructions are required")]
    MissingInstructions,

    #[error("cooking time is required")]
    MissingCookingTime,

    #[error("servings must be greater than 0")]
    NonPositiveServings,

    #[error("category is required")]
    MissingCategory,
}

#[derive(Debug, Error)]
pub enum RecipesServiceError {
    #[error("recipe not found")]
    NotFound,

    #[error(transparent)]
    Validation(#[from] RecipeValidationError),

    #[error("related resource not found")]
    InvalidReference,

    #[error("recipes file could not be accessed")]
    Io(#[from] std::io::Error),

    #[error("recipes file is corrupt")]
    Corrupt(#[from] serde_json::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl RecipesServiceError {
    /// Whether the backing store itself failed, as opposed to the request.
    #[must_use]
    pub const fn is_storage_failure(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Corrupt(_) | Self::Sql(_))
    }
}

impl From<Error> for RecipesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
