//! Recipes Data

use serde::{Deserialize, Serialize};

use crate::domain::recipes::{errors::RecipeValidationError, records::RecipeUuid};

/// Save payload. A missing `uuid` means "create with a fresh id".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    #[serde(default)]
    pub uuid: Option<RecipeUuid>,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cooking_time: String,
    pub servings: i32,
    pub category: String,
}

impl RecipeDraft {
    /// Reject drafts with blank required fields or a non-positive serving count.
    ///
    /// # Errors
    ///
    /// Returns the first rule the draft breaks.
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        if is_blank(&self.name) {
            return Err(RecipeValidationError::MissingName);
        }

        if self.ingredients.is_empty() {
            return Err(RecipeValidationError::MissingIngredients);
        }

        if self.ingredients.iter().any(|ingredient| is_blank(ingredient)) {
            return Err(RecipeValidationError::BlankIngredient);
        }

        if is_blank(&self.instructions) {
            return Err(RecipeValidationError::MissingInstructions);
        }

        if is_blank(&self.cooking_time) {
            return Err(RecipeValidationError::MissingCookingTime);
        }

        if self.servings <= 0 {
            return Err(RecipeValidationError::NonPositiveServings);
        }

        if is_blank(&self.category) {
            return Err(RecipeValidationError::MissingCategory);
        }

        Ok(())
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
