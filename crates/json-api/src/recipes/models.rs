//! Recipe request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_app::domain::recipes::{
    data::RecipeDraft,
    records::{RecipeRecord, RecipeUuid},
};

/// Recipe Request
///
/// Body of both create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct RecipeRequest {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cooking_time: String,
    pub servings: i32,
    pub category: String,
}

impl RecipeRequest {
    pub(crate) fn into_draft(self, uuid: Option<RecipeUuid>) -> RecipeDraft {
        RecipeDraft {
            uuid,
            name: self.name,
            ingredients: self.ingredients,
            instructions: self.instructions,
            cooking_time: self.cooking_time,
            servings: self.servings,
            category: self.category,
        }
    }
}

/// Recipe Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RecipeResponse {
    pub uuid: Uuid,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cooking_time: String,
    pub servings: i32,
    pub category: String,
    pub created_at: String,
    pub updated_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<i64>,
}

impl From<RecipeRecord> for RecipeResponse {
    fn from(recipe: RecipeRecord) -> Self {
        Self {
            uuid: recipe.uuid.into(),
            name: recipe.name,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            cooking_time: recipe.cooking_time,
            servings: recipe.servings,
            category: recipe.category,
            created_at: recipe.created_at.to_string(),
            updated_at: recipe.updated_at.to_string(),
            created_by: recipe.created_by.map(Into::into),
            updated_by: recipe.updated_by.map(Into::into),
        }
    }
}

/// Recipes Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RecipesResponse {
    pub recipes: Vec<RecipeResponse>,
    pub count: usize,
}

impl From<Vec<RecipeRecord>> for RecipesResponse {
    fn from(recipes: Vec<RecipeRecord>) -> Self {
        Self {
            count: recipes.len(),
            recipes: recipes.into_iter().map(Into::into).collect(),
        }
    }
}
