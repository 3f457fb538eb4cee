//! Recipes service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::{
    auth::Identity,
    domain::recipes::{
        data::RecipeDraft,
        errors::RecipesServiceError,
        records::{RecipeRecord, RecipeUuid},
        repository::PgRecipesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgRecipesService {
    repository: PgRecipesRepository,
}

impl PgRecipesService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgRecipesRepository::new(pool),
        }
    }
}

#[async_trait]
impl RecipesService for PgRecipesService {
    async fn list_recipes(&self) -> Result<Vec<RecipeRecord>, RecipesServiceError> {
        Ok(self.repository.list_recipes().await?)
    }

    async fn get_recipe(&self, recipe: RecipeUuid) -> Result<RecipeRecord, RecipesServiceError> {
        self.repository
            .get_recipe(recipe)
            .await?
            .ok_or(RecipesServiceError::NotFound)
    }

    async fn save_recipe(
        &self,
        draft: RecipeDraft,
        acting: &Identity,
    ) -> Result<RecipeRecord, RecipesServiceError> {
        draft.validate()?;

        let uuid = draft.uuid.unwrap_or_default();

        let saved = self
            .repository
            .upsert_recipe(uuid, &draft, acting.user_id)
            .await?;

        tracing::debug!(recipe = %saved.uuid, username = %acting, "recipe saved");

        Ok(saved)
    }

    async fn update_recipe(
        &self,
        recipe: RecipeUuid,
        draft: RecipeDraft,
        acting: &Identity,
    ) -> Result<RecipeRecord, RecipesServiceError> {
        draft.validate()?;

        let updated = self
            .repository
            .update_recipe(recipe, &draft, acting.user_id)
            .await?
            .ok_or(RecipesServiceError::NotFound)?;

        tracing::debug!(recipe = %updated.uuid, username = %acting, "recipe updated");

        Ok(updated)
    }

    async fn delete_recipe(&self, recipe: RecipeUuid) -> Result<(), RecipesServiceError> {
        let rows_affected = self.repository.delete_recipe(recipe).await?;

        if rows_affected == 0 {
            return Err(RecipesServiceError::NotFound);
        }

        Ok(())
    }

    async fn list_recipes_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<RecipeRecord>, RecipesServiceError> {
        Ok(self.repository.list_recipes_by_category(category).await?)
    }

    async fn search_recipes(&self, term: &str) -> Result<Vec<RecipeRecord>, RecipesServiceError> {
        Ok(self.repository.search_recipes(term).await?)
    }
}

#[automock]
#[async_trait]
/// Durable recipe storage. Every listing is ordered newest-created first.
pub trait RecipesService: Send + Sync {
    /// Retrieves all recipes.
    async fn list_recipes(&self) -> Result<Vec<RecipeRecord>, RecipesServiceError>;

    /// Retrieve a single recipe.
    async fn get_recipe(&self, recipe: RecipeUuid) -> Result<RecipeRecord, RecipesServiceError>;

    /// Inserts the draft, or replaces every mutable field if its uuid already exists.
    ///
    /// Creation time and creator survive an update; modification time strictly advances.
    async fn save_recipe(
        &self,
        draft: RecipeDraft,
        acting: &Identity,
    ) -> Result<RecipeRecord, RecipesServiceError>;

    /// Replaces every mutable field of an existing recipe in one step.
    ///
    /// Unlike [`RecipesService::save_recipe`] this never creates: an unknown uuid is
    /// [`RecipesServiceError::NotFound`]. The draft's own uuid is ignored.
    async fn update_recipe(
        &self,
        recipe: RecipeUuid,
        draft: RecipeDraft,
        acting: &Identity,
    ) -> Result<RecipeRecord, RecipesServiceError>;

    /// Deletes a recipe with the given UUID.
    async fn delete_recipe(&self, recipe: RecipeUuid) -> Result<(), RecipesServiceError>;

    /// Recipes whose category equals `category` exactly.
    async fn list_recipes_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<RecipeRecord>, RecipesServiceError>;

    /// Recipes whose name or any ingredient contains `term`, ignoring case.
    ///
    /// Case folding is only guaranteed to agree across backends for ASCII terms.
    async fn search_recipes(&self, term: &str) -> Result<Vec<RecipeRecord>, RecipesServiceError>;
}
