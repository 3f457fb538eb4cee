//! Recipes Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    recipes::{
        data::RecipeDraft,
        records::{RecipeRecord, RecipeUuid},
    },
    users::records::UserId,
};

const LIST_RECIPES_SQL: &str = include_str!("sql/list_recipes.sql");
const GET_RECIPE_SQL: &str = include_str!("sql/get_recipe.sql");
const UPSERT_RECIPE_SQL: &str = include_str!("sql/upsert_recipe.sql");
const UPDATE_RECIPE_SQL: &str = include_str!("sql/update_recipe.sql");
const DELETE_RECIPE_SQL: &str = include_str!("sql/delete_recipe.sql");
const LIST_RECIPES_BY_CATEGORY_SQL: &str = include_str!("sql/list_recipes_by_category.sql");
const SEARCH_RECIPES_SQL: &str = include_str!("sql/search_recipes.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgRecipesRepository {
    pool: PgPool,
}

impl PgRecipesRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn list_recipes(&self) -> Result<Vec<RecipeRecord>, sqlx::Error> {
        query_as::<Postgres, RecipeRecord>(LIST_RECIPES_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn get_recipe(
        &self,
        recipe: RecipeUuid,
    ) -> Result<Option<RecipeRecord>, sqlx::Error> {
        query_as::<Postgres, RecipeRecord>(GET_RECIPE_SQL)
            .bind(recipe.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn upsert_recipe(
        &self,
        recipe: RecipeUuid,
        draft: &RecipeDraft,
        acting: Option<UserId>,
    ) -> Result<RecipeRecord, sqlx::Error> {
        query_as::<Postgres, RecipeRecord>(UPSERT_RECIPE_SQL)
            .bind(recipe.into_uuid())
            .bind(&draft.name)
            .bind(&draft.ingredients)
            .bind(&draft.instructions)
            .bind(&draft.cooking_time)
            .bind(draft.servings)
            .bind(&draft.category)
            .bind(acting.map(UserId::into_inner))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn update_recipe(
        &self,
        recipe: RecipeUuid,
        draft: &RecipeDraft,
        acting: Option<UserId>,
    ) -> Result<Option<RecipeRecord>, sqlx::Error> {
        query_as::<Postgres, RecipeRecord>(UPDATE_RECIPE_SQL)
            .bind(recipe.into_uuid())
            .bind(&draft.name)
            .bind(&draft.ingredients)
            .bind(&draft.instructions)
            .bind(&draft.cooking_time)
            .bind(draft.servings)
            .bind(&draft.category)
            .bind(acting.map(UserId::into_inner))
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn delete_recipe(&self, recipe: RecipeUuid) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_RECIPE_SQL)
            .bind(recipe.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_recipes_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<RecipeRecord>, sqlx::Error> {
        query_as::<Postgres, RecipeRecord>(LIST_RECIPES_BY_CATEGORY_SQL)
            .bind(category)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn search_recipes(&self, term: &str) -> Result<Vec<RecipeRecord>, sqlx::Error> {
        query_as::<Postgres, RecipeRecord>(SEARCH_RECIPES_SQL)
            .bind(format!("%{}%", escape_like(term)))
            .fetch_all(&self.pool)
            .await
    }
}

/// Escape `LIKE` metacharacters so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(ch);
    }

    escaped
}

impl<'r> FromRow<'r, PgRow> for RecipeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RecipeUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            name: row.try_get("name")?,
            ingredients: row.try_get("ingredients")?,
            instructions: row.try_get("instructions")?,
            cooking_time: row.try_get("cooking_time")?,
            servings: row.try_get("servings")?,
            category: row.try_get("category")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            created_by: row.try_get::<Option<i64>, _>("created_by")?.map(UserId::new),
            updated_by: row.try_get::<Option<i64>, _>("updated_by")?.map(UserId::new),
        })
    }
}
