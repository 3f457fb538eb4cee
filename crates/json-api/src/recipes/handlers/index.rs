//! Recipe Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    recipes::{errors::into_status_error, models::RecipesResponse},
    state::State,
};

/// Recipe Index Handler
///
/// Lists every recipe, newest first. `category` filters by exact category,
/// `q` searches names and ingredients. When both are given `q` wins.
#[endpoint(
    tags("recipes"),
    summary = "List Recipes",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Recipes"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<RecipesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let recipes = &state.app.recipes;

    let search = q.into_inner().filter(|term| !term.is_empty());
    let category = category.into_inner().filter(|category| !category.is_empty());

    let found = match (search, category) {
        (Some(term), _) => recipes.search_recipes(&term).await,
        (None, Some(category)) => recipes.list_recipes_by_category(&category).await,
        (None, None) => recipes.list_recipes().await,
    }
    .map_err(into_status_error)?;

    Ok(Json(found.into()))
}
