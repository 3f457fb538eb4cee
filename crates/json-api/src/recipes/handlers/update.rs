//! Update Recipe Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use pantry_app::domain::recipes::records::RecipeUuid;

use crate::{
    extensions::*,
    recipes::{
        errors::into_status_error,
        models::{RecipeRequest, RecipeResponse},
    },
    state::State,
};

/// Update Recipe Handler
///
/// Replaces every field of an existing recipe.
#[endpoint(
    tags("recipes"),
    summary = "Update Recipe",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Recipe updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Recipe not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "recipes.update",
    skip(uuid, json, depot),
    fields(recipe_uuid = tracing::field::Empty, username = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<RecipeRequest>,
    depot: &mut Depot,
) -> Result<Json<RecipeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let recipe = RecipeUuid::from_uuid(uuid.into_inner());

    let span = tracing::Span::current();

    span.record("recipe_uuid", tracing::field::display(recipe));
    span.record("username", tracing::field::display(identity));

    let updated = state
        .app
        .recipes
        .update_recipe(recipe, json.into_inner().into_draft(Some(recipe)), identity)
        .await
        .map_err(into_status_error)?;

    tracing::info!(recipe_uuid = %recipe, "updated recipe");

    Ok(Json(updated.into()))
}
