//! Create Recipe Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    recipes::{
        errors::into_status_error,
        models::{RecipeRequest, RecipeResponse},
    },
    state::State,
};

/// Create Recipe Handler
///
/// The server assigns the recipe id.
#[endpoint(
    tags("recipes"),
    summary = "Create Recipe",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Recipe created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RecipeRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RecipeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let recipe = state
        .app
        .recipes
        .save_recipe(json.into_inner().into_draft(None), identity)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/recipes/{}", recipe.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(recipe_uuid = %recipe.uuid, username = %identity, "created recipe");

    Ok(Json(recipe.into()))
}
