//! Delete Recipe Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, recipes::errors::into_status_error, state::State};

/// Delete Recipe Handler
#[endpoint(
    tags("recipes"),
    summary = "Delete Recipe",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Recipe deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Recipe not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let uuid = uuid.into_inner();

    state
        .app
        .recipes
        .delete_recipe(uuid.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(recipe_uuid = %uuid, username = %identity, "deleted recipe");

    Ok(StatusCode::OK)
}
