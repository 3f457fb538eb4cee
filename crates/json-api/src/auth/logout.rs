//! Logout Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{into_status_error, middleware::extract_bearer_token},
    extensions::*,
    state::State,
};

/// Logout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LogoutResponse {
    pub message: String,
}

/// Logout Handler
///
/// Revokes the bearer token the request was authenticated with.
#[endpoint(
    tags("auth"),
    summary = "Log out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Token revoked"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid or expired token"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<LogoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let token = extract_bearer_token(req)
        .ok_or_else(|| StatusError::unauthorized().brief("Authorization token required"))?;

    let revoked = state
        .app
        .auth
        .logout(token)
        .await
        .map_err(into_status_error)?;

    // A concurrent logout may have won the race.
    if !revoked {
        return Err(StatusError::unauthorized().brief("Invalid or expired token"));
    }

    tracing::info!(username = %identity, "logged out");

    Ok(Json(LogoutResponse {
        message: "Logout successful".to_string(),
    }))
}
