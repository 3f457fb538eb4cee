//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use pantry_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound => {
            StatusError::unauthorized().brief("Invalid or expired token")
        }
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid username or password")
        }
        AuthServiceError::Credentials(source) => {
            error!("failed to check credentials: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to issue token: {source}");

            StatusError::internal_server_error().brief("Failed to generate token")
        }
    }
}
