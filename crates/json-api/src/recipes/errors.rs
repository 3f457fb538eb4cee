//! Recipe Errors

use salvo::http::StatusError;
use tracing::error;

use pantry_app::domain::recipes::RecipesServiceError;

pub(crate) fn into_status_error(error: RecipesServiceError) -> StatusError {
    match error {
        RecipesServiceError::NotFound => StatusError::not_found().brief("Recipe not found"),
        RecipesServiceError::Validation(source) => {
            StatusError::bad_request().brief(format!("Validation error: {source}"))
        }
        RecipesServiceError::InvalidReference => {
            StatusError::bad_request().brief("Invalid recipe payload")
        }
        storage @ (RecipesServiceError::Io(_)
        | RecipesServiceError::Corrupt(_)
        | RecipesServiceError::Sql(_)) => {
            error!("recipe storage failed: {storage}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use pantry_app::domain::recipes::RecipeValidationError;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn validation_errors_are_bad_requests_with_the_rule() {
        let status = into_status_error(RecipeValidationError::NonPositiveServings.into());

        assert_eq!(status.code, StatusCode::BAD_REQUEST);
        assert_eq!(
            status.brief,
            "Validation error: servings must be greater than 0"
        );
    }

    #[test]
    fn storage_failures_are_internal_errors() {
        let status = into_status_error(RecipesServiceError::Io(std::io::Error::other("disk")));

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_recipes_are_not_found() {
        assert_eq!(
            into_status_error(RecipesServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
    }
}
