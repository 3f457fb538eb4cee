//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use pantry_app::auth::IssuedToken;

use crate::{auth::into_status_error, extensions::*, state::State};

/// Login Request
#[derive(Deserialize, Serialize, ToSchema)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,

    /// Username the token was issued to
    pub username: String,

    /// Instant after which the token is rejected
    pub expires_at: String,
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Log in",
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Username and password are required"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid username or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    if request.username.is_empty() || request.password.is_empty() {
        return Err(StatusError::bad_request().brief("Username and password are required"));
    }

    let issued = state
        .app
        .auth
        .login(&request.username, &request.password)
        .await
        .map_err(into_status_error)?;

    let IssuedToken { token, session } = issued;

    Ok(Json(LoginResponse {
        token,
        username: session.identity.username,
        expires_at: session.expires_at.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pantry_app::auth::{AuthServiceError, Identity, MockAuthService, Session};

    use crate::test_helpers::auth_service;

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        auth_service(auth, Router::with_path("login").post(handler))
    }

    #[tokio::test]
    async fn test_login_success_returns_token() -> TestResult {
        let expires_at = Timestamp::from_second(86_400)?;

        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|username, password| username == "chef" && password == "secret")
            .return_once(move |username, _| {
                Ok(IssuedToken {
                    token: "ab".repeat(32),
                    session: Session {
                        identity: Identity::new(username, None),
                        created_at: Timestamp::UNIX_EPOCH,
                        expires_at,
                    },
                })
            });

        let mut res = TestClient::post("http://example.com/login")
            .json(&json!({ "username": "chef", "password": "secret" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: LoginResponse = res.take_json().await?;

        assert_eq!(body.token, "ab".repeat(32));
        assert_eq!(body.username, "chef");
        assert_eq!(body.expires_at, "1970-01-02T00:00:00Z");

        Ok(())
    }

    #[tokio::test]
    async fn test_login_missing_password_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login().never();

        let res = TestClient::post("http://example.com/login")
            .json(&json!({ "username": "chef", "password": "" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_missing_fields_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login().never();

        let res = TestClient::post("http://example.com/login")
            .json(&json!({}))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_invalid_credentials_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_, _| Err(AuthServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/login")
            .json(&json!({ "username": "chef", "password": "wrong" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
