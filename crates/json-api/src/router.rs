//! App Router

use salvo::Router;

use crate::{auth, recipes};

/// Routes under `/api`. Everything except login sits behind the bearer middleware.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(Router::with_path("login").post(auth::login::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("logout").post(auth::logout::handler))
                .push(
                    Router::with_path("recipes")
                        .get(recipes::index::handler)
                        .post(recipes::create::handler)
                        .push(
                            Router::with_path("{uuid}")
                                .get(recipes::get::handler)
                                .put(recipes::update::handler)
                                .delete(recipes::delete::handler),
                        ),
                ),
        )
}
