//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use pantry_app::{
    auth::{DEFAULT_TOKEN_TTL, Identity, MockAuthService, TokenRegistry},
    clock::SystemClock,
    context::AppContext,
    domain::recipes::{
        MockRecipesService,
        records::{RecipeRecord, RecipeUuid},
    },
};
use salvo::{affix_state::inject, prelude::*};
use serde_json::{Value, json};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USERNAME: &str = "chef";

#[salvo::handler]
pub(crate) async fn inject_identity(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(Identity::new(TEST_USERNAME, None));
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn make_recipe(uuid: RecipeUuid) -> RecipeRecord {
    RecipeRecord {
        uuid,
        name: "Soup".to_string(),
        ingredients: vec!["water".to_string(), "salt".to_string()],
        instructions: "boil".to_string(),
        cooking_time: "10 minutes".to_string(),
        servings: 2,
        category: "starter".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        created_by: None,
        updated_by: None,
    }
}

pub(crate) fn soup_body(servings: i32) -> Value {
    json!({
        "name": "Soup",
        "ingredients": ["water", "salt"],
        "instructions": "boil",
        "cooking_time": "10 minutes",
        "servings": servings,
        "category": "starter",
    })
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();
    auth.expect_logout().never();

    auth
}

fn strict_recipes_mock() -> MockRecipesService {
    let mut recipes = MockRecipesService::new();

    recipes.expect_list_recipes().never();
    recipes.expect_get_recipe().never();
    recipes.expect_save_recipe().never();
    recipes.expect_update_recipe().never();
    recipes.expect_delete_recipe().never();
    recipes.expect_list_recipes_by_category().never();
    recipes.expect_search_recipes().never();

    recipes
}

pub(crate) fn state(auth: MockAuthService, recipes: MockRecipesService) -> Arc<State> {
    State::from_app_context(AppContext {
        auth: Arc::new(auth),
        recipes: Arc::new(recipes),
        registry: Arc::new(TokenRegistry::new(DEFAULT_TOKEN_TTL, Arc::new(SystemClock))),
        pool: None,
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(auth, strict_recipes_mock())
}

pub(crate) fn state_with_recipes(recipes: MockRecipesService) -> Arc<State> {
    state(strict_auth_mock(), recipes)
}

pub(crate) fn auth_service(auth: MockAuthService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_auth(auth)))
            .hoop(inject_identity)
            .push(route),
    )
}

pub(crate) fn recipes_service(recipes: MockRecipesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_recipes(recipes)))
            .hoop(inject_identity)
            .push(route),
    )
}
