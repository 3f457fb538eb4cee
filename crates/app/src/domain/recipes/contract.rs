//! Behaviour every recipe backend shares, run against each one.

use testresult::TestResult;

use crate::{
    auth::Identity,
    domain::recipes::{
        RecipesService, RecipesServiceError,
        data::{
            RecipeDraft,
            fixtures::{draft, soup},
        },
        records::{RecipeRecord, RecipeUuid},
    },
};

fn chef() -> Identity {
    Identity::new("chef", None)
}

pub(crate) async fn soup_scenario(store: &impl RecipesService) -> TestResult {
    let created = store.save_recipe(soup(), &chef()).await?;

    let fetched = store.get_recipe(created.uuid).await?;

    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Soup");
    assert_eq!(fetched.ingredients, ["water", "salt"]);
    assert_eq!(fetched.created_at, fetched.updated_at);

    store
        .save_recipe(
            RecipeDraft {
                uuid: Some(created.uuid),
                servings: 4,
                ..soup()
            },
            &chef(),
        )
        .await?;

    let updated = store.get_recipe(created.uuid).await?;

    assert_eq!(updated.servings, 4);
    assert_eq!(updated.created_at, created.created_at);
    assert!(
        updated.updated_at > updated.created_at,
        "modification time must advance strictly"
    );
    assert_eq!(store.list_recipes().await?.len(), 1);

    Ok(())
}

pub(crate) async fn upsert_with_caller_supplied_uuid(store: &impl RecipesService) -> TestResult {
    let uuid = RecipeUuid::new();

    let created = store
        .save_recipe(RecipeDraft { uuid: Some(uuid), ..soup() }, &chef())
        .await?;

    assert_eq!(created.uuid, uuid);
    assert_eq!(created.created_at, created.updated_at);

    let renamed = store
        .save_recipe(
            RecipeDraft {
                uuid: Some(uuid),
                name: "Broth".to_string(),
                ..soup()
            },
            &chef(),
        )
        .await?;

    assert_eq!(renamed.uuid, uuid);
    assert_eq!(renamed.name, "Broth");
    assert_eq!(renamed.created_at, created.created_at);
    assert!(renamed.updated_at > created.updated_at);

    let again = store
        .save_recipe(RecipeDraft { uuid: Some(uuid), ..soup() }, &chef())
        .await?;

    assert!(again.updated_at > renamed.updated_at);

    Ok(())
}

pub(crate) async fn search_matches_name_or_ingredient(store: &impl RecipesService) -> TestResult {
    let cake = store
        .save_recipe(draft("Chocolate Cake", &["flour", "cocoa"], "dessert"), &chef())
        .await?;
    let cookies = store
        .save_recipe(draft("Cookies", &["butter", "chocolate chips"], "dessert"), &chef())
        .await?;
    store
        .save_recipe(draft("Salad", &["lettuce"], "starter"), &chef())
        .await?;

    let found = uuids(store.search_recipes("choc").await?);

    assert_eq!(found.len(), 2);
    assert!(found.contains(&cake.uuid));
    assert!(found.contains(&cookies.uuid));

    assert_eq!(
        uuids(store.search_recipes("CHOC").await?).len(),
        2,
        "ASCII case must fold the same way on every backend"
    );
    assert!(store.search_recipes("xyz-none").await?.is_empty());
    assert_eq!(uuids(store.search_recipes("butter").await?), [cookies.uuid]);
    assert!(
        store.search_recipes("%").await?.is_empty(),
        "wildcards must match literally"
    );

    Ok(())
}

pub(crate) async fn update_never_creates(store: &impl RecipesService) -> TestResult {
    let created = store.save_recipe(soup(), &chef()).await?;

    let updated = store
        .update_recipe(created.uuid, RecipeDraft { servings: 6, ..soup() }, &chef())
        .await?;

    assert_eq!(updated.uuid, created.uuid);
    assert_eq!(updated.servings, 6);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let missing = store
        .update_recipe(RecipeUuid::new(), soup(), &chef())
        .await;

    assert!(
        matches!(missing, Err(RecipesServiceError::NotFound)),
        "expected NotFound, got {missing:?}"
    );
    assert_eq!(store.list_recipes().await?.len(), 1);

    Ok(())
}

pub(crate) async fn update_after_delete_is_not_found(store: &impl RecipesService) -> TestResult {
    let created = store.save_recipe(soup(), &chef()).await?;

    store.delete_recipe(created.uuid).await?;

    let result = store
        .update_recipe(created.uuid, RecipeDraft { servings: 4, ..soup() }, &chef())
        .await;

    assert!(
        matches!(result, Err(RecipesServiceError::NotFound)),
        "expected NotFound, got {result:?}"
    );
    assert!(store.list_recipes().await?.is_empty(), "a deleted recipe must stay deleted");

    Ok(())
}

pub(crate) async fn category_filter_is_exact(store: &impl RecipesService) -> TestResult {
    let starter = store
        .save_recipe(draft("Soup", &["water"], "starter"), &chef())
        .await?;
    store
        .save_recipe(draft("Cake", &["flour"], "dessert"), &chef())
        .await?;

    assert_eq!(
        uuids(store.list_recipes_by_category("starter").await?),
        [starter.uuid]
    );
    assert!(store.list_recipes_by_category("Starter").await?.is_empty());
    assert!(store.list_recipes_by_category("main").await?.is_empty());

    Ok(())
}

pub(crate) async fn delete_distinguishes_not_found(store: &impl RecipesService) -> TestResult {
    let created = store.save_recipe(soup(), &chef()).await?;

    store.delete_recipe(created.uuid).await?;

    let missing = store.get_recipe(created.uuid).await;
    assert!(
        matches!(missing, Err(RecipesServiceError::NotFound)),
        "expected NotFound, got {missing:?}"
    );

    let again = store.delete_recipe(created.uuid).await;
    assert!(
        matches!(again, Err(RecipesServiceError::NotFound)),
        "expected NotFound, got {again:?}"
    );

    assert!(store.list_recipes().await?.is_empty());

    Ok(())
}

pub(crate) async fn listing_is_newest_first(store: &impl RecipesService) -> TestResult {
    for name in ["a", "b", "c", "d"] {
        store
            .save_recipe(draft(name, &["x"], "misc"), &chef())
            .await?;
    }

    let listed = store.list_recipes().await?;

    assert!(
        listed.windows(2).all(|pair| match pair {
            [newer, older] => (newer.created_at, newer.uuid) >= (older.created_at, older.uuid),
            _ => true,
        }),
        "expected newest-first ordering"
    );

    Ok(())
}

fn uuids(recipes: Vec<RecipeRecord>) -> Vec<RecipeUuid> {
    recipes.into_iter().map(|recipe| recipe.uuid).collect()
}
