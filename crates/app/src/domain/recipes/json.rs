//! Recipes stored as one pretty-printed JSON array on disk.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use tokio::{fs, io::AsyncWriteExt, sync::RwLock};

use crate::{
    auth::Identity,
    clock::Clock,
    domain::recipes::{
        RecipesService,
        data::RecipeDraft,
        errors::RecipesServiceError,
        records::{RecipeRecord, RecipeUuid, sort_newest_first},
    },
};

/// File-backed recipe store.
///
/// The whole collection is the unit of read and write. Readers share the lock;
/// Save and Delete hold it exclusively across their read-modify-write, and every
/// write lands in a sibling temporary file that is renamed over the collection.
/// Construct one instance per file.
#[derive(Debug)]
pub struct JsonRecipesService {
    path: PathBuf,
    lock: RwLock<()>,
    clock: Arc<dyn Clock>,
}

impl JsonRecipesService {
    /// Open the collection at `path`, creating the parent directory and an empty
    /// collection when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the initial file cannot be created.
    pub async fn new(
        path: impl Into<PathBuf>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RecipesServiceError> {
        let service = Self {
            path: path.into(),
            lock: RwLock::new(()),
            clock,
        };

        if let Some(parent) = service.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        if !fs::try_exists(&service.path).await? {
            service.write_all(&[]).await?;
            tracing::info!(path = %service.path.display(), "created empty recipes file");
        }

        Ok(service)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<RecipeRecord>, RecipesServiceError> {
        let bytes = fs::read(&self.path).await?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn read_sorted(&self) -> Result<Vec<RecipeRecord>, RecipesServiceError> {
        let _guard = self.lock.read().await;

        let mut recipes = self.read_all().await?;
        sort_newest_first(&mut recipes);

        Ok(recipes)
    }

    async fn write_all(&self, recipes: &[RecipeRecord]) -> Result<(), RecipesServiceError> {
        let json = serde_json::to_vec_pretty(recipes)?;
        let temp_path = self.temp_path();

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(self.path.file_name().unwrap_or_else(|| "recipes.json".as_ref()));
        name.push(".tmp");

        self.path.with_file_name(name)
    }
}

/// Modification time for an update: never earlier than one microsecond past the previous value.
fn next_modification(previous: Timestamp, now: Timestamp) -> Timestamp {
    let floor = previous
        .checked_add(SignedDuration::from_micros(1))
        .unwrap_or(previous);

    now.max(floor)
}

fn replace_fields(existing: &mut RecipeRecord, draft: RecipeDraft, acting: &Identity, now: Timestamp) {
    existing.name = draft.name;
    existing.ingredients = draft.ingredients;
    existing.instructions = draft.instructions;
    existing.cooking_time = draft.cooking_time;
    existing.servings = draft.servings;
    existing.category = draft.category;
    existing.updated_at = next_modification(existing.updated_at, now);
    existing.updated_by = acting.user_id;
}

#[async_trait]
impl RecipesService for JsonRecipesService {
    async fn list_recipes(&self) -> Result<Vec<RecipeRecord>, RecipesServiceError> {
        self.read_sorted().await
    }

    async fn get_recipe(&self, recipe: RecipeUuid) -> Result<RecipeRecord, RecipesServiceError> {
        let _guard = self.lock.read().await;

        self.read_all()
            .await?
            .into_iter()
            .find(|record| record.uuid == recipe)
            .ok_or(RecipesServiceError::NotFound)
    }

    async fn save_recipe(
        &self,
        draft: RecipeDraft,
        acting: &Identity,
    ) -> Result<RecipeRecord, RecipesServiceError> {
        draft.validate()?;

        let _guard = self.lock.write().await;

        let mut recipes = self.read_all().await?;
        let now = self.clock.now();
        let uuid = draft.uuid.unwrap_or_default();

        let saved = if let Some(existing) = recipes.iter_mut().find(|record| record.uuid == uuid) {
            replace_fields(existing, draft, acting, now);

            existing.clone()
        } else {
            let created = RecipeRecord {
                uuid,
                name: draft.name,
                ingredients: draft.ingredients,
                instructions: draft.instructions,
                cooking_time: draft.cooking_time,
                servings: draft.servings,
                category: draft.category,
                created_at: now,
                updated_at: now,
                created_by: acting.user_id,
                updated_by: acting.user_id,
            };

            recipes.push(created.clone());

            created
        };

        self.write_all(&recipes).await?;

        tracing::debug!(recipe = %saved.uuid, username = %acting, "recipe saved");

        Ok(saved)
    }

    async fn update_recipe(
        &self,
        recipe: RecipeUuid,
        draft: RecipeDraft,
        acting: &Identity,
    ) -> Result<RecipeRecord, RecipesServiceError> {
        draft.validate()?;

        let _guard = self.lock.write().await;

        let mut recipes = self.read_all().await?;
        let now = self.clock.now();

        let existing = recipes
            .iter_mut()
            .find(|record| record.uuid == recipe)
            .ok_or(RecipesServiceError::NotFound)?;

        replace_fields(existing, draft, acting, now);

        let updated = existing.clone();

        self.write_all(&recipes).await?;

        tracing::debug!(recipe = %updated.uuid, username = %acting, "recipe updated");

        Ok(updated)
    }

    async fn delete_recipe(&self, recipe: RecipeUuid) -> Result<(), RecipesServiceError> {
        let _guard = self.lock.write().await;

        let mut recipes = self.read_all().await?;
        let before = recipes.len();

        recipes.retain(|record| record.uuid != recipe);

        if recipes.len() == before {
            return Err(RecipesServiceError::NotFound);
        }

        self.write_all(&recipes).await
    }

    async fn list_recipes_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<RecipeRecord>, RecipesServiceError> {
        let mut recipes = self.read_sorted().await?;
        recipes.retain(|record| record.category == category);

        Ok(recipes)
    }

    async fn search_recipes(&self, term: &str) -> Result<Vec<RecipeRecord>, RecipesServiceError> {
        let mut recipes = self.read_sorted().await?;
        recipes.retain(|record| record.matches_search(term));

        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::{
        clock::manual::ManualClock,
        domain::recipes::{contract, data::fixtures::soup},
    };

    use super::*;

    async fn store(dir: &TempDir) -> Result<(Arc<ManualClock>, JsonRecipesService), RecipesServiceError> {
        let clock = Arc::new(ManualClock::new(Timestamp::UNIX_EPOCH));
        let service = JsonRecipesService::new(dir.path().join("data/recipes.json"), clock.clone()).await?;

        Ok((clock, service))
    }

    #[tokio::test]
    async fn new_creates_directory_and_empty_collection() -> TestResult {
        let dir = TempDir::new()?;
        let (_clock, service) = store(&dir).await?;

        let contents = std::fs::read_to_string(service.path())?;

        assert_eq!(contents.trim(), "[]");
        assert!(service.list_recipes().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn new_keeps_an_existing_collection() -> TestResult {
        let dir = TempDir::new()?;
        let (_clock, service) = store(&dir).await?;

        service.save_recipe(soup(), &Identity::new("chef", None)).await?;

        let reopened = JsonRecipesService::new(
            service.path().to_path_buf(),
            Arc::new(ManualClock::new(Timestamp::UNIX_EPOCH)),
        )
        .await?;

        assert_eq!(reopened.list_recipes().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn file_is_a_pretty_printed_array() -> TestResult {
        let dir = TempDir::new()?;
        let (_clock, service) = store(&dir).await?;

        service.save_recipe(soup(), &Identity::new("chef", None)).await?;

        let contents = std::fs::read_to_string(service.path())?;
        let parsed: serde_json::Value = serde_json::from_str(&contents)?;

        assert!(contents.contains("\n  "), "expected indented output");
        assert_eq!(parsed.as_array().map(Vec::len), Some(1));
        assert!(!service.temp_path().exists(), "temporary file should be renamed away");

        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_a_storage_failure() -> TestResult {
        let dir = TempDir::new()?;
        let (_clock, service) = store(&dir).await?;

        std::fs::write(service.path(), "{ not json")?;

        let result = service.list_recipes().await;

        assert!(
            matches!(result, Err(RecipesServiceError::Corrupt(_))),
            "expected Corrupt, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_validation_leaves_the_file_untouched() -> TestResult {
        let dir = TempDir::new()?;
        let (_clock, service) = store(&dir).await?;

        let before = std::fs::read(service.path())?;

        let result = service
            .save_recipe(RecipeDraft { servings: 0, ..soup() }, &Identity::new("chef", None))
            .await;

        assert!(matches!(result, Err(RecipesServiceError::Validation(_))));
        assert_eq!(std::fs::read(service.path())?, before);

        Ok(())
    }

    #[tokio::test]
    async fn update_time_advances_with_the_clock() -> TestResult {
        let dir = TempDir::new()?;
        let (clock, service) = store(&dir).await?;
        let chef = Identity::new("chef", None);

        let created = service.save_recipe(soup(), &chef).await?;

        clock.advance(SignedDuration::from_mins(5));

        let updated = service
            .save_recipe(RecipeDraft { uuid: Some(created.uuid), servings: 4, ..soup() }, &chef)
            .await?;

        assert_eq!(updated.created_at, Timestamp::UNIX_EPOCH);
        assert_eq!(updated.updated_at, Timestamp::UNIX_EPOCH.checked_add(SignedDuration::from_mins(5))?);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_saves_are_all_kept() -> TestResult {
        let dir = TempDir::new()?;
        let (_clock, service) = store(&dir).await?;
        let service = Arc::new(service);

        let mut handles = Vec::new();

        for index in 0..16 {
            let service = service.clone();

            handles.push(tokio::spawn(async move {
                let draft = RecipeDraft { name: format!("Soup {index}"), ..soup() };
                service.save_recipe(draft, &Identity::new("chef", None)).await
            }));
        }

        for handle in handles {
            handle.await??;
        }

        assert_eq!(service.list_recipes().await?.len(), 16);

        Ok(())
    }

    #[tokio::test]
    async fn soup_scenario() -> TestResult {
        let dir = TempDir::new()?;
        let (_clock, service) = store(&dir).await?;

        contract::soup_scenario(&service).await
    }

    #[tokio::test]
    async fn upsert_with_caller_supplied_uuid() -> TestResult {
        let dir = TempDir::new()?;
        let (_clock, service) = store(&dir).await?;

        contract::upsert_with_caller_supplied_uuid(&service).await
    }

    #[tokio::test]
    async fn search_matches_name_or_ingredient() -> TestResult {
        let dir = TempDir::new()?;
        let (_clock, service) = store(&dir).await?;

        contract::search_matches_name_or_ingredient(&service).await
    }

    #[tokio::test]
    async fn update_never_creates() -> TestResult {
        let dir = TempDir::new()?;
        let (_clock, service) = store(&dir).await?;

        contract::update_never_creates(&service).await
    }

    #[tokio::test]
    async fn update_after_delete_is_not_found() -> TestResult {
        let dir = TempDir::new()?;
        let (_clock, service) = store(&dir).await?;

        contract::update_after_delete_is_not_found(&service).await
    }

    #[tokio::test]
    async fn update_of_missing_recipe_leaves_the_file_untouched() -> TestResult {
        let dir = TempDir::new()?;
        let (_clock, service) = store(&dir).await?;

        service.save_recipe(soup(), &Identity::new("chef", None)).await?;

        let before = std::fs::read(service.path())?;

        let result = service
            .update_recipe(RecipeUuid::new(), soup(), &Identity::new("chef", None))
            .await;

        assert!(matches!(result, Err(RecipesServiceError::NotFound)));
        assert_eq!(std::fs::read(service.path())?, before);

        Ok(())
    }

    #[tokio::test]
    async fn category_filter_is_exact() -> TestResult {
        let dir = TempDir::new()?;
        let (_clock, service) = store(&dir).await?;

        contract::category_filter_is_exact(&service).await
    }

    #[tokio::test]
    async fn delete_distinguishes_not_found() -> TestResult {
        let dir = TempDir::new()?;
        let (_clock, service) = store(&dir).await?;

        contract::delete_distinguishes_not_found(&service).await
    }

    #[tokio::test]
    async fn listing_is_newest_first() -> TestResult {
        let dir = TempDir::new()?;
        let (clock, service) = store(&dir).await?;

        for name in ["first", "second", "third"] {
            service
                .save_recipe(RecipeDraft { name: name.to_string(), ..soup() }, &Identity::new("chef", None))
                .await?;
            clock.advance(SignedDuration::from_secs(1));
        }

        let names: Vec<_> = service
            .list_recipes()
            .await?
            .into_iter()
            .map(|recipe| recipe.name)
            .collect();

        assert_eq!(names, ["third", "second", "first"]);

        contract::listing_is_newest_first(&service).await
    }
}
