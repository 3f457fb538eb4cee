//! Storage Config

use std::path::PathBuf;

use clap::Args;
use pantry_app::context::RecipeBackend;

/// Recipe persistence backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum RecipeStore {
    /// A single pretty-printed JSON file.
    Json,

    /// The `recipes` table in `PostgreSQL`.
    Postgres,
}

/// Recipe storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Recipe store (json, postgres)
    #[arg(long, env = "RECIPE_STORE", value_enum, default_value_t = RecipeStore::Json)]
    pub recipe_store: RecipeStore,

    /// Collection file for the JSON store
    #[arg(long, env = "RECIPES_FILE", default_value = "data/recipes.json")]
    pub recipes_file: PathBuf,
}

impl StorageConfig {
    #[must_use]
    pub fn recipe_backend(&self) -> RecipeBackend {
        match self.recipe_store {
            RecipeStore::Json => RecipeBackend::Json {
                path: self.recipes_file.clone(),
            },
            RecipeStore::Postgres => RecipeBackend::Postgres,
        }
    }
}
