//! Recipe Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{domain::users::records::UserId, uuids::TypedUuid};

/// Recipe UUID
pub type RecipeUuid = TypedUuid<RecipeRecord>;

/// Recipe Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub uuid: RecipeUuid,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cooking_time: String,
    pub servings: i32,
    pub category: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<UserId>,
}

impl RecipeRecord {
    /// Case-insensitive substring match on the name or on any ingredient.
    ///
    /// Agrees with the Postgres `ILIKE` search for ASCII terms; folding of other
    /// scripts follows the database collation there.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();

        self.name.to_lowercase().contains(&needle)
            || self
                .ingredients
                .iter()
                .any(|ingredient| ingredient.to_lowercase().contains(&needle))
    }
}

/// Newest first, ties broken by uuid descending.
pub(crate) fn sort_newest_first(recipes: &mut [RecipeRecord]) {
    recipes.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.uuid.cmp(&a.uuid))
    });
}
