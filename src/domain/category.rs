//! User category reference data.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User category: read-only reference data backing the account-type
/// selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserCategory {
    /// Stable key, stored on users as `account_type`
    #[schema(example = "student")]
    pub alias: String,
    /// Display label
    #[schema(example = "Student")]
    pub title: String,
}

/// Build the alias -> title selection map for forms, preserving the
/// order the persistence layer returned.
pub fn category_options(categories: Vec<UserCategory>) -> Vec<(String, String)> {
    categories
        .into_iter()
        .map(|category| (category.alias, category.title))
        .collect()
}
