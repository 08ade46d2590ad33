//! Category data models.

use serde::{Deserialize, Serialize};

use super::generate_id;

/// A category referenced by id from movies and series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", default = "generate_id")]
    pub id: String,
    /// Category name.
    pub name: String,
}

/// Partial update for a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
