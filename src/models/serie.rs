//! Serie data models.
//!
//! Three levels of nesting: a Serie holds Seasons, a Season holds
//! Episodes (`Media`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::generate_id;
use super::media::Media;

/// A TV serie document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Serie {
    #[serde(rename = "_id", default = "generate_id")]
    pub id: String,
    /// Title. Titles are not unique across series.
    pub title: String,
    /// Referenced category ids; never embedded.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Seasons, in insertion order.
    #[serde(default)]
    pub seasons: Vec<Season>,
}

/// A season nested inside a serie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    #[serde(rename = "_id", default = "generate_id")]
    pub id: String,
    /// Episodes, in insertion order.
    #[serde(default)]
    pub episodes: Vec<Media>,
}

impl Season {
    /// A fresh empty season with a generated identifier.
    pub fn new() -> Self {
        Self {
            id: generate_id(),
            episodes: Vec::new(),
        }
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for serie root fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerieUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl SerieUpdate {
    /// Present fields as a flat map.
    pub fn into_fields(self) -> Map<String, Value> {
        match serde_json::to_value(&self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Partial update for a season. The episode list is replaced wholesale
/// when present; individual episodes are updated through their own
/// operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodes: Option<Vec<Media>>,
}

impl SeasonUpdate {
    /// Present fields as a flat map.
    pub fn into_fields(self) -> Map<String, Value> {
        match serde_json::to_value(&self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
