//! Movie data models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::generate_id;
use super::media::Media;

/// A movie document. Installments of a franchise live in `saga`, each with
/// its own generated identifier; order is insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(rename = "_id", default = "generate_id")]
    pub id: String,
    /// Title. Titles are not unique across movies.
    pub title: String,
    /// Referenced category ids; never embedded.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Installments, in insertion order.
    #[serde(default)]
    pub saga: Vec<Media>,
}

/// Partial update for movie root fields. Only present fields are written;
/// nested saga entries are updated through their own operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl MovieUpdate {
    /// Present fields as a flat map.
    pub fn into_fields(self) -> Map<String, Value> {
        match serde_json::to_value(&self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
