//! Media data models.
//!
//! `Media` is the shape shared by a movie saga entry and a serie episode.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::generate_id;

/// A playable media item nested inside a movie saga or a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    /// Generated identifier, unique within the parent document.
    #[serde(rename = "_id", default = "generate_id")]
    pub id: String,
    /// Title.
    pub title: String,
    /// Synopsis.
    pub description: String,
    /// Path to the media file.
    pub file_path: String,
    /// Duration in seconds.
    pub duration: u64,
    /// Poster image paths.
    #[serde(default)]
    pub posters: Vec<String>,
    /// Audio languages, in preference order.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Subtitle tracks.
    #[serde(default)]
    pub subtitles: Vec<Subtitle>,
}

/// A subtitle track attached to a media item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtitle {
    /// Generated identifier.
    #[serde(rename = "_id", default = "generate_id")]
    pub id: String,
    /// Subtitle language.
    pub language: String,
    /// Path to the subtitle file.
    pub file_path: String,
}

/// Partial update for a media item. Only present fields are written.
///
/// Array fields replace the stored array wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    /// Replacement subtitle tracks; each entry gets a generated id on the
    /// way in when the client omits one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<Vec<Subtitle>>,
}

impl MediaUpdate {
    /// Present fields as a flat map, ready for scoped-update construction.
    pub fn into_fields(self) -> Map<String, Value> {
        match serde_json::to_value(&self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
