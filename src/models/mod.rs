//! Data models.

pub mod category;
pub mod config;
pub mod media;
pub mod movie;
pub mod serie;
pub mod user;

/// Generate a fresh nested-element identifier.
///
/// Identifiers are UUIDs, so they are never reused after a deletion.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
