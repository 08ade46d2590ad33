//! User data models.

use serde::{Deserialize, Serialize};

use super::generate_id;

/// User interface language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    En,
}

/// User role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// A user document as stored. `password` holds the bcrypt hash, never the
/// plaintext; this type is not serialized in API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default = "generate_id")]
    pub id: String,
    pub name: String,
    /// Unique across users.
    pub email: String,
    /// bcrypt hash.
    pub password: String,
    #[serde(default)]
    pub prefered_language: Language,
    #[serde(default)]
    pub use_subtitle: bool,
    #[serde(default)]
    pub role: Role,
}

/// Signup payload. The password arrives in plaintext and is hashed before
/// the document is stored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub prefered_language: Language,
    #[serde(default)]
    pub use_subtitle: bool,
    #[serde(default)]
    pub role: Role,
}

/// Account update payload. `password` must match the stored hash;
/// `new_password` is re-hashed when present. Only present profile fields
/// are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    /// Current password, for verification.
    pub password: String,
    #[serde(default)]
    pub new_password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub prefered_language: Option<Language>,
    #[serde(default)]
    pub use_subtitle: Option<bool>,
}

/// Account deletion payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCredentials {
    pub password: String,
}

/// The user shape exposed by the API: everything but the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub prefered_language: Language,
    pub use_subtitle: bool,
    pub role: Role,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            prefered_language: user.prefered_language,
            use_subtitle: user.use_subtitle,
            role: user.role,
        }
    }
}
