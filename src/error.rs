//! Error types for the media catalog.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Resource names used when classifying "not found" outcomes.
///
/// The name identifies the nesting depth at which resolution failed, not
/// just the collection queried: a miss on `/series/{s}/{season}` is a
/// `Season`, not a `Serie`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Movie,
    Serie,
    Season,
    Episode,
    Category,
    User,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Movie => write!(f, "Movie"),
            Resource::Serie => write!(f, "Serie"),
            Resource::Season => write!(f, "Season"),
            Resource::Episode => write!(f, "Episode"),
            Resource::Category => write!(f, "Category"),
            Resource::User => write!(f, "User"),
        }
    }
}

/// Main error type for the media catalog.
#[derive(Error, Debug)]
pub enum Error {
    /// The resource is absent or unresolvable at the addressed depth.
    #[error("{0} Not Found.")]
    NotFound(Resource),

    /// A removal the store reported as applied left the target element
    /// still locatable in the returned document.
    #[error("{0} still present after removal")]
    RemovalIncomplete(Resource),

    // Auth errors
    #[error("Invalid Token.")]
    InvalidToken,

    #[error("Invalid Password.")]
    InvalidPassword,

    #[error("This email is already taken.")]
    EmailTaken,

    #[error("token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    // Store errors
    #[error("store error: {0}")]
    Store(#[from] crate::store::StoreError),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::InvalidToken | Error::InvalidPassword => 401,
            Error::EmailTaken => 400,
            _ => 500,
        }
    }

    /// Message exposed to API clients.
    ///
    /// Internal faults collapse to a generic message; classification
    /// detail stays server-side.
    pub fn public_message(&self) -> String {
        match self {
            Error::NotFound(_)
            | Error::InvalidToken
            | Error::InvalidPassword
            | Error::EmailTaken => self.to_string(),
            _ => "Internal Server Error.".to_string(),
        }
    }
}
