//! Token-based login.

use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::Users;
use crate::error::{Error, Result};
use crate::store::Store;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub name: String,
    pub email: String,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Login and token verification.
#[derive(Clone)]
pub struct Auth {
    users: Users,
    secret: String,
    token_ttl_secs: u64,
}

impl Auth {
    pub fn new(store: Arc<Store>, secret: String, token_ttl_secs: u64) -> Self {
        Self {
            users: Users::new(store),
            secret,
            token_ttl_secs,
        }
    }

    /// Verify credentials and issue a signed token.
    pub fn login(&self, email: &str, password: &str) -> Result<String> {
        let user = self.users.fetch(email)?;
        if !bcrypt::verify(password, &user.password)? {
            return Err(Error::InvalidPassword);
        }

        let claims = Claims {
            sub: user.id,
            name: user.name,
            email: user.email,
            exp: (chrono::Utc::now() + chrono::Duration::seconds(self.token_ttl_secs as i64))
                .timestamp(),
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }

    /// Decode and validate a token. Any failure, expiry included, is an
    /// invalid token as far as the client is told.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| Error::InvalidToken)
    }
}
