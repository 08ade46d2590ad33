//! User service.
//!
//! Accounts are addressed by email (unique). Passwords are bcrypt-hashed
//! before the document is stored; account mutation and deletion verify
//! the current password rather than a token.

use std::sync::Arc;

use super::{payload, USERS};
use crate::error::{Error, Resource, Result};
use crate::models::generate_id;
use crate::models::user::{NewUser, User, UserProfile, UserUpdate};
use crate::store::{Filter, ReturnDocument, Store};

/// User operations.
#[derive(Clone)]
pub struct Users {
    store: Arc<Store>,
}

impl Users {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Create an account. The email must not be taken.
    pub fn create(&self, payload: NewUser) -> Result<UserProfile> {
        let email_filter = Filter::new().with("email", payload.email.as_str());
        if self.store.find_one(USERS, &email_filter)?.is_some() {
            return Err(Error::EmailTaken);
        }

        let user = User {
            id: generate_id(),
            name: payload.name,
            email: payload.email,
            password: bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)?,
            prefered_language: payload.prefered_language,
            use_subtitle: payload.use_subtitle,
            role: payload.role,
        };
        let doc = self.store.insert(USERS, serde_json::to_value(&user)?)?;
        let stored: User = serde_json::from_value(doc)?;
        Ok(stored.into())
    }

    /// All users.
    pub fn list(&self) -> Result<Vec<UserProfile>> {
        let docs = self.store.find(USERS, &Filter::new())?;
        docs.into_iter()
            .map(|doc| {
                let user: User = serde_json::from_value(doc)?;
                Ok(user.into())
            })
            .collect()
    }

    /// An account by email.
    pub fn get(&self, email: &str) -> Result<UserProfile> {
        Ok(self.fetch(email)?.into())
    }

    /// Update an account after verifying its current password.
    ///
    /// `new_password` is re-hashed; other present fields are written
    /// as-is. The email itself is not changeable.
    pub fn update(&self, email: &str, payload: UserUpdate) -> Result<UserProfile> {
        let user = self.fetch(email)?;
        if !bcrypt::verify(&payload.password, &user.password)? {
            return Err(Error::InvalidPassword);
        }

        let mut fields = serde_json::Map::new();
        if let Some(name) = payload.name {
            fields.insert("name".to_string(), name.into());
        }
        if let Some(language) = payload.prefered_language {
            fields.insert(
                "preferedLanguage".to_string(),
                serde_json::to_value(language)?,
            );
        }
        if let Some(use_subtitle) = payload.use_subtitle {
            fields.insert("useSubtitle".to_string(), use_subtitle.into());
        }
        if let Some(new_password) = payload.new_password {
            let hash = bcrypt::hash(&new_password, bcrypt::DEFAULT_COST)?;
            fields.insert("password".to_string(), hash.into());
        }

        let filter = Filter::new().with("email", email);
        let update = payload::root_update(fields);
        let doc = self
            .store
            .find_one_and_update(USERS, &filter, &update, ReturnDocument::After)?
            .ok_or(Error::NotFound(Resource::User))?;
        let updated: User = serde_json::from_value(doc)?;
        Ok(updated.into())
    }

    /// Delete an account after verifying its password.
    pub fn destroy(&self, email: &str, password: &str) -> Result<()> {
        let user = self.fetch(email)?;
        if !bcrypt::verify(password, &user.password)? {
            return Err(Error::InvalidPassword);
        }

        self.store
            .find_one_and_delete(USERS, &Filter::new().with("email", email))?
            .ok_or(Error::NotFound(Resource::User))?;
        Ok(())
    }

    /// The stored user document for an email, hash included.
    pub(crate) fn fetch(&self, email: &str) -> Result<User> {
        let doc = self
            .store
            .find_one(USERS, &Filter::new().with("email", email))?
            .ok_or(Error::NotFound(Resource::User))?;
        Ok(serde_json::from_value(doc)?)
    }
}
