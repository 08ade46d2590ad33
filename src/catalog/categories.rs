//! Category service.

use std::sync::Arc;

use super::{payload, CATEGORIES};
use crate::error::{Error, Resource, Result};
use crate::models::category::{Category, CategoryUpdate};
use crate::store::{Filter, ReturnDocument, Store};

/// Category operations.
///
/// Categories are referenced by id from movies and series, never
/// embedded. Deleting one does not touch its referents; dangling ids are
/// tolerated until a cascade policy is decided.
#[derive(Clone)]
pub struct Categories {
    store: Arc<Store>,
}

impl Categories {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Insert a new category.
    pub fn create(&self, category: Category) -> Result<Category> {
        let doc = self
            .store
            .insert(CATEGORIES, serde_json::to_value(&category)?)?;
        Ok(serde_json::from_value(doc)?)
    }

    /// All categories.
    pub fn list(&self) -> Result<Vec<Category>> {
        let docs = self.store.find(CATEGORIES, &Filter::new())?;
        docs.into_iter()
            .map(|doc| Ok(serde_json::from_value(doc)?))
            .collect()
    }

    /// A category by id.
    pub fn get(&self, category_id: &str) -> Result<Category> {
        let doc = self
            .store
            .find_one(CATEGORIES, &Filter::id(category_id))?
            .ok_or(Error::NotFound(Resource::Category))?;
        Ok(serde_json::from_value(doc)?)
    }

    /// Rename a category and return the post-update state.
    pub fn update(&self, category_id: &str, fields: CategoryUpdate) -> Result<Category> {
        let mut map = serde_json::Map::new();
        if let Some(name) = fields.name {
            map.insert("name".to_string(), name.into());
        }
        let update = payload::root_update(map);

        let doc = self
            .store
            .find_one_and_update(
                CATEGORIES,
                &Filter::id(category_id),
                &update,
                ReturnDocument::After,
            )?
            .ok_or(Error::NotFound(Resource::Category))?;
        Ok(serde_json::from_value(doc)?)
    }

    /// Delete a category. Referencing movies/series are left untouched.
    pub fn destroy(&self, category_id: &str) -> Result<()> {
        self.store
            .find_one_and_delete(CATEGORIES, &Filter::id(category_id))?
            .ok_or(Error::NotFound(Resource::Category))?;
        Ok(())
    }
}
