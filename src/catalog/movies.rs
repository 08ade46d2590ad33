//! Movie service.
//!
//! Saga entries are addressed by compound filter `{_id, "saga._id"}`. A
//! filter match proves the movie matched, not that the entry exists, so
//! every operation re-locates the entry in the document the store
//! returned before trusting the outcome.

use std::sync::Arc;

use serde_json::json;

use super::{locator, payload, MOVIES};
use crate::error::{Error, Resource, Result};
use crate::models::media::{Media, MediaUpdate};
use crate::models::movie::{Movie, MovieUpdate};
use crate::store::{Filter, ReturnDocument, Store, UpdateDoc};

/// Movie operations.
#[derive(Clone)]
pub struct Movies {
    store: Arc<Store>,
}

impl Movies {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Insert a new movie. Titles are not unique; no pre-existence check.
    pub fn create(&self, movie: Movie) -> Result<Movie> {
        let doc = self.store.insert(MOVIES, serde_json::to_value(&movie)?)?;
        Ok(serde_json::from_value(doc)?)
    }

    /// Append an entry to the saga and return the updated movie.
    pub fn append(&self, movie_id: &str, entry: Media) -> Result<Movie> {
        let update = UpdateDoc::new().push("saga", serde_json::to_value(&entry)?);
        let doc = self
            .store
            .find_one_and_update(MOVIES, &Filter::id(movie_id), &update, ReturnDocument::After)?
            .ok_or(Error::NotFound(Resource::Movie))?;
        Ok(serde_json::from_value(doc)?)
    }

    /// All movies.
    pub fn list(&self) -> Result<Vec<Movie>> {
        let docs = self.store.find(MOVIES, &Filter::new())?;
        docs.into_iter()
            .map(|doc| Ok(serde_json::from_value(doc)?))
            .collect()
    }

    /// A movie by id.
    pub fn get(&self, movie_id: &str) -> Result<Movie> {
        let doc = self
            .store
            .find_one(MOVIES, &Filter::id(movie_id))?
            .ok_or(Error::NotFound(Resource::Movie))?;
        Ok(serde_json::from_value(doc)?)
    }

    /// A single saga entry.
    pub fn saga_entry(&self, movie_id: &str, entry_id: &str) -> Result<Media> {
        let filter = Filter::id(movie_id).with("saga._id", entry_id);
        let doc = self
            .store
            .find_one(MOVIES, &filter)?
            .ok_or(Error::NotFound(Resource::Movie))?;

        let movie: Movie = serde_json::from_value(doc)?;
        locator::find_by_id(&movie.saga, entry_id)
            .cloned()
            .ok_or(Error::NotFound(Resource::Movie))
    }

    /// Update root-level fields and return the post-update movie.
    pub fn update(&self, movie_id: &str, fields: MovieUpdate) -> Result<Movie> {
        let update = payload::root_update(fields.into_fields());
        let doc = self
            .store
            .find_one_and_update(MOVIES, &Filter::id(movie_id), &update, ReturnDocument::After)?
            .ok_or(Error::NotFound(Resource::Movie))?;
        Ok(serde_json::from_value(doc)?)
    }

    /// Partially update one saga entry and return it.
    ///
    /// An update the store accepted but that cannot be re-located in the
    /// result is a silent no-op, reported as the movie not being found.
    pub fn update_saga_entry(
        &self,
        movie_id: &str,
        entry_id: &str,
        fields: MediaUpdate,
    ) -> Result<Media> {
        let filter = Filter::id(movie_id).with("saga._id", entry_id);
        let update = payload::scoped_update("saga", fields.into_fields());
        let doc = self
            .store
            .find_one_and_update(MOVIES, &filter, &update, ReturnDocument::After)?
            .ok_or(Error::NotFound(Resource::Movie))?;

        let movie: Movie = serde_json::from_value(doc)?;
        locator::find_by_id(&movie.saga, entry_id)
            .cloned()
            .ok_or(Error::NotFound(Resource::Movie))
    }

    /// Delete the whole movie document, nested content included.
    pub fn destroy(&self, movie_id: &str) -> Result<()> {
        self.store
            .find_one_and_delete(MOVIES, &Filter::id(movie_id))?
            .ok_or(Error::NotFound(Resource::Movie))?;
        Ok(())
    }

    /// Remove one saga entry.
    ///
    /// A filter miss is an ordinary 404; an entry still locatable after
    /// the pull is a store/locator inconsistency and surfaces as a server
    /// error, never as success.
    pub fn destroy_saga_entry(&self, movie_id: &str, entry_id: &str) -> Result<()> {
        let filter = Filter::id(movie_id).with("saga._id", entry_id);
        let update = UpdateDoc::new().pull("saga", json!({ "_id": entry_id }));
        let doc = self
            .store
            .find_one_and_update(MOVIES, &filter, &update, ReturnDocument::After)?
            .ok_or(Error::NotFound(Resource::Movie))?;

        let movie: Movie = serde_json::from_value(doc)?;
        if locator::find_by_id(&movie.saga, entry_id).is_some() {
            return Err(Error::RemovalIncomplete(Resource::Movie));
        }
        Ok(())
    }
}
