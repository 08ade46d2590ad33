//! Serie service.
//!
//! The same addressing scheme as movies, one level deeper: seasons are
//! addressed by `{_id, "seasons._id"}` and episodes by
//! `{_id, "seasons._id", "seasons.episodes._id"}`. Because dotted-path
//! conditions match independently across branches, a compound match never
//! proves the episode lives under the addressed season; the locator
//! settles that against the returned document, and its failure depth
//! picks the resource reported as missing.

use std::sync::Arc;

use serde_json::json;

use super::locator::{self, MissingAt};
use super::{payload, SERIES};
use crate::error::{Error, Resource, Result};
use crate::models::media::{Media, MediaUpdate};
use crate::models::serie::{Season, SeasonUpdate, Serie, SerieUpdate};
use crate::store::{Filter, ReturnDocument, Store, UpdateDoc};

/// Serie operations.
#[derive(Clone)]
pub struct Series {
    store: Arc<Store>,
}

impl Series {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Insert a new serie.
    pub fn create(&self, serie: Serie) -> Result<Serie> {
        let doc = self.store.insert(SERIES, serde_json::to_value(&serie)?)?;
        Ok(serde_json::from_value(doc)?)
    }

    /// Append an empty season and return the updated serie.
    pub fn append_season(&self, serie_id: &str) -> Result<Serie> {
        let update = UpdateDoc::new().push("seasons", serde_json::to_value(Season::new())?);
        let doc = self
            .store
            .find_one_and_update(SERIES, &Filter::id(serie_id), &update, ReturnDocument::After)?
            .ok_or(Error::NotFound(Resource::Serie))?;
        Ok(serde_json::from_value(doc)?)
    }

    /// Append an episode to a season and return the updated serie.
    ///
    /// When the compound filter misses, a root probe decides whether the
    /// serie or the season is the missing resource, in that order.
    pub fn append_episode(&self, serie_id: &str, season_id: &str, episode: Media) -> Result<Serie> {
        let filter = Filter::id(serie_id).with("seasons._id", season_id);
        let update = UpdateDoc::new().push("seasons.$.episodes", serde_json::to_value(&episode)?);

        match self
            .store
            .find_one_and_update(SERIES, &filter, &update, ReturnDocument::After)?
        {
            Some(doc) => {
                let serie: Serie = serde_json::from_value(doc)?;
                if locator::find_by_id(&serie.seasons, season_id).is_none() {
                    return Err(Error::NotFound(Resource::Season));
                }
                Ok(serie)
            }
            None => Err(self.missing_season_or_serie(serie_id)?),
        }
    }

    /// All series.
    pub fn list(&self) -> Result<Vec<Serie>> {
        let docs = self.store.find(SERIES, &Filter::new())?;
        docs.into_iter()
            .map(|doc| Ok(serde_json::from_value(doc)?))
            .collect()
    }

    /// A serie by id.
    pub fn get(&self, serie_id: &str) -> Result<Serie> {
        let doc = self
            .store
            .find_one(SERIES, &Filter::id(serie_id))?
            .ok_or(Error::NotFound(Resource::Serie))?;
        Ok(serde_json::from_value(doc)?)
    }

    /// A single season.
    pub fn get_season(&self, serie_id: &str, season_id: &str) -> Result<Season> {
        let filter = Filter::id(serie_id).with("seasons._id", season_id);
        match self.store.find_one(SERIES, &filter)? {
            Some(doc) => {
                let serie: Serie = serde_json::from_value(doc)?;
                locator::find_by_id(&serie.seasons, season_id)
                    .cloned()
                    .ok_or(Error::NotFound(Resource::Season))
            }
            None => Err(self.missing_season_or_serie(serie_id)?),
        }
    }

    /// A single episode, resolved through its season.
    pub fn get_episode(&self, serie_id: &str, season_id: &str, episode_id: &str) -> Result<Media> {
        let filter = Filter::id(serie_id)
            .with("seasons._id", season_id)
            .with("seasons.episodes._id", episode_id);

        let serie: Serie = match self.store.find_one(SERIES, &filter)? {
            Some(doc) => serde_json::from_value(doc)?,
            None => {
                // The compound filter is weaker than the locator, so the
                // root document is enough to classify the failure depth.
                let root = self
                    .store
                    .find_one(SERIES, &Filter::id(serie_id))?
                    .ok_or(Error::NotFound(Resource::Serie))?;
                serde_json::from_value(root)?
            }
        };

        locator::locate_episode(&serie, season_id, episode_id)
            .cloned()
            .map_err(|depth| match depth {
                MissingAt::Season => Error::NotFound(Resource::Season),
                MissingAt::Episode => Error::NotFound(Resource::Episode),
            })
    }

    /// Update root-level fields and return the post-update serie.
    pub fn update(&self, serie_id: &str, fields: SerieUpdate) -> Result<Serie> {
        let update = payload::root_update(fields.into_fields());
        let doc = self
            .store
            .find_one_and_update(SERIES, &Filter::id(serie_id), &update, ReturnDocument::After)?
            .ok_or(Error::NotFound(Resource::Serie))?;
        Ok(serde_json::from_value(doc)?)
    }

    /// Partially update one season and return it.
    pub fn update_season(
        &self,
        serie_id: &str,
        season_id: &str,
        fields: SeasonUpdate,
    ) -> Result<Season> {
        let filter = Filter::id(serie_id).with("seasons._id", season_id);
        let update = payload::scoped_update("seasons", fields.into_fields());
        let doc = self
            .store
            .find_one_and_update(SERIES, &filter, &update, ReturnDocument::After)?
            .ok_or(Error::NotFound(Resource::Serie))?;

        let serie: Serie = serde_json::from_value(doc)?;
        locator::find_by_id(&serie.seasons, season_id)
            .cloned()
            .ok_or(Error::NotFound(Resource::Serie))
    }

    /// Partially update one episode and return it.
    ///
    /// Three-level addressing: the serie by id, the season by array
    /// filter, the episode by positional marker within that season.
    pub fn update_episode(
        &self,
        serie_id: &str,
        season_id: &str,
        episode_id: &str,
        fields: MediaUpdate,
    ) -> Result<Media> {
        let filter = Filter::id(serie_id)
            .with("seasons._id", season_id)
            .with("seasons.episodes._id", episode_id);
        let update = payload::scoped_update("seasons.$[season].episodes", fields.into_fields())
            .array_filter("season", "_id", season_id);

        let doc = self
            .store
            .find_one_and_update(SERIES, &filter, &update, ReturnDocument::After)?
            .ok_or(Error::NotFound(Resource::Serie))?;

        let serie: Serie = serde_json::from_value(doc)?;
        locator::locate_episode(&serie, season_id, episode_id)
            .cloned()
            .map_err(|_| Error::NotFound(Resource::Serie))
    }

    /// Delete the whole serie document, nested content included.
    pub fn destroy(&self, serie_id: &str) -> Result<()> {
        self.store
            .find_one_and_delete(SERIES, &Filter::id(serie_id))?
            .ok_or(Error::NotFound(Resource::Serie))?;
        Ok(())
    }

    /// Remove one season.
    pub fn destroy_season(&self, serie_id: &str, season_id: &str) -> Result<()> {
        let filter = Filter::id(serie_id).with("seasons._id", season_id);
        let update = UpdateDoc::new().pull("seasons", json!({ "_id": season_id }));
        let doc = self
            .store
            .find_one_and_update(SERIES, &filter, &update, ReturnDocument::After)?
            .ok_or(Error::NotFound(Resource::Season))?;

        let serie: Serie = serde_json::from_value(doc)?;
        if locator::find_by_id(&serie.seasons, season_id).is_some() {
            return Err(Error::RemovalIncomplete(Resource::Season));
        }
        Ok(())
    }

    /// Remove one episode from its season.
    pub fn destroy_episode(&self, serie_id: &str, season_id: &str, episode_id: &str) -> Result<()> {
        let filter = Filter::id(serie_id)
            .with("seasons._id", season_id)
            .with("seasons.episodes._id", episode_id);
        let update = UpdateDoc::new().pull("seasons.$.episodes", json!({ "_id": episode_id }));
        let doc = self
            .store
            .find_one_and_update(SERIES, &filter, &update, ReturnDocument::After)?
            .ok_or(Error::NotFound(Resource::Episode))?;

        let serie: Serie = serde_json::from_value(doc)?;
        if locator::locate_episode(&serie, season_id, episode_id).is_ok() {
            return Err(Error::RemovalIncomplete(Resource::Episode));
        }
        Ok(())
    }

    /// Classify a compound-filter miss at season depth: the serie when the
    /// root is gone, the season otherwise.
    fn missing_season_or_serie(&self, serie_id: &str) -> Result<Error> {
        if self.store.find_one(SERIES, &Filter::id(serie_id))?.is_none() {
            Ok(Error::NotFound(Resource::Serie))
        } else {
            Ok(Error::NotFound(Resource::Season))
        }
    }
}
