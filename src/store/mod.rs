//! Embedded JSON document store.
//!
//! Named collections of JSON documents keyed by `_id`, queried with
//! compound dotted-path filters and mutated with scoped update
//! instructions. The whole collection set persists to a single JSON file
//! (loaded on open, saved after every mutation); opened without a path,
//! the store runs purely in memory.
//!
//! The store is the catalog's sole synchronization point: every
//! find/update/remove call is atomic behind one lock, and no operation
//! spans more than one document.

mod filter;
mod update;

pub use filter::Filter;
pub use update::{ArrayFilter, UpdateDoc};

use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use thiserror::Error;

/// Store-level failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid update path: {0}")]
    InvalidPath(String),

    #[error("no array filter defined for marker '$[{0}]'")]
    UndefinedArrayFilter(String),

    #[error("store lock poisoned")]
    Poisoned,

    #[error("failed to access store file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse store file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which document state `find_one_and_update` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnDocument {
    /// The document as it was before the update.
    #[default]
    Before,
    /// The document after the update was applied.
    After,
}

/// The document store.
#[derive(Debug)]
pub struct Store {
    path: Option<PathBuf>,
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl Store {
    /// Open a store backed by a JSON file, loading existing data.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let collections = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path: Some(path),
            collections: RwLock::new(collections),
        })
    }

    /// An in-memory store with no backing file.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a document and return it as stored.
    pub fn insert(&self, collection: &str, doc: Value) -> Result<Value, StoreError> {
        let mut collections = self.collections.write().map_err(|_| StoreError::Poisoned)?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        self.persist(&collections)?;
        Ok(doc)
    }

    /// All documents matching the filter, in insertion order.
    pub fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    /// The first document matching the filter.
    pub fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    /// Apply a scoped update to the first document matching the filter.
    ///
    /// Returns `None` when no document matched; otherwise the document
    /// state selected by `ret`.
    pub fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &UpdateDoc,
        ret: ReturnDocument,
    ) -> Result<Option<Value>, StoreError> {
        let mut collections = self.collections.write().map_err(|_| StoreError::Poisoned)?;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(doc) = docs.iter_mut().find(|d| filter.matches(d)) else {
            return Ok(None);
        };

        let before = doc.clone();
        update.apply(doc, filter)?;
        let after = doc.clone();

        self.persist(&collections)?;
        Ok(Some(match ret {
            ReturnDocument::Before => before,
            ReturnDocument::After => after,
        }))
    }

    /// Remove the first document matching the filter and return it.
    pub fn find_one_and_delete(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Value>, StoreError> {
        let mut collections = self.collections.write().map_err(|_| StoreError::Poisoned)?;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(index) = docs.iter().position(|d| filter.matches(d)) else {
            return Ok(None);
        };

        let removed = docs.remove(index);
        self.persist(&collections)?;
        Ok(Some(removed))
    }

    /// Write the collection set to the backing file, if any.
    fn persist(&self, collections: &HashMap<String, Vec<Value>>) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Keep the previous state around in case a write is interrupted.
        if path.exists() {
            let backup_path = path.with_extension("json.backup");
            fs::copy(path, &backup_path)?;
        }

        let content = serde_json::to_string_pretty(collections)?;
        fs::write(path, content)?;
        Ok(())
    }
}
