//! Media Catalog
//!
//! A library for cataloging movies and TV series (with nested seasons and
//! episodes) behind a REST API, backed by an embedded JSON document store.

pub mod api;
pub mod catalog;
pub mod error;
pub mod models;
pub mod store;

pub use error::{Error, Resource, Result};
