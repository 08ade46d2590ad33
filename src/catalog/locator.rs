//! Nested-element re-verification.
//!
//! A compound filter matching a document does not prove the nested ids
//! coexist on one branch at the queried depth (dotted-path conditions
//! match independently across array elements). After a fetch or update
//! returns a document, the locator walks its nested sequences to confirm
//! the addressed element actually exists there, and on failure reports
//! the depth at which resolution stopped.

use crate::models::media::{Media, Subtitle};
use crate::models::serie::{Season, Serie};

/// Anything carrying a generated nested-element identifier.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Media {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Season {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Subtitle {
    fn key(&self) -> &str {
        &self.id
    }
}

/// The depth at which a season-then-episode walk failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingAt {
    Season,
    Episode,
}

/// Find an element by identifier within one nested sequence.
///
/// An empty sequence is an ordinary miss, never a panic.
pub fn find_by_id<'a, T: Keyed>(entries: &'a [T], id: &str) -> Option<&'a T> {
    entries.iter().find(|entry| entry.key() == id)
}

/// Resolve an episode through its season, reporting which segment failed.
pub fn locate_episode<'a>(
    serie: &'a Serie,
    season_id: &str,
    episode_id: &str,
) -> Result<&'a Media, MissingAt> {
    let season = find_by_id(&serie.seasons, season_id).ok_or(MissingAt::Season)?;
    find_by_id(&season.episodes, episode_id).ok_or(MissingAt::Episode)
}
