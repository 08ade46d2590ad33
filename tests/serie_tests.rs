//! Integration tests for the serie service.
//!
//! Tests cover:
//! - Root CRUD and season/episode append
//! - Depth-correct episode resolution (never depth-agnostic matching)
//! - Not-found classification at each of the three nesting levels
//! - Deletion idempotence and the removal-inconsistency convention

use std::sync::Arc;

use media_catalog::catalog::{locator, Series};
use media_catalog::models::generate_id;
use media_catalog::models::media::{Media, MediaUpdate, Subtitle};
use media_catalog::models::serie::{SeasonUpdate, Serie, SerieUpdate};
use media_catalog::store::Store;
use media_catalog::{Error, Resource};

// ========== TEST FIXTURES ==========

fn service() -> Series {
    Series::new(Arc::new(Store::in_memory()))
}

fn serie(title: &str) -> Serie {
    Serie {
        id: generate_id(),
        title: title.to_string(),
        categories: Vec::new(),
        seasons: Vec::new(),
    }
}

fn episode(title: &str) -> Media {
    Media {
        id: generate_id(),
        title: title.to_string(),
        description: format!("{title} description"),
        file_path: format!("~/series/{title}.mp4"),
        duration: 1000,
        posters: Vec::new(),
        languages: vec!["en-US".to_string()],
        subtitles: Vec::new(),
    }
}

/// A serie with one season holding one episode; returns (service, serie
/// id, season id, episode).
fn serie_with_episode(title: &str) -> (Series, String, String, Media) {
    let series = service();
    let created = series.create(serie(title)).unwrap();
    let with_season = series.append_season(&created.id).unwrap();
    let season_id = with_season.seasons[0].id.clone();

    let new_episode = episode("Pilot");
    series
        .append_episode(&created.id, &season_id, new_episode.clone())
        .unwrap();

    (series, created.id, season_id, new_episode)
}

// ========== ROOT CRUD TESTS ==========

#[test]
fn test_create_and_get() {
    let series = service();
    let created = series.create(serie("Brooklyn 99")).unwrap();

    assert_eq!(series.get(&created.id).unwrap(), created);
    assert!(matches!(
        series.get("missing").unwrap_err(),
        Error::NotFound(Resource::Serie)
    ));
}

#[test]
fn test_list_returns_all_series() {
    let series = service();
    series.create(serie("First")).unwrap();
    series.create(serie("Second")).unwrap();

    assert_eq!(series.list().unwrap().len(), 2);
}

#[test]
fn test_update_root_fields() {
    let series = service();
    let created = series.create(serie("Old")).unwrap();

    let updated = series
        .update(
            &created.id,
            SerieUpdate {
                title: Some("New".to_string()),
                categories: Some(vec!["cat-1".to_string()]),
            },
        )
        .unwrap();

    assert_eq!(updated.title, "New");
    assert_eq!(updated.categories, vec!["cat-1"]);
}

#[test]
fn test_destroy_removes_nested_content_atomically() {
    let (series, serie_id, season_id, pilot) = serie_with_episode("Brooklyn 99");

    series.destroy(&serie_id).unwrap();

    assert!(matches!(
        series.get(&serie_id).unwrap_err(),
        Error::NotFound(Resource::Serie)
    ));
    assert!(matches!(
        series.get_episode(&serie_id, &season_id, &pilot.id).unwrap_err(),
        Error::NotFound(Resource::Serie)
    ));
}

// ========== SEASON TESTS ==========

#[test]
fn test_append_season_generates_identifier() {
    let series = service();
    let created = series.create(serie("Brooklyn 99")).unwrap();

    let one = series.append_season(&created.id).unwrap();
    let two = series.append_season(&created.id).unwrap();

    assert_eq!(two.seasons.len(), 2);
    assert!(two.seasons[0].episodes.is_empty());
    assert_ne!(two.seasons[0].id, two.seasons[1].id);
    assert_eq!(one.seasons[0].id, two.seasons[0].id);
}

#[test]
fn test_append_season_to_unknown_serie() {
    let series = service();
    assert!(matches!(
        series.append_season("missing").unwrap_err(),
        Error::NotFound(Resource::Serie)
    ));
}

#[test]
fn test_get_season_returns_the_addressed_season() {
    let series = service();
    let created = series.create(serie("Brooklyn 99")).unwrap();
    series.append_season(&created.id).unwrap();
    let with_seasons = series.append_season(&created.id).unwrap();
    let second_id = with_seasons.seasons[1].id.clone();

    let season = series.get_season(&created.id, &second_id).unwrap();
    assert_eq!(season.id, second_id);
}

#[test]
fn test_get_season_classifies_depth() {
    let series = service();
    let created = series.create(serie("Brooklyn 99")).unwrap();

    assert!(matches!(
        series.get_season("missing", "whatever").unwrap_err(),
        Error::NotFound(Resource::Serie)
    ));
    assert!(matches!(
        series.get_season(&created.id, "missing").unwrap_err(),
        Error::NotFound(Resource::Season)
    ));
}

#[test]
fn test_update_season_replaces_episode_list() {
    let (series, serie_id, season_id, _) = serie_with_episode("Brooklyn 99");

    let replacement = vec![episode("Recut")];
    let season = series
        .update_season(
            &serie_id,
            &season_id,
            SeasonUpdate {
                episodes: Some(replacement.clone()),
            },
        )
        .unwrap();

    assert_eq!(season.episodes, replacement);
}

#[test]
fn test_update_season_unknown_season_is_serie_not_found() {
    let series = service();
    let created = series.create(serie("Brooklyn 99")).unwrap();

    let err = series
        .update_season(&created.id, "missing", SeasonUpdate::default())
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(Resource::Serie)));
}

/// A season id that was never appended to an existing serie is a missing
/// season, not a missing serie.
#[test]
fn test_destroy_season_never_appended_is_season_not_found() {
    let series = service();
    let created = series.create(serie("Brooklyn 99")).unwrap();

    let err = series.destroy_season(&created.id, "missing").unwrap_err();
    assert!(matches!(err, Error::NotFound(Resource::Season)));
    assert_eq!(err.public_message(), "Season Not Found.");
}

#[test]
fn test_destroy_season_twice_is_not_found() {
    let (series, serie_id, season_id, _) = serie_with_episode("Brooklyn 99");

    series.destroy_season(&serie_id, &season_id).unwrap();

    assert!(series.get(&serie_id).unwrap().seasons.is_empty());
    assert!(matches!(
        series.destroy_season(&serie_id, &season_id).unwrap_err(),
        Error::NotFound(Resource::Season)
    ));
}

// ========== EPISODE TESTS ==========

/// Create, append season, append episode, then fetch: the stored episode is
/// deep-equal to the payload, ids included.
#[test]
fn test_episode_round_trip() {
    let series = service();
    let created = series.create(serie("Brooklyn 99")).unwrap();
    let with_season = series.append_season(&created.id).unwrap();
    let season_id = with_season.seasons[0].id.clone();

    let pilot = Media {
        id: generate_id(),
        title: "Pilot".to_string(),
        description: "The first episode of the first season.".to_string(),
        file_path: "~/series/brooklyn-99/season1/pilot.mp4".to_string(),
        duration: 1000,
        posters: vec!["~/series/brooklyn-99/season1/pilot.png".to_string()],
        languages: vec!["en-US".to_string()],
        subtitles: vec![Subtitle {
            id: generate_id(),
            language: "pt-BR".to_string(),
            file_path: "~/series/brooklyn-99/season1/pilot.pt-br.srt".to_string(),
        }],
    };

    let updated = series
        .append_episode(&created.id, &season_id, pilot.clone())
        .unwrap();
    assert_eq!(updated.seasons[0].episodes.len(), 1);

    let fetched = series
        .get_episode(&created.id, &season_id, &pilot.id)
        .unwrap();
    assert_eq!(fetched, pilot);

    let subtitle = locator::find_by_id(&fetched.subtitles, &pilot.subtitles[0].id).unwrap();
    assert_eq!(subtitle.language, "pt-BR");
}

#[test]
fn test_append_episode_classifies_serie_before_season() {
    let series = service();
    let created = series.create(serie("Brooklyn 99")).unwrap();

    assert!(matches!(
        series
            .append_episode("missing", "whatever", episode("Orphan"))
            .unwrap_err(),
        Error::NotFound(Resource::Serie)
    ));
    assert!(matches!(
        series
            .append_episode(&created.id, "missing", episode("Orphan"))
            .unwrap_err(),
        Error::NotFound(Resource::Season)
    ));
}

/// Episodes resolve independently of their position among siblings.
#[test]
fn test_get_episode_independent_of_position() {
    let series = service();
    let created = series.create(serie("Brooklyn 99")).unwrap();
    let with_season = series.append_season(&created.id).unwrap();
    let season_id = with_season.seasons[0].id.clone();

    let episodes: Vec<Media> = ["Pilot", "The Tagger", "The Slump"]
        .iter()
        .map(|title| episode(title))
        .collect();
    for ep in &episodes {
        series
            .append_episode(&created.id, &season_id, ep.clone())
            .unwrap();
    }

    for ep in &episodes {
        let fetched = series.get_episode(&created.id, &season_id, &ep.id).unwrap();
        assert_eq!(&fetched, ep);
    }
}

/// Depth-correct resolution: an episode id that exists under a *different*
/// season of the same serie must not resolve, even though the compound
/// filter matches the document.
#[test]
fn test_get_episode_from_wrong_season_is_episode_not_found() {
    let series = service();
    let created = series.create(serie("Brooklyn 99")).unwrap();
    let one = series.append_season(&created.id).unwrap();
    let two = series.append_season(&created.id).unwrap();
    let first_season = one.seasons[0].id.clone();
    let second_season = two.seasons[1].id.clone();

    let pilot = episode("Pilot");
    series
        .append_episode(&created.id, &first_season, pilot.clone())
        .unwrap();

    let err = series
        .get_episode(&created.id, &second_season, &pilot.id)
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(Resource::Episode)));
}

#[test]
fn test_get_episode_classifies_each_depth() {
    let (series, serie_id, season_id, pilot) = serie_with_episode("Brooklyn 99");

    assert!(matches!(
        series.get_episode("missing", &season_id, &pilot.id).unwrap_err(),
        Error::NotFound(Resource::Serie)
    ));
    assert!(matches!(
        series.get_episode(&serie_id, "missing", &pilot.id).unwrap_err(),
        Error::NotFound(Resource::Season)
    ));
    assert!(matches!(
        series.get_episode(&serie_id, &season_id, "missing").unwrap_err(),
        Error::NotFound(Resource::Episode)
    ));
}

/// The locator treats empty nested sequences as an ordinary miss at that
/// depth, never a panic.
#[test]
fn test_empty_sequences_resolve_to_not_found() {
    let series = service();
    let created = series.create(serie("Brooklyn 99")).unwrap();

    // No seasons at all.
    assert!(matches!(
        series.get_season(&created.id, "s").unwrap_err(),
        Error::NotFound(Resource::Season)
    ));

    // A season with no episodes.
    let with_season = series.append_season(&created.id).unwrap();
    let season_id = with_season.seasons[0].id.clone();
    assert!(matches!(
        series.get_episode(&created.id, &season_id, "e").unwrap_err(),
        Error::NotFound(Resource::Episode)
    ));
}

#[test]
fn test_update_episode_touches_only_the_target() {
    let series = service();
    let created = series.create(serie("Brooklyn 99")).unwrap();
    let one = series.append_season(&created.id).unwrap();
    let two = series.append_season(&created.id).unwrap();
    let first_season = one.seasons[0].id.clone();
    let second_season = two.seasons[1].id.clone();

    let pilot = episode("Pilot");
    let tagger = episode("The Tagger");
    let finale = episode("Finale");
    series
        .append_episode(&created.id, &first_season, pilot.clone())
        .unwrap();
    series
        .append_episode(&created.id, &first_season, tagger.clone())
        .unwrap();
    series
        .append_episode(&created.id, &second_season, finale.clone())
        .unwrap();

    let updated = series
        .update_episode(
            &created.id,
            &first_season,
            &tagger.id,
            MediaUpdate {
                title: Some("The Tagger (remastered)".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.title, "The Tagger (remastered)");
    assert_eq!(updated.description, tagger.description);

    let after = series.get(&created.id).unwrap();
    assert_eq!(after.seasons[0].episodes[0], pilot);
    assert_eq!(after.seasons[1].episodes[0], finale);
}

/// A partial update addressed through the wrong season never lands; the
/// silent no-op is classified as the serie not being resolvable.
#[test]
fn test_update_episode_from_wrong_season_is_serie_not_found() {
    let series = service();
    let created = series.create(serie("Brooklyn 99")).unwrap();
    let one = series.append_season(&created.id).unwrap();
    let two = series.append_season(&created.id).unwrap();
    let first_season = one.seasons[0].id.clone();
    let second_season = two.seasons[1].id.clone();

    let pilot = episode("Pilot");
    series
        .append_episode(&created.id, &first_season, pilot.clone())
        .unwrap();

    let err = series
        .update_episode(
            &created.id,
            &second_season,
            &pilot.id,
            MediaUpdate {
                title: Some("Never".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(Resource::Serie)));

    // The episode is untouched under its real season.
    let fetched = series
        .get_episode(&created.id, &first_season, &pilot.id)
        .unwrap();
    assert_eq!(fetched.title, "Pilot");
}

#[test]
fn test_destroy_episode_removes_only_the_target() {
    let series = service();
    let created = series.create(serie("Brooklyn 99")).unwrap();
    let with_season = series.append_season(&created.id).unwrap();
    let season_id = with_season.seasons[0].id.clone();

    let pilot = episode("Pilot");
    let tagger = episode("The Tagger");
    series
        .append_episode(&created.id, &season_id, pilot.clone())
        .unwrap();
    series
        .append_episode(&created.id, &season_id, tagger.clone())
        .unwrap();

    series
        .destroy_episode(&created.id, &season_id, &pilot.id)
        .unwrap();

    let after = series.get(&created.id).unwrap();
    assert_eq!(after.seasons[0].episodes.len(), 1);
    assert_eq!(after.seasons[0].episodes[0].id, tagger.id);
}

/// Success then not-found: after a true removal the element cannot be
/// "still present", so the second call classifies as an ordinary 404.
#[test]
fn test_destroy_episode_twice_is_not_found() {
    let (series, serie_id, season_id, pilot) = serie_with_episode("Brooklyn 99");

    series
        .destroy_episode(&serie_id, &season_id, &pilot.id)
        .unwrap();

    let err = series
        .destroy_episode(&serie_id, &season_id, &pilot.id)
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(Resource::Episode)));
}
