//! Handlers for the `/series` resource.
//!
//! Three-level paths: `/series/{serie}[/{season}[/{episode}]]`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use super::auth::AuthToken;
use super::{deleted, ApiResult, AppState};
use crate::models::media::{Media, MediaUpdate};
use crate::models::serie::{Season, SeasonUpdate, Serie, SerieUpdate};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route(
            "/{serie}",
            get(show).post(append_season).put(update).delete(destroy),
        )
        .route(
            "/{serie}/{season}",
            get(show_season)
                .post(append_episode)
                .put(update_season)
                .delete(destroy_season),
        )
        .route(
            "/{serie}/{season}/{episode}",
            get(show_episode)
                .put(update_episode)
                .delete(destroy_episode),
        )
}

/// POST /series
async fn create(
    State(state): State<AppState>,
    _auth: AuthToken,
    Json(payload): Json<Serie>,
) -> ApiResult<(StatusCode, Json<Serie>)> {
    let serie = state.series.create(payload)?;
    Ok((StatusCode::CREATED, Json(serie)))
}

/// POST /series/{serie}
async fn append_season(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path(serie): Path<String>,
) -> ApiResult<(StatusCode, Json<Serie>)> {
    let serie = state.series.append_season(&serie)?;
    Ok((StatusCode::CREATED, Json(serie)))
}

/// POST /series/{serie}/{season}
async fn append_episode(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path((serie, season)): Path<(String, String)>,
    Json(episode): Json<Media>,
) -> ApiResult<(StatusCode, Json<Serie>)> {
    let serie = state.series.append_episode(&serie, &season, episode)?;
    Ok((StatusCode::CREATED, Json(serie)))
}

/// GET /series
async fn index(State(state): State<AppState>) -> ApiResult<Json<Vec<Serie>>> {
    Ok(Json(state.series.list()?))
}

/// GET /series/{serie}
async fn show(State(state): State<AppState>, Path(serie): Path<String>) -> ApiResult<Json<Serie>> {
    Ok(Json(state.series.get(&serie)?))
}

/// GET /series/{serie}/{season}
async fn show_season(
    State(state): State<AppState>,
    Path((serie, season)): Path<(String, String)>,
) -> ApiResult<Json<Season>> {
    Ok(Json(state.series.get_season(&serie, &season)?))
}

/// GET /series/{serie}/{season}/{episode}
async fn show_episode(
    State(state): State<AppState>,
    Path((serie, season, episode)): Path<(String, String, String)>,
) -> ApiResult<Json<Media>> {
    Ok(Json(state.series.get_episode(&serie, &season, &episode)?))
}

/// PUT /series/{serie}
async fn update(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path(serie): Path<String>,
    Json(payload): Json<SerieUpdate>,
) -> ApiResult<Json<Serie>> {
    Ok(Json(state.series.update(&serie, payload)?))
}

/// PUT /series/{serie}/{season}
async fn update_season(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path((serie, season)): Path<(String, String)>,
    Json(payload): Json<SeasonUpdate>,
) -> ApiResult<Json<Season>> {
    Ok(Json(state.series.update_season(&serie, &season, payload)?))
}

/// PUT /series/{serie}/{season}/{episode}
async fn update_episode(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path((serie, season, episode)): Path<(String, String, String)>,
    Json(payload): Json<MediaUpdate>,
) -> ApiResult<Json<Media>> {
    Ok(Json(
        state
            .series
            .update_episode(&serie, &season, &episode, payload)?,
    ))
}

/// DELETE /series/{serie}
async fn destroy(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path(serie): Path<String>,
) -> ApiResult<Json<Value>> {
    state.series.destroy(&serie)?;
    Ok(deleted("Serie"))
}

/// DELETE /series/{serie}/{season}
async fn destroy_season(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path((serie, season)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    state.series.destroy_season(&serie, &season)?;
    Ok(deleted("Season"))
}

/// DELETE /series/{serie}/{season}/{episode}
async fn destroy_episode(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path((serie, season, episode)): Path<(String, String, String)>,
) -> ApiResult<Json<Value>> {
    state.series.destroy_episode(&serie, &season, &episode)?;
    Ok(deleted("Episode"))
}
