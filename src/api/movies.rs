//! Handlers for the `/movies` resource.
//!
//! Saga entries are nested one level down: `/movies/{id}[/{entry}]`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use super::auth::AuthToken;
use super::{deleted, ApiResult, AppState};
use crate::models::media::{Media, MediaUpdate};
use crate::models::movie::{Movie, MovieUpdate};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create))
        .route("/{id}", get(show).post(append).put(update).delete(destroy))
        .route(
            "/{id}/{entry}",
            get(show_saga_entry)
                .put(update_saga_entry)
                .delete(destroy_saga_entry),
        )
}

/// POST /movies
async fn create(
    State(state): State<AppState>,
    _auth: AuthToken,
    Json(payload): Json<Movie>,
) -> ApiResult<(StatusCode, Json<Movie>)> {
    let movie = state.movies.create(payload)?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// POST /movies/{id}
async fn append(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path(id): Path<String>,
    Json(entry): Json<Media>,
) -> ApiResult<(StatusCode, Json<Movie>)> {
    let movie = state.movies.append(&id, entry)?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /movies
async fn index(State(state): State<AppState>) -> ApiResult<Json<Vec<Movie>>> {
    Ok(Json(state.movies.list()?))
}

/// GET /movies/{id}
async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Movie>> {
    Ok(Json(state.movies.get(&id)?))
}

/// GET /movies/{id}/{entry}
async fn show_saga_entry(
    State(state): State<AppState>,
    Path((id, entry)): Path<(String, String)>,
) -> ApiResult<Json<Media>> {
    Ok(Json(state.movies.saga_entry(&id, &entry)?))
}

/// PUT /movies/{id}
async fn update(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path(id): Path<String>,
    Json(payload): Json<MovieUpdate>,
) -> ApiResult<Json<Movie>> {
    Ok(Json(state.movies.update(&id, payload)?))
}

/// PUT /movies/{id}/{entry}
async fn update_saga_entry(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path((id, entry)): Path<(String, String)>,
    Json(payload): Json<MediaUpdate>,
) -> ApiResult<Json<Media>> {
    Ok(Json(state.movies.update_saga_entry(&id, &entry, payload)?))
}

/// DELETE /movies/{id}
async fn destroy(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.movies.destroy(&id)?;
    Ok(deleted("Movie"))
}

/// DELETE /movies/{id}/{entry}
async fn destroy_saga_entry(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path((id, entry)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    state.movies.destroy_saga_entry(&id, &entry)?;
    Ok(deleted("Movie"))
}
