//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use super::auth::AuthToken;
use super::{deleted, ApiResult, AppState};
use crate::models::category::{Category, CategoryUpdate};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index).post(create)).route(
        "/{id}",
        get(show).put(update).delete(destroy),
    )
}

/// POST /categories
async fn create(
    State(state): State<AppState>,
    _auth: AuthToken,
    Json(payload): Json<Category>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = state.categories.create(payload)?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /categories
async fn index(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.categories.list()?))
}

/// GET /categories/{id}
async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Category>> {
    Ok(Json(state.categories.get(&id)?))
}

/// PUT /categories/{id}
async fn update(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> ApiResult<Json<Category>> {
    Ok(Json(state.categories.update(&id, payload)?))
}

/// DELETE /categories/{id}
async fn destroy(
    State(state): State<AppState>,
    _auth: AuthToken,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.categories.destroy(&id)?;
    Ok(deleted("Category"))
}
