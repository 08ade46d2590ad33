//! Handlers for the `/users` resource.
//!
//! Accounts are addressed by email. Mutations authenticate with the
//! account password in the body rather than an access token; signup is
//! open.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use super::{deleted, ApiResult, AppState};
use crate::models::user::{NewUser, UserCredentials, UserProfile, UserUpdate};

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index).post(create)).route(
        "/{email}",
        get(show).put(update).delete(destroy),
    )
}

/// POST /users
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let user = state.users.create(payload)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users
async fn index(State(state): State<AppState>) -> ApiResult<Json<Vec<UserProfile>>> {
    Ok(Json(state.users.list()?))
}

/// GET /users/{email}
async fn show(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.users.get(&email)?))
}

/// PUT /users/{email}
async fn update(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> ApiResult<Json<UserProfile>> {
    Ok(Json(state.users.update(&email, payload)?))
}

/// DELETE /users/{email}
async fn destroy(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(payload): Json<UserCredentials>,
) -> ApiResult<Json<Value>> {
    state.users.destroy(&email, &payload.password)?;
    Ok(deleted("User"))
}
