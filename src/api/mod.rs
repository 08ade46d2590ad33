//! HTTP surface: routing, extraction, and response shaping.

pub mod auth;
pub mod categories;
pub mod movies;
pub mod series;
pub mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;

use crate::catalog::{Auth, Categories, Movies, Series, Users};
use crate::error::Error;
use crate::models::config::Config;
use crate::store::Store;

/// Handler result: success payload or a classified catalog error.
pub type ApiResult<T> = std::result::Result<T, Error>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub movies: Movies,
    pub series: Series,
    pub categories: Categories,
    pub users: Users,
    pub auth: Auth,
}

impl AppState {
    /// Wire the services onto one store.
    pub fn new(store: Arc<Store>, config: &Config) -> Self {
        Self {
            movies: Movies::new(store.clone()),
            series: Series::new(store.clone()),
            categories: Categories::new(store.clone()),
            users: Users::new(store.clone()),
            auth: Auth::new(
                store,
                config.auth.secret.clone(),
                config.auth.token_ttl_secs,
            ),
        }
    }
}

/// The full route table.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/auth", auth::routes())
        .nest("/categories", categories::routes())
        .nest("/movies", movies::routes())
        .nest("/series", series::routes())
        .nest("/users", users::routes())
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// The single error-formatting boundary: classification to status plus
/// `{message}`. Internal detail is logged, never returned.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(json!({ "message": self.public_message() }))).into_response()
    }
}

/// Body for successful deletions.
pub(crate) fn deleted(resource: &str) -> Json<serde_json::Value> {
    Json(json!({ "message": format!("{resource} deleted successfully!") }))
}
