//! Login route and the token guard used by mutating catalog routes.

use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use super::{ApiResult, AppState};
use crate::catalog::auth::Claims;
use crate::error::Error;

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> ApiResult<Json<String>> {
    let token = state.auth.login(&payload.email, &payload.password)?;
    Ok(Json(token))
}

/// Extractor guarding a handler behind a valid `x-access-token` header.
///
/// Rejection carries the same 401 body as any other invalid token.
pub struct AuthToken(pub Claims);

impl FromRequestParts<AppState> for AuthToken {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Error> {
        let token = parts
            .headers
            .get("x-access-token")
            .and_then(|value| value.to_str().ok())
            .ok_or(Error::InvalidToken)?;
        Ok(AuthToken(state.auth.verify(token)?))
    }
}
