//! Authenticated request context extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;

use super::db as auth_db;
use crate::db;
use crate::error::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE_NAME: &str = "vocab_session";

/// Authenticated request context. Add this as a handler parameter to
/// require authentication; unauthenticated requests get a 401 JSON body.
#[derive(Debug, Clone)]
pub struct AuthContext {
  pub user_id: i64,
  pub display_name: String,
}

impl FromRequestParts<AppState> for AuthContext {
  type Rejection = Response;

  async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
    let jar = CookieJar::from_request_parts(parts, state)
      .await
      .map_err(|_| AppError::Unauthorized.into_response())?;

    let token = jar
      .get(SESSION_COOKIE_NAME)
      .map(|c| c.value().to_string())
      .ok_or_else(|| AppError::Unauthorized.into_response())?;

    let conn = db::try_lock(&state.db).map_err(|e| AppError::from(e).into_response())?;

    let (user_id, display_name) = auth_db::get_session_user(&conn, &token)
      .map_err(|e| AppError::from(e).into_response())?
      .ok_or_else(|| AppError::Unauthorized.into_response())?;

    Ok(AuthContext {
      user_id,
      display_name,
    })
  }
}
