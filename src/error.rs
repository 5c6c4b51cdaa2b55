//! Error type for the HTTP boundary.
//!
//! Validation problems abort the operation before any write and carry the
//! full message list back to the client; everything store-related collapses
//! to a generic 500 after being logged. Nothing is retried automatically.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbLockError;

#[derive(Debug)]
pub enum AppError {
  /// Referenced entity does not exist (404)
  NotFound(&'static str),
  /// Input rejected before any write (422)
  Validation(Vec<String>),
  /// Credentials rejected or no session (401)
  Unauthorized,
  /// Underlying store failure (500)
  Db(rusqlite::Error),
  /// Database mutex unavailable (500)
  Lock,
}

impl From<rusqlite::Error> for AppError {
  fn from(e: rusqlite::Error) -> Self {
    Self::Db(e)
  }
}

impl From<DbLockError> for AppError {
  fn from(_: DbLockError) -> Self {
    Self::Lock
  }
}

impl AppError {
  pub fn validation(msg: impl Into<String>) -> Self {
    Self::Validation(vec![msg.into()])
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let (status, body) = match self {
      Self::NotFound(what) => (
        StatusCode::NOT_FOUND,
        json!({ "error": format!("{} not found", what) }),
      ),
      Self::Validation(errors) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({ "error": "validation failed", "details": errors }),
      ),
      Self::Unauthorized => (
        StatusCode::UNAUTHORIZED,
        json!({ "error": "not signed in" }),
      ),
      Self::Db(e) => {
        tracing::error!("Database error: {}", e);
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({ "error": "internal error" }),
        )
      }
      Self::Lock => (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "database unavailable" }),
      ),
    };
    (status, Json(body)).into_response()
  }
}
