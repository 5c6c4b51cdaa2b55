//! History endpoints, all reads over the decorated session views.

use axum::extract::State;
use axum::Json;

use crate::auth::AuthContext;
use crate::db;
use crate::error::AppError;
use crate::history::{self, FailedWordSummary, HistoryEntry};
use crate::state::AppState;

/// GET /history
pub async fn get_history(
  auth: AuthContext,
  State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
  let conn = db::try_lock(&state.db)?;
  Ok(Json(history::get_history(&conn, auth.user_id)?))
}

/// GET /history/today
pub async fn get_today(
  auth: AuthContext,
  State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
  let conn = db::try_lock(&state.db)?;
  Ok(Json(history::get_today_history(&conn, auth.user_id)?))
}

/// GET /history/top-failed
pub async fn get_top_failed(
  auth: AuthContext,
  State(state): State<AppState>,
) -> Result<Json<Vec<FailedWordSummary>>, AppError> {
  let conn = db::try_lock(&state.db)?;
  Ok(Json(history::get_top_failed(&conn, auth.user_id)?))
}
