//! Bulk import endpoint.

use axum::extract::State;
use axum::Json;

use crate::auth::AuthContext;
use crate::db;
use crate::error::AppError;
use crate::import::{run_import, validate_import, ImportData, ImportReport};
use crate::state::AppState;

/// POST /import
///
/// The whole file is validated first; any error rejects the upload before a
/// single word is written.
pub async fn import_words(
  auth: AuthContext,
  State(state): State<AppState>,
  Json(data): Json<ImportData>,
) -> Result<Json<ImportReport>, AppError> {
  let errors = validate_import(&data);
  if !errors.is_empty() {
    return Err(AppError::Validation(errors));
  }

  let conn = db::try_lock(&state.db)?;
  Ok(Json(run_import(&conn, auth.user_id, &data)))
}
