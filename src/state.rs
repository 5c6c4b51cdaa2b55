//! Application state shared across handlers.

use crate::db::DbPool;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
  /// Shared database (users, auth sessions, words, examples, sessions)
  pub db: DbPool,
}

impl AppState {
  pub fn new(db: DbPool) -> Self {
    Self { db }
  }
}
