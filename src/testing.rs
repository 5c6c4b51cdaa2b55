//! Test utilities: an in-memory database with the full schema, plus seed
//! helpers. Used by the API tests; unit tests mostly open their own
//! connection.

use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::auth;
use crate::db::{self, DbPool};
use crate::domain::Word;
use crate::state::AppState;

/// Password used for every seeded test user.
pub const TEST_PASSWORD: &str = "password123";

pub struct TestEnv {
  pub pool: DbPool,
}

impl TestEnv {
  /// Fresh in-memory database with all migrations applied.
  pub fn new() -> rusqlite::Result<Self> {
    let conn = Connection::open_in_memory()?;
    db::run_migrations(&conn)?;
    Ok(Self {
      pool: Arc::new(Mutex::new(conn)),
    })
  }

  pub fn state(&self) -> AppState {
    AppState::new(self.pool.clone())
  }

  pub fn conn(&self) -> MutexGuard<'_, Connection> {
    self.pool.lock().expect("test database lock")
  }

  /// Create a user with [`TEST_PASSWORD`] and return its id.
  pub fn seed_user(&self, email: &str, display_name: &str) -> i64 {
    let hash = auth::password::hash_password(TEST_PASSWORD).expect("hash test password");
    auth::db::create_user(&self.conn(), email, display_name, &hash).expect("seed user")
  }

  /// Insert a bare word and return its id.
  pub fn seed_word(&self, user_id: i64, word: &str, translation: &str) -> i64 {
    db::insert_word(&self.conn(), &Word::new(user_id, word, translation)).expect("seed word")
  }
}
