use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // Create tables with COMPLETE schema for new databases
  // Migrations below handle upgrades for existing databases
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS users (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      email TEXT NOT NULL UNIQUE,
      display_name TEXT NOT NULL,
      password_hash TEXT NOT NULL,
      created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS auth_sessions (
      token_hash TEXT PRIMARY KEY,
      user_id INTEGER NOT NULL,
      expires_at TEXT NOT NULL,
      FOREIGN KEY (user_id) REFERENCES users(id)
    );

    CREATE TABLE IF NOT EXISTS words (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_id INTEGER NOT NULL,
      word TEXT NOT NULL,
      translation TEXT NOT NULL,
      word_type TEXT,
      declared_level TEXT,
      categories TEXT NOT NULL DEFAULT '[]',
      phonetic TEXT,
      notes TEXT,
      created_at TEXT NOT NULL,
      attempts INTEGER NOT NULL DEFAULT 0,
      successes INTEGER NOT NULL DEFAULT 0,
      fails INTEGER NOT NULL DEFAULT 0,
      last_result TEXT,
      last_attempt TEXT,
      FOREIGN KEY (user_id) REFERENCES users(id)
    );

    CREATE TABLE IF NOT EXISTS examples (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      word_id INTEGER NOT NULL,
      sentence TEXT NOT NULL,
      translation TEXT,
      created_at TEXT NOT NULL,
      FOREIGN KEY (word_id) REFERENCES words(id)
    );

    CREATE TABLE IF NOT EXISTS sessions (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_id INTEGER NOT NULL,
      kind TEXT NOT NULL,
      score INTEGER NOT NULL,
      total INTEGER NOT NULL,
      duration_secs INTEGER NOT NULL DEFAULT 0,
      failed_word_ids TEXT NOT NULL DEFAULT '[]',
      correct_word_ids TEXT NOT NULL DEFAULT '[]',
      difficulty_label TEXT NOT NULL DEFAULT 'mixed',
      played_at TEXT NOT NULL,
      FOREIGN KEY (user_id) REFERENCES users(id)
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_words_user_id ON words(user_id);
    CREATE INDEX IF NOT EXISTS idx_words_created_at ON words(created_at);
    CREATE INDEX IF NOT EXISTS idx_examples_word_id ON examples(word_id);
    CREATE INDEX IF NOT EXISTS idx_sessions_user_id ON sessions(user_id);
    CREATE INDEX IF NOT EXISTS idx_sessions_played_at ON sessions(played_at);
    CREATE INDEX IF NOT EXISTS idx_auth_sessions_user_id ON auth_sessions(user_id);
    "#,
  )?;

  // ============================================================
  // MIGRATIONS FOR EXISTING DATABASES
  // These are no-ops for new databases (columns already exist)
  // ============================================================

  // Migration: phonetic and categories columns (added after initial release)
  add_column_if_missing(conn, "words", "phonetic", "TEXT")?;
  add_column_if_missing(conn, "words", "categories", "TEXT NOT NULL DEFAULT '[]'")?;
  add_column_if_missing(conn, "words", "declared_level", "TEXT")?;

  // Migration: difficulty label on sessions
  add_column_if_missing(conn, "sessions", "difficulty_label", "TEXT NOT NULL DEFAULT 'mixed'")?;

  Ok(())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
  let query = format!("SELECT {} FROM {} LIMIT 0", column, table);
  conn.prepare(&query).is_ok()
}

fn add_column_if_missing(
  conn: &Connection,
  table: &str,
  column: &str,
  definition: &str,
) -> Result<()> {
  if !column_exists(conn, table, column) {
    let query = format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, definition);
    conn.execute(&query, [])?;
  }
  Ok(())
}
