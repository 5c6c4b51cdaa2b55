//! Application configuration constants.
//!
//! Centralizes values that would otherwise be scattered through handlers
//! and the engine.

use serde::Deserialize;
use std::path::PathBuf;

// ==================== Database Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
  database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
  path: Option<String>,
}

/// Load database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
  // Load .env file if present
  let _ = dotenvy::dotenv();

  // Priority 1: config.toml
  if let Ok(contents) = std::fs::read_to_string("config.toml") {
    if let Ok(config) = toml::from_str::<AppConfig>(&contents) {
      if let Some(db) = config.database {
        if let Some(path) = db.path {
          tracing::info!("Using database from config.toml: {}", path);
          return PathBuf::from(path);
        }
      }
    }
  }

  // Priority 2: .env DATABASE_PATH
  if let Ok(path) = std::env::var("DATABASE_PATH") {
    tracing::info!("Using database from DATABASE_PATH env: {}", path);
    return PathBuf::from(path);
  }

  // Default
  let default = PathBuf::from("data/vocab.db");
  tracing::info!("Using default database path: {}", default.display());
  default
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

/// Get the full server bind address
pub fn server_bind_addr() -> String {
  format!("{}:{}", SERVER_ADDR, SERVER_PORT)
}

// ==================== Auth Configuration ====================

/// Login session lifetime in hours
pub const AUTH_SESSION_EXPIRY_HOURS: i64 = 24 * 7;

/// Length of the random session token in bytes (hex-encoded in the cookie)
pub const AUTH_TOKEN_BYTES: usize = 32;

// ==================== Practice Configuration ====================

/// Number of distractor choices per quiz item (4 options total)
pub const DISTRACTOR_COUNT: usize = 3;

/// Default question count for a practice round
pub const DEFAULT_ROUND_SIZE: usize = 10;

/// Default seconds per quiz question when none is requested
pub const DEFAULT_TIME_PER_QUESTION: u32 = 30;

// ==================== Word List Configuration ====================

/// Default page size for the word list
pub const DEFAULT_PAGE_SIZE: usize = 20;

// ==================== History Configuration ====================

/// Size of the top-failed-words leaderboard
pub const TOP_FAILED_LIMIT: usize = 10;

// ==================== Import Configuration ====================

/// Words per import chunk; progress is logged after each chunk
pub const IMPORT_CHUNK_SIZE: usize = 10;
