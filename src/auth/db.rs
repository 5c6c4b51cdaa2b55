//! Users and login sessions. Only the sha2 hash of a session token is
//! stored; the raw token lives in the client cookie.

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result};
use sha2::{Digest, Sha256};

use crate::config;

#[derive(Debug, Clone)]
pub struct User {
  pub id: i64,
  pub email: String,
  pub display_name: String,
  pub password_hash: String,
}

/// Hex-encoded sha256 of a session token.
pub fn hash_token(token: &str) -> String {
  hex::encode(Sha256::digest(token.as_bytes()))
}

/// Random session token for the cookie.
pub fn generate_token() -> String {
  let mut bytes = vec![0u8; config::AUTH_TOKEN_BYTES];
  rand::fill(&mut bytes[..]);
  hex::encode(bytes)
}

/// Create a user. Fails on duplicate email (unique constraint).
pub fn create_user(
  conn: &Connection,
  email: &str,
  display_name: &str,
  password_hash: &str,
) -> Result<i64> {
  conn.execute(
    r#"
    INSERT INTO users (email, display_name, password_hash, created_at)
    VALUES (?1, ?2, ?3, ?4)
    "#,
    params![
      email.trim().to_lowercase(),
      display_name.trim(),
      password_hash,
      Utc::now().to_rfc3339(),
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
  conn
    .query_row(
      "SELECT id, email, display_name, password_hash FROM users WHERE email = ?1",
      params![email.trim().to_lowercase()],
      |row| {
        Ok(User {
          id: row.get(0)?,
          email: row.get(1)?,
          display_name: row.get(2)?,
          password_hash: row.get(3)?,
        })
      },
    )
    .optional()
}

/// Store a new login session for the raw token and return it.
pub fn create_auth_session(conn: &Connection, user_id: i64) -> Result<String> {
  let token = generate_token();
  let expires_at = Utc::now() + Duration::hours(config::AUTH_SESSION_EXPIRY_HOURS);
  conn.execute(
    "INSERT INTO auth_sessions (token_hash, user_id, expires_at) VALUES (?1, ?2, ?3)",
    params![hash_token(&token), user_id, expires_at.to_rfc3339()],
  )?;
  Ok(token)
}

/// Resolve a raw cookie token to its user, honoring expiry.
pub fn get_session_user(conn: &Connection, token: &str) -> Result<Option<(i64, String)>> {
  let row: Option<(i64, String, String)> = conn
    .query_row(
      r#"
      SELECT u.id, u.display_name, s.expires_at
      FROM auth_sessions s
      JOIN users u ON u.id = s.user_id
      WHERE s.token_hash = ?1
      "#,
      params![hash_token(token)],
      |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )
    .optional()?;

  let Some((user_id, display_name, expires_at)) = row else {
    return Ok(None);
  };

  let expired = DateTime::parse_from_rfc3339(&expires_at)
    .map(|dt| dt.with_timezone(&Utc) < Utc::now())
    .unwrap_or(true);
  if expired {
    delete_auth_session(conn, token)?;
    return Ok(None);
  }

  Ok(Some((user_id, display_name)))
}

pub fn delete_auth_session(conn: &Connection, token: &str) -> Result<()> {
  conn.execute(
    "DELETE FROM auth_sessions WHERE token_hash = ?1",
    params![hash_token(token)],
  )?;
  Ok(())
}

/// Drop all expired sessions.
pub fn cleanup_expired_sessions(conn: &Connection) -> Result<usize> {
  let deleted = conn.execute(
    "DELETE FROM auth_sessions WHERE expires_at < ?1",
    params![Utc::now().to_rfc3339()],
  )?;
  Ok(deleted)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::run_migrations;

  fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    conn
  }

  #[test]
  fn test_create_and_find_user() {
    let conn = test_conn();
    let id = create_user(&conn, " Alice@Example.com ", "Alice", "hash").unwrap();

    let user = get_user_by_email(&conn, "alice@example.com").unwrap().unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.display_name, "Alice");
  }

  #[test]
  fn test_duplicate_email_rejected() {
    let conn = test_conn();
    create_user(&conn, "alice@example.com", "Alice", "hash").unwrap();
    assert!(create_user(&conn, "ALICE@example.com ", "Other", "hash").is_err());
  }

  #[test]
  fn test_unknown_email() {
    let conn = test_conn();
    assert!(get_user_by_email(&conn, "nobody@example.com").unwrap().is_none());
  }

  #[test]
  fn test_session_roundtrip() {
    let conn = test_conn();
    let user_id = create_user(&conn, "alice@example.com", "Alice", "hash").unwrap();
    let token = create_auth_session(&conn, user_id).unwrap();

    let (resolved_id, name) = get_session_user(&conn, &token).unwrap().unwrap();
    assert_eq!(resolved_id, user_id);
    assert_eq!(name, "Alice");
  }

  #[test]
  fn test_session_invalid_token() {
    let conn = test_conn();
    assert!(get_session_user(&conn, "bogus").unwrap().is_none());
  }

  #[test]
  fn test_logout_deletes_session() {
    let conn = test_conn();
    let user_id = create_user(&conn, "alice@example.com", "Alice", "hash").unwrap();
    let token = create_auth_session(&conn, user_id).unwrap();

    delete_auth_session(&conn, &token).unwrap();
    assert!(get_session_user(&conn, &token).unwrap().is_none());
  }

  #[test]
  fn test_expired_session_rejected_and_removed() {
    let conn = test_conn();
    let user_id = create_user(&conn, "alice@example.com", "Alice", "hash").unwrap();
    let token = generate_token();
    let past = (Utc::now() - Duration::hours(1)).to_rfc3339();
    conn
      .execute(
        "INSERT INTO auth_sessions (token_hash, user_id, expires_at) VALUES (?1, ?2, ?3)",
        params![hash_token(&token), user_id, past],
      )
      .unwrap();

    assert!(get_session_user(&conn, &token).unwrap().is_none());
    let remaining: i64 = conn
      .query_row("SELECT COUNT(*) FROM auth_sessions", [], |r| r.get(0))
      .unwrap();
    assert_eq!(remaining, 0);
  }

  #[test]
  fn test_tokens_unique() {
    assert_ne!(generate_token(), generate_token());
  }
}
