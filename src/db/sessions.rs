//! Practice session records. Append-only: sessions are inserted once at the
//! end of a round and never mutated.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::{NewSession, SessionKind, SessionRecord};

/// Persist a completed round. `played_at` is assigned here, at insert time.
pub fn insert_session(conn: &Connection, user_id: i64, session: &NewSession) -> Result<i64> {
  conn.execute(
    r#"
    INSERT INTO sessions (user_id, kind, score, total, duration_secs,
                          failed_word_ids, correct_word_ids, difficulty_label, played_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    "#,
    params![
      user_id,
      session.kind.as_str(),
      session.score,
      session.total,
      session.duration_secs,
      serde_json::to_string(&session.failed_word_ids).unwrap_or_else(|_| "[]".to_string()),
      serde_json::to_string(&session.correct_word_ids).unwrap_or_else(|_| "[]".to_string()),
      session.difficulty_label,
      Utc::now().to_rfc3339(),
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

/// Every session the user has ever played, most recent first. All history
/// views scan the full record.
pub fn get_all_sessions(conn: &Connection, user_id: i64) -> Result<Vec<SessionRecord>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, user_id, kind, score, total, duration_secs,
           failed_word_ids, correct_word_ids, difficulty_label, played_at
    FROM sessions
    WHERE user_id = ?1
    ORDER BY played_at DESC
    "#,
  )?;
  let sessions = stmt
    .query_map(params![user_id], row_to_session)?
    .collect::<Result<Vec<_>>>()?;
  Ok(sessions)
}

fn row_to_session(row: &rusqlite::Row) -> Result<SessionRecord> {
  let kind: String = row.get(2)?;
  let failed_json: String = row.get(6)?;
  let correct_json: String = row.get(7)?;
  let played_at: String = row.get(9)?;

  Ok(SessionRecord {
    id: row.get(0)?,
    user_id: row.get(1)?,
    kind: SessionKind::from_str(&kind).unwrap_or(SessionKind::Quiz),
    score: row.get(3)?,
    total: row.get(4)?,
    duration_secs: row.get(5)?,
    failed_word_ids: serde_json::from_str(&failed_json).unwrap_or_default(),
    correct_word_ids: serde_json::from_str(&correct_json).unwrap_or_default(),
    difficulty_label: row.get(8)?,
    played_at: DateTime::parse_from_rfc3339(&played_at)
      .map(|dt| dt.with_timezone(&Utc))
      .unwrap_or_else(|_| Utc::now()),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::run_migrations;

  fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    // Sessions reference users; satisfy the foreign key
    conn
      .execute_batch(
        r#"
        INSERT INTO users (id, email, display_name, password_hash, created_at)
        VALUES (1, 'alice@example.com', 'Alice', 'hash', '2026-01-01T00:00:00Z'),
               (2, 'bob@example.com', 'Bob', 'hash', '2026-01-01T00:00:00Z');
        "#,
      )
      .unwrap();
    conn
  }

  fn new_session(score: i64, total: i64) -> NewSession {
    NewSession {
      kind: SessionKind::Quiz,
      score,
      total,
      duration_secs: 42,
      failed_word_ids: vec![2, 3],
      correct_word_ids: vec![1],
      difficulty_label: "mixed".to_string(),
    }
  }

  #[test]
  fn test_insert_and_get_session() {
    let conn = test_conn();
    let id = insert_session(&conn, 1, &new_session(1, 3)).unwrap();
    assert!(id > 0);

    let sessions = get_all_sessions(&conn, 1).unwrap();
    assert_eq!(sessions.len(), 1);
    let session = &sessions[0];
    assert_eq!(session.kind, SessionKind::Quiz);
    assert_eq!(session.score, 1);
    assert_eq!(session.total, 3);
    assert_eq!(session.duration_secs, 42);
    assert_eq!(session.failed_word_ids, vec![2, 3]);
    assert_eq!(session.correct_word_ids, vec![1]);
    assert_eq!(session.difficulty_label, "mixed");
  }

  #[test]
  fn test_sessions_scoped_by_user() {
    let conn = test_conn();
    insert_session(&conn, 1, &new_session(1, 3)).unwrap();
    insert_session(&conn, 2, &new_session(2, 2)).unwrap();

    assert_eq!(get_all_sessions(&conn, 1).unwrap().len(), 1);
    assert_eq!(get_all_sessions(&conn, 2).unwrap().len(), 1);
  }

  #[test]
  fn test_get_all_sessions_returns_everything() {
    let conn = test_conn();
    for i in 0..5 {
      insert_session(&conn, 1, &new_session(i, 5)).unwrap();
    }
    assert_eq!(get_all_sessions(&conn, 1).unwrap().len(), 5);
  }

  #[test]
  fn test_empty_id_lists_roundtrip() {
    let conn = test_conn();
    let session = NewSession {
      kind: SessionKind::Flashcards,
      score: 0,
      total: 0,
      duration_secs: 0,
      failed_word_ids: vec![],
      correct_word_ids: vec![],
      difficulty_label: "easy".to_string(),
    };
    insert_session(&conn, 1, &session).unwrap();

    let loaded = &get_all_sessions(&conn, 1).unwrap()[0];
    assert_eq!(loaded.kind, SessionKind::Flashcards);
    assert!(loaded.failed_word_ids.is_empty());
    assert!(loaded.correct_word_ids.is_empty());
  }
}
