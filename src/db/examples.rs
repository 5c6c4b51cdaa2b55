//! Example sentence CRUD. Examples belong to exactly one word; the cascade
//! on word deletion lives in `words::delete_word`.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::ExampleSentence;

pub fn insert_example(conn: &Connection, example: &ExampleSentence) -> Result<i64> {
  conn.execute(
    r#"
    INSERT INTO examples (word_id, sentence, translation, created_at)
    VALUES (?1, ?2, ?3, ?4)
    "#,
    params![
      example.word_id,
      example.sentence,
      example.translation,
      example.created_at.to_rfc3339(),
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

/// Examples for one word, newest first.
pub fn get_examples(conn: &Connection, word_id: i64) -> Result<Vec<ExampleSentence>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, word_id, sentence, translation, created_at
    FROM examples
    WHERE word_id = ?1
    ORDER BY created_at DESC
    "#,
  )?;
  let examples = stmt
    .query_map(params![word_id], row_to_example)?
    .collect::<Result<Vec<_>>>()?;
  Ok(examples)
}

pub fn get_example(conn: &Connection, word_id: i64, example_id: i64) -> Result<Option<ExampleSentence>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, word_id, sentence, translation, created_at
    FROM examples
    WHERE word_id = ?1 AND id = ?2
    "#,
  )?;
  let mut rows = stmt.query(params![word_id, example_id])?;
  if let Some(row) = rows.next()? {
    Ok(Some(row_to_example(row)?))
  } else {
    Ok(None)
  }
}

/// Replace sentence and translation. Returns false if the example does not
/// exist under this word.
pub fn update_example(
  conn: &Connection,
  word_id: i64,
  example_id: i64,
  sentence: &str,
  translation: Option<&str>,
) -> Result<bool> {
  let updated = conn.execute(
    r#"
    UPDATE examples
    SET sentence = ?1, translation = ?2
    WHERE word_id = ?3 AND id = ?4
    "#,
    params![
      crate::domain::normalize_text(sentence),
      translation.map(crate::domain::normalize_text),
      word_id,
      example_id,
    ],
  )?;
  Ok(updated > 0)
}

pub fn delete_example(conn: &Connection, word_id: i64, example_id: i64) -> Result<bool> {
  let deleted = conn.execute(
    "DELETE FROM examples WHERE word_id = ?1 AND id = ?2",
    params![word_id, example_id],
  )?;
  Ok(deleted > 0)
}

fn row_to_example(row: &rusqlite::Row) -> Result<ExampleSentence> {
  let created_at: String = row.get(4)?;
  Ok(ExampleSentence {
    id: row.get(0)?,
    word_id: row.get(1)?,
    sentence: row.get(2)?,
    translation: row.get(3)?,
    created_at: DateTime::parse_from_rfc3339(&created_at)
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
    // Examples reference words, which reference users; satisfy both keys
    conn
      .execute_batch(
        r#"
        INSERT INTO users (id, email, display_name, password_hash, created_at)
        VALUES (1, 'alice@example.com', 'Alice', 'hash', '2026-01-01T00:00:00Z');
        INSERT INTO words (id, user_id, word, translation, created_at)
        VALUES (1, 1, 'run', 'correr', '2026-01-01T00:00:00Z'),
               (2, 1, 'cat', 'gato', '2026-01-01T00:00:00Z');
        "#,
      )
      .unwrap();
    conn
  }

  #[test]
  fn test_insert_and_get_examples() {
    let conn = test_conn();
    insert_example(&conn, &ExampleSentence::new(1, "I Run every day", Some("Eu corro"))).unwrap();
    insert_example(&conn, &ExampleSentence::new(1, "we run fast", None)).unwrap();
    insert_example(&conn, &ExampleSentence::new(2, "the cat sleeps", None)).unwrap();

    let examples = get_examples(&conn, 1).unwrap();
    assert_eq!(examples.len(), 2);
    assert!(examples.iter().all(|e| e.word_id == 1));
    // Stored lowercase
    assert!(examples.iter().any(|e| e.sentence == "i run every day"));
  }

  #[test]
  fn test_update_example() {
    let conn = test_conn();
    let id = insert_example(&conn, &ExampleSentence::new(1, "i run", None)).unwrap();

    assert!(update_example(&conn, 1, id, "I Run Every Morning", Some("Eu corro")).unwrap());
    let example = get_example(&conn, 1, id).unwrap().unwrap();
    assert_eq!(example.sentence, "i run every morning");
    assert_eq!(example.translation.as_deref(), Some("eu corro"));
  }

  #[test]
  fn test_update_example_wrong_word_returns_false() {
    let conn = test_conn();
    let id = insert_example(&conn, &ExampleSentence::new(1, "i run", None)).unwrap();
    assert!(!update_example(&conn, 2, id, "changed", None).unwrap());
  }

  #[test]
  fn test_delete_example() {
    let conn = test_conn();
    let id = insert_example(&conn, &ExampleSentence::new(1, "i run", None)).unwrap();
    assert!(delete_example(&conn, 1, id).unwrap());
    assert!(get_example(&conn, 1, id).unwrap().is_none());
    assert!(!delete_example(&conn, 1, id).unwrap());
  }
}
