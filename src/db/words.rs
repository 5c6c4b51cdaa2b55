//! Word CRUD, counter updates and queries.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::{DeclaredLevel, LastResult, Word, WordType};

const WORD_COLUMNS: &str = "id, user_id, word, translation, word_type, declared_level, categories, \
                            phonetic, notes, created_at, attempts, successes, fails, last_result, \
                            last_attempt";

pub fn insert_word(conn: &Connection, word: &Word) -> Result<i64> {
  conn.execute(
    r#"
    INSERT INTO words (user_id, word, translation, word_type, declared_level, categories,
                       phonetic, notes, created_at, attempts, successes, fails)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
    "#,
    params![
      word.user_id,
      word.word,
      word.translation,
      word.word_type.map(|t| t.as_str()),
      word.declared_level.map(|l| l.as_str()),
      serde_json::to_string(&word.categories).unwrap_or_else(|_| "[]".to_string()),
      word.phonetic,
      word.notes,
      word.created_at.to_rfc3339(),
      word.attempts,
      word.successes,
      word.fails,
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

/// Full collection for one user, newest first.
pub fn get_words(conn: &Connection, user_id: i64) -> Result<Vec<Word>> {
  let query = format!(
    "SELECT {} FROM words WHERE user_id = ?1 ORDER BY created_at DESC",
    WORD_COLUMNS
  );
  let mut stmt = conn.prepare(&query)?;
  let words = stmt
    .query_map(params![user_id], row_to_word)?
    .collect::<Result<Vec<_>>>()?;
  Ok(words)
}

pub fn get_word(conn: &Connection, user_id: i64, word_id: i64) -> Result<Option<Word>> {
  let query = format!(
    "SELECT {} FROM words WHERE user_id = ?1 AND id = ?2",
    WORD_COLUMNS
  );
  let mut stmt = conn.prepare(&query)?;
  let mut rows = stmt.query(params![user_id, word_id])?;
  if let Some(row) = rows.next()? {
    Ok(Some(row_to_word(row)?))
  } else {
    Ok(None)
  }
}

/// Does this user already have a word with this (normalized) text?
pub fn word_exists(conn: &Connection, user_id: i64, word_text: &str) -> Result<bool> {
  let count: i64 = conn.query_row(
    "SELECT COUNT(*) FROM words WHERE user_id = ?1 AND word = ?2",
    params![user_id, word_text],
    |row| row.get(0),
  )?;
  Ok(count > 0)
}

/// Descriptive-field updates from the edit form. `None` leaves the stored
/// value unchanged; counters are deliberately out of reach here.
#[derive(Debug, Clone, Default)]
pub struct WordUpdate {
  pub word: Option<String>,
  pub translation: Option<String>,
  pub word_type: Option<Option<WordType>>,
  pub declared_level: Option<Option<DeclaredLevel>>,
  pub categories: Option<Vec<String>>,
  pub phonetic: Option<Option<String>>,
  pub notes: Option<Option<String>>,
}

/// Apply a partial update to a word's descriptive fields. Returns false if
/// the word does not exist for this user.
pub fn update_word(
  conn: &Connection,
  user_id: i64,
  word_id: i64,
  update: &WordUpdate,
) -> Result<bool> {
  let Some(mut word) = get_word(conn, user_id, word_id)? else {
    return Ok(false);
  };

  if let Some(text) = &update.word {
    word.word = crate::domain::normalize_text(text);
  }
  if let Some(translation) = &update.translation {
    word.translation = crate::domain::normalize_text(translation);
  }
  if let Some(word_type) = update.word_type {
    word.word_type = word_type;
  }
  if let Some(level) = update.declared_level {
    word.declared_level = level;
  }
  if let Some(categories) = &update.categories {
    word.categories = categories.clone();
  }
  if let Some(phonetic) = &update.phonetic {
    word.phonetic = phonetic.clone();
  }
  if let Some(notes) = &update.notes {
    word.notes = notes.clone();
  }

  conn.execute(
    r#"
    UPDATE words
    SET word = ?1, translation = ?2, word_type = ?3, declared_level = ?4,
        categories = ?5, phonetic = ?6, notes = ?7
    WHERE user_id = ?8 AND id = ?9
    "#,
    params![
      word.word,
      word.translation,
      word.word_type.map(|t| t.as_str()),
      word.declared_level.map(|l| l.as_str()),
      serde_json::to_string(&word.categories).unwrap_or_else(|_| "[]".to_string()),
      word.phonetic,
      word.notes,
      user_id,
      word_id,
    ],
  )?;
  Ok(true)
}

/// Delete a word and cascade to its example sentences. Returns false if the
/// word does not exist for this user.
pub fn delete_word(conn: &Connection, user_id: i64, word_id: i64) -> Result<bool> {
  let exists = get_word(conn, user_id, word_id)?.is_some();
  if !exists {
    return Ok(false);
  }
  conn.execute("DELETE FROM examples WHERE word_id = ?1", params![word_id])?;
  conn.execute(
    "DELETE FROM words WHERE user_id = ?1 AND id = ?2",
    params![user_id, word_id],
  )?;
  Ok(true)
}

/// Record one practice answer against a word's counters.
///
/// A single atomic UPDATE increments attempts and the matching outcome
/// counter, so a rapid double-submission cannot under- or double-count.
/// Returns false if the word no longer exists.
pub fn record_answer(
  conn: &Connection,
  user_id: i64,
  word_id: i64,
  is_correct: bool,
) -> Result<bool> {
  let now = Utc::now().to_rfc3339();
  let success_increment: i64 = if is_correct { 1 } else { 0 };
  let last_result = if is_correct {
    LastResult::Success
  } else {
    LastResult::Fail
  };

  let updated = conn.execute(
    r#"
    UPDATE words
    SET attempts = attempts + 1,
        successes = successes + ?1,
        fails = fails + (1 - ?1),
        last_result = ?2,
        last_attempt = ?3
    WHERE user_id = ?4 AND id = ?5
    "#,
    params![success_increment, last_result.as_str(), now, user_id, word_id],
  )?;
  Ok(updated > 0)
}

/// Words with at least one recorded fail, newest first.
pub fn get_failed_words(conn: &Connection, user_id: i64) -> Result<Vec<Word>> {
  let query = format!(
    "SELECT {} FROM words WHERE user_id = ?1 AND fails > 0 ORDER BY created_at DESC",
    WORD_COLUMNS
  );
  let mut stmt = conn.prepare(&query)?;
  let words = stmt
    .query_map(params![user_id], row_to_word)?
    .collect::<Result<Vec<_>>>()?;
  Ok(words)
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .unwrap_or_else(|_| Utc::now())
}

pub(crate) fn row_to_word(row: &rusqlite::Row) -> Result<Word> {
  let word_type: Option<String> = row.get(4)?;
  let declared_level: Option<String> = row.get(5)?;
  let categories_json: String = row.get(6)?;
  let created_at: String = row.get(9)?;
  let last_result: Option<String> = row.get(13)?;
  let last_attempt: Option<String> = row.get(14)?;

  Ok(Word {
    id: row.get(0)?,
    user_id: row.get(1)?,
    word: row.get(2)?,
    translation: row.get(3)?,
    word_type: word_type.as_deref().and_then(WordType::from_str),
    declared_level: declared_level.as_deref().and_then(DeclaredLevel::from_str),
    categories: serde_json::from_str(&categories_json).unwrap_or_default(),
    phonetic: row.get(7)?,
    notes: row.get(8)?,
    created_at: parse_timestamp(&created_at),
    attempts: row.get(10)?,
    successes: row.get(11)?,
    fails: row.get(12)?,
    last_result: last_result.as_deref().and_then(LastResult::from_str),
    last_attempt: last_attempt.as_deref().map(parse_timestamp),
  })
}
