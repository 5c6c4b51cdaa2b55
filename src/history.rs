//! Session history views derived by replaying persisted sessions against
//! the current word collection.
//!
//! History stores word ids only. A word deleted after being recorded simply
//! drops out of every view here; that is by construction, not an error.

use chrono::{DateTime, Datelike, Local, Utc};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

use crate::config;
use crate::db;
use crate::db::LogOnError;
use crate::domain::{ExampleSentence, SessionKind, SessionRecord, Word, WordType};

/// A word id resolved against the current collection.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedWord {
  pub word_id: i64,
  pub word: String,
  pub translation: String,
}

/// One session decorated for display.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
  pub id: i64,
  /// Local calendar date the session was played on.
  pub date: String,
  pub kind: SessionKind,
  pub score: i64,
  pub total: i64,
  pub percentage: i64,
  pub duration_secs: i64,
  pub difficulty_label: String,
  pub failed_words: Vec<ResolvedWord>,
  pub correct_words: Vec<ResolvedWord>,
}

/// Leaderboard entry for the most-failed words.
#[derive(Debug, Clone, Serialize)]
pub struct FailedWordSummary {
  pub word_id: i64,
  pub word: String,
  pub translation: String,
  pub word_type: Option<WordType>,
  pub fail_count: usize,
  /// Local date of the most recent session that failed this word.
  pub last_failed: String,
  pub examples: Vec<ExampleSentence>,
}

fn local_date(dt: DateTime<Utc>) -> String {
  dt.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

fn resolve_ids(ids: &[i64], words: &HashMap<i64, Word>) -> Vec<ResolvedWord> {
  // Ids of deleted words are dropped silently
  ids
    .iter()
    .filter_map(|id| {
      words.get(id).map(|w| ResolvedWord {
        word_id: *id,
        word: w.word.clone(),
        translation: w.translation.clone(),
      })
    })
    .collect()
}

fn decorate(session: &SessionRecord, words: &HashMap<i64, Word>) -> HistoryEntry {
  let percentage = if session.total > 0 {
    (session.score as f64 / session.total as f64 * 100.0).round() as i64
  } else {
    0
  };

  HistoryEntry {
    id: session.id,
    date: local_date(session.played_at),
    kind: session.kind,
    score: session.score,
    total: session.total,
    percentage,
    duration_secs: session.duration_secs,
    difficulty_label: session.difficulty_label.clone(),
    failed_words: resolve_ids(&session.failed_word_ids, words),
    correct_words: resolve_ids(&session.correct_word_ids, words),
  }
}

/// Decorate every session, in the order given (callers pass newest-first).
pub fn build_history(sessions: &[SessionRecord], words: &HashMap<i64, Word>) -> Vec<HistoryEntry> {
  sessions.iter().map(|s| decorate(s, words)).collect()
}

/// Sessions played on the current local calendar day.
pub fn today_history(
  sessions: &[SessionRecord],
  words: &HashMap<i64, Word>,
) -> Vec<HistoryEntry> {
  let today = Local::now().date_naive();
  sessions
    .iter()
    .filter(|s| {
      let local = s.played_at.with_timezone(&Local).date_naive();
      local.year() == today.year() && local.ordinal() == today.ordinal()
    })
    .map(|s| decorate(s, words))
    .collect()
}

/// Tally failures per word across all sessions ever recorded, resolve the
/// survivors against the current collection, and keep the top `limit` by
/// fail count.
pub fn top_failed_words<F>(
  sessions: &[SessionRecord],
  words: &HashMap<i64, Word>,
  limit: usize,
  mut examples_for: F,
) -> Vec<FailedWordSummary>
where
  F: FnMut(i64) -> Vec<ExampleSentence>,
{
  struct Tally {
    count: usize,
    last_failed: DateTime<Utc>,
  }

  let mut tallies: HashMap<i64, Tally> = HashMap::new();
  for session in sessions {
    for word_id in &session.failed_word_ids {
      let entry = tallies.entry(*word_id).or_insert(Tally {
        count: 0,
        last_failed: session.played_at,
      });
      entry.count += 1;
      if session.played_at > entry.last_failed {
        entry.last_failed = session.played_at;
      }
    }
  }

  let mut summaries: Vec<FailedWordSummary> = tallies
    .into_iter()
    .filter_map(|(word_id, tally)| {
      // Deleted words are excluded from the leaderboard
      words.get(&word_id).map(|word| FailedWordSummary {
        word_id,
        word: word.word.clone(),
        translation: word.translation.clone(),
        word_type: word.word_type,
        fail_count: tally.count,
        last_failed: local_date(tally.last_failed),
        examples: examples_for(word_id),
      })
    })
    .collect();

  summaries.sort_by(|a, b| {
    b.fail_count
      .cmp(&a.fail_count)
      .then_with(|| a.word.cmp(&b.word))
  });
  summaries.truncate(limit);
  summaries
}

fn words_by_id(conn: &Connection, user_id: i64) -> rusqlite::Result<HashMap<i64, Word>> {
  Ok(
    db::get_words(conn, user_id)?
      .into_iter()
      .map(|w| (w.id, w))
      .collect(),
  )
}

/// Every session ever played, decorated, newest first.
pub fn get_history(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<HistoryEntry>> {
  let sessions = db::get_all_sessions(conn, user_id)?;
  let words = words_by_id(conn, user_id)?;
  Ok(build_history(&sessions, &words))
}

/// Today's sessions, newest first.
pub fn get_today_history(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<HistoryEntry>> {
  let sessions = db::get_all_sessions(conn, user_id)?;
  let words = words_by_id(conn, user_id)?;
  Ok(today_history(&sessions, &words))
}

/// Top-failed-words leaderboard over the whole session history.
pub fn get_top_failed(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<FailedWordSummary>> {
  let sessions = db::get_all_sessions(conn, user_id)?;
  let words = words_by_id(conn, user_id)?;
  Ok(top_failed_words(
    &sessions,
    &words,
    config::TOP_FAILED_LIMIT,
    |word_id| db::get_examples(conn, word_id).log_warn_default("load examples for top-failed"),
  ))
}
