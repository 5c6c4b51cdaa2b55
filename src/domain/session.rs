use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which game a practice session was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
  Quiz,
  Flashcards,
}

impl SessionKind {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "quiz" => Some(Self::Quiz),
      "flashcards" => Some(Self::Flashcards),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Quiz => "quiz",
      Self::Flashcards => "flashcards",
    }
  }
}

/// An immutable record of one completed practice round.
///
/// Written once by `db::sessions::insert_session`; never updated or deleted
/// by normal flows. `failed_word_ids` / `correct_word_ids` reference words
/// by id only — if a word is later deleted, history views drop the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
  pub id: i64,
  pub user_id: i64,
  pub kind: SessionKind,
  /// Count of correct answers.
  pub score: i64,
  /// Count of attempted answers.
  pub total: i64,
  /// Seconds from round start to completion.
  pub duration_secs: i64,
  pub failed_word_ids: Vec<i64>,
  pub correct_word_ids: Vec<i64>,
  /// Label of the difficulty filter the round was played with, or "mixed".
  pub difficulty_label: String,
  /// Assigned by the store at insert time.
  pub played_at: DateTime<Utc>,
}

/// Session data as produced by a completed round, before the store assigns
/// id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
  pub kind: SessionKind,
  pub score: i64,
  pub total: i64,
  pub duration_secs: i64,
  pub failed_word_ids: Vec<i64>,
  pub correct_word_ids: Vec<i64>,
  pub difficulty_label: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_session_kind_from_str() {
    assert_eq!(SessionKind::from_str("quiz"), Some(SessionKind::Quiz));
    assert_eq!(SessionKind::from_str("flashcards"), Some(SessionKind::Flashcards));
    assert_eq!(SessionKind::from_str("Quiz"), None);
    assert_eq!(SessionKind::from_str(""), None);
  }

  #[test]
  fn test_session_kind_as_str_roundtrip() {
    for kind in [SessionKind::Quiz, SessionKind::Flashcards] {
      assert_eq!(SessionKind::from_str(kind.as_str()), Some(kind));
    }
  }
}
