use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Grammatical type of a vocabulary entry. Closed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordType {
  Noun,
  Verb,
  Adjective,
  Adverb,
  Phrase,
  Idiom,
  PhrasalVerb,
}

impl WordType {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "noun" => Some(Self::Noun),
      "verb" => Some(Self::Verb),
      "adjective" => Some(Self::Adjective),
      "adverb" => Some(Self::Adverb),
      "phrase" => Some(Self::Phrase),
      "idiom" => Some(Self::Idiom),
      "phrasal verb" | "phrasal_verb" => Some(Self::PhrasalVerb),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Noun => "noun",
      Self::Verb => "verb",
      Self::Adjective => "adjective",
      Self::Adverb => "adverb",
      Self::Phrase => "phrase",
      Self::Idiom => "idiom",
      Self::PhrasalVerb => "phrasal verb",
    }
  }
}

/// Self-declared level set by the user at creation or import time.
///
/// Distinct from the computed [`crate::engine::Tier`], which is derived from
/// attempt counters and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredLevel {
  Beginner,
  Intermediate,
  Advanced,
}

impl DeclaredLevel {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "beginner" => Some(Self::Beginner),
      "intermediate" => Some(Self::Intermediate),
      "advanced" => Some(Self::Advanced),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Beginner => "beginner",
      Self::Intermediate => "intermediate",
      Self::Advanced => "advanced",
    }
  }
}

/// Outcome of the most recent practice answer for a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastResult {
  Success,
  Fail,
}

impl LastResult {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "success" => Some(Self::Success),
      "fail" => Some(Self::Fail),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Success => "success",
      Self::Fail => "fail",
    }
  }
}

/// A vocabulary entry owned by exactly one user.
///
/// The counters hold the invariant `successes + fails == attempts`; only
/// `db::words::record_answer` mutates them, user edits touch descriptive
/// fields only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
  pub id: i64,
  pub user_id: i64,
  /// Stored lowercase-trimmed.
  pub word: String,
  /// Stored lowercase-trimmed.
  pub translation: String,
  pub word_type: Option<WordType>,
  pub declared_level: Option<DeclaredLevel>,
  pub categories: Vec<String>,
  pub phonetic: Option<String>,
  pub notes: Option<String>,
  pub created_at: DateTime<Utc>,

  // Practice counters
  pub attempts: i64,
  pub successes: i64,
  pub fails: i64,
  pub last_result: Option<LastResult>,
  pub last_attempt: Option<DateTime<Utc>>,
}

impl Word {
  /// New word with normalized text and zeroed counters.
  pub fn new(user_id: i64, word: &str, translation: &str) -> Self {
    Self {
      id: 0,
      user_id,
      word: normalize_text(word),
      translation: normalize_text(translation),
      word_type: None,
      declared_level: None,
      categories: Vec::new(),
      phonetic: None,
      notes: None,
      created_at: Utc::now(),
      attempts: 0,
      successes: 0,
      fails: 0,
      last_result: None,
      last_attempt: None,
    }
  }
}

/// Lowercase-trim normalization applied to word and translation text before
/// storage.
pub fn normalize_text(s: &str) -> String {
  s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_word_type_from_str_all_variants() {
    assert_eq!(WordType::from_str("noun"), Some(WordType::Noun));
    assert_eq!(WordType::from_str("verb"), Some(WordType::Verb));
    assert_eq!(WordType::from_str("adjective"), Some(WordType::Adjective));
    assert_eq!(WordType::from_str("adverb"), Some(WordType::Adverb));
    assert_eq!(WordType::from_str("phrase"), Some(WordType::Phrase));
    assert_eq!(WordType::from_str("idiom"), Some(WordType::Idiom));
    assert_eq!(WordType::from_str("phrasal verb"), Some(WordType::PhrasalVerb));
  }

  #[test]
  fn test_word_type_from_str_underscore_alias() {
    assert_eq!(WordType::from_str("phrasal_verb"), Some(WordType::PhrasalVerb));
  }

  #[test]
  fn test_word_type_from_str_invalid() {
    assert_eq!(WordType::from_str("pronoun"), None);
    assert_eq!(WordType::from_str(""), None);
    assert_eq!(WordType::from_str("NOUN"), None);
  }

  #[test]
  fn test_word_type_as_str_roundtrip() {
    let types = [
      WordType::Noun,
      WordType::Verb,
      WordType::Adjective,
      WordType::Adverb,
      WordType::Phrase,
      WordType::Idiom,
      WordType::PhrasalVerb,
    ];
    for wt in types {
      assert_eq!(WordType::from_str(wt.as_str()), Some(wt));
    }
  }

  #[test]
  fn test_declared_level_roundtrip() {
    for level in [
      DeclaredLevel::Beginner,
      DeclaredLevel::Intermediate,
      DeclaredLevel::Advanced,
    ] {
      assert_eq!(DeclaredLevel::from_str(level.as_str()), Some(level));
    }
  }

  #[test]
  fn test_declared_level_invalid() {
    // "easy"/"medium"/"hard" belong to the computed tier, not this field
    assert_eq!(DeclaredLevel::from_str("easy"), None);
    assert_eq!(DeclaredLevel::from_str("medium"), None);
    assert_eq!(DeclaredLevel::from_str(""), None);
  }

  #[test]
  fn test_last_result_roundtrip() {
    assert_eq!(LastResult::from_str("success"), Some(LastResult::Success));
    assert_eq!(LastResult::from_str("fail"), Some(LastResult::Fail));
    assert_eq!(LastResult::from_str("failed"), None);
  }

  #[test]
  fn test_word_new_normalizes_text() {
    let word = Word::new(1, "  Run  ", " CORRER ");
    assert_eq!(word.word, "run");
    assert_eq!(word.translation, "correr");
  }

  #[test]
  fn test_word_new_counters_zeroed() {
    let word = Word::new(1, "run", "correr");
    assert_eq!(word.attempts, 0);
    assert_eq!(word.successes, 0);
    assert_eq!(word.fails, 0);
    assert!(word.last_result.is_none());
    assert!(word.last_attempt.is_none());
    assert!(word.word_type.is_none());
    assert!(word.declared_level.is_none());
    assert!(word.categories.is_empty());
  }

  #[test]
  fn test_normalize_text() {
    assert_eq!(normalize_text("  Phrasal Verb "), "phrasal verb");
    assert_eq!(normalize_text(""), "");
  }
}
