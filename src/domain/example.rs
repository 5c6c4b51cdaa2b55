use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::word::normalize_text;

/// An example sentence demonstrating a word's usage. Child entity of a
/// [`super::Word`]: deleting the word deletes its examples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleSentence {
  pub id: i64,
  pub word_id: i64,
  /// Stored lowercase-trimmed. Must contain the parent word's text
  /// (case-insensitive); enforced by the handlers and the importer, not by
  /// the schema.
  pub sentence: String,
  pub translation: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl ExampleSentence {
  pub fn new(word_id: i64, sentence: &str, translation: Option<&str>) -> Self {
    Self {
      id: 0,
      word_id,
      sentence: normalize_text(sentence),
      translation: translation.map(normalize_text),
      created_at: Utc::now(),
    }
  }
}

/// Check the sentence-contains-word policy for example sentences.
pub fn sentence_contains_word(sentence: &str, word: &str) -> bool {
  sentence.to_lowercase().contains(&word.to_lowercase())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_normalizes_sentence_and_translation() {
    let ex = ExampleSentence::new(7, "  I Run every DAY ", Some(" Eu corro todos os dias "));
    assert_eq!(ex.word_id, 7);
    assert_eq!(ex.sentence, "i run every day");
    assert_eq!(ex.translation.as_deref(), Some("eu corro todos os dias"));
  }

  #[test]
  fn test_new_without_translation() {
    let ex = ExampleSentence::new(7, "i run every day", None);
    assert!(ex.translation.is_none());
  }

  #[test]
  fn test_sentence_contains_word_case_insensitive() {
    assert!(sentence_contains_word("I Run every day", "run"));
    assert!(sentence_contains_word("the RUNNER stopped", "run"));
    assert!(!sentence_contains_word("I walk every day", "run"));
  }

  #[test]
  fn test_sentence_contains_word_multiword() {
    assert!(sentence_contains_word("please look after my cat", "look after"));
    assert!(!sentence_contains_word("please look at my cat", "look after"));
  }
}
