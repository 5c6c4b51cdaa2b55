//! Bulk word import from the JSON exchange format.
//!
//! Validation runs over the whole file first and aborts before any write.
//! Execution then imports each word independently: pre-existing words are
//! skipped, individual failures land in the error list without stopping the
//! rest.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::categories;
use crate::config;
use crate::db;
use crate::domain::{
  normalize_text, sentence_contains_word, DeclaredLevel, ExampleSentence, Word, WordType,
};

/// One example inside the import file.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportExample {
  pub sentence: String,
  pub translation: Option<String>,
}

/// One word entry inside the import file.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportWord {
  pub word: String,
  pub translation: String,
  #[serde(rename = "type")]
  pub word_type: Option<String>,
  pub difficulty: Option<String>,
  pub categories: Option<Vec<String>>,
  pub phonetic: Option<String>,
  pub examples: Option<Vec<ImportExample>>,
  pub notes: Option<String>,
}

/// Top-level import file: `{ "words": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportData {
  pub words: Vec<ImportWord>,
}

/// Outcome of one import run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
  pub imported: usize,
  /// Words whose text already existed in the collection.
  pub skipped: usize,
  pub errors: Vec<String>,
  pub total: usize,
}

/// Validate the whole file. Any returned message blocks the import; nothing
/// has been written when this fails.
pub fn validate_import(data: &ImportData) -> Vec<String> {
  let mut errors = Vec::new();

  if data.words.is_empty() {
    errors.push("words array cannot be empty".to_string());
    return errors;
  }

  let mut seen_words: Vec<String> = Vec::new();

  for (index, entry) in data.words.iter().enumerate() {
    let word_text = normalize_text(&entry.word);
    let label = if word_text.is_empty() {
      format!("word at index {}", index)
    } else {
      format!("word \"{}\"", word_text)
    };

    if word_text.is_empty() {
      errors.push(format!("{}: 'word' is required", label));
    }
    if normalize_text(&entry.translation).is_empty() {
      errors.push(format!("{}: 'translation' is required", label));
    }

    if let Some(word_type) = &entry.word_type {
      if WordType::from_str(word_type).is_none() {
        errors.push(format!("{}: unknown type '{}'", label, word_type));
      }
    }

    if let Some(level) = &entry.difficulty {
      if DeclaredLevel::from_str(level).is_none() {
        errors.push(format!("{}: unknown difficulty '{}'", label, level));
      }
    }

    if let Some(cats) = &entry.categories {
      for cat in cats {
        if !categories::is_valid_category(cat) {
          errors.push(format!("{}: unknown category '{}'", label, cat));
        }
      }
      let mut sorted = cats.clone();
      sorted.sort();
      let before = sorted.len();
      sorted.dedup();
      if sorted.len() != before {
        errors.push(format!("{}: duplicate category", label));
      }
    }

    if let Some(examples) = &entry.examples {
      for example in examples {
        if !word_text.is_empty() && !sentence_contains_word(&example.sentence, &word_text) {
          errors.push(format!(
            "{}: example \"{}\" does not contain the word",
            label,
            example.sentence.trim()
          ));
        }
      }
    }

    if !word_text.is_empty() {
      if seen_words.contains(&word_text) {
        errors.push(format!("{}: duplicated within the file", label));
      }
      seen_words.push(word_text);
    }
  }

  errors
}

/// Import all words for one user. Call only after [`validate_import`]
/// passed; per-word store failures are still collected rather than fatal.
pub fn run_import(conn: &Connection, user_id: i64, data: &ImportData) -> ImportReport {
  let mut report = ImportReport {
    total: data.words.len(),
    ..Default::default()
  };

  for (chunk_index, chunk) in data.words.chunks(config::IMPORT_CHUNK_SIZE).enumerate() {
    for entry in chunk {
      match import_one(conn, user_id, entry) {
        Ok(true) => report.imported += 1,
        Ok(false) => report.skipped += 1,
        Err(e) => report
          .errors
          .push(format!("failed to import \"{}\": {}", entry.word.trim(), e)),
      }
    }
    tracing::debug!(
      "Import progress: {}/{} words processed",
      (chunk_index * config::IMPORT_CHUNK_SIZE + chunk.len()).min(report.total),
      report.total
    );
  }

  tracing::info!(
    "Import finished: {} imported, {} skipped, {} errors of {}",
    report.imported,
    report.skipped,
    report.errors.len(),
    report.total
  );
  report
}

/// Returns Ok(false) when the word already exists (skipped).
fn import_one(conn: &Connection, user_id: i64, entry: &ImportWord) -> rusqlite::Result<bool> {
  let word_text = normalize_text(&entry.word);
  if db::word_exists(conn, user_id, &word_text)? {
    return Ok(false);
  }

  let mut word = Word::new(user_id, &entry.word, &entry.translation);
  word.word_type = entry.word_type.as_deref().and_then(WordType::from_str);
  word.declared_level = entry.difficulty.as_deref().and_then(DeclaredLevel::from_str);
  word.categories = entry.categories.clone().unwrap_or_default();
  word.phonetic = entry
    .phonetic
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string);
  word.notes = entry
    .notes
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string);

  let word_id = db::insert_word(conn, &word)?;

  for example in entry.examples.iter().flatten() {
    if example.sentence.trim().is_empty() {
      continue;
    }
    db::insert_example(
      conn,
      &ExampleSentence::new(word_id, &example.sentence, example.translation.as_deref()),
    )?;
  }

  Ok(true)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::run_migrations;

  fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    // Imported words reference users; satisfy the foreign key
    conn
      .execute_batch(
        r#"
        INSERT INTO users (id, email, display_name, password_hash, created_at)
        VALUES (1, 'alice@example.com', 'Alice', 'hash', '2026-01-01T00:00:00Z');
        "#,
      )
      .unwrap();
    conn
  }

  fn parse(json: &str) -> ImportData {
    serde_json::from_str(json).unwrap()
  }

  fn valid_data() -> ImportData {
    parse(
      r#"{
        "words": [
          {
            "word": "Run",
            "translation": "Correr",
            "type": "verb",
            "difficulty": "beginner",
            "categories": ["social"],
            "examples": [{ "sentence": "I run every day", "translation": "Eu corro" }]
          },
          { "word": "cat", "translation": "gato", "type": "noun" }
        ]
      }"#,
    )
  }

  #[test]
  fn test_validate_accepts_valid_file() {
    assert!(validate_import(&valid_data()).is_empty());
  }

  #[test]
  fn test_validate_rejects_empty_words() {
    let data = parse(r#"{ "words": [] }"#);
    let errors = validate_import(&data);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("empty"));
  }

  #[test]
  fn test_validate_requires_word_and_translation() {
    let data = parse(r#"{ "words": [ { "word": "  ", "translation": "" } ] }"#);
    let errors = validate_import(&data);
    assert_eq!(errors.len(), 2);
  }

  #[test]
  fn test_validate_rejects_unknown_type() {
    let data = parse(r#"{ "words": [ { "word": "run", "translation": "correr", "type": "pronoun" } ] }"#);
    let errors = validate_import(&data);
    assert!(errors.iter().any(|e| e.contains("unknown type")));
  }

  #[test]
  fn test_validate_rejects_unknown_difficulty() {
    let data =
      parse(r#"{ "words": [ { "word": "run", "translation": "correr", "difficulty": "hard" } ] }"#);
    let errors = validate_import(&data);
    assert!(errors.iter().any(|e| e.contains("unknown difficulty")));
  }

  #[test]
  fn test_validate_rejects_unknown_category() {
    let data = parse(
      r#"{ "words": [ { "word": "run", "translation": "correr", "categories": ["sports"] } ] }"#,
    );
    let errors = validate_import(&data);
    assert!(errors.iter().any(|e| e.contains("unknown category")));
  }

  #[test]
  fn test_validate_rejects_duplicate_category() {
    let data = parse(
      r#"{ "words": [ { "word": "run", "translation": "correr", "categories": ["social", "social"] } ] }"#,
    );
    let errors = validate_import(&data);
    assert!(errors.iter().any(|e| e.contains("duplicate category")));
  }

  #[test]
  fn test_validate_rejects_duplicate_word_in_file() {
    let data = parse(
      r#"{ "words": [
        { "word": "run", "translation": "correr" },
        { "word": " RUN ", "translation": "outra" }
      ] }"#,
    );
    let errors = validate_import(&data);
    assert!(errors.iter().any(|e| e.contains("duplicated within the file")));
  }

  #[test]
  fn test_validate_rejects_example_without_word() {
    let data = parse(
      r#"{ "words": [ {
        "word": "run",
        "translation": "correr",
        "examples": [{ "sentence": "I walk every day" }]
      } ] }"#,
    );
    let errors = validate_import(&data);
    assert!(errors.iter().any(|e| e.contains("does not contain the word")));
  }

  #[test]
  fn test_run_import_inserts_words_and_examples() {
    let conn = test_conn();
    let report = run_import(&conn, 1, &valid_data());

    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 0);
    assert!(report.errors.is_empty());
    assert_eq!(report.total, 2);

    let words = db::get_words(&conn, 1).unwrap();
    assert_eq!(words.len(), 2);
    let run = words.iter().find(|w| w.word == "run").unwrap();
    assert_eq!(run.word_type, Some(WordType::Verb));
    assert_eq!(run.declared_level, Some(DeclaredLevel::Beginner));
    assert_eq!(db::get_examples(&conn, run.id).unwrap().len(), 1);
  }

  #[test]
  fn test_run_import_skips_existing_words() {
    let conn = test_conn();
    db::insert_word(&conn, &Word::new(1, "run", "correr")).unwrap();

    let report = run_import(&conn, 1, &valid_data());
    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped, 1);
  }

  #[test]
  fn test_run_import_counters_start_at_zero() {
    let conn = test_conn();
    run_import(&conn, 1, &valid_data());
    for word in db::get_words(&conn, 1).unwrap() {
      assert_eq!(word.attempts, 0);
      assert_eq!(word.successes, 0);
      assert_eq!(word.fails, 0);
    }
  }

  #[test]
  fn test_import_blank_example_sentences_dropped() {
    let conn = test_conn();
    let data = parse(
      r#"{ "words": [ {
        "word": "run",
        "translation": "correr",
        "examples": [{ "sentence": "   " }, { "sentence": "i run" }]
      } ] }"#,
    );
    run_import(&conn, 1, &data);
    let word = &db::get_words(&conn, 1).unwrap()[0];
    assert_eq!(db::get_examples(&conn, word.id).unwrap().len(), 1);
  }
}
