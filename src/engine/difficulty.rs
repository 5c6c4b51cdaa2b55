//! Computed difficulty classification from attempt history.
//!
//! The tier is derived on every read and never stored, so it shifts
//! retroactively as counters change.

use serde::{Deserialize, Serialize};

use crate::domain::Word;

/// Success rate at or above which a word counts as easy.
const EASY_RATE: f64 = 0.8;

/// Computed difficulty tier of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
  Easy,
  Medium,
  Hard,
}

impl Tier {
  /// Classify a counter state. Pure and total.
  ///
  /// New words (zero attempts) default to medium so they show up in
  /// medium-difficulty filters immediately. Equal successes and fails
  /// deliberately resolve to medium, not hard.
  pub fn classify(attempts: i64, successes: i64, fails: i64) -> Self {
    if attempts == 0 {
      return Self::Medium;
    }

    let success_rate = successes as f64 / attempts as f64;

    if success_rate >= EASY_RATE {
      Self::Easy
    } else if fails > successes {
      Self::Hard
    } else {
      Self::Medium
    }
  }

  pub fn for_word(word: &Word) -> Self {
    Self::classify(word.attempts, word.successes, word.fails)
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "easy" => Some(Self::Easy),
      "medium" => Some(Self::Medium),
      "hard" => Some(Self::Hard),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Easy => "easy",
      Self::Medium => "medium",
      Self::Hard => "hard",
    }
  }
}

/// Per-tier counts over a word collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TierStats {
  pub easy: usize,
  pub medium: usize,
  pub hard: usize,
  pub total: usize,
}

impl TierStats {
  pub fn for_words(words: &[Word]) -> Self {
    let mut stats = Self {
      total: words.len(),
      ..Self::default()
    };
    for word in words {
      match Tier::for_word(word) {
        Tier::Easy => stats.easy += 1,
        Tier::Medium => stats.medium += 1,
        Tier::Hard => stats.hard += 1,
      }
    }
    stats
  }
}

/// Success rate as a rounded whole percentage; 0 for unattempted words.
pub fn success_rate_percent(attempts: i64, successes: i64) -> i64 {
  if attempts == 0 {
    return 0;
  }
  (successes as f64 / attempts as f64 * 100.0).round() as i64
}
