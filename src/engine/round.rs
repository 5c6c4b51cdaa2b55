//! In-memory state machine for a single practice round.
//!
//! NotStarted -> InProgress (answer/advance loop) -> Completed, at which
//! point the summary is persisted as a session record. The round itself is
//! never stored.

use chrono::{DateTime, Utc};

use crate::domain::{NewSession, SessionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
  NotStarted,
  InProgress,
  Completed,
}

/// Running state of one quiz or flashcard round.
#[derive(Debug, Clone)]
pub struct PracticeRound {
  pub kind: SessionKind,
  /// Label of the difficulty filter this round was configured with.
  pub difficulty_label: String,
  total_planned: usize,
  current_index: usize,
  score: i64,
  failed_word_ids: Vec<i64>,
  correct_word_ids: Vec<i64>,
  started_at: Option<DateTime<Utc>>,
  completed_at: Option<DateTime<Utc>>,
}

impl PracticeRound {
  pub fn new(kind: SessionKind, total_planned: usize, difficulty_label: &str) -> Self {
    Self {
      kind,
      difficulty_label: difficulty_label.to_string(),
      total_planned,
      current_index: 0,
      score: 0,
      failed_word_ids: Vec::new(),
      correct_word_ids: Vec::new(),
      started_at: None,
      completed_at: None,
    }
  }

  pub fn state(&self) -> RoundState {
    if self.completed_at.is_some() {
      RoundState::Completed
    } else if self.started_at.is_some() {
      RoundState::InProgress
    } else {
      RoundState::NotStarted
    }
  }

  pub fn start(&mut self) {
    if self.started_at.is_none() {
      self.started_at = Some(Utc::now());
    }
  }

  /// Record one answered question and advance the index. Starts the round
  /// implicitly on the first answer; completes it after the last planned
  /// question. Answers after completion are ignored.
  pub fn record(&mut self, word_id: i64, is_correct: bool) {
    if self.state() == RoundState::Completed {
      return;
    }
    self.start();

    if is_correct {
      self.score += 1;
      self.correct_word_ids.push(word_id);
    } else {
      self.failed_word_ids.push(word_id);
    }
    self.current_index += 1;

    if self.current_index >= self.total_planned {
      self.completed_at = Some(Utc::now());
    }
  }

  pub fn current_index(&self) -> usize {
    self.current_index
  }

  pub fn score(&self) -> i64 {
    self.score
  }

  /// Seconds elapsed since start (to completion if completed).
  pub fn duration_secs(&self) -> i64 {
    match self.started_at {
      Some(start) => {
        let end = self.completed_at.unwrap_or_else(Utc::now);
        (end - start).num_seconds().max(0)
      }
      None => 0,
    }
  }

  /// Session data for persistence. `total` is the count actually answered,
  /// which may fall short of the plan if the round was cut off.
  pub fn summary(&self) -> NewSession {
    NewSession {
      kind: self.kind,
      score: self.score,
      total: self.current_index as i64,
      duration_secs: self.duration_secs(),
      failed_word_ids: self.failed_word_ids.clone(),
      correct_word_ids: self.correct_word_ids.clone(),
      difficulty_label: self.difficulty_label.clone(),
    }
  }

  /// Back to NotStarted with all counters zeroed; the next answer gets a
  /// fresh start timestamp.
  pub fn reset(&mut self) {
    self.current_index = 0;
    self.score = 0;
    self.failed_word_ids.clear();
    self.correct_word_ids.clear();
    self.started_at = None;
    self.completed_at = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_round_not_started() {
    let round = PracticeRound::new(SessionKind::Quiz, 5, "mixed");
    assert_eq!(round.state(), RoundState::NotStarted);
    assert_eq!(round.current_index(), 0);
    assert_eq!(round.score(), 0);
    assert_eq!(round.duration_secs(), 0);
  }

  #[test]
  fn test_first_answer_starts_round() {
    let mut round = PracticeRound::new(SessionKind::Quiz, 5, "mixed");
    round.record(1, true);
    assert_eq!(round.state(), RoundState::InProgress);
    assert_eq!(round.current_index(), 1);
    assert_eq!(round.score(), 1);
  }

  #[test]
  fn test_round_completes_after_planned_total() {
    let mut round = PracticeRound::new(SessionKind::Quiz, 3, "easy");
    round.record(1, true);
    round.record(2, false);
    assert_eq!(round.state(), RoundState::InProgress);
    round.record(3, true);
    assert_eq!(round.state(), RoundState::Completed);
  }

  #[test]
  fn test_answers_after_completion_ignored() {
    let mut round = PracticeRound::new(SessionKind::Quiz, 1, "mixed");
    round.record(1, true);
    round.record(2, true);
    assert_eq!(round.current_index(), 1);
    assert_eq!(round.score(), 1);
  }

  #[test]
  fn test_summary_partitions_word_ids() {
    let mut round = PracticeRound::new(SessionKind::Flashcards, 4, "hard");
    round.record(10, true);
    round.record(11, false);
    round.record(12, false);
    round.record(13, true);

    let summary = round.summary();
    assert_eq!(summary.kind, SessionKind::Flashcards);
    assert_eq!(summary.score, 2);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.correct_word_ids, vec![10, 13]);
    assert_eq!(summary.failed_word_ids, vec![11, 12]);
    assert_eq!(summary.difficulty_label, "hard");
  }

  #[test]
  fn test_summary_of_partial_round() {
    let mut round = PracticeRound::new(SessionKind::Quiz, 10, "mixed");
    round.record(1, true);
    round.record(2, false);
    let summary = round.summary();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.score, 1);
  }

  #[test]
  fn test_reset_returns_to_not_started() {
    let mut round = PracticeRound::new(SessionKind::Quiz, 2, "mixed");
    round.record(1, true);
    round.record(2, false);
    assert_eq!(round.state(), RoundState::Completed);

    round.reset();
    assert_eq!(round.state(), RoundState::NotStarted);
    assert_eq!(round.score(), 0);
    assert_eq!(round.current_index(), 0);
    assert!(round.summary().failed_word_ids.is_empty());
    assert!(round.summary().correct_word_ids.is_empty());
  }
}
