//! Practice endpoints: quiz and flashcard round setup, per-answer counter
//! updates, and round completion.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::AuthContext;
use crate::config;
use crate::db;
use crate::domain::{SessionKind, Word};
use crate::engine::{generate_quiz, pick_random_words, PracticeRound, QuizItem, Tier};
use crate::error::AppError;
use crate::handlers::words::WordView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PracticeQuery {
  pub count: Option<usize>,
  /// "easy" | "medium" | "hard"; anything else (or absent) means mixed.
  pub difficulty: Option<String>,
  #[serde(default)]
  pub failed_only: bool,
  pub time_per_question: Option<u32>,
}

impl PracticeQuery {
  fn difficulty_label(&self) -> String {
    match self.difficulty.as_deref().and_then(Tier::from_str) {
      Some(tier) => tier.as_str().to_string(),
      None => "mixed".to_string(),
    }
  }
}

/// Word pool for a practice round: the failed-only subset if requested,
/// narrowed to the requested tier.
fn practice_pool(
  conn: &rusqlite::Connection,
  user_id: i64,
  query: &PracticeQuery,
) -> Result<Vec<Word>, AppError> {
  let mut words = if query.failed_only {
    db::get_failed_words(conn, user_id)?
  } else {
    db::get_words(conn, user_id)?
  };

  if let Some(tier) = query.difficulty.as_deref().and_then(Tier::from_str) {
    words.retain(|w| Tier::for_word(w) == tier);
  }
  Ok(words)
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
  pub items: Vec<QuizItem>,
  pub difficulty: String,
  pub time_per_question: u32,
}

/// GET /practice/quiz
///
/// An empty pool yields an empty item list, not an error; the client shows
/// its own "nothing to practice" state.
pub async fn get_quiz(
  auth: AuthContext,
  State(state): State<AppState>,
  Query(query): Query<PracticeQuery>,
) -> Result<Json<QuizResponse>, AppError> {
  let conn = db::try_lock(&state.db)?;
  let pool = practice_pool(&conn, auth.user_id, &query)?;
  drop(conn);

  let count = query.count.unwrap_or(config::DEFAULT_ROUND_SIZE);
  let items = generate_quiz(&pool, count);
  tracing::debug!(
    "Quiz of {} items generated for user {} (pool {})",
    items.len(),
    auth.user_id,
    pool.len()
  );

  Ok(Json(QuizResponse {
    items,
    difficulty: query.difficulty_label(),
    time_per_question: query
      .time_per_question
      .unwrap_or(config::DEFAULT_TIME_PER_QUESTION),
  }))
}

#[derive(Debug, Serialize)]
pub struct FlashcardsResponse {
  pub items: Vec<WordView>,
  pub difficulty: String,
}

/// GET /practice/flashcards
pub async fn get_flashcards(
  auth: AuthContext,
  State(state): State<AppState>,
  Query(query): Query<PracticeQuery>,
) -> Result<Json<FlashcardsResponse>, AppError> {
  let conn = db::try_lock(&state.db)?;
  let pool = practice_pool(&conn, auth.user_id, &query)?;
  drop(conn);

  let count = query.count.unwrap_or(config::DEFAULT_ROUND_SIZE);
  let items = pick_random_words(&pool, count)
    .into_iter()
    .map(WordView::from_word)
    .collect();

  Ok(Json(FlashcardsResponse {
    items,
    difficulty: query.difficulty_label(),
  }))
}

#[derive(Debug, Deserialize)]
pub struct AnswerPayload {
  pub word_id: i64,
  pub correct: bool,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
  #[serde(flatten)]
  pub word: WordView,
}

/// POST /practice/answer
///
/// Updates the word's counters immediately; answering against a word
/// deleted mid-round is a 404.
pub async fn record_answer(
  auth: AuthContext,
  State(state): State<AppState>,
  Json(payload): Json<AnswerPayload>,
) -> Result<Json<AnswerResponse>, AppError> {
  let conn = db::try_lock(&state.db)?;
  if !db::record_answer(&conn, auth.user_id, payload.word_id, payload.correct)? {
    return Err(AppError::NotFound("word"));
  }
  let word =
    db::get_word(&conn, auth.user_id, payload.word_id)?.ok_or(AppError::NotFound("word"))?;
  Ok(Json(AnswerResponse {
    word: WordView::from_word(word),
  }))
}

#[derive(Debug, Deserialize)]
pub struct CompletePayload {
  pub kind: String,
  /// Client-measured wall time of the round.
  pub duration_secs: i64,
  #[serde(default)]
  pub failed_word_ids: Vec<i64>,
  #[serde(default)]
  pub correct_word_ids: Vec<i64>,
  pub difficulty_label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompleteResponse {
  pub session_id: i64,
  pub score: i64,
  pub total: i64,
}

/// POST /practice/complete
///
/// The client submits only the per-word outcomes; score and total are
/// derived here by replaying them through a [`PracticeRound`], never
/// trusted from the payload.
pub async fn complete_round(
  auth: AuthContext,
  State(state): State<AppState>,
  Json(payload): Json<CompletePayload>,
) -> Result<Json<CompleteResponse>, AppError> {
  let Some(kind) = SessionKind::from_str(&payload.kind) else {
    return Err(AppError::validation(format!(
      "unknown session kind '{}'",
      payload.kind
    )));
  };
  if payload.duration_secs < 0 {
    return Err(AppError::validation("duration cannot be negative"));
  }

  let label = payload
    .difficulty_label
    .unwrap_or_else(|| "mixed".to_string());
  let answered = payload.correct_word_ids.len() + payload.failed_word_ids.len();

  let mut round = PracticeRound::new(kind, answered, &label);
  for word_id in &payload.correct_word_ids {
    round.record(*word_id, true);
  }
  for word_id in &payload.failed_word_ids {
    round.record(*word_id, false);
  }

  let mut session = round.summary();
  // The replay is instant; the round's real duration comes from the client
  session.duration_secs = payload.duration_secs;

  let conn = db::try_lock(&state.db)?;
  let session_id = db::insert_session(&conn, auth.user_id, &session)?;
  tracing::info!(
    "Session {} saved for user {}: {}/{} ({})",
    session_id,
    auth.user_id,
    session.score,
    session.total,
    session.kind.as_str()
  );

  Ok(Json(CompleteResponse {
    session_id,
    score: session.score,
    total: session.total,
  }))
}
