//! Word collection endpoints: listing with filters, CRUD, example
//! sentences, and collection stats.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::AuthContext;
use crate::categories;
use crate::config;
use crate::db;
use crate::domain::{
  normalize_text, sentence_contains_word, DeclaredLevel, ExampleSentence, Word, WordType,
};
use crate::engine::{filter_and_paginate, success_rate_percent, Tier, TierStats, WordFilter};
use crate::error::AppError;
use crate::state::AppState;

/// A word decorated with its computed tier and success rate.
#[derive(Debug, Serialize)]
pub struct WordView {
  #[serde(flatten)]
  pub word: Word,
  pub tier: Tier,
  pub success_rate: i64,
}

impl WordView {
  pub fn from_word(word: Word) -> Self {
    let tier = Tier::for_word(&word);
    let success_rate = success_rate_percent(word.attempts, word.successes);
    Self {
      word,
      tier,
      success_rate,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct WordListQuery {
  pub search: Option<String>,
  /// "easy" | "medium" | "hard"; anything else (or absent) means all.
  pub difficulty: Option<String>,
  pub word_type: Option<String>,
  #[serde(default)]
  pub failed: bool,
  pub page: Option<usize>,
  pub page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct WordListResponse {
  pub items: Vec<WordView>,
  pub page: usize,
  pub total_pages: usize,
  pub filtered_count: usize,
  pub stats: TierStats,
}

/// GET /words
pub async fn list_words(
  auth: AuthContext,
  State(state): State<AppState>,
  Query(query): Query<WordListQuery>,
) -> Result<Json<WordListResponse>, AppError> {
  let conn = db::try_lock(&state.db)?;
  let words = db::get_words(&conn, auth.user_id)?;
  drop(conn);

  // Stats describe the whole collection, not the filtered page
  let stats = TierStats::for_words(&words);

  let filter = WordFilter {
    search: query.search,
    tier: query.difficulty.as_deref().and_then(Tier::from_str),
    word_type: query.word_type.as_deref().and_then(WordType::from_str),
    failed_only: query.failed,
  };
  let page = filter_and_paginate(
    &words,
    &filter,
    query.page.unwrap_or(1),
    query.page_size.unwrap_or(config::DEFAULT_PAGE_SIZE),
  );

  Ok(Json(WordListResponse {
    items: page.items.into_iter().map(WordView::from_word).collect(),
    page: page.page,
    total_pages: page.total_pages,
    filtered_count: page.filtered_count,
    stats,
  }))
}

#[derive(Debug, Deserialize)]
pub struct NewExamplePayload {
  pub sentence: String,
  pub translation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewWordPayload {
  pub word: String,
  pub translation: String,
  pub word_type: Option<String>,
  pub declared_level: Option<String>,
  #[serde(default)]
  pub categories: Vec<String>,
  pub phonetic: Option<String>,
  pub notes: Option<String>,
  #[serde(default)]
  pub examples: Vec<NewExamplePayload>,
}

fn validate_new_word(payload: &NewWordPayload) -> Vec<String> {
  let mut errors = Vec::new();
  let word_text = normalize_text(&payload.word);

  if word_text.is_empty() {
    errors.push("'word' is required".to_string());
  }
  if normalize_text(&payload.translation).is_empty() {
    errors.push("'translation' is required".to_string());
  }
  if let Some(wt) = &payload.word_type {
    if WordType::from_str(wt).is_none() {
      errors.push(format!("unknown type '{}'", wt));
    }
  }
  if let Some(level) = &payload.declared_level {
    if DeclaredLevel::from_str(level).is_none() {
      errors.push(format!("unknown difficulty '{}'", level));
    }
  }
  for cat in &payload.categories {
    if !categories::is_valid_category(cat) {
      errors.push(format!("unknown category '{}'", cat));
    }
  }

  let non_blank: Vec<&NewExamplePayload> = payload
    .examples
    .iter()
    .filter(|e| !e.sentence.trim().is_empty())
    .collect();
  if non_blank.is_empty() {
    errors.push("at least one example sentence is required".to_string());
  }
  for example in non_blank {
    if !word_text.is_empty() && !sentence_contains_word(&example.sentence, &word_text) {
      errors.push(format!(
        "example \"{}\" does not contain the word",
        example.sentence.trim()
      ));
    }
  }

  errors
}

/// POST /words
pub async fn add_word(
  auth: AuthContext,
  State(state): State<AppState>,
  Json(payload): Json<NewWordPayload>,
) -> Result<Json<WordView>, AppError> {
  let errors = validate_new_word(&payload);
  if !errors.is_empty() {
    return Err(AppError::Validation(errors));
  }

  let conn = db::try_lock(&state.db)?;

  let word_text = normalize_text(&payload.word);
  if db::word_exists(&conn, auth.user_id, &word_text)? {
    return Err(AppError::validation(format!(
      "word \"{}\" already exists",
      word_text
    )));
  }

  let mut word = Word::new(auth.user_id, &payload.word, &payload.translation);
  word.word_type = payload.word_type.as_deref().and_then(WordType::from_str);
  word.declared_level = payload
    .declared_level
    .as_deref()
    .and_then(DeclaredLevel::from_str);
  word.categories = payload.categories.clone();
  word.phonetic = payload
    .phonetic
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string);
  word.notes = payload
    .notes
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string);

  let word_id = db::insert_word(&conn, &word)?;
  word.id = word_id;

  for example in &payload.examples {
    if example.sentence.trim().is_empty() {
      continue;
    }
    db::insert_example(
      &conn,
      &ExampleSentence::new(word_id, &example.sentence, example.translation.as_deref()),
    )?;
  }

  tracing::debug!("Word {} added for user {}", word_id, auth.user_id);
  Ok(Json(WordView::from_word(word)))
}

#[derive(Debug, Serialize)]
pub struct WordDetailResponse {
  #[serde(flatten)]
  pub word: WordView,
  pub examples: Vec<ExampleSentence>,
}

/// GET /words/{id}
pub async fn get_word(
  auth: AuthContext,
  State(state): State<AppState>,
  Path(word_id): Path<i64>,
) -> Result<Json<WordDetailResponse>, AppError> {
  let conn = db::try_lock(&state.db)?;
  let word = db::get_word(&conn, auth.user_id, word_id)?.ok_or(AppError::NotFound("word"))?;
  let examples = db::get_examples(&conn, word_id)?;
  Ok(Json(WordDetailResponse {
    word: WordView::from_word(word),
    examples,
  }))
}

/// Partial update. Absent fields stay unchanged; an empty string clears the
/// optional enum and text fields.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWordPayload {
  pub word: Option<String>,
  pub translation: Option<String>,
  pub word_type: Option<String>,
  pub declared_level: Option<String>,
  pub categories: Option<Vec<String>>,
  pub phonetic: Option<String>,
  pub notes: Option<String>,
}

fn parse_clearable<T>(
  raw: &Option<String>,
  parse: impl Fn(&str) -> Option<T>,
  what: &str,
  errors: &mut Vec<String>,
) -> Option<Option<T>> {
  match raw.as_deref().map(str::trim) {
    None => None,
    Some("") => Some(None),
    Some(value) => match parse(value) {
      Some(parsed) => Some(Some(parsed)),
      None => {
        errors.push(format!("unknown {} '{}'", what, value));
        None
      }
    },
  }
}

/// PUT /words/{id}
pub async fn update_word(
  auth: AuthContext,
  State(state): State<AppState>,
  Path(word_id): Path<i64>,
  Json(payload): Json<UpdateWordPayload>,
) -> Result<Json<WordView>, AppError> {
  let mut errors = Vec::new();

  if let Some(text) = &payload.word {
    if normalize_text(text).is_empty() {
      errors.push("'word' cannot be blank".to_string());
    }
  }
  if let Some(translation) = &payload.translation {
    if normalize_text(translation).is_empty() {
      errors.push("'translation' cannot be blank".to_string());
    }
  }
  if let Some(cats) = &payload.categories {
    for cat in cats {
      if !categories::is_valid_category(cat) {
        errors.push(format!("unknown category '{}'", cat));
      }
    }
  }

  let update = db::WordUpdate {
    word: payload.word.clone(),
    translation: payload.translation.clone(),
    word_type: parse_clearable(&payload.word_type, WordType::from_str, "type", &mut errors),
    declared_level: parse_clearable(
      &payload.declared_level,
      DeclaredLevel::from_str,
      "difficulty",
      &mut errors,
    ),
    categories: payload.categories.clone(),
    phonetic: payload
      .phonetic
      .as_deref()
      .map(|s| Some(s.trim().to_string()).filter(|t| !t.is_empty())),
    notes: payload
      .notes
      .as_deref()
      .map(|s| Some(s.trim().to_string()).filter(|t| !t.is_empty())),
  };

  if !errors.is_empty() {
    return Err(AppError::Validation(errors));
  }

  let conn = db::try_lock(&state.db)?;
  if !db::update_word(&conn, auth.user_id, word_id, &update)? {
    return Err(AppError::NotFound("word"));
  }
  let word = db::get_word(&conn, auth.user_id, word_id)?.ok_or(AppError::NotFound("word"))?;
  Ok(Json(WordView::from_word(word)))
}

/// DELETE /words/{id}
pub async fn delete_word(
  auth: AuthContext,
  State(state): State<AppState>,
  Path(word_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
  let conn = db::try_lock(&state.db)?;
  if !db::delete_word(&conn, auth.user_id, word_id)? {
    return Err(AppError::NotFound("word"));
  }
  tracing::debug!("Word {} deleted for user {}", word_id, auth.user_id);
  Ok(Json(json!({ "ok": true })))
}

/// GET /words/{id}/examples
pub async fn list_examples(
  auth: AuthContext,
  State(state): State<AppState>,
  Path(word_id): Path<i64>,
) -> Result<Json<Vec<ExampleSentence>>, AppError> {
  let conn = db::try_lock(&state.db)?;
  if db::get_word(&conn, auth.user_id, word_id)?.is_none() {
    return Err(AppError::NotFound("word"));
  }
  Ok(Json(db::get_examples(&conn, word_id)?))
}

fn validate_example_sentence(word: &Word, sentence: &str) -> Result<(), AppError> {
  if sentence.trim().is_empty() {
    return Err(AppError::validation("'sentence' is required"));
  }
  if !sentence_contains_word(sentence, &word.word) {
    return Err(AppError::validation(format!(
      "example must contain the word \"{}\"",
      word.word
    )));
  }
  Ok(())
}

/// POST /words/{id}/examples
pub async fn add_example(
  auth: AuthContext,
  State(state): State<AppState>,
  Path(word_id): Path<i64>,
  Json(payload): Json<NewExamplePayload>,
) -> Result<Json<ExampleSentence>, AppError> {
  let conn = db::try_lock(&state.db)?;
  let word = db::get_word(&conn, auth.user_id, word_id)?.ok_or(AppError::NotFound("word"))?;
  validate_example_sentence(&word, &payload.sentence)?;

  let mut example = ExampleSentence::new(word_id, &payload.sentence, payload.translation.as_deref());
  example.id = db::insert_example(&conn, &example)?;
  Ok(Json(example))
}

/// PUT /words/{id}/examples/{example_id}
pub async fn update_example(
  auth: AuthContext,
  State(state): State<AppState>,
  Path((word_id, example_id)): Path<(i64, i64)>,
  Json(payload): Json<NewExamplePayload>,
) -> Result<Json<ExampleSentence>, AppError> {
  let conn = db::try_lock(&state.db)?;
  let word = db::get_word(&conn, auth.user_id, word_id)?.ok_or(AppError::NotFound("word"))?;
  validate_example_sentence(&word, &payload.sentence)?;

  if !db::update_example(
    &conn,
    word_id,
    example_id,
    &payload.sentence,
    payload.translation.as_deref(),
  )? {
    return Err(AppError::NotFound("example"));
  }
  let example =
    db::get_example(&conn, word_id, example_id)?.ok_or(AppError::NotFound("example"))?;
  Ok(Json(example))
}

/// DELETE /words/{id}/examples/{example_id}
pub async fn delete_example(
  auth: AuthContext,
  State(state): State<AppState>,
  Path((word_id, example_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, AppError> {
  let conn = db::try_lock(&state.db)?;
  if db::get_word(&conn, auth.user_id, word_id)?.is_none() {
    return Err(AppError::NotFound("word"));
  }
  if !db::delete_example(&conn, word_id, example_id)? {
    return Err(AppError::NotFound("example"));
  }
  Ok(Json(json!({ "ok": true })))
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
  pub tiers: TierStats,
  pub total_attempts: i64,
  pub overall_success_rate: i64,
  /// Words with at least one recorded attempt.
  pub words_practiced: usize,
}

/// GET /stats
pub async fn get_stats(
  auth: AuthContext,
  State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
  let conn = db::try_lock(&state.db)?;
  let words = db::get_words(&conn, auth.user_id)?;
  drop(conn);

  let total_attempts: i64 = words.iter().map(|w| w.attempts).sum();
  let total_successes: i64 = words.iter().map(|w| w.successes).sum();

  Ok(Json(StatsResponse {
    tiers: TierStats::for_words(&words),
    total_attempts,
    overall_success_rate: success_rate_percent(total_attempts, total_successes),
    words_practiced: words.iter().filter(|w| w.attempts > 0).count(),
  }))
}
