pub mod auth;
pub mod categories;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod history;
pub mod import;
pub mod state;
pub mod testing;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router. Shared by `main` and the API tests.
pub fn build_router(state: AppState) -> Router {
  Router::new()
    .route("/auth/signup", post(auth::handlers::signup))
    .route("/auth/login", post(auth::handlers::login))
    .route("/auth/logout", post(auth::handlers::logout))
    .route("/auth/me", get(auth::handlers::me))
    .route(
      "/words",
      get(handlers::words::list_words).post(handlers::words::add_word),
    )
    .route(
      "/words/{id}",
      get(handlers::words::get_word)
        .put(handlers::words::update_word)
        .delete(handlers::words::delete_word),
    )
    .route(
      "/words/{id}/examples",
      get(handlers::words::list_examples).post(handlers::words::add_example),
    )
    .route(
      "/words/{id}/examples/{example_id}",
      axum::routing::put(handlers::words::update_example)
        .delete(handlers::words::delete_example),
    )
    .route("/practice/quiz", get(handlers::practice::get_quiz))
    .route("/practice/flashcards", get(handlers::practice::get_flashcards))
    .route("/practice/answer", post(handlers::practice::record_answer))
    .route("/practice/complete", post(handlers::practice::complete_round))
    .route("/history", get(handlers::history::get_history))
    .route("/history/today", get(handlers::history::get_today))
    .route("/history/top-failed", get(handlers::history::get_top_failed))
    .route("/import", post(handlers::import::import_words))
    .route("/stats", get(handlers::words::get_stats))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
