//! Signup, login, logout and the current-user endpoint.

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::db as auth_db;
use super::middleware::{AuthContext, SESSION_COOKIE_NAME};
use super::password;
use crate::config;
use crate::db;
use crate::db::LogOnError;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupPayload {
  pub email: String,
  pub display_name: String,
  pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
  pub email: String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
  pub user_id: i64,
  pub display_name: String,
}

fn session_cookie(token: String) -> Cookie<'static> {
  Cookie::build((SESSION_COOKIE_NAME, token))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .max_age(time::Duration::hours(config::AUTH_SESSION_EXPIRY_HOURS))
    .build()
}

fn validate_signup(payload: &SignupPayload) -> Vec<String> {
  let mut errors = Vec::new();
  let email = payload.email.trim();
  if email.is_empty() || !email.contains('@') {
    errors.push("a valid email is required".to_string());
  }
  if payload.display_name.trim().is_empty() {
    errors.push("display name is required".to_string());
  }
  if payload.password.len() < 8 {
    errors.push("password must be at least 8 characters".to_string());
  }
  errors
}

/// POST /auth/signup
pub async fn signup(
  State(state): State<AppState>,
  jar: CookieJar,
  Json(payload): Json<SignupPayload>,
) -> Result<(CookieJar, Json<UserResponse>), AppError> {
  let errors = validate_signup(&payload);
  if !errors.is_empty() {
    return Err(AppError::Validation(errors));
  }

  let password_hash = password::hash_password(&payload.password)
    .map_err(|_| AppError::validation("could not hash password"))?;

  let conn = db::try_lock(&state.db)?;

  if auth_db::get_user_by_email(&conn, &payload.email)?.is_some() {
    return Err(AppError::validation("email already registered"));
  }

  let user_id = auth_db::create_user(&conn, &payload.email, &payload.display_name, &password_hash)?;
  let token = auth_db::create_auth_session(&conn, user_id)?;
  tracing::info!("New user registered: {}", user_id);

  Ok((
    jar.add(session_cookie(token)),
    Json(UserResponse {
      user_id,
      display_name: payload.display_name.trim().to_string(),
    }),
  ))
}

/// POST /auth/login
pub async fn login(
  State(state): State<AppState>,
  jar: CookieJar,
  Json(payload): Json<LoginPayload>,
) -> Result<(CookieJar, Json<UserResponse>), AppError> {
  let conn = db::try_lock(&state.db)?;

  // Same rejection for unknown email and bad password
  let user = auth_db::get_user_by_email(&conn, &payload.email)?.ok_or(AppError::Unauthorized)?;
  if !password::verify_password(&payload.password, &user.password_hash) {
    return Err(AppError::Unauthorized);
  }

  auth_db::cleanup_expired_sessions(&conn).log_warn_default("cleanup expired sessions");
  let token = auth_db::create_auth_session(&conn, user.id)?;

  Ok((
    jar.add(session_cookie(token)),
    Json(UserResponse {
      user_id: user.id,
      display_name: user.display_name,
    }),
  ))
}

/// POST /auth/logout
pub async fn logout(
  State(state): State<AppState>,
  jar: CookieJar,
) -> Result<(CookieJar, Json<Value>), AppError> {
  if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
    let conn = db::try_lock(&state.db)?;
    auth_db::delete_auth_session(&conn, cookie.value())?;
  }
  Ok((
    jar.remove(Cookie::from(SESSION_COOKIE_NAME)),
    Json(json!({ "ok": true })),
  ))
}

/// GET /auth/me
pub async fn me(auth: AuthContext) -> Json<UserResponse> {
  Json(UserResponse {
    user_id: auth.user_id,
    display_name: auth.display_name,
  })
}
