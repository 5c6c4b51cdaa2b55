//! Cookie-session authentication: users, password hashing, login sessions.

pub mod db;
pub mod handlers;
pub mod middleware;
pub mod password;

pub use middleware::{AuthContext, SESSION_COOKIE_NAME};
