//! HTTP handlers, one module per resource. All of them require an
//! authenticated [`crate::auth::AuthContext`].

pub mod history;
pub mod import;
pub mod practice;
pub mod words;
