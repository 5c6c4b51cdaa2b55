//! Core data model: words, example sentences, and practice sessions.

pub mod example;
pub mod session;
pub mod word;

pub use example::{sentence_contains_word, ExampleSentence};
pub use session::{NewSession, SessionKind, SessionRecord};
pub use word::{normalize_text, DeclaredLevel, LastResult, Word, WordType};
