//! The adaptive practice engine: pure logic over the in-memory word
//! collection. Everything here is side-effect free; persistence lives in
//! [`crate::db`].

pub mod difficulty;
pub mod filter;
pub mod quiz;
pub mod round;

pub use difficulty::{success_rate_percent, Tier, TierStats};
pub use filter::{filter_and_paginate, WordFilter, WordPage};
pub use quiz::{generate_quiz, pick_random_words, validate_answer, QuizItem};
pub use round::{PracticeRound, RoundState};
