//! Multiple-choice quiz generation with distractor sampling.
//!
//! Quiz items are ephemeral: generated fresh for each round and discarded
//! when it ends.

use rand::seq::SliceRandom;
use serde::Serialize;

use crate::config;
use crate::domain::Word;

/// One multiple-choice question. `options` holds the correct answer plus up
/// to [`config::DISTRACTOR_COUNT`] distractors in shuffled order.
#[derive(Debug, Clone, Serialize)]
pub struct QuizItem {
  pub word_id: i64,
  pub word: String,
  pub correct_answer: String,
  pub options: Vec<String>,
}

/// Build quiz items from a word collection.
///
/// Shuffles a copy of the input (never the input itself) and takes the
/// first `min(count, len)` words. An empty collection yields an empty vec.
pub fn generate_quiz(words: &[Word], count: usize) -> Vec<QuizItem> {
  let mut rng = rand::rng();
  let mut selected: Vec<&Word> = words.iter().collect();
  selected.shuffle(&mut rng);
  selected.truncate(count);

  selected
    .iter()
    .map(|word| build_quiz_item(word, words))
    .collect()
}

/// Build a single item: the word's translation plus distractor translations
/// drawn from the rest of the collection.
///
/// Distractors are deduplicated by value, and any word sharing the current
/// word's translation is excluded. If fewer than the wanted number of
/// distinct distractors exist the item simply carries fewer options.
fn build_quiz_item(word: &Word, all_words: &[Word]) -> QuizItem {
  let mut rng = rand::rng();

  let mut distractors: Vec<String> = all_words
    .iter()
    .filter(|w| w.id != word.id && w.translation != word.translation)
    .map(|w| w.translation.clone())
    .collect();
  distractors.sort();
  distractors.dedup();
  distractors.shuffle(&mut rng);
  distractors.truncate(config::DISTRACTOR_COUNT);

  let mut options = vec![word.translation.clone()];
  options.extend(distractors);
  options.shuffle(&mut rng);

  QuizItem {
    word_id: word.id,
    word: word.word.clone(),
    correct_answer: word.translation.clone(),
    options,
  }
}

/// Exact string comparison, case-sensitive. Display formatting is the
/// caller's concern.
pub fn validate_answer(item: &QuizItem, submitted: &str) -> bool {
  submitted == item.correct_answer
}

/// Uniform random selection of `min(count, len)` words, input untouched.
/// Used for flashcard rounds.
pub fn pick_random_words(words: &[Word], count: usize) -> Vec<Word> {
  let mut rng = rand::rng();
  let mut shuffled: Vec<Word> = words.to_vec();
  shuffled.shuffle(&mut rng);
  shuffled.truncate(count);
  shuffled
}
