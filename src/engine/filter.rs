//! Search, difficulty, type and failed-only filtering over the in-memory
//! word collection, plus pagination.
//!
//! Filtering always reruns the full pipeline against the full collection;
//! there is no incremental narrowing.

use crate::domain::{Word, WordType};
use crate::engine::difficulty::Tier;

/// Filter settings for the word list. `None` means "all" for the tier and
/// type filters. Built by the handlers from their own query type.
#[derive(Debug, Clone, Default)]
pub struct WordFilter {
  pub search: Option<String>,
  pub tier: Option<Tier>,
  pub word_type: Option<WordType>,
  pub failed_only: bool,
}

/// One page of the filtered collection.
#[derive(Debug, Clone)]
pub struct WordPage {
  pub items: Vec<Word>,
  /// Page actually served, after clamping into `[1, max(1, total_pages)]`.
  pub page: usize,
  pub total_pages: usize,
  pub filtered_count: usize,
}

/// Run the full pipeline: search (with relevance re-sort), tier filter,
/// type filter, failed-only filter, then slice out the requested page.
pub fn filter_and_paginate(
  words: &[Word],
  filter: &WordFilter,
  page: usize,
  page_size: usize,
) -> WordPage {
  let mut filtered: Vec<Word> = words.to_vec();

  if let Some(query) = filter.search.as_deref() {
    let query = query.trim().to_lowercase();
    if !query.is_empty() {
      filtered.retain(|w| w.word.contains(&query) || w.translation.contains(&query));
      sort_by_relevance(&mut filtered, &query);
    }
  }

  if let Some(tier) = filter.tier {
    filtered.retain(|w| Tier::for_word(w) == tier);
  }

  if let Some(word_type) = filter.word_type {
    filtered.retain(|w| w.word_type == Some(word_type));
  }

  if filter.failed_only {
    // Canonical predicate: any recorded fail, not reset by later successes
    filtered.retain(|w| w.fails > 0);
  }

  paginate(filtered, page, page_size)
}

/// Relevance order for search results:
/// 1. word starts with the query
/// 2. translation starts with the query
/// 3. shorter word first
/// 4. alphabetical
fn sort_by_relevance(words: &mut [Word], query: &str) {
  words.sort_by(|a, b| {
    let a_word_starts = a.word.starts_with(query);
    let b_word_starts = b.word.starts_with(query);
    if a_word_starts != b_word_starts {
      return b_word_starts.cmp(&a_word_starts);
    }

    let a_trans_starts = a.translation.starts_with(query);
    let b_trans_starts = b.translation.starts_with(query);
    if a_trans_starts != b_trans_starts {
      return b_trans_starts.cmp(&a_trans_starts);
    }

    a.word
      .len()
      .cmp(&b.word.len())
      .then_with(|| a.word.cmp(&b.word))
  });
}

fn paginate(filtered: Vec<Word>, page: usize, page_size: usize) -> WordPage {
  // Clamp once so the slice and total_pages agree on the effective size
  let page_size = page_size.max(1);
  let filtered_count = filtered.len();
  let total_pages = filtered_count.div_ceil(page_size);
  let page = page.clamp(1, total_pages.max(1));

  let start = (page - 1) * page_size;
  let items = filtered
    .into_iter()
    .skip(start)
    .take(page_size)
    .collect();

  WordPage {
    items,
    page,
    total_pages,
    filtered_count,
  }
}
