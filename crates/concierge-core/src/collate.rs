//! Locale-aware string ordering for name columns.
//!
//! Names compare with the Unicode Collation Algorithm at the root locale and
//! tertiary strength: accents and case only break ties between strings whose
//! base letters match, so "Émile" sorts between "Adam" and "Eve", and "bob"
//! sorts before "Bob".

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};

thread_local! {
  static COLLATOR: Option<Collator> = root_collator();
}

fn root_collator() -> Option<Collator> {
  let mut options = CollatorOptions::new();
  options.strength = Some(Strength::Tertiary);
  Collator::try_new(&Default::default(), options)
    .inspect_err(|e| tracing::warn!(error = ?e, "root collator unavailable, folding case only"))
    .ok()
}

/// Compare two strings in collation order.
pub fn compare(a: &str, b: &str) -> Ordering {
  COLLATOR.with(|collator| match collator {
    Some(collator) => collator.compare(a, b),
    None => fold_case(a, b),
  })
}

fn fold_case(a: &str, b: &str) -> Ordering {
  let folded_a = a.chars().flat_map(char::to_lowercase);
  let folded_b = b.chars().flat_map(char::to_lowercase);
  folded_a.cmp(folded_b).then_with(|| b.cmp(a))
}
