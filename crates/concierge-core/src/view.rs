//! The guest list view-model: sort → filter → paginate.
//!
//! [`GuestListView`] owns the authoritative in-memory guest collection and the
//! user's sort, filter and page inputs. Every mutating call re-runs the whole
//! pipeline and returns the resulting display window, so callers never read a
//! stale page.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
  Error,
  collate,
  guest::{Guest, GuestId},
};

/// Page size used until the caller picks another.
pub const DEFAULT_PAGE_SIZE: usize = 5;

// ─── Sort key ────────────────────────────────────────────────────────────────

/// One of the six sort modes offered by the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
  #[default]
  IdAsc,
  IdDesc,
  FirstNameAsc,
  FirstNameDesc,
  LastNameAsc,
  LastNameDesc,
}

impl SortKey {
  pub const ALL: [SortKey; 6] = [
    SortKey::IdAsc,
    SortKey::IdDesc,
    SortKey::FirstNameAsc,
    SortKey::FirstNameDesc,
    SortKey::LastNameAsc,
    SortKey::LastNameDesc,
  ];

  /// The form-control value, e.g. `sort-first-name-asc`.
  pub fn as_str(self) -> &'static str {
    match self {
      SortKey::IdAsc => "sort-id-asc",
      SortKey::IdDesc => "sort-id-desc",
      SortKey::FirstNameAsc => "sort-first-name-asc",
      SortKey::FirstNameDesc => "sort-first-name-desc",
      SortKey::LastNameAsc => "sort-last-name-asc",
      SortKey::LastNameDesc => "sort-last-name-desc",
    }
  }

  /// Short human label for status lines.
  pub fn label(self) -> &'static str {
    match self {
      SortKey::IdAsc => "ID ↑",
      SortKey::IdDesc => "ID ↓",
      SortKey::FirstNameAsc => "First name ↑",
      SortKey::FirstNameDesc => "First name ↓",
      SortKey::LastNameAsc => "Last name ↑",
      SortKey::LastNameDesc => "Last name ↓",
    }
  }

  /// The next mode in [`SortKey::ALL`], wrapping around.
  pub fn next(self) -> Self {
    let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
    Self::ALL[(i + 1) % Self::ALL.len()]
  }

  /// The previous mode in [`SortKey::ALL`], wrapping around.
  pub fn prev(self) -> Self {
    let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
    Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
  }

  fn compare(self, a: &Guest, b: &Guest) -> Ordering {
    match self {
      SortKey::IdAsc => a.id.cmp(&b.id),
      SortKey::IdDesc => b.id.cmp(&a.id),
      SortKey::FirstNameAsc => collate::compare(&a.first_name, &b.first_name),
      SortKey::FirstNameDesc => collate::compare(&b.first_name, &a.first_name),
      SortKey::LastNameAsc => collate::compare(&a.last_name, &b.last_name),
      SortKey::LastNameDesc => collate::compare(&b.last_name, &a.last_name),
    }
  }
}

impl fmt::Display for SortKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for SortKey {
  type Err = Error;

  /// Accepts both `sort-id-asc` and the bare `id-asc`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    let bare = trimmed.strip_prefix("sort-").unwrap_or(trimmed);
    Self::ALL
      .into_iter()
      .find(|k| &k.as_str()["sort-".len()..] == bare)
      .ok_or_else(|| Error::UnknownSortKey(s.to_string()))
  }
}

// ─── View-model ──────────────────────────────────────────────────────────────

/// In-memory guest list with derived filtered and displayed views.
#[derive(Debug, Clone)]
pub struct GuestListView {
  /// Source of truth, kept in the current sort order.
  all:       Vec<Guest>,
  filter:    String,
  sort_key:  SortKey,
  page_size: usize,
  /// 1-based.
  page:      usize,

  /// Sorted and filtered; derived from `all`.
  filtered:  Vec<Guest>,
  /// Bounds of the display window within `filtered`.
  window:    (usize, usize),
}

impl Default for GuestListView {
  fn default() -> Self { Self::new() }
}

impl GuestListView {
  pub fn new() -> Self { Self::with_page_size(DEFAULT_PAGE_SIZE) }

  pub fn with_page_size(page_size: usize) -> Self {
    Self {
      all:       Vec::new(),
      filter:    String::new(),
      sort_key:  SortKey::default(),
      page_size: page_size.max(1),
      page:      1,
      filtered:  Vec::new(),
      window:    (0, 0),
    }
  }

  // ── Inputs ────────────────────────────────────────────────────────────────

  /// Replace the whole collection and go back to page 1.
  pub fn set_all(&mut self, guests: Vec<Guest>) -> &[Guest] {
    self.all = guests;
    self.page = 1;
    self.recompute()
  }

  /// Set the filter text. The current page is kept and re-clamped.
  pub fn set_filter(&mut self, text: impl Into<String>) -> &[Guest] {
    self.filter = text.into();
    self.recompute()
  }

  pub fn set_sort(&mut self, key: SortKey) -> &[Guest] {
    self.sort_key = key;
    self.recompute()
  }

  /// Change the page size. Zero is treated as one.
  pub fn set_page_size(&mut self, n: usize) -> &[Guest] {
    self.page_size = n.max(1);
    self.recompute()
  }

  /// Jump to page `p`, clamped into `[1, page_count]`.
  pub fn set_page(&mut self, p: i64) -> &[Guest] {
    self.paginate(p);
    self.displayed()
  }

  pub fn next_page(&mut self) -> &[Guest] {
    self.set_page(self.page as i64 + 1)
  }

  pub fn prev_page(&mut self) -> &[Guest] {
    self.set_page(self.page as i64 - 1)
  }

  // ── Local mutations after a successful backend write ─────────────────────

  pub fn insert(&mut self, guest: Guest) -> &[Guest] {
    self.all.push(guest);
    self.recompute()
  }

  /// Replace the guest with `id`. Unknown ids leave the collection untouched.
  pub fn replace(&mut self, id: GuestId, guest: Guest) -> &[Guest] {
    if let Some(slot) = self.all.iter_mut().find(|g| g.id == id) {
      *slot = guest;
    }
    self.recompute()
  }

  /// Remove the guest with `id`, returning it if it was present.
  pub fn remove(&mut self, id: GuestId) -> Option<Guest> {
    let removed = self
      .all
      .iter()
      .position(|g| g.id == id)
      .map(|i| self.all.remove(i));
    self.recompute();
    removed
  }

  // ── Outputs ───────────────────────────────────────────────────────────────

  pub fn all(&self) -> &[Guest] { &self.all }

  pub fn filtered(&self) -> &[Guest] { &self.filtered }

  /// The page-size window of [`filtered`](Self::filtered) at the current page.
  pub fn displayed(&self) -> &[Guest] {
    &self.filtered[self.window.0..self.window.1]
  }

  pub fn get(&self, id: GuestId) -> Option<&Guest> {
    self.all.iter().find(|g| g.id == id)
  }

  pub fn filter(&self) -> &str { &self.filter }

  pub fn sort_key(&self) -> SortKey { self.sort_key }

  pub fn page(&self) -> usize { self.page }

  pub fn page_size(&self) -> usize { self.page_size }

  /// `ceil(filtered / page_size)`; zero when nothing matches.
  pub fn page_count(&self) -> usize {
    self.filtered.len().div_ceil(self.page_size)
  }

  // ── Pipeline ──────────────────────────────────────────────────────────────

  fn recompute(&mut self) -> &[Guest] {
    let key = self.sort_key;
    // `sort_by` is stable, so equal keys keep their prior relative order.
    self.all.sort_by(|a, b| key.compare(a, b));

    let tokens: Vec<String> = self
      .filter
      .split_whitespace()
      .map(str::to_lowercase)
      .collect();
    self.filtered = if tokens.is_empty() {
      self.all.clone()
    } else {
      self
        .all
        .iter()
        .filter(|g| matches_all(g, &tokens))
        .cloned()
        .collect()
    };

    self.paginate(self.page as i64);
    self.displayed()
  }

  fn paginate(&mut self, p: i64) {
    let count = self.page_count();
    if count == 0 {
      self.window = (0, 0);
      return;
    }
    let page = p.clamp(1, count as i64) as usize;
    let start = (page - 1) * self.page_size;
    let end = (start + self.page_size).min(self.filtered.len());
    self.page = page;
    self.window = (start, end);
  }
}

/// Every token must appear in the first or the last name.
fn matches_all(guest: &Guest, tokens: &[String]) -> bool {
  let first = guest.first_name.to_lowercase();
  let last = guest.last_name.to_lowercase();
  tokens
    .iter()
    .all(|t| first.contains(t.as_str()) || last.contains(t.as_str()))
}
