//! Guest and accessibility-option types as exchanged with the backend.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Backend-assigned guest identifier.
pub type GuestId = i64;

/// Backend-assigned accessibility-option identifier.
pub type OptionId = i64;

/// Sent in place of an empty option list when creating a guest.
pub const NO_OPTIONS_SENTINEL: OptionId = -1;

// ─── Accessibility options ───────────────────────────────────────────────────

/// A backend-defined accessibility tag, e.g. "wheelchair access".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityOption {
  pub id:   OptionId,
  pub name: String,
}

/// The accessibility options ticked in a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSelection(BTreeSet<OptionId>);

impl OptionSelection {
  pub fn new() -> Self { Self::default() }

  pub fn contains(&self, id: OptionId) -> bool { self.0.contains(&id) }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  /// Flip the checkbox for `id`. Returns whether it is now selected.
  pub fn toggle(&mut self, id: OptionId) -> bool {
    if self.0.remove(&id) {
      false
    } else {
      self.0.insert(id);
      true
    }
  }

  pub fn clear(&mut self) { self.0.clear(); }

  pub fn ids(&self) -> impl Iterator<Item = OptionId> + '_ {
    self.0.iter().copied()
  }

  /// Ids for a create request. The backend expects `[-1]` rather than an
  /// empty list when nothing is selected.
  pub fn create_ids(&self) -> Vec<OptionId> {
    if self.0.is_empty() {
      vec![NO_OPTIONS_SENTINEL]
    } else {
      self.ids().collect()
    }
  }

  /// Ids for an update request, sent as-is.
  pub fn update_ids(&self) -> Vec<OptionId> { self.ids().collect() }
}

impl FromIterator<OptionId> for OptionSelection {
  fn from_iter<I: IntoIterator<Item = OptionId>>(iter: I) -> Self {
    Self(
      iter
        .into_iter()
        .filter(|id| *id != NO_OPTIONS_SENTINEL)
        .collect(),
    )
  }
}

// ─── Guests ──────────────────────────────────────────────────────────────────

/// A guest as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
  pub id:                    GuestId,
  pub first_name:            String,
  pub last_name:             String,
  pub email:                 String,
  pub address:               String,
  pub city:                  String,
  pub country:               String,
  pub zip_code:              String,
  pub phone_number:          String,
  /// Absent from some backend responses.
  #[serde(default)]
  pub accessibility_options: Vec<AccessibilityOption>,
}

impl Guest {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  /// The writable fields of this guest.
  pub fn to_input(&self) -> GuestInput {
    GuestInput {
      first_name:   self.first_name.clone(),
      last_name:    self.last_name.clone(),
      email:        self.email.clone(),
      address:      self.address.clone(),
      city:         self.city.clone(),
      country:      self.country.clone(),
      zip_code:     self.zip_code.clone(),
      phone_number: self.phone_number.clone(),
    }
  }

  pub fn option_selection(&self) -> OptionSelection {
    self.accessibility_options.iter().map(|o| o.id).collect()
  }

  /// Build a guest from a write body and the id the backend assigned.
  pub fn from_input(id: GuestId, input: GuestInput) -> Self {
    Self {
      id,
      first_name: input.first_name,
      last_name: input.last_name,
      email: input.email,
      address: input.address,
      city: input.city,
      country: input.country,
      zip_code: input.zip_code,
      phone_number: input.phone_number,
      accessibility_options: Vec::new(),
    }
  }
}

/// The body the backend accepts when creating or updating a guest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestInput {
  pub first_name:   String,
  pub last_name:    String,
  pub email:        String,
  pub address:      String,
  pub city:         String,
  pub country:      String,
  pub zip_code:     String,
  pub phone_number: String,
}
