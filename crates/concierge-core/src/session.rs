//! A guest-list session: one [`GuestApi`] plus one [`GuestListView`].
//!
//! The session fetches the full guest list once, then keeps the view in sync
//! by applying each successful create/update/delete response locally instead
//! of re-fetching. A failed request leaves the view untouched and hands the
//! error back to the caller.

use std::fmt;

use crate::{
  api::GuestApi,
  guest::{AccessibilityOption, Guest, GuestId, GuestInput, OptionSelection},
  view::GuestListView,
};

// ─── Notice ──────────────────────────────────────────────────────────────────

/// A short confirmation shown to the user after a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub title: String,
  pub body:  String,
}

impl Notice {
  fn new(title: &str, body: String) -> Self {
    Self {
      title: title.to_string(),
      body,
    }
  }
}

impl fmt::Display for Notice {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.title, self.body)
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

pub struct GuestSession<A> {
  api:     A,
  view:    GuestListView,
  options: Vec<AccessibilityOption>,
}

impl<A: GuestApi> GuestSession<A> {
  pub fn new(api: A) -> Self { Self::with_view(api, GuestListView::new()) }

  pub fn with_view(api: A, view: GuestListView) -> Self {
    Self {
      api,
      view,
      options: Vec::new(),
    }
  }

  pub fn api(&self) -> &A { &self.api }

  pub fn view(&self) -> &GuestListView { &self.view }

  /// Sort, filter and page inputs go straight to the view.
  pub fn view_mut(&mut self) -> &mut GuestListView { &mut self.view }

  /// The accessibility-option catalogue, as last fetched.
  pub fn options(&self) -> &[AccessibilityOption] { &self.options }

  // ── Loading ───────────────────────────────────────────────────────────────

  /// Fetch guests and the option catalogue.
  pub async fn load(&mut self) -> Result<(), A::Error> {
    self.load_guests().await?;
    self.load_options().await
  }

  /// Replace the local guest list with a fresh `GET /guest/all`.
  pub async fn load_guests(&mut self) -> Result<&[Guest], A::Error> {
    let guests = self.api.list_guests().await.inspect_err(|e| {
      tracing::warn!(error = %e, "failed to fetch guests");
    })?;
    tracing::debug!(count = guests.len(), "fetched guests");
    Ok(self.view.set_all(guests))
  }

  pub async fn load_options(&mut self) -> Result<(), A::Error> {
    let options = self.api.list_accessibility_options().await.inspect_err(|e| {
      tracing::warn!(error = %e, "failed to fetch accessibility options");
    })?;
    tracing::debug!(count = options.len(), "fetched accessibility options");
    self.options = options;
    Ok(())
  }

  /// `GET /guest/{id}`, used to fill an edit form or a detail view.
  pub async fn fetch(&self, id: GuestId) -> Result<Guest, A::Error> {
    self.api.get_guest(id).await.inspect_err(|e| {
      tracing::warn!(guest_id = id, error = %e, "failed to fetch guest");
    })
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  pub async fn create(
    &mut self,
    input: &GuestInput,
    selection: &OptionSelection,
  ) -> Result<Notice, A::Error> {
    let mut guest = self
      .api
      .create_guest(input, selection)
      .await
      .inspect_err(|e| tracing::warn!(error = %e, "failed to create guest"))?;
    self.apply_selection(&mut guest, selection);
    tracing::info!(guest_id = guest.id, "created guest");

    let notice = Notice::new(
      "Create Guest",
      format!("User {} has been added successfully.", guest.full_name()),
    );
    self.view.insert(guest);
    Ok(notice)
  }

  pub async fn update(
    &mut self,
    id: GuestId,
    input: &GuestInput,
    selection: &OptionSelection,
  ) -> Result<Notice, A::Error> {
    let mut guest = self
      .api
      .update_guest(id, input, selection)
      .await
      .inspect_err(|e| {
        tracing::warn!(guest_id = id, error = %e, "failed to update guest");
      })?;
    self.apply_selection(&mut guest, selection);
    tracing::info!(guest_id = id, "updated guest");

    let notice = Notice::new(
      "Edit Guest",
      format!("User {} has been edited successfully.", guest.full_name()),
    );
    self.view.replace(id, guest);
    Ok(notice)
  }

  pub async fn delete(&mut self, id: GuestId) -> Result<Notice, A::Error> {
    self.api.delete_guest(id).await.inspect_err(|e| {
      tracing::warn!(guest_id = id, error = %e, "failed to delete guest");
    })?;
    tracing::info!(guest_id = id, "deleted guest");

    let name = self
      .view
      .remove(id)
      .map(|g| g.full_name())
      .unwrap_or_else(|| format!("#{id}"));
    Ok(Notice::new(
      "Delete Guest",
      format!("User {name} has been deleted successfully."),
    ))
  }

  /// The submitted selection is what the backend stored, whatever options the
  /// response echoes. Names come from the catalogue, falling back to the echo
  /// for ids the catalogue does not know.
  fn apply_selection(&self, guest: &mut Guest, selection: &OptionSelection) {
    let echoed = std::mem::take(&mut guest.accessibility_options);
    guest.accessibility_options = selection
      .ids()
      .filter_map(|id| self.options.iter().chain(&echoed).find(|o| o.id == id).cloned())
      .collect();
  }
}
