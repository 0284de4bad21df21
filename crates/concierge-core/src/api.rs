//! The `GuestApi` trait: the REST backend as seen by the client.
//!
//! The trait is implemented by `concierge-client` over HTTP and by in-memory
//! fakes in tests. [`GuestSession`](crate::session::GuestSession) depends on
//! this abstraction, not on any concrete transport.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `GET`    | `/guest/all` | |
//! | `GET`    | `/guest/{id}` | |
//! | `POST`   | `/guest/create` | `{guest, accessibility_option_ids}` |
//! | `PUT`    | `/guest/{id}` | `{updated_guest, new_accessibility_option_ids}` |
//! | `DELETE` | `/guest/{id}` | |
//! | `GET`    | `/accessibility_option/all` | |

use std::future::Future;

use serde::Serialize;

use crate::guest::{
  AccessibilityOption, Guest, GuestId, GuestInput, OptionId, OptionSelection,
};

// ─── Request bodies ──────────────────────────────────────────────────────────

/// JSON body for `POST /guest/create`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGuestBody<'a> {
  pub guest:                    &'a GuestInput,
  pub accessibility_option_ids: Vec<OptionId>,
}

impl<'a> CreateGuestBody<'a> {
  pub fn new(guest: &'a GuestInput, selection: &OptionSelection) -> Self {
    Self {
      guest,
      accessibility_option_ids: selection.create_ids(),
    }
  }
}

/// JSON body for `PUT /guest/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateGuestBody<'a> {
  pub updated_guest:                &'a GuestInput,
  pub new_accessibility_option_ids: Vec<OptionId>,
}

impl<'a> UpdateGuestBody<'a> {
  pub fn new(guest: &'a GuestInput, selection: &OptionSelection) -> Self {
    Self {
      updated_guest:                guest,
      new_accessibility_option_ids: selection.update_ids(),
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Async access to the guest backend.
///
/// Every method is a single request. Implementations own no retry policy;
/// failures are returned as [`Self::Error`](GuestApi::Error).
pub trait GuestApi: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// `GET /guest/all`
  fn list_guests(
    &self,
  ) -> impl Future<Output = Result<Vec<Guest>, Self::Error>> + Send + '_;

  /// `GET /guest/{id}`
  fn get_guest(
    &self,
    id: GuestId,
  ) -> impl Future<Output = Result<Guest, Self::Error>> + Send + '_;

  /// `POST /guest/create`. Returns the stored guest with its new id.
  fn create_guest<'a>(
    &'a self,
    input: &'a GuestInput,
    selection: &'a OptionSelection,
  ) -> impl Future<Output = Result<Guest, Self::Error>> + Send + 'a;

  /// `PUT /guest/{id}`. Returns the updated guest.
  fn update_guest<'a>(
    &'a self,
    id: GuestId,
    input: &'a GuestInput,
    selection: &'a OptionSelection,
  ) -> impl Future<Output = Result<Guest, Self::Error>> + Send + 'a;

  /// `DELETE /guest/{id}`
  fn delete_guest(
    &self,
    id: GuestId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// `GET /accessibility_option/all`
  fn list_accessibility_options(
    &self,
  ) -> impl Future<Output = Result<Vec<AccessibilityOption>, Self::Error>>
  + Send
  + '_;
}
