//! Key-handling tests for [`App`] against an in-memory backend.

use std::sync::Mutex;

use concierge_core::{
  api::GuestApi,
  form::{FormMode, GuestField},
  guest::{AccessibilityOption, Guest, GuestId, GuestInput, OptionSelection},
  session::GuestSession,
  view::{GuestListView, SortKey},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
struct Refused;

#[derive(Default)]
struct MemoryApi {
  guests:  Mutex<Vec<Guest>>,
  refuse:  Mutex<bool>,
}

impl MemoryApi {
  fn refusing(&self) -> Result<(), Refused> {
    if *self.refuse.lock().unwrap() { Err(Refused) } else { Ok(()) }
  }
}

impl GuestApi for MemoryApi {
  type Error = Refused;

  async fn list_guests(&self) -> Result<Vec<Guest>, Refused> {
    self.refusing()?;
    Ok(self.guests.lock().unwrap().clone())
  }

  async fn get_guest(&self, id: GuestId) -> Result<Guest, Refused> {
    self.refusing()?;
    let guests = self.guests.lock().unwrap();
    guests.iter().find(|g| g.id == id).cloned().ok_or(Refused)
  }

  async fn create_guest<'a>(
    &'a self,
    input: &'a GuestInput,
    _selection: &'a OptionSelection,
  ) -> Result<Guest, Refused> {
    self.refusing()?;
    let mut guests = self.guests.lock().unwrap();
    let id = guests.iter().map(|g| g.id).max().unwrap_or(0) + 1;
    let guest = Guest::from_input(id, input.clone());
    guests.push(guest.clone());
    Ok(guest)
  }

  async fn update_guest<'a>(
    &'a self,
    id: GuestId,
    input: &'a GuestInput,
    _selection: &'a OptionSelection,
  ) -> Result<Guest, Refused> {
    self.refusing()?;
    Ok(Guest::from_input(id, input.clone()))
  }

  async fn delete_guest(&self, id: GuestId) -> Result<(), Refused> {
    self.refusing()?;
    self.guests.lock().unwrap().retain(|g| g.id != id);
    Ok(())
  }

  async fn list_accessibility_options(&self) -> Result<Vec<AccessibilityOption>, Refused> {
    self.refusing()?;
    Ok(vec![AccessibilityOption { id: 7, name: "Braille signage".into() }])
  }
}

fn guest(id: GuestId, first: &str, last: &str) -> Guest {
  Guest::from_input(id, GuestInput {
    first_name: first.into(),
    last_name: last.into(),
    ..GuestInput::default()
  })
}

async fn app_with(guests: Vec<Guest>, page_size: usize) -> App<MemoryApi> {
  let api = MemoryApi::default();
  *api.guests.lock().unwrap() = guests;
  let mut app = App::new(GuestSession::with_view(api, GuestListView::with_page_size(page_size)));
  app.load().await.expect("load");
  app
}

fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

async fn press(app: &mut App<MemoryApi>, code: KeyCode) -> bool { app.handle_key(key(code)).await }

async fn type_str(app: &mut App<MemoryApi>, s: &str) {
  for c in s.chars() {
    press(app, KeyCode::Char(c)).await;
  }
}

fn shown_ids(app: &App<MemoryApi>) -> Vec<GuestId> { app.displayed().iter().map(|g| g.id).collect() }

// ─── List navigation ─────────────────────────────────────────────────────────

#[tokio::test]
async fn pages_and_cursor() {
  let guests = (1..=7).map(|i| guest(i, &format!("G{i}"), "T")).collect();
  let mut app = app_with(guests, 3).await;
  assert_eq!(shown_ids(&app), vec![1, 2, 3]);

  press(&mut app, KeyCode::Char('j')).await;
  press(&mut app, KeyCode::Char('j')).await;
  press(&mut app, KeyCode::Char('j')).await;
  assert_eq!(app.cursor, 2);

  press(&mut app, KeyCode::Char(']')).await;
  assert_eq!(shown_ids(&app), vec![4, 5, 6]);
  assert_eq!(app.cursor, 0);

  press(&mut app, KeyCode::End).await;
  assert_eq!(shown_ids(&app), vec![7]);
  press(&mut app, KeyCode::Char(']')).await;
  assert_eq!(shown_ids(&app), vec![7]);

  press(&mut app, KeyCode::Char('[')).await;
  assert_eq!(app.session.view().page(), 2);
}

#[tokio::test]
async fn sort_and_page_size_keys() {
  let mut app = app_with(vec![guest(1, "b", ""), guest(2, "a", ""), guest(3, "c", "")], 5).await;

  press(&mut app, KeyCode::Char('s')).await;
  assert_eq!(app.session.view().sort_key(), SortKey::IdDesc);
  press(&mut app, KeyCode::Char('s')).await;
  assert_eq!(app.session.view().sort_key(), SortKey::FirstNameAsc);
  assert_eq!(shown_ids(&app), vec![2, 1, 3]);

  press(&mut app, KeyCode::Char('+')).await;
  assert_eq!(app.session.view().page_size(), 10);
  press(&mut app, KeyCode::Char('-')).await;
  press(&mut app, KeyCode::Char('-')).await;
  assert_eq!(app.session.view().page_size(), 5);
}

#[tokio::test]
async fn filter_mode_edits_view_filter() {
  let mut app = app_with(vec![guest(1, "Ann", "Lee"), guest(2, "Bob", "Stone")], 5).await;

  press(&mut app, KeyCode::Char('/')).await;
  assert!(app.filter_active);
  type_str(&mut app, "sto").await;
  assert_eq!(shown_ids(&app), vec![2]);

  // Keys typed while filtering never reach the list bindings.
  press(&mut app, KeyCode::Char('q')).await;
  assert!(app.displayed().is_empty());
  press(&mut app, KeyCode::Backspace).await;

  press(&mut app, KeyCode::Enter).await;
  assert!(!app.filter_active);
  assert_eq!(app.session.view().filter(), "sto");

  press(&mut app, KeyCode::Char('/')).await;
  press(&mut app, KeyCode::Esc).await;
  assert_eq!(app.session.view().filter(), "");
  assert_eq!(shown_ids(&app), vec![1, 2]);
}

#[tokio::test]
async fn failed_load_is_reported_in_status_bar() {
  let api = MemoryApi::default();
  *api.refuse.lock().unwrap() = true;
  let mut app = App::new(GuestSession::new(api));

  assert!(app.load().await.is_err());
  assert_eq!(app.status_msg, "Error: connection refused");
  assert!(app.displayed().is_empty());

  *app.session.api().refuse.lock().unwrap() = false;
  press(&mut app, KeyCode::Char('r')).await;
  assert!(app.status_msg.is_empty());
}

#[tokio::test]
async fn q_quits() {
  let mut app = app_with(vec![], 5).await;
  assert!(!press(&mut app, KeyCode::Char('q')).await);
}

// ─── Forms ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_flow_creates_guest() {
  let mut app = app_with(vec![guest(1, "Ann", "Lee")], 5).await;

  press(&mut app, KeyCode::Char('a')).await;
  assert_eq!(app.screen, Screen::Form);

  type_str(&mut app, "Cleo").await;
  press(&mut app, KeyCode::Tab).await;
  type_str(&mut app, "Ray").await;

  // Jump to the single option checkbox: back-tab wraps to the last slot.
  press(&mut app, KeyCode::BackTab).await;
  press(&mut app, KeyCode::BackTab).await;
  press(&mut app, KeyCode::Char(' ')).await;
  let form = &app.form.as_ref().unwrap().form;
  assert!(form.selection().contains(7));
  assert_eq!(form.field(GuestField::LastName), "Ray");

  press(&mut app, KeyCode::Enter).await;
  assert_eq!(app.screen, Screen::GuestList);
  assert!(app.form.is_none());
  assert_eq!(app.notice.as_ref().unwrap().title, "Create Guest");

  let cleo = app.session.view().get(2).unwrap();
  assert_eq!(cleo.full_name(), "Cleo Ray");
  assert_eq!(cleo.accessibility_options[0].name, "Braille signage");
}

#[tokio::test]
async fn view_is_read_only_until_edit() {
  let mut app = app_with(vec![guest(1, "Ann", "Lee")], 5).await;

  press(&mut app, KeyCode::Enter).await;
  let state = app.form.as_ref().unwrap();
  assert_eq!(state.form.mode(), FormMode::View(1));

  type_str(&mut app, "zz").await;
  assert_eq!(app.form.as_ref().unwrap().form.field(GuestField::FirstName), "Ann");

  press(&mut app, KeyCode::Char('e')).await;
  assert_eq!(app.form.as_ref().unwrap().form.mode(), FormMode::Edit(1));
  press(&mut app, KeyCode::Backspace).await;
  press(&mut app, KeyCode::Enter).await;

  assert_eq!(app.session.view().get(1).unwrap().first_name, "An");
  assert_eq!(app.notice.as_ref().unwrap().title, "Edit Guest");
}

#[tokio::test]
async fn failed_submit_keeps_form_open() {
  let mut app = app_with(vec![], 5).await;
  press(&mut app, KeyCode::Char('a')).await;
  type_str(&mut app, "Eve").await;

  *app.session.api().refuse.lock().unwrap() = true;
  press(&mut app, KeyCode::Enter).await;

  assert_eq!(app.screen, Screen::Form);
  assert!(app.status_msg.contains("connection refused"));
  assert!(app.session.view().all().is_empty());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_requires_confirmation() {
  let mut app = app_with(vec![guest(1, "Ann", "Lee"), guest(2, "Bob", "Stone")], 5).await;

  press(&mut app, KeyCode::Char('j')).await;
  press(&mut app, KeyCode::Char('d')).await;
  assert_eq!(app.screen, Screen::ConfirmDelete(2));
  press(&mut app, KeyCode::Char('n')).await;
  assert_eq!(shown_ids(&app), vec![1, 2]);

  press(&mut app, KeyCode::Char('d')).await;
  press(&mut app, KeyCode::Char('y')).await;
  assert_eq!(app.screen, Screen::GuestList);
  assert_eq!(shown_ids(&app), vec![1]);
  assert_eq!(app.cursor, 0);
  assert_eq!(
    app.notice.as_ref().unwrap().body,
    "User Bob Stone has been deleted successfully."
  );
}
