//! Application state machine and event dispatcher.

use concierge_core::{
  api::GuestApi,
  form::{FormMode, GuestField, GuestForm},
  guest::{Guest, GuestId},
  session::{GuestSession, Notice},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Page sizes offered by `+` / `-`.
pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the guest table; the right pane previews the cursor guest.
  GuestList,
  /// The register / edit / view modal is open.
  Form,
  /// Waiting for `y` to delete the given guest.
  ConfirmDelete(GuestId),
}

/// The open form plus which input has keyboard focus.
///
/// Focus slots `0..8` are the text fields in [`GuestField::ALL`] order; the
/// slots after that are the accessibility-option checkboxes.
#[derive(Debug, Clone)]
pub struct FormState {
  pub form:  GuestForm,
  pub focus: usize,
}

impl FormState {
  fn new(form: GuestForm) -> Self { Self { form, focus: 0 } }

  /// The text field under focus, if focus is not on a checkbox.
  pub fn focused_field(&self) -> Option<GuestField> {
    GuestField::ALL.get(self.focus).copied()
  }

  /// Index into the option catalogue, if focus is on a checkbox.
  pub fn focused_option(&self) -> Option<usize> {
    self.focus.checked_sub(GuestField::ALL.len())
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<A> {
  pub screen: Screen,

  /// Guests, the option catalogue, and the sort/filter/page view-model.
  pub session: GuestSession<A>,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the displayed page.
  pub cursor: usize,

  /// The open form, when `screen` is [`Screen::Form`].
  pub form: Option<FormState>,

  /// Confirmation from the last successful write.
  pub notice: Option<Notice>,

  /// One-line status message shown in the status bar; wins over `notice`.
  pub status_msg: String,
}

impl<A: GuestApi> App<A> {
  pub fn new(session: GuestSession<A>) -> Self {
    Self {
      screen: Screen::GuestList,
      session,
      filter_active: false,
      cursor: 0,
      form: None,
      notice: None,
      status_msg: String::new(),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch guests and accessibility options from the backend.
  pub async fn load(&mut self) -> Result<(), A::Error> {
    self.status_msg = "Loading guests…".into();
    match self.session.load().await {
      Ok(()) => {
        self.cursor = 0;
        self.status_msg.clear();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  // ── Derived ───────────────────────────────────────────────────────────────

  pub fn displayed(&self) -> &[Guest] { self.session.view().displayed() }

  /// The guest under the cursor on the current page, if any.
  pub fn cursor_guest(&self) -> Option<&Guest> { self.displayed().get(self.cursor) }

  fn clamp_cursor(&mut self) {
    let len = self.displayed().len();
    self.cursor = self.cursor.min(len.saturating_sub(1));
  }

  fn report<E: std::fmt::Display>(&mut self, result: Result<Notice, E>) -> bool {
    match result {
      Ok(notice) => {
        self.notice = Some(notice);
        self.status_msg.clear();
        true
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        false
      }
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }
    self.status_msg.clear();

    if self.filter_active {
      self.handle_filter_key(key);
      return true;
    }

    match self.screen.clone() {
      Screen::GuestList => return self.handle_list_key(key).await,
      Screen::Form => self.handle_form_key(key).await,
      Screen::ConfirmDelete(id) => self.handle_confirm_key(key, id).await,
    }
    true
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    let mut filter = self.session.view().filter().to_string();
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        filter.clear();
      }
      KeyCode::Enter => {
        self.filter_active = false;
        return;
      }
      KeyCode::Backspace => {
        filter.pop();
      }
      KeyCode::Char(c) => filter.push(c),
      _ => return,
    }
    self.session.view_mut().set_filter(filter);
    self.cursor = 0;
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      // Cursor
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.displayed().len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }

      // Pages
      KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') | KeyCode::PageDown => {
        self.session.view_mut().next_page();
        self.cursor = 0;
      }
      KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') | KeyCode::PageUp => {
        self.session.view_mut().prev_page();
        self.cursor = 0;
      }
      KeyCode::Home => {
        self.session.view_mut().set_page(1);
        self.cursor = 0;
      }
      KeyCode::End => {
        let last = self.session.view().page_count() as i64;
        self.session.view_mut().set_page(last);
        self.cursor = 0;
      }
      KeyCode::Char('+') => self.step_page_size(1),
      KeyCode::Char('-') => self.step_page_size(-1),

      // Sort
      KeyCode::Char('s') => {
        let key = self.session.view().sort_key().next();
        self.session.view_mut().set_sort(key);
        self.clamp_cursor();
      }
      KeyCode::Char('S') => {
        let key = self.session.view().sort_key().prev();
        self.session.view_mut().set_sort(key);
        self.clamp_cursor();
      }

      // Filter
      KeyCode::Char('/') => {
        self.filter_active = true;
      }

      // Writes
      KeyCode::Char('a') => self.open_form(GuestForm::register()),
      KeyCode::Char('e') => {
        if let Some(id) = self.cursor_guest().map(|g| g.id) {
          self.open_fetched(id, GuestForm::edit).await;
        }
      }
      KeyCode::Enter | KeyCode::Char('v') => {
        if let Some(id) = self.cursor_guest().map(|g| g.id) {
          self.open_fetched(id, GuestForm::view).await;
        }
      }
      KeyCode::Char('d') => {
        if let Some(id) = self.cursor_guest().map(|g| g.id) {
          self.screen = Screen::ConfirmDelete(id);
        }
      }
      KeyCode::Char('r') => {
        if self.load().await.is_ok() {
          self.notice = None;
        }
      }

      _ => {}
    }
    true
  }

  fn step_page_size(&mut self, step: isize) {
    let current = self.session.view().page_size();
    let i = PAGE_SIZES.iter().position(|n| *n >= current).unwrap_or(0) as isize;
    let next = (i + step).clamp(0, PAGE_SIZES.len() as isize - 1) as usize;
    self.session.view_mut().set_page_size(PAGE_SIZES[next]);
    self.clamp_cursor();
  }

  fn open_form(&mut self, form: GuestForm) {
    self.form = Some(FormState::new(form));
    self.screen = Screen::Form;
  }

  /// Fetch the backend's copy of `id` and open it in a form.
  async fn open_fetched(&mut self, id: GuestId, make: fn(&Guest) -> GuestForm) {
    match self.session.fetch(id).await {
      Ok(guest) => self.open_form(make(&guest)),
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  fn close_form(&mut self) {
    self.form = None;
    self.screen = Screen::GuestList;
    self.clamp_cursor();
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    let slots = GuestField::ALL.len() + self.session.options().len();
    let Some(state) = self.form.as_mut() else {
      self.screen = Screen::GuestList;
      return;
    };

    match key.code {
      KeyCode::Esc => self.close_form(),
      KeyCode::Tab | KeyCode::Down => state.focus = (state.focus + 1) % slots,
      KeyCode::BackTab | KeyCode::Up => state.focus = (state.focus + slots - 1) % slots,
      KeyCode::Enter => self.submit_form().await,
      KeyCode::Char('e') if state.form.is_read_only() => {
        if let FormMode::View(id) = state.form.mode() {
          if let Some(guest) = self.session.view().get(id) {
            state.form = GuestForm::edit(guest);
          }
        }
      }
      KeyCode::Char(' ') if state.focused_option().is_some() => {
        let option_id = state
          .focused_option()
          .and_then(|i| self.session.options().get(i))
          .map(|o| o.id);
        if let Some(id) = option_id {
          state.form.toggle_option(id);
        }
      }
      KeyCode::Char(c) => {
        if let Some(field) = state.focused_field() {
          state.form.push_char(field, c);
        }
      }
      KeyCode::Backspace => {
        if let Some(field) = state.focused_field() {
          state.form.pop_char(field);
        }
      }
      _ => {}
    }
  }

  async fn submit_form(&mut self) {
    let Some(state) = &self.form else { return };
    let input = state.form.to_input();
    let selection = state.form.selection().clone();

    let ok = match state.form.mode() {
      FormMode::View(_) => true,
      FormMode::Register => {
        let result = self.session.create(&input, &selection).await;
        self.report(result)
      }
      FormMode::Edit(id) => {
        let result = self.session.update(id, &input, &selection).await;
        self.report(result)
      }
    };
    if ok {
      self.close_form();
    }
  }

  async fn handle_confirm_key(&mut self, key: KeyEvent, id: GuestId) {
    if key.code == KeyCode::Char('y') {
      let result = self.session.delete(id).await;
      self.report(result);
    }
    self.screen = Screen::GuestList;
    self.clamp_cursor();
  }
}
