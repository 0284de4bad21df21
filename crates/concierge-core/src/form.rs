//! Form state for the register / edit / view guest modal.

use crate::guest::{Guest, GuestId, GuestInput, OptionId, OptionSelection};

/// Which of the eight text inputs a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestField {
  FirstName,
  LastName,
  Email,
  Address,
  City,
  Country,
  ZipCode,
  PhoneNumber,
}

impl GuestField {
  /// Fields in the order the form presents them.
  pub const ALL: [GuestField; 8] = [
    GuestField::FirstName,
    GuestField::LastName,
    GuestField::Email,
    GuestField::Address,
    GuestField::City,
    GuestField::Country,
    GuestField::ZipCode,
    GuestField::PhoneNumber,
  ];

  pub fn label(self) -> &'static str {
    match self {
      GuestField::FirstName => "First Name",
      GuestField::LastName => "Last Name",
      GuestField::Email => "Email",
      GuestField::Address => "Address",
      GuestField::City => "City",
      GuestField::Country => "Country",
      GuestField::ZipCode => "Zip",
      GuestField::PhoneNumber => "Phone Number",
    }
  }

  pub fn placeholder(self) -> &'static str {
    match self {
      GuestField::FirstName => "John",
      GuestField::LastName => "Doe",
      GuestField::Email => "john.doe@example.com",
      GuestField::Address => "1234 Main St",
      GuestField::City => "Metropolis",
      GuestField::Country => "Wonderland",
      GuestField::ZipCode => "12345",
      GuestField::PhoneNumber => "123-456-7890",
    }
  }

  fn get(self, input: &GuestInput) -> &String {
    match self {
      GuestField::FirstName => &input.first_name,
      GuestField::LastName => &input.last_name,
      GuestField::Email => &input.email,
      GuestField::Address => &input.address,
      GuestField::City => &input.city,
      GuestField::Country => &input.country,
      GuestField::ZipCode => &input.zip_code,
      GuestField::PhoneNumber => &input.phone_number,
    }
  }

  fn get_mut(self, input: &mut GuestInput) -> &mut String {
    match self {
      GuestField::FirstName => &mut input.first_name,
      GuestField::LastName => &mut input.last_name,
      GuestField::Email => &mut input.email,
      GuestField::Address => &mut input.address,
      GuestField::City => &mut input.city,
      GuestField::Country => &mut input.country,
      GuestField::ZipCode => &mut input.zip_code,
      GuestField::PhoneNumber => &mut input.phone_number,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
  Register,
  Edit(GuestId),
  /// Read-only.
  View(GuestId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestForm {
  mode:      FormMode,
  input:     GuestInput,
  selection: OptionSelection,
}

impl GuestForm {
  /// A blank form for a new guest.
  pub fn register() -> Self {
    Self {
      mode:      FormMode::Register,
      input:     GuestInput::default(),
      selection: OptionSelection::new(),
    }
  }

  /// Pre-filled with `guest`, options ticked as stored.
  pub fn edit(guest: &Guest) -> Self {
    Self {
      mode:      FormMode::Edit(guest.id),
      input:     guest.to_input(),
      selection: guest.option_selection(),
    }
  }

  /// Read-only copy of `guest`. Option checkboxes start cleared.
  pub fn view(guest: &Guest) -> Self {
    Self {
      mode:      FormMode::View(guest.id),
      input:     guest.to_input(),
      selection: OptionSelection::new(),
    }
  }

  pub fn mode(&self) -> FormMode { self.mode }

  pub fn is_read_only(&self) -> bool { matches!(self.mode, FormMode::View(_)) }

  pub fn title(&self) -> &'static str {
    match self.mode {
      FormMode::Register => "Register",
      FormMode::Edit(_) => "Edit",
      FormMode::View(_) => "View",
    }
  }

  pub fn field(&self, field: GuestField) -> &str { field.get(&self.input) }

  /// Overwrite a text field. Ignored in view mode.
  pub fn set_field(&mut self, field: GuestField, value: impl Into<String>) {
    if !self.is_read_only() {
      *field.get_mut(&mut self.input) = value.into();
    }
  }

  pub fn push_char(&mut self, field: GuestField, c: char) {
    if !self.is_read_only() {
      field.get_mut(&mut self.input).push(c);
    }
  }

  pub fn pop_char(&mut self, field: GuestField) {
    if !self.is_read_only() {
      field.get_mut(&mut self.input).pop();
    }
  }

  /// Tick or untick an accessibility option. Ignored in view mode.
  pub fn toggle_option(&mut self, id: OptionId) {
    if !self.is_read_only() {
      self.selection.toggle(id);
    }
  }

  pub fn selection(&self) -> &OptionSelection { &self.selection }

  /// The body to send for create or update.
  pub fn to_input(&self) -> GuestInput { self.input.clone() }
}
