//! Register / edit / view modal.

use concierge_core::{form::GuestField, guest::AccessibilityOption};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::FormState;

pub fn draw(f: &mut Frame, area: Rect, state: &FormState, options: &[AccessibilityOption]) {
  let form = &state.form;
  let read_only = form.is_read_only();

  let block = Block::default()
    .title(format!(" {} Guest ", form.title()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(Clear, area);
  f.render_widget(block, area);

  let focus_style = Style::default()
    .bg(Color::Blue)
    .fg(Color::White)
    .add_modifier(Modifier::BOLD);
  let value_style = if read_only {
    Style::default().fg(Color::DarkGray)
  } else {
    Style::default()
  };

  let mut lines = Vec::with_capacity(GuestField::ALL.len() + options.len() + 4);

  for (slot, field) in GuestField::ALL.into_iter().enumerate() {
    let focused = slot == state.focus && !read_only;
    let value = form.field(field);
    let shown = if focused {
      Span::styled(format!("{value}_"), focus_style)
    } else if value.is_empty() {
      Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
      Span::styled(value.to_string(), value_style)
    };
    let label_style = if focused {
      focus_style
    } else {
      Style::default().fg(Color::Cyan)
    };
    lines.push(Line::from(vec![
      Span::styled(format!("{:<14}", field.label()), label_style),
      shown,
    ]));
  }

  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    "Accessibility options",
    Style::default().add_modifier(Modifier::BOLD),
  )));
  if options.is_empty() {
    lines.push(Line::from(Span::styled(
      "  (none available)",
      Style::default().fg(Color::DarkGray),
    )));
  }
  for (i, option) in options.iter().enumerate() {
    let slot = GuestField::ALL.len() + i;
    let mark = if form.selection().contains(option.id) { "[x]" } else { "[ ]" };
    let style = if slot == state.focus && !read_only {
      focus_style
    } else {
      value_style
    };
    lines.push(Line::from(Span::styled(format!("  {mark} {}", option.name), style)));
  }

  lines.push(Line::from(""));
  let hint = if read_only {
    "[e] edit  Esc close"
  } else {
    "Tab/Shift-Tab move  Space toggle  Enter save  Esc cancel"
  };
  lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));

  f.render_widget(Paragraph::new(lines), inner);
}
