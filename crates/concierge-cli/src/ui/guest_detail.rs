//! Guest detail pane: previews the guest under the cursor.

use concierge_core::guest::Guest;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render `guest` into `area`, or a hint when nothing is selected.
pub fn draw(f: &mut Frame, area: Rect, guest: Option<&Guest>) {
  let title = guest
    .map(|g| format!(" {} ", g.full_name()))
    .unwrap_or_else(|| " Detail ".to_string());

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(guest) = guest else {
    f.render_widget(
      Paragraph::new("Select a guest to see details.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let mut lines = vec![
    field("id", guest.id.to_string()),
    field("email", guest.email.clone()),
    field("phone", guest.phone_number.clone()),
    Line::from(""),
    field("address", guest.address.clone()),
    field("city", guest.city.clone()),
    field("zip", guest.zip_code.clone()),
    field("country", guest.country.clone()),
    Line::from(""),
  ];

  if guest.accessibility_options.is_empty() {
    lines.push(field("access", "none".to_string()));
  } else {
    for (i, option) in guest.accessibility_options.iter().enumerate() {
      let label = if i == 0 { "access" } else { "" };
      lines.push(field(label, option.name.clone()));
    }
  }

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn field(label: &str, value: String) -> Line<'static> {
  Line::from(vec![
    Span::styled(
      format!("{label:<10}"),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::raw(value),
  ])
}
