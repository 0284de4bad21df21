//! Guest table pane.

use concierge_core::api::GuestApi;
use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::app::App;

/// Render the current page of guests into `area`.
pub fn draw<A: GuestApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let view = app.session.view();
  let total = view.all().len();
  let matched = view.filtered().len();

  let count = if view.filter().is_empty() {
    format!("{total}")
  } else {
    format!("{matched}/{total}")
  };
  let title = format!(
    " Guests ({count}) · page {}/{} · {} per page · {} ",
    if view.page_count() == 0 { 0 } else { view.page() },
    view.page_count(),
    view.page_size(),
    view.sort_key().label(),
  );

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Filter bar along the bottom edge while a filter is being typed or is set.
  if (app.filter_active || !view.filter().is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", view.filter())
    } else {
      format!("/{}", view.filter())
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let displayed = view.displayed();
  if displayed.is_empty() {
    let msg = if total == 0 { "No guests yet. Press [a] to add one." } else { "No guests match." };
    f.render_widget(
      Paragraph::new(Line::from(msg)).style(Style::default().fg(Color::DarkGray)),
      inner_area,
    );
    return;
  }

  let header = Row::new(["ID", "First Name", "Last Name", "Email", "City", "Country"])
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

  let rows = displayed.iter().map(|g| {
    Row::new(vec![
      Cell::from(g.id.to_string()),
      Cell::from(g.first_name.clone()),
      Cell::from(g.last_name.clone()),
      Cell::from(g.email.clone()),
      Cell::from(g.city.clone()),
      Cell::from(g.country.clone()),
    ])
  });

  let widths = [
    Constraint::Length(5),
    Constraint::Percentage(18),
    Constraint::Percentage(18),
    Constraint::Percentage(30),
    Constraint::Percentage(14),
    Constraint::Percentage(14),
  ];

  let mut state = TableState::default();
  state.select(Some(app.cursor));

  f.render_stateful_widget(
    Table::new(rows, widths).header(header).row_highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut state,
  );
}
