//! TUI rendering.

pub mod guest_detail;
pub mod guest_form;
pub mod guest_list;

use chrono::Local;
use concierge_core::{api::GuestApi, guest::GuestId};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<A: GuestApi>(f: &mut Frame, app: &App<A>) {
  let area = f.area();

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);

  match &app.screen {
    Screen::GuestList => {}
    Screen::Form => {
      if let Some(state) = &app.form {
        guest_form::draw(f, centered(area, 70, 80), state, app.session.options());
      }
    }
    Screen::ConfirmDelete(id) => draw_confirm(f, centered(area, 50, 20), app, *id),
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " concierge  [a] add  [/] search  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::DarkGray));

  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<A: GuestApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
    .split(area);

  guest_list::draw(f, cols[0], app);
  guest_detail::draw(f, cols[1], app.cursor_guest());
}

// ─── Delete confirmation ──────────────────────────────────────────────────────

fn draw_confirm<A: GuestApi>(f: &mut Frame, area: Rect, app: &App<A>, id: GuestId) {
  let name = app
    .session
    .view()
    .get(id)
    .map(|g| g.full_name())
    .unwrap_or_else(|| format!("#{id}"));

  let block = Block::default()
    .title(" Delete Guest ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));
  let inner = block.inner(area);
  f.render_widget(Clear, area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(vec![
      Line::from(format!("Delete {name}?")),
      Line::from(""),
      Line::from(Span::styled(
        "[y] delete  any other key cancels",
        Style::default().fg(Color::DarkGray),
      )),
    ]),
    inner,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<A: GuestApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let (mode_label, hints) = match &app.screen {
    Screen::GuestList if app.filter_active => ("SEARCH", "Type to filter  Esc clear  Enter done"),
    Screen::GuestList => (
      "NORMAL",
      "↑↓/jk move  ←→ page  s sort  +/- size  Enter view  e edit  d delete  r reload",
    ),
    Screen::Form => ("FORM", "Tab next  Space toggle  Enter submit  Esc cancel"),
    Screen::ConfirmDelete(_) => ("DELETE", "y confirm"),
  };

  let (status, status_style) = if !app.status_msg.is_empty() {
    (app.status_msg.clone(), Style::default().fg(Color::Red))
  } else if let Some(notice) = &app.notice {
    (notice.to_string(), Style::default().fg(Color::Green))
  } else {
    (hints.to_string(), Style::default().fg(Color::DarkGray))
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), status_style);

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span])).style(Style::default().bg(Color::Black)),
    area,
  );
}

/// A rect of `pct_x` × `pct_y` percent centred in `area`.
fn centered(area: Rect, pct_x: u16, pct_y: u16) -> Rect {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Percentage((100 - pct_y) / 2),
      Constraint::Percentage(pct_y),
      Constraint::Percentage((100 - pct_y) / 2),
    ])
    .split(area);
  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Percentage((100 - pct_x) / 2),
      Constraint::Percentage(pct_x),
      Constraint::Percentage((100 - pct_x) / 2),
    ])
    .split(rows[1])[1]
}
