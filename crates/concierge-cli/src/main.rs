//! `concierge`: terminal UI for the hotel guest register.
//!
//! # Usage
//!
//! ```text
//! concierge --url http://localhost:8000
//! concierge --config ~/.config/concierge/config.toml --page-size 10
//! CONCIERGE_BASE_URL=http://hotel:8000 concierge
//! ```

mod app;
mod settings;
mod ui;

#[cfg(test)]
mod tests;

use std::{fs::File, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use concierge_client::ApiClient;
use concierge_core::{session::GuestSession, view::GuestListView};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "concierge", version, about = "Terminal UI for the hotel guest register")]
struct Args {
  /// Path to a TOML config file (base_url, timeout_secs, page_size).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the guest backend (default: http://localhost:8000).
  #[arg(long)]
  url: Option<String>,

  /// Request timeout in seconds.
  #[arg(long, value_name = "SECS")]
  timeout: Option<u64>,

  /// Guests per page.
  #[arg(long)]
  page_size: Option<usize>,

  /// Where to write logs; the terminal belongs to the UI.
  #[arg(long, value_name = "FILE", default_value = "concierge.log")]
  log_file: PathBuf,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let log = File::create(&args.log_file)
    .with_context(|| format!("creating log file {}", args.log_file.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(log))
    .with_ansi(false)
    .init();

  let settings = settings::load(args.config.as_deref(), settings::Overrides {
    base_url:     args.url,
    timeout_secs: args.timeout,
    page_size:    args.page_size,
  })?;
  tracing::info!(base_url = %settings.base_url, page_size = settings.page_size, "starting");

  let client = ApiClient::new(settings.api_config()).context("configuring HTTP client")?;
  let session = GuestSession::with_view(client, GuestListView::with_page_size(settings.page_size));
  let mut app = App::new(session);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // A failed initial load is shown in the status bar; `r` retries.
  if let Err(e) = app.load().await {
    tracing::warn!(error = %e, "initial load failed");
  }

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<ApiClient>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event {
      // Windows reports releases too.
      if key.kind == KeyEventKind::Press && !app.handle_key(key).await {
        break;
      }
    }
  }

  tracing::info!("exiting");
  Ok(())
}
