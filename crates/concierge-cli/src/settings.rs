//! Runtime settings: defaults, then an optional TOML file, then
//! `CONCIERGE_*` environment variables, then command-line flags.

use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use concierge_client::{ApiConfig, DEFAULT_BASE_URL};
use concierge_core::view::DEFAULT_PAGE_SIZE;
use serde::Deserialize;

/// Settings deserialised from the layered sources.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
  pub base_url:     String,
  pub timeout_secs: u64,
  pub page_size:    usize,
}

impl Settings {
  pub fn api_config(&self) -> ApiConfig {
    ApiConfig {
      base_url: self.base_url.clone(),
      timeout:  Duration::from_secs(self.timeout_secs),
    }
  }
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Default)]
pub struct Overrides {
  pub base_url:     Option<String>,
  pub timeout_secs: Option<u64>,
  pub page_size:    Option<usize>,
}

pub fn load(file: Option<&Path>, overrides: Overrides) -> Result<Settings> {
  let mut builder = config::Config::builder()
    .set_default("base_url", DEFAULT_BASE_URL)?
    .set_default("timeout_secs", 30)?
    .set_default("page_size", DEFAULT_PAGE_SIZE as i64)?;

  if let Some(path) = file {
    builder = builder.add_source(config::File::from(path).required(true));
  }

  let settings = builder
    .add_source(config::Environment::with_prefix("CONCIERGE"))
    .set_override_option("base_url", overrides.base_url)?
    .set_override_option("timeout_secs", overrides.timeout_secs.map(|n| n as i64))?
    .set_override_option("page_size", overrides.page_size.map(|n| n as i64))?
    .build()
    .context("failed to read configuration")?;

  settings
    .try_deserialize()
    .context("failed to deserialise settings")
}
