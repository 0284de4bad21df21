//! Error type for `concierge-client`.

use reqwest::{Method, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
  #[error("invalid base URL {url:?}: {reason}")]
  InvalidBaseUrl { url: String, reason: String },

  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("{method} {path} failed: {source}")]
  Transport {
    method: Method,
    path:   String,
    #[source]
    source: reqwest::Error,
  },

  #[error("{method} {path} → {status}{}", detail_suffix(.detail))]
  Status {
    method: Method,
    path:   String,
    status: StatusCode,
    /// The backend's `detail` message, if it sent one.
    detail: Option<String>,
  },

  #[error("decoding response to {method} {path}: {source}")]
  Decode {
    method: Method,
    path:   String,
    #[source]
    source: reqwest::Error,
  },
}

impl NetworkError {
  /// True when the backend answered 404.
  pub fn is_not_found(&self) -> bool {
    matches!(self, NetworkError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
  }

  pub fn is_timeout(&self) -> bool {
    matches!(self, NetworkError::Transport { source, .. } if source.is_timeout())
  }
}

fn detail_suffix(detail: &Option<String>) -> String {
  detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

pub type Result<T, E = NetworkError> = std::result::Result<T, E>;
