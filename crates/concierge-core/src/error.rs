//! Error types for `concierge-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("unknown sort key: {0:?}")]
  UnknownSortKey(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
