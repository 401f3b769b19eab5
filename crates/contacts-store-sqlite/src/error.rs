//! Error type for `contacts-store-sqlite`.

use contacts_core::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] contacts_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored row carries an identifier that does not parse.
  #[error("corrupt contact id in store: {0:?}")]
  CorruptId(String),
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::Core(e) => e.kind(),
      Error::Database(_) | Error::Json(_) | Error::CorruptId(_) => {
        ErrorKind::InternalFailure
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
