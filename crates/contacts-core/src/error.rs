//! Error types for `contacts-core`, and the error taxonomy shared by every
//! layer above it.

use thiserror::Error;

use crate::id::ContactId;

/// The four ways a contact operation can fail, as seen by a client.
///
/// Storage backends and the HTTP layer classify their errors into one of
/// these; the HTTP status code is chosen from the kind alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// No storage backend is available, or it did not answer in time.
  ServiceUnavailable,
  /// Malformed identifier or request body.
  InvalidInput,
  /// No contact matches the given identifier.
  NotFound,
  /// Anything else.
  InternalFailure,
}

/// Maps an error onto an [`ErrorKind`].
pub trait Classify {
  fn kind(&self) -> ErrorKind;
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("Invalid ID format: {0:?} is not a 24-character hex string")]
  InvalidId(String),

  #[error("Missing required field: {0}")]
  MissingField(&'static str),

  #[error("Invalid field {0}: expected a string")]
  InvalidField(&'static str),

  #[error("Field _id is assigned by the server and cannot be set")]
  ImmutableId,

  #[error("Update must set at least one field")]
  EmptyUpdate,

  #[error("Contact not found: {0}")]
  ContactNotFound(ContactId),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::InvalidId(_)
      | Error::MissingField(_)
      | Error::InvalidField(_)
      | Error::ImmutableId
      | Error::EmptyUpdate => ErrorKind::InvalidInput,
      Error::ContactNotFound(_) => ErrorKind::NotFound,
      Error::Serialization(_) => ErrorKind::InternalFailure,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
