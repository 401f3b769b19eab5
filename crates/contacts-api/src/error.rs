//! API error type and [`axum::response::IntoResponse`] implementation.

use std::fmt::Display;

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use contacts_core::{Classify, ErrorKind};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// An error returned by an API handler.
///
/// The status code is derived from `kind` alone; `message` is only shown to
/// the client and written to the log.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
  kind:    ErrorKind,
  message: String,
}

impl ApiError {
  pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Self { kind, message: message.into() }
  }

  /// No store handle was injected into the router.
  pub fn unavailable() -> Self {
    Self::new(
      ErrorKind::ServiceUnavailable,
      "Database not connected. Please try again later.",
    )
  }

  /// Wrap any classified error, keeping its message.
  pub fn classify<E: Classify + Display>(err: E) -> Self {
    Self::new(err.kind(), err.to_string())
  }

  pub fn kind(&self) -> ErrorKind { self.kind }

  pub fn message(&self) -> &str { &self.message }

  pub fn status(&self) -> StatusCode {
    match self.kind {
      ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
      ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
      ErrorKind::NotFound => StatusCode::NOT_FOUND,
      ErrorKind::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
  #[schema(example = "Contact not found")]
  pub error: String,
}

// Covers bodies sent without `Content-Type: application/json` as well.
impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::new(ErrorKind::InvalidInput, rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(%status, error = %self.message, "request failed");
    } else {
      tracing::warn!(%status, error = %self.message, "request rejected");
    }
    (status, Json(ErrorBody { error: self.message })).into_response()
  }
}
