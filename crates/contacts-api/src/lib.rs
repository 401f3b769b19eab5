//! JSON REST API for contacts.
//!
//! Exposes an axum [`Router`] backed by any [`ContactStore`]. The store handle
//! is injected through [`AppState`]; a router built without one answers every
//! `/contacts` request with 503. Transport concerns (binding, tracing layers)
//! are the caller's responsibility.

pub mod contacts;
pub mod docs;
pub mod error;

use std::{future::Future, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use contacts_core::{ErrorKind, store::ContactStore};

pub use error::ApiError;

/// Used when the caller does not configure a database timeout.
pub const DEFAULT_DB_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  store:      Option<Arc<S>>,
  db_timeout: Duration,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:      self.store.clone(),
      db_timeout: self.db_timeout,
    }
  }
}

impl<S: ContactStore> AppState<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store:      Some(store),
      db_timeout: DEFAULT_DB_TIMEOUT,
    }
  }

  /// State with no store; every `/contacts` request fails with 503.
  pub fn disconnected() -> Self {
    Self {
      store:      None,
      db_timeout: DEFAULT_DB_TIMEOUT,
    }
  }

  /// Bound every store call by `timeout`.
  pub fn with_db_timeout(mut self, timeout: Duration) -> Self {
    self.db_timeout = timeout;
    self
  }

  pub(crate) fn store(&self) -> Result<&S, ApiError> {
    self.store.as_deref().ok_or_else(ApiError::unavailable)
  }

  /// Await a store operation, classifying its error and giving up after the
  /// configured timeout.
  ///
  /// Giving up only drops the future. A write already handed to the store
  /// may still commit, so a 503 from a create or update leaves its outcome
  /// unknown to the client.
  pub(crate) async fn call<T, F>(&self, op: F) -> Result<T, ApiError>
  where
    F: Future<Output = Result<T, S::Error>>,
  {
    match tokio::time::timeout(self.db_timeout, op).await {
      Ok(result) => result.map_err(ApiError::classify),
      Err(_) => Err(ApiError::new(
        ErrorKind::ServiceUnavailable,
        format!(
          "Database did not respond within {} ms",
          self.db_timeout.as_millis()
        ),
      )),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn router<S>(state: AppState<S>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/", get(contacts::root))
    .route(
      "/contacts",
      get(contacts::list::<S>).post(contacts::create::<S>),
    )
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::remove::<S>),
    )
    .with_state(state)
    .merge(docs::swagger_ui())
}

// ─── Integration tests ────────────────────────────────────────────────────────
