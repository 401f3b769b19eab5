//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `contacts-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  contact::{Contact, ContactPatch, NewContact},
  error::Classify,
  id::ContactId,
};

/// Abstraction over the `contacts` collection.
///
/// Identifiers and bodies arrive already validated, so backends only report
/// storage failures and missing records. Their error type is classified so
/// callers can choose a response without inspecting messages.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Classify + Send + Sync + 'static;

  /// Every stored contact, in insertion order.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Retrieve a contact by identifier. Returns `None` if not found.
  fn get_contact(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Persist a new contact under a freshly generated identifier and return
  /// that identifier.
  fn create_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<ContactId, Self::Error>> + Send + '_;

  /// Merge `patch` into the stored contact.
  ///
  /// Returns an error classified as not-found if no contact matches `id`; in
  /// that case nothing is written.
  fn update_contact(
    &self,
    id: ContactId,
    patch: ContactPatch,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove a contact.
  ///
  /// Returns an error classified as not-found if no contact was removed.
  fn delete_contact(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
