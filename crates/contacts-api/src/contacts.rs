//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path             | Notes |
//! |----------|------------------|-------|
//! | `GET`    | `/contacts`      | All contacts, insertion order |
//! | `POST`   | `/contacts`      | Body: all five fields; returns 201 + `{"insertedId": ...}` |
//! | `GET`    | `/contacts/:id`  | 404 if not found |
//! | `PUT`    | `/contacts/:id`  | Body: any subset of fields, merged into the stored contact |
//! | `DELETE` | `/contacts/:id`  | 404 if not found |
//!
//! Every handler checks for a store before looking at its input, and parses
//! the identifier before touching the store.

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
};
use contacts_core::{
  Contact, ContactFields, ContactId, ContactPatch, Document, NewContact,
  store::ContactStore,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
  AppState,
  error::{ApiError, ErrorBody},
};

/// Body of a successful create.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Created {
  #[schema(value_type = String, example = "507f1f77bcf86cd799439011")]
  pub inserted_id: ContactId,
}

/// Body of a successful update or delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct Message {
  #[schema(value_type = String, example = "Contact updated successfully")]
  pub message: &'static str,
}

/// Shape of an update body. Handlers read the raw document so that keys
/// outside these five are merged as well; at least one key is required.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub first_name:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_name:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub favorite_color: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub birthday:       Option<String>,
}

/// `GET /`
#[utoipa::path(
  get,
  path = "/",
  tag = "General",
  responses((status = 200, description = "API welcome message", body = String))
)]
pub async fn root() -> &'static str { "Hello from the Contacts API!" }

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
#[utoipa::path(
  get,
  path = "/contacts",
  tag = "Contacts",
  responses(
    (status = 200, description = "All contacts in insertion order", body = [Contact]),
    (status = 500, description = "Internal server error", body = ErrorBody),
    (status = 503, description = "Database not connected", body = ErrorBody),
  )
)]
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let store = state.store()?;
  let contacts = state.call(store.list_contacts()).await?;
  Ok(Json(contacts))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
#[utoipa::path(
  get,
  path = "/contacts/{id}",
  tag = "Contacts",
  params(("id" = String, Path, description = "24-character hex identifier of the contact")),
  responses(
    (status = 200, description = "Contact data", body = Contact),
    (status = 400, description = "Invalid ID format", body = ErrorBody),
    (status = 404, description = "Contact not found", body = ErrorBody),
    (status = 500, description = "Internal server error", body = ErrorBody),
    (status = 503, description = "Database not connected", body = ErrorBody),
  )
)]
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let store = state.store()?;
  let id = ContactId::parse(&id).map_err(ApiError::classify)?;
  let contact = state
    .call(store.get_contact(id))
    .await?
    .ok_or_else(|| ApiError::classify(contacts_core::Error::ContactNotFound(id)))?;
  Ok(Json(contact))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts`
#[utoipa::path(
  post,
  path = "/contacts",
  tag = "Contacts",
  request_body = ContactFields,
  responses(
    (status = 201, description = "Contact created", body = Created),
    (status = 400, description = "Missing or invalid field", body = ErrorBody),
    (status = 500, description = "Internal server error", body = ErrorBody),
    (status = 503, description = "Database not connected", body = ErrorBody),
  )
)]
pub async fn create<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<Document>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), ApiError>
where
  S: ContactStore,
{
  let store = state.store()?;
  let Json(doc) = body?;
  let input = NewContact::from_document(doc).map_err(ApiError::classify)?;

  let id = state.call(store.create_contact(input)).await?;
  tracing::info!(%id, "contact created");
  Ok((StatusCode::CREATED, Json(Created { inserted_id: id })))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contacts/:id`
#[utoipa::path(
  put,
  path = "/contacts/{id}",
  tag = "Contacts",
  params(("id" = String, Path, description = "24-character hex identifier of the contact")),
  request_body = ContactUpdate,
  responses(
    (status = 200, description = "Contact updated", body = Message),
    (status = 400, description = "Invalid ID format or body", body = ErrorBody),
    (status = 404, description = "Contact not found", body = ErrorBody),
    (status = 500, description = "Internal server error", body = ErrorBody),
    (status = 503, description = "Database not connected", body = ErrorBody),
  )
)]
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  body: Result<Json<Document>, JsonRejection>,
) -> Result<Json<Message>, ApiError>
where
  S: ContactStore,
{
  let store = state.store()?;
  let id = ContactId::parse(&id).map_err(ApiError::classify)?;
  let Json(doc) = body?;
  let patch = ContactPatch::from_document(doc).map_err(ApiError::classify)?;
  let fields: Vec<String> = patch.keys().map(str::to_owned).collect();

  state.call(store.update_contact(id, patch)).await?;
  tracing::info!(%id, ?fields, "contact updated");
  Ok(Json(Message { message: "Contact updated successfully" }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/:id`
#[utoipa::path(
  delete,
  path = "/contacts/{id}",
  tag = "Contacts",
  params(("id" = String, Path, description = "24-character hex identifier of the contact")),
  responses(
    (status = 200, description = "Contact deleted", body = Message),
    (status = 400, description = "Invalid ID format", body = ErrorBody),
    (status = 404, description = "Contact not found", body = ErrorBody),
    (status = 500, description = "Internal server error", body = ErrorBody),
    (status = 503, description = "Database not connected", body = ErrorBody),
  )
)]
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Message>, ApiError>
where
  S: ContactStore,
{
  let store = state.store()?;
  let id = ContactId::parse(&id).map_err(ApiError::classify)?;

  state.call(store.delete_contact(id)).await?;
  tracing::info!(%id, "contact deleted");
  Ok(Json(Message { message: "Contact deleted successfully" }))
}
