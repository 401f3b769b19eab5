//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Identifiers are stored as lowercase hex. Contact bodies are stored as
//! compact JSON objects without the `_id` key.

use contacts_core::{Contact, ContactFields, ContactId, ContactPatch, Document};

use crate::{Error, Result};

// ─── ContactId ───────────────────────────────────────────────────────────────

pub fn encode_id(id: ContactId) -> String { id.to_string() }

pub fn decode_id(s: &str) -> Result<ContactId> {
  ContactId::parse(s).map_err(|_| Error::CorruptId(s.to_owned()))
}

// ─── Documents ───────────────────────────────────────────────────────────────

pub fn encode_fields(fields: &ContactFields) -> Result<String> {
  Ok(serde_json::to_string(fields)?)
}

/// Apply `patch` to a stored document and re-encode it.
pub fn merge_document(stored: &str, patch: &ContactPatch) -> serde_json::Result<String> {
  let mut doc: Document = serde_json::from_str(stored)?;
  patch.apply_to(&mut doc);
  serde_json::to_string(&doc)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `contacts` row.
pub struct RawContact {
  pub contact_id: String,
  pub document:   String,
}

impl RawContact {
  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:     decode_id(&self.contact_id)?,
      fields: serde_json::from_str(&self.document)?,
    })
  }
}
