//! The contact record and the validated inputs that create and update it.
//!
//! A contact is stored as a JSON document. The five well-known fields are
//! typed; any other top-level keys a client sends are kept verbatim in
//! [`ContactFields::extra`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{ContactId, Error, Result};

/// A JSON object as received from a client or read back from storage.
pub type Document = serde_json::Map<String, Value>;

/// Fields every new contact must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 5] =
  ["firstName", "lastName", "email", "favoriteColor", "birthday"];

const ID_FIELD: &str = "_id";

// ─── Contact ─────────────────────────────────────────────────────────────────

/// The stored body of a contact, without its identifier. Keys other than the
/// five below are accepted and returned unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
  #[schema(example = "John")]
  pub first_name:     String,
  #[schema(example = "Doe")]
  pub last_name:      String,
  #[schema(example = "john.doe@example.com")]
  pub email:          String,
  #[schema(example = "Blue")]
  pub favorite_color: String,
  /// Date-formatted text; not checked for calendar correctness.
  #[schema(example = "1990-01-01")]
  pub birthday:       String,
  #[serde(flatten)]
  #[schema(ignore)]
  pub extra:          Document,
}

/// A persisted contact. Serialises as a flat object with an `_id` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
  #[serde(rename = "_id")]
  #[schema(value_type = String, example = "507f1f77bcf86cd799439011")]
  pub id:     ContactId,
  #[serde(flatten)]
  pub fields: ContactFields,
}

// ─── NewContact ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::ContactStore::create_contact`].
///
/// Only constructible through validation, so a store never sees a contact
/// with a missing field. The identifier is always assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact(ContactFields);

impl NewContact {
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    email: impl Into<String>,
    favorite_color: impl Into<String>,
    birthday: impl Into<String>,
  ) -> Self {
    Self(ContactFields {
      first_name:     first_name.into(),
      last_name:      last_name.into(),
      email:          email.into(),
      favorite_color: favorite_color.into(),
      birthday:       birthday.into(),
      extra:          Document::new(),
    })
  }

  /// Validate a client-supplied body.
  ///
  /// Presence is checked first, in [`REQUIRED_FIELDS`] order, and the first
  /// missing or falsy field is reported. Then `_id` is refused and each
  /// required field must be a string.
  pub fn from_document(mut doc: Document) -> Result<Self> {
    if let Some(missing) = REQUIRED_FIELDS
      .into_iter()
      .find(|field| !doc.get(*field).is_some_and(is_truthy))
    {
      return Err(Error::MissingField(missing));
    }
    if doc.contains_key(ID_FIELD) {
      return Err(Error::ImmutableId);
    }

    let mut take = |field: &'static str| match doc.remove(field) {
      Some(Value::String(s)) => Ok(s),
      _ => Err(Error::InvalidField(field)),
    };
    let first_name = take("firstName")?;
    let last_name = take("lastName")?;
    let email = take("email")?;
    let favorite_color = take("favoriteColor")?;
    let birthday = take("birthday")?;

    Ok(Self(ContactFields {
      first_name,
      last_name,
      email,
      favorite_color,
      birthday,
      extra: doc,
    }))
  }

  pub fn fields(&self) -> &ContactFields { &self.0 }

  pub fn into_fields(self) -> ContactFields { self.0 }
}

// ─── ContactPatch ────────────────────────────────────────────────────────────

/// Input to [`crate::store::ContactStore::update_contact`]: a set of
/// top-level keys that overwrite the stored ones. Keys not present are left
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactPatch(Document);

impl ContactPatch {
  /// Validate a client-supplied partial body.
  ///
  /// No field is required, but the body may not be empty, may not touch
  /// `_id`, and any of the well-known fields it carries must be strings.
  pub fn from_document(doc: Document) -> Result<Self> {
    if doc.is_empty() {
      return Err(Error::EmptyUpdate);
    }
    if doc.contains_key(ID_FIELD) {
      return Err(Error::ImmutableId);
    }
    for field in REQUIRED_FIELDS {
      if let Some(value) = doc.get(field)
        && !value.is_string()
      {
        return Err(Error::InvalidField(field));
      }
    }
    Ok(Self(doc))
  }

  /// Overwrite the keys of `target` with those of this patch.
  pub fn apply_to(&self, target: &mut Document) {
    for (key, value) in &self.0 {
      target.insert(key.clone(), value.clone());
    }
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }
}

/// Falsy values in the JSON sense count as missing.
fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}
