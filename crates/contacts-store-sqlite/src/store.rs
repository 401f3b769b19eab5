//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use contacts_core::{
  Contact, ContactId, ContactPatch, NewContact, store::ContactStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawContact, encode_fields, encode_id, merge_document},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contacts collection backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(?path, "opened contacts store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT contact_id, document FROM contacts ORDER BY seq")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawContact {
              contact_id: row.get(0)?,
              document:   row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT contact_id, document FROM contacts WHERE contact_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawContact {
                contact_id: row.get(0)?,
                document:   row.get(1)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn create_contact(&self, input: NewContact) -> Result<ContactId> {
    let id = ContactId::generate();
    let id_str = encode_id(id);
    let document = encode_fields(input.fields())?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (contact_id, document) VALUES (?1, ?2)",
          rusqlite::params![id_str, document],
        )?;
        Ok(())
      })
      .await?;

    Ok(id)
  }

  async fn update_contact(&self, id: ContactId, patch: ContactPatch) -> Result<()> {
    let id_str = encode_id(id);

    // Read, merge and write in one transaction on the connection thread.
    let matched: bool = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let stored: Option<String> = tx
          .query_row(
            "SELECT document FROM contacts WHERE contact_id = ?1",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?;

        let Some(stored) = stored else {
          return Ok(false);
        };
        let merged = merge_document(&stored, &patch)
          .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;

        tx.execute(
          "UPDATE contacts SET document = ?2 WHERE contact_id = ?1",
          rusqlite::params![id_str, merged],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !matched {
      return Err(contacts_core::Error::ContactNotFound(id).into());
    }
    Ok(())
  }

  async fn delete_contact(&self, id: ContactId) -> Result<()> {
    let id_str = encode_id(id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM contacts WHERE contact_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(contacts_core::Error::ContactNotFound(id).into());
    }
    Ok(())
  }
}
