//! Integration tests for `SqliteStore` against an in-memory database.

use contacts_core::{
  Classify, ContactId, ContactPatch, Document, ErrorKind, NewContact,
  store::ContactStore,
};
use serde_json::{Value, json};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn john() -> NewContact {
  NewContact::new("John", "Doe", "john@x.com", "Blue", "1990-01-01")
}

fn patch(value: Value) -> ContactPatch {
  let Value::Object(doc) = value else { panic!("patch must be an object") };
  ContactPatch::from_document(doc).unwrap()
}

fn unknown_id() -> ContactId {
  ContactId::parse("000000000000000000000000").unwrap()
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_contact() {
  let s = store().await;

  let id = s.create_contact(john()).await.unwrap();
  let fetched = s.get_contact(id).await.unwrap().expect("stored contact");

  assert_eq!(fetched.id, id);
  assert_eq!(&fetched.fields, john().fields());
}

#[tokio::test]
async fn get_contact_missing_returns_none() {
  let s = store().await;
  assert!(s.get_contact(unknown_id()).await.unwrap().is_none());
}

#[tokio::test]
async fn create_assigns_distinct_ids() {
  let s = store().await;
  let a = s.create_contact(john()).await.unwrap();
  let b = s.create_contact(john()).await.unwrap();
  assert_ne!(a, b);
}

#[tokio::test]
async fn extra_fields_round_trip() {
  let s = store().await;
  let Value::Object(mut doc) = json!({
    "firstName": "Ada",
    "lastName": "Lovelace",
    "email": "ada@example.com",
    "favoriteColor": "Purple",
    "birthday": "1815-12-10",
    "tags": ["math", "poetry"]
  }) else {
    unreachable!()
  };
  doc.insert("nickname".into(), json!("Countess"));

  let id = s
    .create_contact(NewContact::from_document(doc).unwrap())
    .await
    .unwrap();
  let fetched = s.get_contact(id).await.unwrap().unwrap();
  assert_eq!(fetched.fields.extra.get("nickname"), Some(&json!("Countess")));
  assert_eq!(fetched.fields.extra.get("tags"), Some(&json!(["math", "poetry"])));
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_empty_store() {
  let s = store().await;
  assert!(s.list_contacts().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_returns_insertion_order() {
  let s = store().await;
  let first = s
    .create_contact(NewContact::new("A", "One", "a@x.com", "Red", "2000-01-01"))
    .await
    .unwrap();
  let second = s
    .create_contact(NewContact::new("B", "Two", "b@x.com", "Green", "2000-01-02"))
    .await
    .unwrap();
  let third = s
    .create_contact(NewContact::new("C", "Three", "c@x.com", "Blue", "2000-01-03"))
    .await
    .unwrap();

  let ids: Vec<ContactId> =
    s.list_contacts().await.unwrap().into_iter().map(|c| c.id).collect();
  assert_eq!(ids, vec![first, second, third]);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_merges_supplied_fields_only() {
  let s = store().await;
  let id = s.create_contact(john()).await.unwrap();

  s.update_contact(id, patch(json!({ "favoriteColor": "Green", "nickname": "Johnny" })))
    .await
    .unwrap();

  let fetched = s.get_contact(id).await.unwrap().unwrap();
  assert_eq!(fetched.fields.favorite_color, "Green");
  assert_eq!(fetched.fields.first_name, "John");
  assert_eq!(fetched.fields.last_name, "Doe");
  assert_eq!(fetched.fields.email, "john@x.com");
  assert_eq!(fetched.fields.birthday, "1990-01-01");
  assert_eq!(fetched.fields.extra.get("nickname"), Some(&json!("Johnny")));
}

#[tokio::test]
async fn update_touches_only_the_target_contact() {
  let s = store().await;
  let a = s.create_contact(john()).await.unwrap();
  let b = s.create_contact(john()).await.unwrap();

  s.update_contact(a, patch(json!({ "email": "new@x.com" })))
    .await
    .unwrap();

  assert_eq!(s.get_contact(a).await.unwrap().unwrap().fields.email, "new@x.com");
  assert_eq!(s.get_contact(b).await.unwrap().unwrap().fields.email, "john@x.com");
}

#[tokio::test]
async fn update_missing_is_not_found_and_writes_nothing() {
  let s = store().await;
  let id = s.create_contact(john()).await.unwrap();
  let before = s.list_contacts().await.unwrap();

  let err = s
    .update_contact(unknown_id(), patch(json!({ "email": "x@y.z" })))
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Core(contacts_core::Error::ContactNotFound(missing)) if missing == unknown_id()
  ));
  assert_eq!(err.kind(), ErrorKind::NotFound);
  assert!(err.to_string().contains("not found"));

  assert_eq!(s.list_contacts().await.unwrap(), before);
  assert!(s.get_contact(id).await.unwrap().is_some());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_contact() {
  let s = store().await;
  let keep = s.create_contact(john()).await.unwrap();
  let gone = s.create_contact(john()).await.unwrap();

  s.delete_contact(gone).await.unwrap();

  assert!(s.get_contact(gone).await.unwrap().is_none());
  let remaining: Vec<ContactId> =
    s.list_contacts().await.unwrap().into_iter().map(|c| c.id).collect();
  assert_eq!(remaining, vec![keep]);
}

#[tokio::test]
async fn delete_twice_is_not_found() {
  let s = store().await;
  let id = s.create_contact(john()).await.unwrap();

  s.delete_contact(id).await.unwrap();
  let err = s.delete_contact(id).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn delete_missing_leaves_collection_unchanged() {
  let s = store().await;
  s.create_contact(john()).await.unwrap();

  let err = s.delete_contact(unknown_id()).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
  assert_eq!(s.list_contacts().await.unwrap().len(), 1);
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_keeps_contacts() {
  let path = std::env::temp_dir().join(format!(
    "contacts-store-test-{}.sqlite",
    ContactId::generate()
  ));

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create_contact(john()).await.unwrap()
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let fetched = s.get_contact(id).await.unwrap();
  assert!(fetched.is_some());

  drop(s);
  for suffix in ["", "-wal", "-shm"] {
    let mut p = path.clone().into_os_string();
    p.push(suffix);
    let _ = std::fs::remove_file(p);
  }
}

#[test]
fn merge_keeps_unknown_document_keys() {
  let stored = r#"{"firstName":"John","legacy":true}"#;
  let merged = crate::encode::merge_document(stored, &patch(json!({ "firstName": "Jon" })))
    .unwrap();
  let doc: Document = serde_json::from_str(&merged).unwrap();
  assert_eq!(doc.get("firstName"), Some(&json!("Jon")));
  assert_eq!(doc.get("legacy"), Some(&json!(true)));
}
