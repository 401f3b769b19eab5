//! Core types and trait definitions for the contacts service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Validation of client input (identifiers, create and update bodies) lives
//! here as pure functions so it runs before any storage backend is touched.

pub mod contact;
pub mod error;
pub mod id;
pub mod store;

pub use contact::{Contact, ContactFields, ContactPatch, Document, NewContact};
pub use error::{Classify, Error, ErrorKind, Result};
pub use id::ContactId;
