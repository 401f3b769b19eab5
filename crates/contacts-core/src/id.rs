//! [`ContactId`], the store-assigned contact identifier.
//!
//! Identifiers follow the ObjectId layout used by document databases: twelve
//! bytes made of a big-endian Unix timestamp in seconds (4 bytes), a
//! per-process random value (5 bytes) and a wrapping counter (3 bytes),
//! rendered as 24 lowercase hex digits.

use std::{
  fmt,
  str::FromStr,
  sync::{
    OnceLock,
    atomic::{AtomicU32, Ordering},
  },
};

use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{Error, Result};

/// A 12-byte contact identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId([u8; 12]);

struct Generator {
  process: [u8; 5],
  counter: AtomicU32,
}

fn generator() -> &'static Generator {
  static GENERATOR: OnceLock<Generator> = OnceLock::new();
  GENERATOR.get_or_init(|| {
    let mut process = [0u8; 5];
    OsRng.fill_bytes(&mut process);
    Generator {
      process,
      counter: AtomicU32::new(OsRng.next_u32()),
    }
  })
}

impl ContactId {
  /// Generate a fresh identifier stamped with the current time.
  pub fn generate() -> Self { Self::generate_at(Utc::now()) }

  fn generate_at(now: DateTime<Utc>) -> Self {
    let generator = generator();
    let count = generator.counter.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;
    // Truncation past 2106 matches the ObjectId convention.
    let secs = now.timestamp() as u32;

    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    bytes[4..9].copy_from_slice(&generator.process);
    bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
    Self(bytes)
  }

  /// Parse a client-supplied identifier.
  ///
  /// Accepts exactly 24 hex digits in either case. Anything else is
  /// [`Error::InvalidId`]; no storage access is involved.
  pub fn parse(s: &str) -> Result<Self> {
    let mut bytes = [0u8; 12];
    hex::decode_to_slice(s, &mut bytes)
      .map_err(|_| Error::InvalidId(s.to_owned()))?;
    Ok(Self(bytes))
  }

  pub fn as_bytes(&self) -> &[u8; 12] { &self.0 }

  /// The creation time embedded in the identifier, at second precision.
  pub fn timestamp(&self) -> DateTime<Utc> {
    let b = &self.0;
    let secs = u32::from_be_bytes([b[0], b[1], b[2], b[3]]);
    DateTime::from_timestamp(i64::from(secs), 0).unwrap_or_default()
  }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&hex::encode(self.0))
  }
}

impl fmt::Debug for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ContactId({self})")
  }
}

impl FromStr for ContactId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl Serialize for ContactId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for ContactId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    Self::parse(&s).map_err(de::Error::custom)
  }
}
