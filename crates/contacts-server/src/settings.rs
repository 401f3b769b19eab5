//! Runtime server configuration.
//!
//! Sources, later ones winning: built-in defaults, the TOML file named by
//! `--config`, `CONTACTS_*` environment variables, then command-line flags.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const ENV_PREFIX: &str = "CONTACTS";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  /// SQLite database path, optionally prefixed with `sqlite://`.
  pub database_url:  Option<String>,
  pub db_timeout_ms: u64,
}

/// Values given on the command line.
#[derive(Debug, Default)]
pub struct Overrides {
  pub host:         Option<String>,
  pub port:         Option<u16>,
  pub database_url: Option<String>,
}

impl ServerConfig {
  /// Load configuration from every source. A missing file is not an error.
  pub fn load(file: &Path, overrides: &Overrides) -> Result<Self, ConfigError> {
    Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8080_i64)?
      .set_default("db_timeout_ms", 5000_i64)?
      .add_source(File::from(file).required(false))
      .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
      .set_override_option("host", overrides.host.clone())?
      .set_override_option("port", overrides.port.map(i64::from))?
      .set_override_option("database_url", overrides.database_url.clone())?
      .build()?
      .try_deserialize()
  }

  /// The database file to open, if one is configured.
  pub fn database_path(&self) -> Option<PathBuf> {
    let url = self.database_url.as_deref()?.trim();
    let path = url.strip_prefix("sqlite://").unwrap_or(url);
    (!path.is_empty()).then(|| PathBuf::from(path))
  }

  pub fn bind_address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn db_timeout(&self) -> Duration { Duration::from_millis(self.db_timeout_ms) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write_config(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
      "contacts-server-config-{}-{}.toml",
      std::process::id(),
      contents.len()
    ));
    std::fs::write(&path, contents).unwrap();
    path
  }

  fn parsed(url: Option<&str>) -> ServerConfig {
    ServerConfig {
      host:          "127.0.0.1".into(),
      port:          8080,
      database_url:  url.map(str::to_owned),
      db_timeout_ms: 5000,
    }
  }

  #[test]
  fn defaults_apply_without_a_file() {
    let cfg = ServerConfig::load(
      Path::new("/nonexistent/contacts.toml"),
      &Overrides::default(),
    )
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.db_timeout(), Duration::from_secs(5));
  }

  #[test]
  fn file_values_are_read_and_flags_win() {
    let path = write_config(
      "host = \"127.0.0.1\"\nport = 3000\ndatabase_url = \"contacts.db\"\ndb_timeout_ms = 250\n",
    );

    let cfg = ServerConfig::load(&path, &Overrides::default()).unwrap();
    assert_eq!(cfg.bind_address(), "127.0.0.1:3000");
    assert_eq!(cfg.database_path(), Some(PathBuf::from("contacts.db")));
    assert_eq!(cfg.db_timeout(), Duration::from_millis(250));

    let overrides = Overrides {
      host:         None,
      port:         Some(9000),
      database_url: Some("sqlite://other.db".into()),
    };
    let cfg = ServerConfig::load(&path, &overrides).unwrap();
    assert_eq!(cfg.bind_address(), "127.0.0.1:9000");
    assert_eq!(cfg.database_path(), Some(PathBuf::from("other.db")));

    std::fs::remove_file(path).ok();
  }

  #[test]
  fn database_path_handles_missing_and_prefixed_urls() {
    assert_eq!(parsed(None).database_path(), None);
    assert_eq!(parsed(Some("")).database_path(), None);
    assert_eq!(parsed(Some("sqlite://")).database_path(), None);
    assert_eq!(
      parsed(Some("sqlite:///var/lib/contacts.db")).database_path(),
      Some(PathBuf::from("/var/lib/contacts.db"))
    );
    assert_eq!(
      parsed(Some(":memory:")).database_path(),
      Some(PathBuf::from(":memory:"))
    );
  }
}
