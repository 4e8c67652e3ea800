//! Runtime configuration, layered from defaults, `config.toml`, and
//! `VISITS_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Origins of the local dashboard dev servers.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
  "http://localhost:3000",
  "http://localhost:5173",
  "http://127.0.0.1:3000",
  "http://127.0.0.1:5173",
];

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  /// SQLite file holding the `visits` table.
  pub store_path:   PathBuf,
  pub cors_origins: Vec<String>,
}

impl ServerConfig {
  /// Load from the optional TOML file at `path`, then override with the
  /// environment. `VISITS_CORS_ORIGINS` takes a comma-separated list.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8000)?
      .set_default("store_path", "data.db")?
      .set_default("cors_origins", DEFAULT_CORS_ORIGINS.to_vec())?
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("VISITS")
          .try_parsing(true)
          .list_separator(",")
          .with_list_parse_key("cors_origins"),
      )
      .build()
      .context("failed to read configuration")?;

    let mut cfg: ServerConfig = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
