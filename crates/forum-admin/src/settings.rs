//! Admin configuration, layered from an optional TOML file and `FORUM_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Runtime configuration for `forum-admin`.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AdminConfig {
  /// SQLite database file; `:memory:` opens a throwaway store.
  pub store_path: PathBuf,
}

impl Default for AdminConfig {
  fn default() -> Self {
    Self { store_path: PathBuf::from("forum.db") }
  }
}

impl AdminConfig {
  /// Read `path` if it exists, then let `FORUM_*` variables override it.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("FORUM"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise AdminConfig")
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
