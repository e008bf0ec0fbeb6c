//! Listing and lookup parameters shared by all backends.
//!
//! Every listing is cursor-based: `since` holds the ordering key of the last
//! item a caller has seen, `desc` flips the direction, and a `limit` of `0`
//! means "no limit".

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Thread references ───────────────────────────────────────────────────────

/// A thread addressed either by numeric id or by slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThreadRef {
  Id(i32),
  Slug(String),
}

impl ThreadRef {
  /// An all-digit string that fits an `i32` is an id; anything else is a
  /// slug.
  pub fn parse(s: &str) -> Self {
    let digits = !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match s.parse::<i32>() {
      Ok(id) if digits => Self::Id(id),
      _ => Self::Slug(s.to_owned()),
    }
  }
}

impl fmt::Display for ThreadRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Id(id) => write!(f, "{id}"),
      Self::Slug(slug) => write!(f, "{slug:?}"),
    }
  }
}

// ─── Post listing ────────────────────────────────────────────────────────────

/// How [`crate::store::ForumStore::list_posts`] orders and pages posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
  /// By post id; the cursor is a post id.
  #[default]
  Flat,
  /// By path (pre-order); the cursor is a post whose path bounds the page.
  Tree,
  /// Pages over root posts; each selected root brings its whole subtree.
  ParentTree,
}

impl SortMode {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Flat => "flat",
      Self::Tree => "tree",
      Self::ParentTree => "parent_tree",
    }
  }
}

impl FromStr for SortMode {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Error> {
    match s {
      "" | "flat" => Ok(Self::Flat),
      "tree" => Ok(Self::Tree),
      "parent_tree" => Ok(Self::ParentTree),
      other => Err(Error::InvalidArgument(format!(
        "unknown sort mode {other:?}"
      ))),
    }
  }
}

impl fmt::Display for SortMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Parameters for [`crate::store::ForumStore::list_posts`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostQuery {
  pub sort:  SortMode,
  /// Id of the last post seen on the previous page.
  pub since: Option<i64>,
  pub desc:  bool,
  /// `0` means unlimited. In `ParentTree` mode this counts roots.
  pub limit: u32,
}

// ─── Forum listings ──────────────────────────────────────────────────────────

/// Parameters for [`crate::store::ForumStore::list_forum_users`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
  /// Nickname of the last user seen; compared case-insensitively.
  pub since: Option<String>,
  pub desc:  bool,
  pub limit: u32,
}

/// Parameters for [`crate::store::ForumStore::list_forum_threads`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadQuery {
  /// Inclusive bound on `created`: threads at or after it (at or before it
  /// when `desc`).
  pub since: Option<DateTime<Utc>>,
  pub desc:  bool,
  pub limit: u32,
}
