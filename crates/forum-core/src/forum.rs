//! Forums — top-level containers of threads.

use serde::{Deserialize, Serialize};

/// A forum with its denormalized counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forum {
  /// Unique, compared case-insensitively.
  pub slug:    String,
  pub title:   String,
  /// Nickname of the administrating user.
  pub user:    String,
  /// Number of threads created in this forum.
  pub threads: i32,
  /// Number of posts created across all threads of this forum.
  pub posts:   i64,
}

/// Input to [`crate::store::ForumStore::create_forum`].
#[derive(Debug, Clone)]
pub struct NewForum {
  pub slug:  String,
  pub title: String,
  pub user:  String,
}
