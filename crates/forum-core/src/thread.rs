//! Threads — a titled discussion inside a forum, owning a forest of posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
  pub id:      i32,
  /// Optional human-readable alias; unique when present.
  pub slug:    Option<String>,
  pub forum:   String,
  pub author:  String,
  pub title:   String,
  pub message: String,
  pub created: DateTime<Utc>,
  /// Sum of all votes cast on this thread. Only the vote ledger writes it.
  pub votes:   i32,
}

/// Input to [`crate::store::ForumStore::create_thread`].
#[derive(Debug, Clone)]
pub struct NewThread {
  pub slug:    Option<String>,
  pub author:  String,
  pub title:   String,
  pub message: String,
  /// Defaults to the store's clock when `None`.
  pub created: Option<DateTime<Utc>>,
}

/// Thread edits. Empty strings leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadUpdate {
  #[serde(default)]
  pub title:   String,
  #[serde(default)]
  pub message: String,
}

impl ThreadUpdate {
  pub fn is_empty(&self) -> bool {
    self.title.is_empty() && self.message.is_empty()
  }

  pub fn apply(&self, thread: &mut Thread) {
    if !self.title.is_empty() {
      thread.title.clone_from(&self.title);
    }
    if !self.message.is_empty() {
      thread.message.clone_from(&self.message);
    }
  }
}
