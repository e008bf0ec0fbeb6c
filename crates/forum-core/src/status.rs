//! Global counters.

use serde::{Deserialize, Serialize};

/// Totals across the whole store, read as one consistent snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
  pub user:   i32,
  pub forum:  i32,
  pub thread: i32,
  pub post:   i64,
}
