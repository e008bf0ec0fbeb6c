//! Encoding and decoding helpers between Rust domain types and the
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (nanosecond
//! precision, `Z` suffix) so that text comparison is time comparison. Post
//! paths are stored as BLOBs of 8-byte big-endian ids.

use chrono::{DateTime, SecondsFormat, Utc};
use forum_core::{path::PostPath, post::Post, thread::Thread};
use rusqlite::Row;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── PostPath ────────────────────────────────────────────────────────────────

const ID_WIDTH: usize = std::mem::size_of::<i64>();

/// Ids are positive, so big-endian bytes compare like the numbers they
/// encode and a shorter prefix sorts before its extensions.
pub fn encode_path(path: &PostPath) -> Vec<u8> {
  path.ids().iter().flat_map(|id| id.to_be_bytes()).collect()
}

pub fn decode_path(bytes: &[u8]) -> Result<PostPath> {
  if bytes.is_empty() || bytes.len() % ID_WIDTH != 0 {
    return Err(Error::CorruptPath(bytes.len()));
  }
  let ids = bytes
    .chunks_exact(ID_WIDTH)
    .map(|chunk| {
      let mut buf = [0u8; ID_WIDTH];
      buf.copy_from_slice(chunk);
      i64::from_be_bytes(buf)
    })
    .collect();
  PostPath::from_ids(ids).map_err(|_| Error::CorruptPath(bytes.len()))
}

// ─── Limits ──────────────────────────────────────────────────────────────────

/// SQLite treats a negative `LIMIT` as "no limit".
pub fn encode_limit(limit: u32) -> i64 {
  if limit == 0 { -1 } else { i64::from(limit) }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawPost::from_row`], for a `posts` alias `p`.
pub const POST_COLUMNS: &str = "p.post_id, p.parent, p.author, p.forum, \
   p.thread_id, p.message, p.created, p.is_edited, p.path";

/// Raw values read directly from a `posts` row.
pub struct RawPost {
  pub post_id:   i64,
  pub parent:    Option<i64>,
  pub author:    String,
  pub forum:     String,
  pub thread_id: i32,
  pub message:   String,
  pub created:   String,
  pub is_edited: bool,
  pub path:      Vec<u8>,
}

impl RawPost {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      post_id:   row.get(0)?,
      parent:    row.get(1)?,
      author:    row.get(2)?,
      forum:     row.get(3)?,
      thread_id: row.get(4)?,
      message:   row.get(5)?,
      created:   row.get(6)?,
      is_edited: row.get(7)?,
      path:      row.get(8)?,
    })
  }

  pub fn into_post(self) -> Result<Post> {
    Ok(Post {
      id:        self.post_id,
      parent:    self.parent,
      author:    self.author,
      forum:     self.forum,
      thread:    self.thread_id,
      message:   self.message,
      created:   decode_dt(&self.created)?,
      is_edited: self.is_edited,
      path:      decode_path(&self.path)?,
    })
  }
}

/// Column list matching [`RawThread::from_row`], for a `threads` alias `t`.
pub const THREAD_COLUMNS: &str =
  "t.thread_id, t.slug, t.forum, t.author, t.title, t.message, t.created, t.votes";

/// Raw values read directly from a `threads` row.
pub struct RawThread {
  pub thread_id: i32,
  pub slug:      Option<String>,
  pub forum:     String,
  pub author:    String,
  pub title:     String,
  pub message:   String,
  pub created:   String,
  pub votes:     i32,
}

impl RawThread {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      thread_id: row.get(0)?,
      slug:      row.get(1)?,
      forum:     row.get(2)?,
      author:    row.get(3)?,
      title:     row.get(4)?,
      message:   row.get(5)?,
      created:   row.get(6)?,
      votes:     row.get(7)?,
    })
  }

  pub fn into_thread(self) -> Result<Thread> {
    Ok(Thread {
      id:      self.thread_id,
      slug:    self.slug,
      forum:   self.forum,
      author:  self.author,
      title:   self.title,
      message: self.message,
      created: decode_dt(&self.created)?,
      votes:   self.votes,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn timestamps_are_fixed_width_and_sortable() {
    let a = Utc.timestamp_opt(1_700_000_000, 5).unwrap();
    let b = Utc.timestamp_opt(1_700_000_000, 400_000_000).unwrap();
    let (ea, eb) = (encode_dt(a), encode_dt(b));
    assert_eq!(ea.len(), eb.len());
    assert!(ea < eb);
    assert_eq!(decode_dt(&ea).unwrap(), a);
  }

  #[test]
  fn path_blob_order_is_tree_order() {
    let root = PostPath::root(1);
    let child = root.child(2);
    let sibling = PostPath::root(256);

    let (r, c, s) = (
      encode_path(&root),
      encode_path(&child),
      encode_path(&sibling),
    );
    assert!(r < c, "ancestor must precede descendant");
    assert!(c < s, "subtree of 1 must precede root 256");
    assert_eq!(decode_path(&c).unwrap(), child);
  }

  #[test]
  fn corrupt_path_blobs_are_rejected() {
    assert!(matches!(decode_path(&[]), Err(Error::CorruptPath(0))));
    assert!(matches!(decode_path(&[0; 7]), Err(Error::CorruptPath(7))));
    assert!(matches!(decode_path(&[0; 8]), Err(Error::CorruptPath(8))));
  }

  #[test]
  fn zero_limit_means_unlimited() {
    assert_eq!(encode_limit(0), -1);
    assert_eq!(encode_limit(25), 25);
  }
}
