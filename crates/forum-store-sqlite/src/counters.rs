//! Aggregate counters: the single-row `status` table and the per-forum
//! `num_threads` / `num_posts` columns.
//!
//! Every increment runs on the connection of the triggering write, i.e. inside
//! its transaction, so a snapshot never sees half of a batch.

use forum_core::status::Status;
use rusqlite::{Connection, params};

use crate::Result;

pub fn user_created(conn: &Connection) -> Result<()> {
  conn.execute("UPDATE status SET num_users = num_users + 1 WHERE id = 1", [])?;
  Ok(())
}

pub fn forum_created(conn: &Connection) -> Result<()> {
  conn.execute("UPDATE status SET num_forums = num_forums + 1 WHERE id = 1", [])?;
  Ok(())
}

pub fn thread_created(conn: &Connection, forum: &str) -> Result<()> {
  conn.execute(
    "UPDATE forums SET num_threads = num_threads + 1 WHERE slug = ?1",
    params![forum],
  )?;
  conn.execute("UPDATE status SET num_threads = num_threads + 1 WHERE id = 1", [])?;
  Ok(())
}

pub fn posts_created(conn: &Connection, forum: &str, count: usize) -> Result<()> {
  let count = count as i64;
  conn.execute(
    "UPDATE forums SET num_posts = num_posts + ?2 WHERE slug = ?1",
    params![forum, count],
  )?;
  conn.execute(
    "UPDATE status SET num_posts = num_posts + ?1 WHERE id = 1",
    params![count],
  )?;
  Ok(())
}

pub fn snapshot(conn: &Connection) -> Result<Status> {
  Ok(conn.query_row(
    "SELECT num_users, num_forums, num_threads, num_posts FROM status WHERE id = 1",
    [],
    |row| {
      Ok(Status {
        user:   row.get(0)?,
        forum:  row.get(1)?,
        thread: row.get(2)?,
        post:   row.get(3)?,
      })
    },
  )?)
}

/// Delete all forum data and zero every counter. The post id sequence is
/// left alone so identifiers are never handed out twice.
pub fn clear_all(conn: &Connection) -> Result<()> {
  conn.execute_batch(
    "DELETE FROM votes;
     DELETE FROM forum_users;
     DELETE FROM posts;
     DELETE FROM threads;
     DELETE FROM forums;
     DELETE FROM users;
     UPDATE status
        SET num_users = 0, num_forums = 0, num_threads = 0, num_posts = 0
      WHERE id = 1;",
  )?;
  Ok(())
}
