//! The vote ledger: one row per (nickname, thread), with the thread score
//! kept equal to the sum of its voices.

use forum_core::{
  Error as DomainError,
  listing::ThreadRef,
  thread::Thread,
  vote::{NewVote, Voice},
};
use rusqlite::{Connection, OptionalExtension as _, params};

use crate::{Result, threads, users};

pub fn cast(conn: &Connection, thread: &ThreadRef, vote: &NewVote) -> Result<Thread> {
  let thread_id = threads::resolve_id(conn, thread)?
    .ok_or_else(|| DomainError::ThreadNotFound(thread.clone()))?;

  let previous: Option<i32> = conn
    .query_row(
      "SELECT voice FROM votes WHERE nickname = ?1 AND thread_id = ?2",
      params![vote.nickname, thread_id],
      |row| row.get(0),
    )
    .optional()?;
  let previous = previous.map(Voice::try_from).transpose()?;

  match previous {
    None => {
      // The author is only checked the first time they vote on a thread.
      let nickname = users::canonical_nickname(conn, &vote.nickname)?
        .ok_or_else(|| DomainError::AuthorNotFound(vote.nickname.clone()))?;
      conn.execute(
        "INSERT INTO votes (nickname, thread_id, voice) VALUES (?1, ?2, ?3)",
        params![nickname, thread_id, vote.voice.value()],
      )?;
    }
    Some(prev) if prev != vote.voice => {
      conn.execute(
        "UPDATE votes SET voice = ?3 WHERE nickname = ?1 AND thread_id = ?2",
        params![vote.nickname, thread_id, vote.voice.value()],
      )?;
    }
    Some(_) => {}
  }

  let delta = vote.voice.delta_from(previous);
  if delta != 0 {
    conn.execute(
      "UPDATE threads SET votes = votes + ?2 WHERE thread_id = ?1",
      params![thread_id, delta],
    )?;
  }

  threads::get(conn, &ThreadRef::Id(thread_id))
}
