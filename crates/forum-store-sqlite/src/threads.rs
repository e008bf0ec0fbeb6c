//! Thread rows.

use chrono::{DateTime, Datelike as _, Utc};
use forum_core::{
  Error as DomainError,
  listing::{ThreadQuery, ThreadRef},
  thread::{NewThread, Thread, ThreadUpdate},
};
use rusqlite::{Connection, OptionalExtension as _, params, types::Value};

use crate::{
  Result, counters,
  encode::{RawThread, THREAD_COLUMNS, encode_dt, encode_limit},
  error::is_unique_violation,
  forums, members, users,
};

/// SQL predicate on `t` selecting the referenced thread, bound to `?1`.
fn ref_predicate(thread: &ThreadRef) -> (&'static str, Value) {
  match thread {
    ThreadRef::Id(id) => ("t.thread_id = ?1", Value::Integer(i64::from(*id))),
    ThreadRef::Slug(slug) => ("t.slug = ?1", Value::Text(slug.clone())),
  }
}

pub fn find(conn: &Connection, thread: &ThreadRef) -> Result<Option<Thread>> {
  let (predicate, key) = ref_predicate(thread);
  let sql = format!("SELECT {THREAD_COLUMNS} FROM threads t WHERE {predicate}");
  let raw = conn
    .query_row(&sql, params![key], RawThread::from_row)
    .optional()?;
  raw.map(RawThread::into_thread).transpose()
}

pub fn get(conn: &Connection, thread: &ThreadRef) -> Result<Thread> {
  find(conn, thread)?
    .ok_or_else(|| DomainError::ThreadNotFound(thread.clone()).into())
}

/// Resolve a reference to the thread's numeric id, if it exists.
pub fn resolve_id(conn: &Connection, thread: &ThreadRef) -> Result<Option<i32>> {
  let (predicate, key) = ref_predicate(thread);
  let sql = format!("SELECT t.thread_id FROM threads t WHERE {predicate}");
  Ok(conn.query_row(&sql, params![key], |row| row.get(0)).optional()?)
}

pub fn create(
  conn: &Connection,
  forum: &str,
  input: NewThread,
  now: DateTime<Utc>,
) -> Result<Thread> {
  let forum = forums::canonical_slug(conn, forum)?
    .ok_or_else(|| DomainError::ForumNotFound(forum.to_owned()))?;
  let author = users::canonical_nickname(conn, &input.author)?
    .ok_or_else(|| DomainError::AuthorNotFound(input.author.clone()))?;

  if let Some(slug) = &input.slug
    && let Some(existing) = find(conn, &ThreadRef::Slug(slug.clone()))?
  {
    return Err(DomainError::DuplicateThreadSlug(Box::new(existing)).into());
  }

  let created = input.created.unwrap_or(now);
  if !(0..=9999).contains(&created.year()) {
    return Err(
      DomainError::InvalidArgument(format!(
        "thread creation time {created} is outside years 0 to 9999"
      ))
      .into(),
    );
  }
  let inserted = conn.query_row(
    "INSERT INTO threads (slug, forum, author, title, message, created)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
     RETURNING thread_id",
    params![
      input.slug,
      forum,
      author,
      input.title,
      input.message,
      encode_dt(created),
    ],
    |row| row.get::<_, i32>(0),
  );
  let id = match inserted {
    Ok(id) => id,
    Err(e) if is_unique_violation(&e) => {
      let slug = input.slug.clone().unwrap_or_default();
      tracing::warn!(%slug, "thread insert raced a duplicate slug");
      let existing = get(conn, &ThreadRef::Slug(slug))?;
      return Err(DomainError::DuplicateThreadSlug(Box::new(existing)).into());
    }
    Err(e) => return Err(e.into()),
  };

  counters::thread_created(conn, &forum)?;
  members::ensure(conn, &forum, &author)?;

  Ok(Thread {
    id,
    slug: input.slug,
    forum,
    author,
    title: input.title,
    message: input.message,
    created,
    votes: 0,
  })
}

pub fn update(
  conn: &Connection,
  thread: &ThreadRef,
  update: &ThreadUpdate,
) -> Result<Thread> {
  let mut current = get(conn, thread)?;
  if update.is_empty() {
    return Ok(current);
  }

  update.apply(&mut current);
  conn.execute(
    "UPDATE threads SET title = ?2, message = ?3 WHERE thread_id = ?1",
    params![current.id, current.title, current.message],
  )?;
  Ok(current)
}

pub fn list_by_forum(
  conn: &Connection,
  forum: &str,
  query: &ThreadQuery,
) -> Result<Vec<Thread>> {
  let (cmp, dir) = if query.desc { ("<=", "DESC") } else { (">=", "ASC") };
  let sql = format!(
    "SELECT {THREAD_COLUMNS}
       FROM threads t
      WHERE t.forum = ?1
        AND (?2 IS NULL OR t.created {cmp} ?2)
      ORDER BY t.created {dir}, t.thread_id {dir}
      LIMIT ?3"
  );

  let mut stmt = conn.prepare(&sql)?;
  let raws = stmt
    .query_map(
      params![forum, query.since.map(encode_dt), encode_limit(query.limit)],
      RawThread::from_row,
    )?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  if raws.is_empty() && forums::canonical_slug(conn, forum)?.is_none() {
    return Err(DomainError::ForumNotFound(forum.to_owned()).into());
  }

  raws.into_iter().map(RawThread::into_thread).collect()
}
