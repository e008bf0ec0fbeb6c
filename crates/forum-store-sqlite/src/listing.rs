//! The pagination engine: one thread's posts in flat, tree or parent-tree
//! order, resumed from an exclusive `since` cursor.
//!
//! Flat mode pages by post id. Tree mode pages by stored path, whose BLOB
//! order is pre-order traversal with siblings by id. Parent-tree mode pages
//! by root post: the limit counts roots, and every root on the page comes
//! with its whole subtree.

use forum_core::{
  Error as DomainError,
  listing::{PostQuery, SortMode, ThreadRef},
  post::Post,
};
use rusqlite::{Connection, params, types::Value};

use crate::{
  Result,
  encode::{POST_COLUMNS, RawPost, encode_limit, encode_path},
  posts, threads,
};

/// SQL predicate on `p` selecting posts of the referenced thread, bound to
/// `?1`. A slug that names no thread matches nothing.
fn thread_predicate(thread: &ThreadRef) -> (&'static str, Value) {
  match thread {
    ThreadRef::Id(id) => ("p.thread_id = ?1", Value::Integer(i64::from(*id))),
    ThreadRef::Slug(slug) => (
      "p.thread_id = (SELECT thread_id FROM threads WHERE slug = ?1)",
      Value::Text(slug.clone()),
    ),
  }
}

pub fn list_posts(
  conn: &Connection,
  thread: &ThreadRef,
  query: &PostQuery,
) -> Result<Vec<Post>> {
  let (predicate, key) = thread_predicate(thread);
  let (cmp, dir) = if query.desc { ("<", "DESC") } else { (">", "ASC") };
  let limit = encode_limit(query.limit);

  let (sql, cursor) = match query.sort {
    SortMode::Flat => (
      format!(
        "SELECT {POST_COLUMNS}
           FROM posts p
          WHERE {predicate}
            AND (?2 IS NULL OR p.post_id {cmp} ?2)
          ORDER BY p.post_id {dir}
          LIMIT ?3"
      ),
      query.since.map(Value::Integer).unwrap_or(Value::Null),
    ),

    SortMode::Tree => {
      let cursor = match query.since {
        Some(since) => Value::Blob(encode_path(&cursor_path(conn, thread, since)?)),
        None => Value::Null,
      };
      (
        format!(
          "SELECT {POST_COLUMNS}
             FROM posts p
            WHERE {predicate}
              AND (?2 IS NULL OR p.path {cmp} ?2)
            ORDER BY p.path {dir}
            LIMIT ?3"
        ),
        cursor,
      )
    }

    SortMode::ParentTree => {
      let cursor = match query.since {
        Some(since) => Value::Integer(cursor_path(conn, thread, since)?.root_id()),
        None => Value::Null,
      };
      (
        format!(
          "WITH roots AS (
             SELECT p.post_id
               FROM posts p
              WHERE {predicate}
                AND p.parent IS NULL
                AND (?2 IS NULL OR p.post_id {cmp} ?2)
              ORDER BY p.post_id {dir}
              LIMIT ?3
           )
           SELECT {POST_COLUMNS}
             FROM posts p
             JOIN roots r ON p.root = r.post_id
            ORDER BY p.root {dir}, p.path ASC"
        ),
        cursor,
      )
    }
  };

  let mut stmt = conn.prepare(&sql)?;
  let raws = stmt
    .query_map(params![key, cursor, limit], RawPost::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  if raws.is_empty() && threads::resolve_id(conn, thread)?.is_none() {
    return Err(DomainError::ThreadNotFound(thread.clone()).into());
  }

  raws.into_iter().map(RawPost::into_post).collect()
}

/// Path of the cursor post for the path-ordered modes. The post must belong
/// to the listed thread.
fn cursor_path(
  conn: &Connection,
  thread: &ThreadRef,
  since: i64,
) -> Result<forum_core::path::PostPath> {
  let thread_id = threads::resolve_id(conn, thread)?
    .ok_or_else(|| DomainError::ThreadNotFound(thread.clone()))?;
  posts::path_in_thread(conn, thread_id, since)?.ok_or_else(|| {
    DomainError::InvalidArgument(format!(
      "since post {since} is not in thread {thread}"
    ))
    .into()
  })
}
