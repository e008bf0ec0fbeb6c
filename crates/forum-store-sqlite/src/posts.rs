//! Post rows and the path assigner.
//!
//! A batch is inserted on one connection inside the caller's transaction:
//! ids are reserved up front from the `post` sequence, each post's path is
//! derived from its parent's stored path, and counters and memberships are
//! bumped before the transaction commits. Any failure leaves nothing behind.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use forum_core::{
  Error as DomainError,
  listing::ThreadRef,
  path::PostPath,
  post::{NewPost, Post, PostDetails, Related},
};
use rusqlite::{Connection, OptionalExtension as _, params};

use crate::{
  Result, counters,
  encode::{POST_COLUMNS, RawPost, decode_path, encode_dt, encode_path},
  forums, members, threads, users,
};

pub fn find(conn: &Connection, id: i64) -> Result<Option<Post>> {
  let sql = format!("SELECT {POST_COLUMNS} FROM posts p WHERE p.post_id = ?1");
  let raw = conn
    .query_row(&sql, params![id], RawPost::from_row)
    .optional()?;
  raw.map(RawPost::into_post).transpose()
}

pub fn get(conn: &Connection, id: i64) -> Result<Post> {
  find(conn, id)?.ok_or_else(|| DomainError::PostNotFound(id).into())
}

/// Path of post `id`, provided it belongs to `thread_id`.
pub fn path_in_thread(
  conn: &Connection,
  thread_id: i32,
  id: i64,
) -> Result<Option<PostPath>> {
  let blob: Option<Vec<u8>> = conn
    .query_row(
      "SELECT path FROM posts WHERE post_id = ?1 AND thread_id = ?2",
      params![id, thread_id],
      |row| row.get(0),
    )
    .optional()?;
  blob.as_deref().map(decode_path).transpose()
}

/// Reserve `count` consecutive ids and return the first.
fn reserve_ids(conn: &Connection, count: usize) -> Result<i64> {
  let count = count as i64;
  let last: i64 = conn.query_row(
    "UPDATE sequences SET value = value + ?1 WHERE name = 'post' RETURNING value",
    params![count],
    |row| row.get(0),
  )?;
  Ok(last - count + 1)
}

pub fn create_batch(
  conn: &Connection,
  thread: &ThreadRef,
  batch: Vec<NewPost>,
  now: DateTime<Utc>,
) -> Result<Vec<Post>> {
  let thread = threads::get(conn, thread)?;
  if batch.is_empty() {
    return Ok(Vec::new());
  }

  let count = batch.len();
  let first_id = reserve_ids(conn, count)?;
  let created = encode_dt(now);

  let mut insert = conn.prepare_cached(
    "INSERT INTO posts (
       post_id, parent, thread_id, forum, author, message, created, path, root
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
  )?;

  let mut authors: HashMap<String, String> = HashMap::new();
  let mut posts = Vec::with_capacity(count);

  for (id, input) in (first_id..).zip(batch) {
    let parent_path = match input.parent {
      Some(parent_id) => Some(
        path_in_thread(conn, thread.id, parent_id)?
          .ok_or(DomainError::ParentNotFound(parent_id))?,
      ),
      None => None,
    };
    let path = PostPath::assign(parent_path.as_ref(), id);

    let author = match authors.get(&input.author) {
      Some(canonical) => canonical.clone(),
      None => {
        let canonical = users::canonical_nickname(conn, &input.author)?
          .ok_or_else(|| DomainError::AuthorNotFound(input.author.clone()))?;
        authors.insert(input.author.clone(), canonical.clone());
        canonical
      }
    };

    insert.execute(params![
      id,
      input.parent,
      thread.id,
      thread.forum,
      author,
      input.message,
      created,
      encode_path(&path),
      path.root_id(),
    ])?;

    posts.push(Post {
      id,
      parent: input.parent,
      author,
      forum: thread.forum.clone(),
      thread: thread.id,
      message: input.message,
      created: now,
      is_edited: false,
      path,
    });
  }

  counters::posts_created(conn, &thread.forum, count)?;
  let distinct: BTreeSet<&String> = authors.values().collect();
  for author in distinct {
    members::ensure(conn, &thread.forum, author)?;
  }

  Ok(posts)
}

pub fn details(conn: &Connection, id: i64, related: Related) -> Result<PostDetails> {
  let post = get(conn, id)?;

  let author = if related.author {
    Some(users::get(conn, &post.author)?)
  } else {
    None
  };
  let thread = if related.thread {
    Some(threads::get(conn, &ThreadRef::Id(post.thread))?)
  } else {
    None
  };
  let forum = if related.forum {
    Some(forums::get(conn, &post.forum)?)
  } else {
    None
  };

  Ok(PostDetails { post, author, thread, forum })
}

pub fn update_message(conn: &Connection, id: i64, message: String) -> Result<Post> {
  let mut post = get(conn, id)?;
  if message.is_empty() || message == post.message {
    return Ok(post);
  }

  conn.execute(
    "UPDATE posts SET message = ?2, is_edited = 1 WHERE post_id = ?1",
    params![id, message],
  )?;
  post.message = message;
  post.is_edited = true;
  Ok(post)
}
