//! Forum rows.

use forum_core::{
  Error as DomainError,
  forum::{Forum, NewForum},
};
use rusqlite::{Connection, OptionalExtension as _, params};

use crate::{Result, counters, error::is_unique_violation, users};

pub fn find(conn: &Connection, slug: &str) -> Result<Option<Forum>> {
  Ok(
    conn
      .query_row(
        "SELECT slug, title, admin, num_threads, num_posts FROM forums WHERE slug = ?1",
        params![slug],
        |row| {
          Ok(Forum {
            slug:    row.get(0)?,
            title:   row.get(1)?,
            user:    row.get(2)?,
            threads: row.get(3)?,
            posts:   row.get(4)?,
          })
        },
      )
      .optional()?,
  )
}

pub fn get(conn: &Connection, slug: &str) -> Result<Forum> {
  find(conn, slug)?
    .ok_or_else(|| DomainError::ForumNotFound(slug.to_owned()).into())
}

/// The slug as stored, which may differ in case from `slug`.
pub fn canonical_slug(conn: &Connection, slug: &str) -> Result<Option<String>> {
  Ok(
    conn
      .query_row(
        "SELECT slug FROM forums WHERE slug = ?1",
        params![slug],
        |row| row.get(0),
      )
      .optional()?,
  )
}

pub fn create(conn: &Connection, input: NewForum) -> Result<Forum> {
  let admin = users::canonical_nickname(conn, &input.user)?
    .ok_or_else(|| DomainError::UserNotFound(input.user.clone()))?;

  if let Some(existing) = find(conn, &input.slug)? {
    return Err(DomainError::DuplicateForumSlug(Box::new(existing)).into());
  }

  let inserted = conn.execute(
    "INSERT INTO forums (slug, title, admin) VALUES (?1, ?2, ?3)",
    params![input.slug, input.title, admin],
  );
  match inserted {
    Ok(_) => {}
    Err(e) if is_unique_violation(&e) => {
      tracing::warn!(slug = %input.slug, "forum insert raced a duplicate");
      let existing = get(conn, &input.slug)?;
      return Err(DomainError::DuplicateForumSlug(Box::new(existing)).into());
    }
    Err(e) => return Err(e.into()),
  }

  counters::forum_created(conn)?;

  Ok(Forum {
    slug:    input.slug,
    title:   input.title,
    user:    admin,
    threads: 0,
    posts:   0,
  })
}
