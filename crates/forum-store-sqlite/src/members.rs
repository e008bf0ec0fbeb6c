//! The membership set: distinct (forum, user) pairs derived from thread and
//! post authorship.
//!
//! Ordering and cursor comparison both use `NOCASE` on the nickname, so a
//! page boundary means the same thing on every request.

use forum_core::{Error as DomainError, listing::UserQuery, user::User};
use rusqlite::{Connection, params};

use crate::{Result, encode::encode_limit, forums, users};

/// Idempotent insert. Callers pass canonical slug and nickname.
pub fn ensure(conn: &Connection, forum: &str, nickname: &str) -> Result<()> {
  conn.execute(
    "INSERT OR IGNORE INTO forum_users (forum, nickname) VALUES (?1, ?2)",
    params![forum, nickname],
  )?;
  Ok(())
}

/// [`ensure`] for caller-supplied names: both must resolve first.
pub fn ensure_checked(conn: &Connection, forum: &str, nickname: &str) -> Result<()> {
  let forum = forums::canonical_slug(conn, forum)?
    .ok_or_else(|| DomainError::ForumNotFound(forum.to_owned()))?;
  let nickname = users::canonical_nickname(conn, nickname)?
    .ok_or_else(|| DomainError::UserNotFound(nickname.to_owned()))?;
  ensure(conn, &forum, &nickname)
}

pub fn list(conn: &Connection, forum: &str, query: &UserQuery) -> Result<Vec<User>> {
  let (cmp, dir) = if query.desc { ("<", "DESC") } else { (">", "ASC") };
  let sql = format!(
    "SELECT u.nickname, u.fullname, u.email, u.about
       FROM forum_users fu
       JOIN users u ON u.nickname = fu.nickname
      WHERE fu.forum = ?1
        AND (?2 IS NULL OR fu.nickname {cmp} ?2 COLLATE NOCASE)
      ORDER BY fu.nickname COLLATE NOCASE {dir}
      LIMIT ?3"
  );

  let mut stmt = conn.prepare(&sql)?;
  let members = stmt
    .query_map(
      params![forum, query.since, encode_limit(query.limit)],
      users::map_user,
    )?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  if members.is_empty() && forums::canonical_slug(conn, forum)?.is_none() {
    return Err(DomainError::ForumNotFound(forum.to_owned()).into());
  }

  Ok(members)
}
