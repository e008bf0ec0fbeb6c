//! User rows.

use forum_core::{
  Error as DomainError,
  user::{NewUser, User, UserUpdate},
};
use rusqlite::{Connection, OptionalExtension as _, Row, params};

use crate::{Result, counters, error::is_unique_violation};

pub fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    nickname: row.get(0)?,
    fullname: row.get(1)?,
    email:    row.get(2)?,
    about:    row.get(3)?,
  })
}

pub fn find(conn: &Connection, nickname: &str) -> Result<Option<User>> {
  Ok(
    conn
      .query_row(
        "SELECT nickname, fullname, email, about FROM users WHERE nickname = ?1",
        params![nickname],
        map_user,
      )
      .optional()?,
  )
}

pub fn get(conn: &Connection, nickname: &str) -> Result<User> {
  find(conn, nickname)?
    .ok_or_else(|| DomainError::UserNotFound(nickname.to_owned()).into())
}

/// The nickname as stored, which may differ in case from `nickname`.
pub fn canonical_nickname(
  conn: &Connection,
  nickname: &str,
) -> Result<Option<String>> {
  Ok(
    conn
      .query_row(
        "SELECT nickname FROM users WHERE nickname = ?1",
        params![nickname],
        |row| row.get(0),
      )
      .optional()?,
  )
}

/// Every user whose nickname or email equals the given ones.
fn clashing(conn: &Connection, nickname: &str, email: &str) -> Result<Vec<User>> {
  let mut stmt = conn.prepare(
    "SELECT nickname, fullname, email, about FROM users
      WHERE nickname = ?1 OR email = ?2
      ORDER BY nickname",
  )?;
  let users = stmt
    .query_map(params![nickname, email], map_user)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(users)
}

pub fn create(conn: &Connection, input: NewUser) -> Result<User> {
  let existing = clashing(conn, &input.nickname, &input.email)?;
  if !existing.is_empty() {
    return Err(DomainError::DuplicateNickname(existing).into());
  }

  let inserted = conn.execute(
    "INSERT INTO users (nickname, fullname, email, about) VALUES (?1, ?2, ?3, ?4)",
    params![input.nickname, input.fullname, input.email, input.about],
  );
  match inserted {
    Ok(_) => {}
    Err(e) if is_unique_violation(&e) => {
      tracing::warn!(nickname = %input.nickname, "user insert raced a duplicate");
      let existing = clashing(conn, &input.nickname, &input.email)?;
      return Err(DomainError::DuplicateNickname(existing).into());
    }
    Err(e) => return Err(e.into()),
  }

  counters::user_created(conn)?;

  Ok(User {
    nickname: input.nickname,
    fullname: input.fullname,
    email:    input.email,
    about:    input.about,
  })
}

pub fn update(conn: &Connection, nickname: &str, update: &UserUpdate) -> Result<User> {
  let mut user = get(conn, nickname)?;
  if update.is_empty() {
    return Ok(user);
  }

  if !update.email.is_empty() {
    let taken: bool = conn
      .query_row(
        "SELECT 1 FROM users WHERE email = ?1 AND nickname != ?2",
        params![update.email, user.nickname],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false);
    if taken {
      return Err(DomainError::DuplicateEmail(update.email.clone()).into());
    }
  }

  update.apply(&mut user);
  let updated = conn.execute(
    "UPDATE users SET fullname = ?2, email = ?3, about = ?4 WHERE nickname = ?1",
    params![user.nickname, user.fullname, user.email, user.about],
  );
  match updated {
    Ok(_) => Ok(user),
    Err(e) if is_unique_violation(&e) => {
      Err(DomainError::DuplicateEmail(update.email.clone()).into())
    }
    Err(e) => Err(e.into()),
  }
}
