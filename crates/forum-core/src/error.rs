//! Error types for `forum-core`.
//!
//! Every failure a store reports belongs to one [`ErrorKind`]. Transport
//! layers map kinds to their own status codes; the store never does.

use thiserror::Error;

use crate::{forum::Forum, listing::ThreadRef, thread::Thread, user::User};

#[derive(Debug, Error)]
pub enum Error {
  /// A post in a batch names a parent that is not in the target thread.
  #[error("parent post {0} not found in thread")]
  ParentNotFound(i64),

  #[error("author not found: {0:?}")]
  AuthorNotFound(String),

  #[error("forum not found: {0:?}")]
  ForumNotFound(String),

  #[error("thread not found: {0}")]
  ThreadNotFound(ThreadRef),

  #[error("user not found: {0:?}")]
  UserNotFound(String),

  #[error("post not found: {0}")]
  PostNotFound(i64),

  /// Carries the forum already holding the slug.
  #[error("forum slug {:?} is already taken", .0.slug)]
  DuplicateForumSlug(Box<Forum>),

  /// Carries the thread already holding the slug.
  #[error("thread slug {:?} is already taken", .0.slug)]
  DuplicateThreadSlug(Box<Thread>),

  /// Carries every user clashing on nickname or email.
  #[error("nickname or email is already taken by {} user(s)", .0.len())]
  DuplicateNickname(Vec<User>),

  #[error("email {0:?} is already taken")]
  DuplicateEmail(String),

  #[error("invalid argument: {0}")]
  InvalidArgument(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse classification of an error, independent of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  Conflict,
  InvalidArgument,
  /// Store failure or a constraint violation nothing else explains.
  Internal,
}

/// Implemented by every error a [`crate::store::ForumStore`] can return.
pub trait Classify {
  fn kind(&self) -> ErrorKind;
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      // A foreign parent reference is a conflict with the thread being
      // posted into, not a lookup miss.
      Self::ParentNotFound(_) => ErrorKind::Conflict,
      Self::AuthorNotFound(_)
      | Self::ForumNotFound(_)
      | Self::ThreadNotFound(_)
      | Self::UserNotFound(_)
      | Self::PostNotFound(_) => ErrorKind::NotFound,
      Self::DuplicateForumSlug(_)
      | Self::DuplicateThreadSlug(_)
      | Self::DuplicateNickname(_)
      | Self::DuplicateEmail(_) => ErrorKind::Conflict,
      Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parent_not_found_is_a_conflict() {
    assert_eq!(Error::ParentNotFound(7).kind(), ErrorKind::Conflict);
  }

  #[test]
  fn lookups_are_not_found() {
    assert_eq!(Error::AuthorNotFound("a".into()).kind(), ErrorKind::NotFound);
    assert_eq!(
      Error::ThreadNotFound(ThreadRef::Slug("s".into())).kind(),
      ErrorKind::NotFound
    );
    assert_eq!(Error::PostNotFound(1).kind(), ErrorKind::NotFound);
  }

  #[test]
  fn duplicates_are_conflicts() {
    assert_eq!(Error::DuplicateNickname(vec![]).kind(), ErrorKind::Conflict);
    assert_eq!(
      Error::DuplicateEmail("a@b.c".into()).kind(),
      ErrorKind::Conflict
    );
  }

  #[test]
  fn thread_ref_renders_in_message() {
    let err = Error::ThreadNotFound(ThreadRef::Id(42));
    assert_eq!(err.to_string(), "thread not found: 42");
  }
}
