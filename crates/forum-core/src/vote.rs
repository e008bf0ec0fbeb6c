//! Votes — at most one per (author, thread), flipped or repeated in place.

use serde::{Deserialize, Serialize};

use crate::Error;

/// A single up- or down-vote. Serialised as `1` / `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Voice {
  Up,
  Down,
}

impl Voice {
  pub fn value(self) -> i32 {
    match self {
      Self::Up => 1,
      Self::Down => -1,
    }
  }

  /// Change in thread score when this voice replaces `previous`.
  ///
  /// | previous      | delta      |
  /// |---------------|------------|
  /// | none          | `v`        |
  /// | same voice    | `0`        |
  /// | opposite      | `2 * v`    |
  pub fn delta_from(self, previous: Option<Voice>) -> i32 {
    match previous {
      None => self.value(),
      Some(prev) if prev == self => 0,
      Some(_) => 2 * self.value(),
    }
  }
}

impl TryFrom<i32> for Voice {
  type Error = Error;

  fn try_from(value: i32) -> Result<Self, Error> {
    match value {
      1 => Ok(Self::Up),
      -1 => Ok(Self::Down),
      other => Err(Error::InvalidArgument(format!(
        "vote must be 1 or -1, got {other}"
      ))),
    }
  }
}

impl From<Voice> for i32 {
  fn from(voice: Voice) -> Self { voice.value() }
}

/// Input to [`crate::store::ForumStore::vote`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewVote {
  pub nickname: String,
  pub voice:    Voice,
}
