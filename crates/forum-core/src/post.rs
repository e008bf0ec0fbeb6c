//! Posts — nodes of a thread's discussion forest.
//!
//! Every post carries its [`PostPath`]; ordering, subtree selection and
//! pagination are all expressed in terms of that path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{forum::Forum, path::PostPath, thread::Thread, user::User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
  pub id:        i64,
  /// `None` for thread roots.
  pub parent:    Option<i64>,
  pub author:    String,
  pub forum:     String,
  pub thread:    i32,
  pub message:   String,
  /// Shared by every post created in the same batch.
  pub created:   DateTime<Utc>,
  #[serde(rename = "isEdited")]
  pub is_edited: bool,
  pub path:      PostPath,
}

/// One element of a batch passed to
/// [`crate::store::ForumStore::create_posts`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
  #[serde(default)]
  pub parent:  Option<i64>,
  pub author:  String,
  pub message: String,
}

/// Which related records to load alongside a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Related {
  pub author: bool,
  pub thread: bool,
  pub forum:  bool,
}

impl Related {
  /// Parse a comma-separated list such as `user,thread`. Unknown names are
  /// ignored.
  pub fn parse(list: &str) -> Self {
    let mut related = Self::default();
    for name in list.split(',').map(str::trim) {
      match name {
        "user" | "author" => related.author = true,
        "thread" => related.thread = true,
        "forum" => related.forum = true,
        _ => {}
      }
    }
    related
  }
}

/// A post together with whichever related records were requested.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetails {
  pub post:   Post,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub author: Option<User>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub thread: Option<Thread>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub forum:  Option<Forum>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn related_parses_known_names() {
    let r = Related::parse("user,forum");
    assert!(r.author && r.forum && !r.thread);
    assert_eq!(Related::parse(""), Related::default());
    assert_eq!(
      Related::parse("thread, bogus"),
      Related { thread: true, ..Default::default() }
    );
  }

  #[test]
  fn new_post_parent_defaults_to_root() {
    let p: NewPost =
      serde_json::from_str(r#"{"author":"a","message":"m"}"#).unwrap();
    assert_eq!(p.parent, None);
  }

  #[test]
  fn post_uses_wire_field_names() {
    let post = Post {
      id:        2,
      parent:    Some(1),
      author:    "a".into(),
      forum:     "f".into(),
      thread:    1,
      message:   "m".into(),
      created:   DateTime::<Utc>::UNIX_EPOCH,
      is_edited: false,
      path:      PostPath::root(1).child(2),
    };
    let v = serde_json::to_value(&post).unwrap();
    assert_eq!(v["isEdited"], false);
    assert_eq!(v["parent"], 1);
    assert_eq!(v["path"], serde_json::json!([1, 2]));
  }
}
