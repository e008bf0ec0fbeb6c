//! Users — forum participants, identified by a case-insensitive nickname.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub nickname: String,
  pub fullname: String,
  pub email:    String,
  pub about:    String,
}

/// Input to [`crate::store::ForumStore::create_user`].
#[derive(Debug, Clone)]
pub struct NewUser {
  pub nickname: String,
  pub fullname: String,
  pub email:    String,
  pub about:    String,
}

/// Profile changes. Empty strings leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
  #[serde(default)]
  pub fullname: String,
  #[serde(default)]
  pub email:    String,
  #[serde(default)]
  pub about:    String,
}

impl UserUpdate {
  pub fn is_empty(&self) -> bool {
    self.fullname.is_empty() && self.email.is_empty() && self.about.is_empty()
  }

  /// Apply the non-empty fields to `user`.
  pub fn apply(&self, user: &mut User) {
    if !self.fullname.is_empty() {
      user.fullname.clone_from(&self.fullname);
    }
    if !self.email.is_empty() {
      user.email.clone_from(&self.email);
    }
    if !self.about.is_empty() {
      user.about.clone_from(&self.about);
    }
  }
}
