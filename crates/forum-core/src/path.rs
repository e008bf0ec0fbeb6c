//! Hierarchical post paths.
//!
//! A path lists post ids from the root of a thread down to and including a
//! post. Lexicographic order over paths is tree order: an ancestor sorts
//! immediately before its own subtree, and siblings sort by their own id.
//! Paths are assigned once at insertion and never rewritten.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The ancestry vector of a post. Never empty; every id is positive.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct PostPath(Vec<i64>);

impl PostPath {
  /// The path of a root post: `[id]`.
  pub fn root(id: i64) -> Self { Self(vec![id]) }

  /// The path of a new child of `self`: `self ++ [id]`.
  pub fn child(&self, id: i64) -> Self {
    let mut ids = Vec::with_capacity(self.0.len() + 1);
    ids.extend_from_slice(&self.0);
    ids.push(id);
    Self(ids)
  }

  /// Path for post `id` under an optional parent path.
  pub fn assign(parent: Option<&PostPath>, id: i64) -> Self {
    match parent {
      Some(p) => p.child(id),
      None => Self::root(id),
    }
  }

  /// Rebuild a path from stored ids, enforcing the path invariants.
  pub fn from_ids(ids: Vec<i64>) -> Result<Self> {
    if ids.is_empty() {
      return Err(Error::InvalidArgument("post path is empty".into()));
    }
    if let Some(bad) = ids.iter().find(|id| **id <= 0) {
      return Err(Error::InvalidArgument(format!(
        "post path contains non-positive id {bad}"
      )));
    }
    Ok(Self(ids))
  }

  pub fn ids(&self) -> &[i64] { &self.0 }

  /// Id of the thread root this path descends from.
  pub fn root_id(&self) -> i64 { self.0[0] }

  /// Id of the post this path belongs to.
  pub fn leaf_id(&self) -> i64 { self.0[self.0.len() - 1] }

  /// Id of the direct parent, `None` for roots.
  pub fn parent_id(&self) -> Option<i64> {
    self.0.len().checked_sub(2).map(|i| self.0[i])
  }

  pub fn depth(&self) -> usize { self.0.len() }

  /// True when `self` is a strict prefix of `other`.
  pub fn is_ancestor_of(&self, other: &PostPath) -> bool {
    self.0.len() < other.0.len() && other.0.starts_with(&self.0)
  }
}

impl TryFrom<Vec<i64>> for PostPath {
  type Error = Error;

  fn try_from(ids: Vec<i64>) -> Result<Self> { Self::from_ids(ids) }
}

impl From<PostPath> for Vec<i64> {
  fn from(path: PostPath) -> Self { path.0 }
}
