//! The `ForumStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `forum-store-sqlite`).
//! Every mutating method runs as one atomic unit inside the backend: either
//! all of its effects (rows, counters, memberships) commit, or none do.

use std::future::Future;

use crate::{
  Classify,
  forum::{Forum, NewForum},
  listing::{PostQuery, ThreadQuery, ThreadRef, UserQuery},
  post::{NewPost, Post, PostDetails, Related},
  status::Status,
  thread::{NewThread, Thread, ThreadUpdate},
  user::{NewUser, User, UserUpdate},
  vote::NewVote,
};

/// Abstraction over a forum store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait ForumStore: Send + Sync {
  type Error: std::error::Error + Classify + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Fails with `DuplicateNickname` listing every clashing user when the
  /// nickname or email is taken.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    nickname: String,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn update_user(
    &self,
    nickname: String,
    update: UserUpdate,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  // ── Forums ────────────────────────────────────────────────────────────

  fn create_forum(
    &self,
    input: NewForum,
  ) -> impl Future<Output = Result<Forum, Self::Error>> + Send + '_;

  fn get_forum(
    &self,
    slug: String,
  ) -> impl Future<Output = Result<Forum, Self::Error>> + Send + '_;

  // ── Membership ────────────────────────────────────────────────────────

  /// Record that `nickname` participates in `forum`. Idempotent.
  fn ensure_member(
    &self,
    forum: String,
    nickname: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Users who created a thread or post in `forum`, ordered by nickname
  /// (case-insensitive).
  fn list_forum_users(
    &self,
    forum: String,
    query: UserQuery,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  // ── Threads ───────────────────────────────────────────────────────────

  fn create_thread(
    &self,
    forum: String,
    input: NewThread,
  ) -> impl Future<Output = Result<Thread, Self::Error>> + Send + '_;

  fn get_thread(
    &self,
    thread: ThreadRef,
  ) -> impl Future<Output = Result<Thread, Self::Error>> + Send + '_;

  fn update_thread(
    &self,
    thread: ThreadRef,
    update: ThreadUpdate,
  ) -> impl Future<Output = Result<Thread, Self::Error>> + Send + '_;

  fn list_forum_threads(
    &self,
    forum: String,
    query: ThreadQuery,
  ) -> impl Future<Output = Result<Vec<Thread>, Self::Error>> + Send + '_;

  // ── Posts ─────────────────────────────────────────────────────────────

  /// Insert a batch of posts into one thread, assigning ids and paths.
  ///
  /// The whole batch shares one creation timestamp and fails as a unit.
  fn create_posts(
    &self,
    thread: ThreadRef,
    posts: Vec<NewPost>,
  ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send + '_;

  fn get_post(
    &self,
    id: i64,
    related: Related,
  ) -> impl Future<Output = Result<PostDetails, Self::Error>> + Send + '_;

  /// Replace a post's message. An empty or identical message leaves the
  /// post (including its edited flag) unchanged.
  fn update_post(
    &self,
    id: i64,
    message: String,
  ) -> impl Future<Output = Result<Post, Self::Error>> + Send + '_;

  /// Read-only, cursor-bounded listing of a thread's posts.
  fn list_posts(
    &self,
    thread: ThreadRef,
    query: PostQuery,
  ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send + '_;

  // ── Votes ─────────────────────────────────────────────────────────────

  /// Cast or change a vote and return the thread with its updated score.
  fn vote(
    &self,
    thread: ThreadRef,
    vote: NewVote,
  ) -> impl Future<Output = Result<Thread, Self::Error>> + Send + '_;

  // ── Counters ──────────────────────────────────────────────────────────

  fn status(&self) -> impl Future<Output = Result<Status, Self::Error>> + Send + '_;

  /// Irreversibly delete every user, forum, thread, post, vote and
  /// membership, and zero all counters.
  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
