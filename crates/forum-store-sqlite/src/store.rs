//! [`SqliteStore`], the SQLite implementation of [`ForumStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{Transaction, TransactionBehavior};

use forum_core::{
  forum::{Forum, NewForum},
  listing::{PostQuery, ThreadQuery, ThreadRef, UserQuery},
  post::{NewPost, Post, PostDetails, Related},
  status::Status,
  store::ForumStore,
  thread::{NewThread, Thread, ThreadUpdate},
  user::{NewUser, User, UserUpdate},
  vote::NewVote,
};

use crate::{
  Error, Result, counters, forums, listing, members, posts, schema::SCHEMA,
  threads, users, votes,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A forum store backed by a single SQLite file.
///
/// Cloning is cheap; every clone shares one connection thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `f` in a deferred transaction so every statement sees one snapshot.
  async fn read<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        Ok(f(&tx))
      })
      .await?
  }

  /// Run `f` in an immediate transaction, committing only if it succeeds.
  /// On error the transaction is dropped, which rolls it back.
  async fn write<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = f(&tx);
        if out.is_ok() {
          tx.commit()?;
        }
        Ok(out)
      })
      .await?
  }
}

// ─── ForumStore impl ─────────────────────────────────────────────────────────

impl ForumStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<User> {
    let user = self.write(move |tx| users::create(tx, input)).await?;
    tracing::debug!(nickname = %user.nickname, "user created");
    Ok(user)
  }

  async fn get_user(&self, nickname: String) -> Result<User> {
    self.read(move |tx| users::get(tx, &nickname)).await
  }

  async fn update_user(&self, nickname: String, update: UserUpdate) -> Result<User> {
    self
      .write(move |tx| users::update(tx, &nickname, &update))
      .await
  }

  // ── Forums ────────────────────────────────────────────────────────────

  async fn create_forum(&self, input: NewForum) -> Result<Forum> {
    let forum = self.write(move |tx| forums::create(tx, input)).await?;
    tracing::debug!(slug = %forum.slug, admin = %forum.user, "forum created");
    Ok(forum)
  }

  async fn get_forum(&self, slug: String) -> Result<Forum> {
    self.read(move |tx| forums::get(tx, &slug)).await
  }

  // ── Membership ────────────────────────────────────────────────────────

  async fn ensure_member(&self, forum: String, nickname: String) -> Result<()> {
    self
      .write(move |tx| members::ensure_checked(tx, &forum, &nickname))
      .await
  }

  async fn list_forum_users(&self, forum: String, query: UserQuery) -> Result<Vec<User>> {
    self.read(move |tx| members::list(tx, &forum, &query)).await
  }

  // ── Threads ───────────────────────────────────────────────────────────

  async fn create_thread(&self, forum: String, input: NewThread) -> Result<Thread> {
    let now = Utc::now();
    let thread = self
      .write(move |tx| threads::create(tx, &forum, input, now))
      .await?;
    tracing::debug!(id = thread.id, forum = %thread.forum, "thread created");
    Ok(thread)
  }

  async fn get_thread(&self, thread: ThreadRef) -> Result<Thread> {
    self.read(move |tx| threads::get(tx, &thread)).await
  }

  async fn update_thread(&self, thread: ThreadRef, update: ThreadUpdate) -> Result<Thread> {
    self
      .write(move |tx| threads::update(tx, &thread, &update))
      .await
  }

  async fn list_forum_threads(
    &self,
    forum: String,
    query: ThreadQuery,
  ) -> Result<Vec<Thread>> {
    self
      .read(move |tx| threads::list_by_forum(tx, &forum, &query))
      .await
  }

  // ── Posts ─────────────────────────────────────────────────────────────

  async fn create_posts(&self, thread: ThreadRef, batch: Vec<NewPost>) -> Result<Vec<Post>> {
    let now = Utc::now();
    let created = self
      .write(move |tx| posts::create_batch(tx, &thread, batch, now))
      .await?;
    if let (Some(first), Some(last)) = (created.first(), created.last()) {
      tracing::debug!(
        thread = first.thread,
        count = created.len(),
        first = first.id,
        last = last.id,
        "posts created"
      );
    }
    Ok(created)
  }

  async fn get_post(&self, id: i64, related: Related) -> Result<PostDetails> {
    self.read(move |tx| posts::details(tx, id, related)).await
  }

  async fn update_post(&self, id: i64, message: String) -> Result<Post> {
    self
      .write(move |tx| posts::update_message(tx, id, message))
      .await
  }

  async fn list_posts(&self, thread: ThreadRef, query: PostQuery) -> Result<Vec<Post>> {
    self
      .read(move |tx| listing::list_posts(tx, &thread, &query))
      .await
  }

  // ── Votes ─────────────────────────────────────────────────────────────

  async fn vote(&self, thread: ThreadRef, vote: NewVote) -> Result<Thread> {
    let updated = self.write(move |tx| votes::cast(tx, &thread, &vote)).await?;
    tracing::debug!(thread = updated.id, votes = updated.votes, "vote recorded");
    Ok(updated)
  }

  // ── Counters ──────────────────────────────────────────────────────────

  async fn status(&self) -> Result<Status> {
    self.read(|tx| counters::snapshot(tx)).await
  }

  async fn clear(&self) -> Result<()> {
    self.write(|tx| counters::clear_all(tx)).await?;
    tracing::info!("store cleared");
    Ok(())
  }
}
