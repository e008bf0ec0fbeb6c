//! `forum-admin`: maintenance commands for a forum SQLite store.
//!
//! Reads `forum.toml` (or the path given with `--config`) and `FORUM_*`
//! environment variables, opens the store, runs one subcommand and prints
//! its result as JSON.
//!
//! ```text
//! forum-admin status
//! forum-admin posts my-thread --sort parent_tree --limit 10
//! FORUM_STORE_PATH=/tmp/forum.db forum-admin clear --yes
//! ```

mod settings;

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use forum_core::{
  listing::{PostQuery, SortMode, ThreadRef, UserQuery},
  store::ForumStore,
};
use forum_store_sqlite::SqliteStore;
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{AdminConfig, expand_tilde};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Forum store administration")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "forum.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Create the store file and schema if they do not exist yet.
  Init,

  /// Print the global counters.
  Status,

  /// Delete every user, forum, thread, post and vote.
  Clear {
    /// Confirm the wipe. Nothing is deleted without it.
    #[arg(long)]
    yes: bool,
  },

  /// List a thread's posts.
  Posts {
    /// Thread id or slug.
    thread: String,

    /// One of `flat`, `tree`, `parent_tree`.
    #[arg(long, default_value = "flat")]
    sort: SortMode,

    /// Id of the last post already seen.
    #[arg(long)]
    since: Option<i64>,

    #[arg(long)]
    desc: bool,

    /// Maximum number of posts (roots for `parent_tree`); 0 for all.
    #[arg(long, default_value_t = 100)]
    limit: u32,
  },

  /// List the users active in a forum.
  Users {
    /// Forum slug.
    forum: String,

    /// Nickname of the last user already seen.
    #[arg(long)]
    since: Option<String>,

    #[arg(long)]
    desc: bool,

    #[arg(long, default_value_t = 100)]
    limit: u32,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = AdminConfig::load(&cli.config)?;

  let store_path = expand_tilde(&cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command {
    Command::Init => {
      tracing::info!(path = ?store_path, "store ready");
      print_json(&store.status().await.context("failed to read status")?)
    }

    Command::Status => {
      print_json(&store.status().await.context("failed to read status")?)
    }

    Command::Clear { yes } => {
      if !yes {
        bail!("refusing to clear {store_path:?} without --yes");
      }
      store.clear().await.context("failed to clear store")?;
      print_json(&store.status().await.context("failed to read status")?)
    }

    Command::Posts { thread, sort, since, desc, limit } => {
      let thread = ThreadRef::parse(&thread);
      let posts = store
        .list_posts(thread.clone(), PostQuery { sort, since, desc, limit })
        .await
        .with_context(|| format!("failed to list posts of thread {thread}"))?;
      print_json(&posts)
    }

    Command::Users { forum, since, desc, limit } => {
      let users = store
        .list_forum_users(forum.clone(), UserQuery { since, desc, limit })
        .await
        .with_context(|| format!("failed to list users of forum {forum:?}"))?;
      print_json(&users)
    }
  }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
  let out = serde_json::to_string_pretty(value).context("failed to encode JSON")?;
  println!("{out}");
  Ok(())
}
