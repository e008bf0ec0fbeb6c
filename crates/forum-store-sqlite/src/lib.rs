//! SQLite backend for the forum store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Each operation group lives in its own
//! module as plain synchronous functions over a [`rusqlite::Connection`];
//! [`SqliteStore`] runs them inside transactions.

mod counters;
mod encode;
mod forums;
mod listing;
mod members;
mod posts;
mod schema;
mod store;
mod threads;
mod users;
mod votes;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
