//! Core types and trait definitions for the threaded forum store.
//!
//! No database dependencies live here. Storage backends implement
//! [`store::ForumStore`]; callers depend on the trait and on the error
//! taxonomy in [`error`].

pub mod error;
pub mod forum;
pub mod listing;
pub mod path;
pub mod post;
pub mod status;
pub mod store;
pub mod thread;
pub mod user;
pub mod vote;

pub use error::{Classify, Error, ErrorKind, Result};
