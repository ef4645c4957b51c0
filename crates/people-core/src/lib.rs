//! Core types and trait definitions for the people record store.
//!
//! This crate is deliberately free of database dependencies. The SQLite
//! backend and the CLI both depend on it.

// We intentionally use native `async fn` in traits.
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod record;
pub mod store;

pub use error::{Error, Result};
