//! Core types and trait definitions for the mend health-tracking store.
//!
//! Entity types, the error taxonomy, the name-lookup layer, and the
//! [`HealthStore`](store::HealthStore) trait all live here. This crate knows
//! nothing about HTTP or about how records are persisted; backends and the
//! API layer both depend on it, it depends on neither.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod client;
pub mod entry;
pub mod error;
pub mod lookup;
pub mod store;
pub mod trigger;

pub use error::{Error, Result};
