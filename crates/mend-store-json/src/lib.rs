//! JSON-file backend for the mend health store.
//!
//! An embedded document store: named tables of schemaless records, all
//! persisted in a single JSON file that is rewritten on every mutation.
//! The whole store sits behind one writer lock, which is what makes the
//! scan-based business-key allocator safe when callers overlap.

mod store;

pub mod tables;

pub use mend_core::{Error, Result};
pub use store::JsonStore;
