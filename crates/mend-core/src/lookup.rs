//! Name-based resolution of human-facing identifiers.
//!
//! Clients are addressed as `"First Last"` strings and triggers by name,
//! both matched case-insensitively. The lowercased forms computed here are
//! also what storage backends index.

use crate::{Error, Result};

/// Lowercase a name for case-insensitive comparison and indexing.
pub fn normalize(name: &str) -> String {
  name.to_lowercase()
}

/// A `"First Last"` client name, split and lowercased for matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FullName {
  pub first: String,
  pub last:  String,
}

impl FullName {
  /// Parse a full name. Exactly two space-separated, non-empty tokens are
  /// required; anything else is [`Error::MalformedName`].
  pub fn parse(full_name: &str) -> Result<Self> {
    let mut tokens = full_name.split(' ');
    match (tokens.next(), tokens.next(), tokens.next()) {
      (Some(first), Some(last), None) if !first.is_empty() && !last.is_empty() => {
        Ok(Self { first: normalize(first), last: normalize(last) })
      }
      _ => Err(Error::MalformedName(full_name.to_string())),
    }
  }
}
