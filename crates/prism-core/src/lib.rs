//! Core types and trait definitions for the PRISM tool-interaction catalog.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

/// Implement `Serialize`/`Deserialize` for a closed string enumeration in
/// terms of its `as_str`/`FromStr` pair, so the wire form is always the
/// canonical display string and parsing stays case-insensitive.
macro_rules! string_enum_serde {
  ($ty:ty) => {
    impl serde::Serialize for $ty {
      fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
      where
        S: serde::Serializer,
      {
        serializer.serialize_str(self.as_str())
      }
    }

    impl<'de> serde::Deserialize<'de> for $ty {
      fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
      where
        D: serde::Deserializer<'de>,
      {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
      }
    }
  };
}

pub mod error;
pub mod glossary;
pub mod graph;
pub mod interaction;
pub mod stage;
pub mod store;
pub mod tool;

pub use error::{Error, Result};
