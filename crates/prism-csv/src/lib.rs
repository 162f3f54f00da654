//! CSV import/export codec for the PRISM catalog.
//!
//! Imports reconcile uploaded rows against an existing catalog through any
//! [`prism_core::store::CatalogStore`]: tools are matched by normalised name
//! and enriched rather than duplicated, interactions are deduplicated by
//! their natural key, and unknown tool names are materialised as
//! auto-created tools. Pure rows-in/report-out; no HTTP or database
//! dependencies of its own.
//!
//! Structural problems (unreadable CSV, a missing required header) fail the
//! whole upload; anything wrong with an individual row is collected into the
//! [`ImportReport`] and never aborts the batch.

pub mod error;
mod export;
mod import;
mod rows;

pub use error::{Error, Result};
pub use export::{interactions_to_csv, tools_to_csv};
pub use import::{ImportReport, RowError, import_interactions, import_tools};
