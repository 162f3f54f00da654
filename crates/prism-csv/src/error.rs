//! Error types for the CSV codec.

/// Structural failures that abort an upload before (or instead of) row
/// processing. Per-row problems are not errors; they land in
/// [`crate::ImportReport::errors`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The input could not be read as CSV at all.
  #[error("invalid CSV: {0}")]
  Csv(#[from] csv::Error),

  /// One or more required header columns are absent.
  #[error("missing required column(s): {0}")]
  MissingColumns(String),

  /// Writing an export failed.
  #[error("csv write failed: {0}")]
  Write(String),

  /// The backing store failed while reconciling rows.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error from a generic `CatalogStore`.
  pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
