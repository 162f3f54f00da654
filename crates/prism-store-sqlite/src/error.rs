//! Error type for `prism-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] prism_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("tool not found: {0}")]
  ToolNotFound(Uuid),

  #[error("interaction not found: {0}")]
  InteractionNotFound(Uuid),

  /// A tool with the same normalised name already exists.
  #[error("tool name already cataloged: {0:?}")]
  DuplicateToolName(String),

  /// An interaction with the same natural key already exists.
  #[error("interaction already recorded: {0}")]
  DuplicateInteraction(Uuid),

  #[error("an interaction cannot connect a tool to itself")]
  SelfInteraction,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
