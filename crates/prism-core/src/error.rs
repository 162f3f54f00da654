//! Error types for `prism-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown lifecycle stage: {0:?}")]
  UnknownStage(String),

  #[error("unknown interaction type: {0:?}")]
  UnknownInteractionType(String),

  #[error("unknown priority: {0:?}")]
  UnknownPriority(String),

  #[error("unknown complexity: {0:?}")]
  UnknownComplexity(String),

  #[error("unknown status: {0:?}")]
  UnknownStatus(String),

  #[error("unknown creation channel: {0:?}")]
  UnknownCreatedVia(String),

  #[error("unknown sort key: {0:?}")]
  UnknownSortKey(String),

  #[error("unknown sort order: {0:?}")]
  UnknownSortOrder(String),

  #[error("tool not found: {0}")]
  ToolNotFound(Uuid),

  #[error("interaction not found: {0}")]
  InteractionNotFound(Uuid),

  #[error("category not found: {0}")]
  CategoryNotFound(Uuid),

  #[error("an interaction cannot connect a tool to itself")]
  SelfInteraction,

  #[error("interaction already recorded: {0}")]
  DuplicateInteraction(Uuid),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
