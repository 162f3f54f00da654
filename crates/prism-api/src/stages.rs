//! Handlers for the reference-data endpoints: `/stages` and `/glossary`.

use std::sync::Arc;

use axum::{Json, extract::State};
use prism_core::{
  glossary,
  interaction::InteractionType,
  store::{CatalogStore, StageRecord},
};
use serde::Serialize;

use crate::error::ApiError;

/// `GET /api/v1/stages` — the 12 lifecycle stages in position order.
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<StageRecord>>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let stages = store.list_stages().await.map_err(ApiError::store)?;
  Ok(Json(stages))
}

// ─── Glossary ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TypeEntry {
  pub name:        InteractionType,
  pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Glossary {
  pub stages:            Vec<StageRecord>,
  pub interaction_types: Vec<TypeEntry>,
  pub terms:             &'static [glossary::GlossaryEntry],
}

/// `GET /api/v1/glossary` — stage and interaction-type definitions plus the
/// standalone MaLDReTH terms.
pub async fn glossary<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Glossary>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let stages = store.list_stages().await.map_err(ApiError::store)?;
  let interaction_types = InteractionType::ALL
    .into_iter()
    .map(|ty| TypeEntry { name: ty, description: ty.description() })
    .collect();

  Ok(Json(Glossary {
    stages,
    interaction_types,
    terms: glossary::TERMS,
  }))
}
