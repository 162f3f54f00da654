//! Handler for `GET /graph` — the visualization dataset.

use std::sync::Arc;

use axum::{Json, extract::State};
use prism_core::{
  graph::{self, Graph},
  store::{CatalogStore, InteractionQuery},
};

use crate::error::ApiError;

/// `GET /graph` — stage and tool nodes plus interaction edges over the full
/// non-archived catalog.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Graph>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let tools = store.list_tools().await.map_err(ApiError::store)?;
  let listing = store
    .search_interactions(&InteractionQuery::default())
    .await
    .map_err(ApiError::store)?;

  Ok(Json(graph::assemble(&tools, &listing.items)))
}
