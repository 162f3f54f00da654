//! CSV download handlers.
//!
//! Exports cover the non-archived catalog and use the same column
//! vocabulary the importers accept.

use std::sync::Arc;

use axum::{
  extract::State,
  http::header,
  response::{IntoResponse, Response},
};
use prism_core::store::{CatalogStore, InteractionQuery};

use crate::error::ApiError;

fn attachment(filename: &str, body: String) -> Response {
  (
    [
      (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
      (
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{filename}\""),
      ),
    ],
    body,
  )
    .into_response()
}

/// `GET /export/tools/csv`
pub async fn tools<S>(
  State(store): State<Arc<S>>,
) -> Result<Response, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let tools = store.list_tools().await.map_err(ApiError::store)?;
  let body = prism_csv::tools_to_csv(&tools)?;
  Ok(attachment("tools.csv", body))
}

/// `GET /export/interactions/csv`
pub async fn interactions<S>(
  State(store): State<Arc<S>>,
) -> Result<Response, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let tools = store.list_tools().await.map_err(ApiError::store)?;
  let listing = store
    .search_interactions(&InteractionQuery::default())
    .await
    .map_err(ApiError::store)?;
  let body = prism_csv::interactions_to_csv(&tools, &listing.items)?;
  Ok(attachment("interactions.csv", body))
}
