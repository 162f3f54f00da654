//! Multipart CSV upload handlers.
//!
//! Both endpoints expect a multipart form with a `file` field holding the
//! CSV bytes and answer with the [`prism_csv::ImportReport`] as JSON.

use std::sync::Arc;

use axum::{Json, extract::Multipart, extract::State};
use prism_core::store::CatalogStore;
use prism_csv::ImportReport;

use crate::error::ApiError;

async fn file_bytes(mut multipart: Multipart) -> Result<Vec<u8>, ApiError> {
  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| ApiError::BadRequest(e.to_string()))?
  {
    if field.name() == Some("file") {
      let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
      return Ok(bytes.to_vec());
    }
  }
  Err(ApiError::BadRequest("missing multipart field `file`".into()))
}

fn log_report(endpoint: &str, report: &ImportReport) {
  tracing::info!(
    endpoint,
    rows = report.rows,
    created = report.created,
    enriched = report.enriched,
    skipped = report.skipped,
    duplicates = report.duplicates,
    tools_auto_created = report.tools_auto_created,
    row_errors = report.errors.len(),
    "csv import finished"
  );
  for error in &report.errors {
    tracing::debug!(row = error.row, message = %error.message, "rejected row");
  }
}

/// `POST /upload/tools/csv`
pub async fn tools<S>(
  State(store): State<Arc<S>>,
  multipart: Multipart,
) -> Result<Json<ImportReport>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let data = file_bytes(multipart).await?;
  let report = prism_csv::import_tools(store.as_ref(), &data).await?;
  log_report("/upload/tools/csv", &report);
  Ok(Json(report))
}

/// `POST /upload/interactions/csv`
pub async fn interactions<S>(
  State(store): State<Arc<S>>,
  multipart: Multipart,
) -> Result<Json<ImportReport>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let data = file_bytes(multipart).await?;
  let report = prism_csv::import_interactions(store.as_ref(), &data).await?;
  log_report("/upload/interactions/csv", &report);
  Ok(Json(report))
}
