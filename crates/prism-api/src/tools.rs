//! Handlers for `/tools` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/tools` | Filtered, sorted, paginated browser query |
//! | `POST`   | `/tools` | Create; 409 on a duplicate name |
//! | `GET`    | `/tools/{id}` | 404 if not found |
//! | `PATCH`  | `/tools/{id}` | Curator edit; body is a partial update |
//! | `DELETE` | `/tools/{id}` | Archive (soft delete) |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use prism_core::{
  stage::LifecycleStage,
  store::{
    CatalogStore, DEFAULT_PAGE_SIZE, Page, SortOrder, ToolQuery, ToolSort,
  },
  tool::{NewTool, Tool, ToolPatch},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Free-text filter over name, description, and provider.
  pub text:             Option<String>,
  /// Comma-separated stage names, e.g. `PRESERVE,SHARE`.
  pub stages:           Option<String>,
  pub open_source:      Option<bool>,
  pub uncategorized:    Option<bool>,
  #[serde(default)]
  pub include_archived: bool,
  pub sort:             Option<ToolSort>,
  pub order:            Option<SortOrder>,
  pub page:             Option<usize>,
  pub per_page:         Option<usize>,
}

/// `GET /tools[?text=...][&stages=...][&open_source=...][&page=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Page<Tool>>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let stages = params
    .stages
    .as_deref()
    .map(parse_stage_set)
    .transpose()?
    .unwrap_or_default();

  let query = ToolQuery {
    text: params.text,
    stages,
    open_source: params.open_source,
    uncategorized: params.uncategorized,
    include_archived: params.include_archived,
    sort: params.sort.unwrap_or_default(),
    order: params.order.unwrap_or_default(),
    page: params.page.unwrap_or(1).max(1),
    per_page: params.per_page.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
  };

  let page = store.search_tools(&query).await.map_err(ApiError::store)?;
  Ok(Json(page))
}

fn parse_stage_set(raw: &str) -> Result<Vec<LifecycleStage>, ApiError> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|s| {
      s.parse::<LifecycleStage>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
    })
    .collect()
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name:           String,
  pub description:    Option<String>,
  pub url:            Option<String>,
  pub provider:       Option<String>,
  pub is_open_source: Option<bool>,
  pub license:        Option<String>,
  pub github_url:     Option<String>,
  pub notes:          Option<String>,
  pub category_id:    Option<Uuid>,
  pub stage:          Option<LifecycleStage>,
}

/// `POST /tools` — create a curated tool. 409 if the (normalised) name is
/// already taken.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("tool name must not be blank".into()));
  }
  if store
    .find_tool_by_name(&body.name)
    .await
    .map_err(ApiError::store)?
    .is_some()
  {
    return Err(ApiError::Conflict(format!(
      "a tool named {:?} already exists",
      body.name
    )));
  }

  let input = NewTool {
    description: body.description,
    url: body.url,
    provider: body.provider,
    is_open_source: body.is_open_source,
    license: body.license,
    github_url: body.github_url,
    notes: body.notes,
    category_id: body.category_id,
    stage: body.stage,
    ..NewTool::new(body.name)
  };
  let tool = store.add_tool(input).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(tool)))
}

// ─── Get / update / archive one ───────────────────────────────────────────────

/// `GET /tools/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Tool>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let tool = store
    .get_tool(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("tool {id} not found")))?;
  Ok(Json(tool))
}

/// `PATCH /tools/{id}` — body is a [`ToolPatch`]; absent fields are left
/// unchanged.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<ToolPatch>,
) -> Result<Json<Tool>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if store
    .get_tool(id)
    .await
    .map_err(ApiError::store)?
    .is_none()
  {
    return Err(ApiError::NotFound(format!("tool {id} not found")));
  }

  // A rename is subject to the same name uniqueness as creation.
  if let Some(name) = &patch.name
    && let Some(existing) = store
      .find_tool_by_name(name)
      .await
      .map_err(ApiError::store)?
    && existing.tool_id != id
  {
    return Err(ApiError::Conflict(format!(
      "a tool named {name:?} already exists"
    )));
  }

  let tool = store
    .update_tool(id, patch)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(tool))
}

/// `DELETE /tools/{id}` — soft delete.
pub async fn archive_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if store
    .get_tool(id)
    .await
    .map_err(ApiError::store)?
    .is_none()
  {
    return Err(ApiError::NotFound(format!("tool {id} not found")));
  }

  store.archive_tool(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
