//! Handlers for `/interactions` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/interactions` | Filtered listing with visible/total counts |
//! | `POST`   | `/interactions` | Create; 409 on a duplicate natural key |
//! | `GET`    | `/interactions/{id}` | 404 if not found |
//! | `PATCH`  | `/interactions/{id}` | Partial update of non-key fields |
//! | `DELETE` | `/interactions/{id}` | Archive (soft delete) |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use prism_core::{
  interaction::{
    Complexity, Interaction, InteractionPatch, InteractionStatus,
    InteractionType, NewInteraction, Priority,
  },
  stage::LifecycleStage,
  store::{CatalogStore, InteractionListing, InteractionQuery},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Free-text filter over tool names, description, and technical details.
  pub text:             Option<String>,
  #[serde(rename = "type")]
  pub interaction_type: Option<InteractionType>,
  pub stage:            Option<LifecycleStage>,
  #[serde(default)]
  pub include_archived: bool,
}

/// `GET /interactions[?text=...][&type=...][&stage=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<InteractionListing>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = InteractionQuery {
    text:             params.text,
    interaction_type: params.interaction_type,
    stage:            params.stage,
    include_archived: params.include_archived,
  };

  let listing = store
    .search_interactions(&query)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(listing))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub source_tool_id:    Uuid,
  pub target_tool_id:    Uuid,
  pub interaction_type:  InteractionType,
  pub stage:             LifecycleStage,
  pub description:       String,
  pub technical_details: Option<String>,
  pub benefits:          Option<String>,
  pub challenges:        Option<String>,
  pub examples:          Option<String>,
  pub contact_person:    Option<String>,
  pub organization:      Option<String>,
  pub email:             Option<String>,
  #[serde(default)]
  pub priority:          Priority,
  #[serde(default)]
  pub complexity:        Complexity,
  #[serde(default)]
  pub status:            InteractionStatus,
  pub submitted_by:      Option<String>,
}

/// `POST /interactions` — the interaction-record form target.
///
/// Both endpoints must exist and differ; a natural-key match with an
/// existing interaction is a 409.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.source_tool_id == body.target_tool_id {
    return Err(ApiError::BadRequest(
      "source and target must be different tools".into(),
    ));
  }
  for id in [body.source_tool_id, body.target_tool_id] {
    if store.get_tool(id).await.map_err(ApiError::store)?.is_none() {
      return Err(ApiError::BadRequest(format!("unknown tool {id}")));
    }
  }
  if body.description.trim().is_empty() {
    return Err(ApiError::BadRequest("description must not be blank".into()));
  }

  let input = NewInteraction {
    technical_details: body.technical_details,
    benefits: body.benefits,
    challenges: body.challenges,
    examples: body.examples,
    contact_person: body.contact_person,
    organization: body.organization,
    email: body.email,
    priority: body.priority,
    complexity: body.complexity,
    status: body.status,
    submitted_by: body.submitted_by,
    ..NewInteraction::new(
      body.source_tool_id,
      body.target_tool_id,
      body.interaction_type,
      body.stage,
      body.description,
    )
  };

  if let Some(existing) = store
    .find_interaction_by_key(input.key())
    .await
    .map_err(ApiError::store)?
  {
    return Err(ApiError::Conflict(format!(
      "an interaction with this source, target, type, and stage already \
       exists ({})",
      existing.interaction_id
    )));
  }

  let interaction = store
    .add_interaction(input)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(interaction)))
}

// ─── Get / update / archive one ───────────────────────────────────────────────

/// `GET /interactions/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Interaction>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let interaction = store
    .get_interaction(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("interaction {id} not found")))?;
  Ok(Json(interaction))
}

/// `PATCH /interactions/{id}` — the natural-key fields are not editable;
/// archive and re-record to correct those.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<InteractionPatch>,
) -> Result<Json<Interaction>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if store
    .get_interaction(id)
    .await
    .map_err(ApiError::store)?
    .is_none()
  {
    return Err(ApiError::NotFound(format!("interaction {id} not found")));
  }

  let interaction = store
    .update_interaction(id, patch)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(interaction))
}

/// `DELETE /interactions/{id}` — soft delete.
pub async fn archive_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if store
    .get_interaction(id)
    .await
    .map_err(ApiError::store)?
    .is_none()
  {
    return Err(ApiError::NotFound(format!("interaction {id} not found")));
  }

  store
    .archive_interaction(id)
    .await
    .map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
