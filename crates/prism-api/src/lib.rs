//! JSON REST API for the PRISM catalog.
//!
//! Exposes axum [`Router`]s backed by any
//! [`prism_core::store::CatalogStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = prism_api::router(store.clone());
//! ```

pub mod error;
pub mod exports;
pub mod graph;
pub mod interactions;
pub mod stages;
pub mod tools;
pub mod uploads;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use prism_core::store::CatalogStore;

pub use error::ApiError;

/// Build the `/api/v1` router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Reference data
    .route("/stages", get(stages::list::<S>))
    .route("/glossary", get(stages::glossary::<S>))
    // Tools
    .route("/tools", get(tools::list::<S>).post(tools::create::<S>))
    .route(
      "/tools/{id}",
      get(tools::get_one::<S>)
        .patch(tools::update_one::<S>)
        .delete(tools::archive_one::<S>),
    )
    // Interactions
    .route(
      "/interactions",
      get(interactions::list::<S>).post(interactions::create::<S>),
    )
    .route(
      "/interactions/{id}",
      get(interactions::get_one::<S>)
        .patch(interactions::update_one::<S>)
        .delete(interactions::archive_one::<S>),
    )
    // Visualization data
    .route("/graph", get(graph::handler::<S>))
    .with_state(store)
}

/// The full application router: the JSON API under `/api/v1` plus the CSV
/// upload and export endpoints.
pub fn router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/upload/tools/csv", post(uploads::tools::<S>))
    .route("/upload/interactions/csv", post(uploads::interactions::<S>))
    .route("/export/tools/csv", get(exports::tools::<S>))
    .route("/export/interactions/csv", get(exports::interactions::<S>))
    .with_state(store.clone())
    .nest("/api/v1", api_router(store))
}
