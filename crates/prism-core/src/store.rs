//! The `CatalogStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `prism-store-sqlite`).
//! Higher layers (`prism-csv`, `prism-api`) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use serde::Serialize;
use uuid::Uuid;

use crate::{
  interaction::{
    Interaction, InteractionKey, InteractionPatch, InteractionType,
    NewInteraction,
  },
  stage::LifecycleStage,
  tool::{NewCategory, NewTool, Tool, ToolCategory, ToolPatch},
};

pub const DEFAULT_PAGE_SIZE: usize = 25;

// ─── Sorting ─────────────────────────────────────────────────────────────────

/// Sort key for the tool browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolSort {
  #[default]
  Name,
  Provider,
  /// Lifecycle position of the tool's stage; uncategorized tools sort last.
  Stage,
}

impl ToolSort {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Provider => "provider",
      Self::Stage => "stage",
    }
  }
}

impl std::fmt::Display for ToolSort {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for ToolSort {
  type Err = crate::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "name" => Ok(Self::Name),
      "provider" => Ok(Self::Provider),
      "stage" => Ok(Self::Stage),
      _ => Err(crate::Error::UnknownSortKey(s.trim().to_string())),
    }
  }
}

string_enum_serde!(ToolSort);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

impl SortOrder {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Asc => "asc",
      Self::Desc => "desc",
    }
  }
}

impl std::fmt::Display for SortOrder {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for SortOrder {
  type Err = crate::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "asc" => Ok(Self::Asc),
      "desc" => Ok(Self::Desc),
      _ => Err(crate::Error::UnknownSortOrder(s.trim().to_string())),
    }
  }
}

string_enum_serde!(SortOrder);

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`CatalogStore::search_tools`]. Filters combine with
/// logical AND; an empty filter set returns all non-archived tools.
#[derive(Debug, Clone)]
pub struct ToolQuery {
  /// Free-text filter over name, description, and provider.
  pub text:             Option<String>,
  /// Restrict to tools assigned to any of these stages.
  pub stages:           Vec<LifecycleStage>,
  /// `Some(true)` = open source only, `Some(false)` = closed only.
  pub open_source:      Option<bool>,
  /// `Some(true)` restricts to the curation backlog: tools with neither a
  /// stage nor a category assigned.
  pub uncategorized:    Option<bool>,
  pub include_archived: bool,
  pub sort:             ToolSort,
  pub order:            SortOrder,
  /// 1-based page number.
  pub page:             usize,
  pub per_page:         usize,
}

impl Default for ToolQuery {
  fn default() -> Self {
    Self {
      text: None,
      stages: Vec::new(),
      open_source: None,
      uncategorized: None,
      include_archived: false,
      sort: ToolSort::default(),
      order: SortOrder::default(),
      page: 1,
      per_page: DEFAULT_PAGE_SIZE,
    }
  }
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
  pub items:      Vec<T>,
  pub total:      usize,
  pub page:       usize,
  pub per_page:   usize,
  pub page_count: usize,
  pub has_next:   bool,
  pub has_prev:   bool,
}

impl<T> Page<T> {
  pub fn new(items: Vec<T>, total: usize, page: usize, per_page: usize) -> Self {
    let per_page = per_page.max(1);
    let page_count = if total == 0 { 1 } else { total.div_ceil(per_page) };
    Self {
      has_next: page < page_count,
      has_prev: page > 1,
      items,
      total,
      page,
      per_page,
      page_count,
    }
  }
}

/// Parameters for [`CatalogStore::search_interactions`].
#[derive(Debug, Clone, Default)]
pub struct InteractionQuery {
  /// Free-text filter over source/target tool names, description, and
  /// technical details.
  pub text:             Option<String>,
  pub interaction_type: Option<InteractionType>,
  pub stage:            Option<LifecycleStage>,
  pub include_archived: bool,
}

/// Matching interactions plus the running "visible of total" counts used
/// for filter feedback in the browser.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionListing {
  pub items:   Vec<Interaction>,
  pub visible: usize,
  pub total:   usize,
}

/// One seeded lifecycle-stage reference row.
#[derive(Debug, Clone, Serialize)]
pub struct StageRecord {
  pub name:        LifecycleStage,
  pub position:    u8,
  pub color:       String,
  pub description: String,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a PRISM catalog backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Stages ────────────────────────────────────────────────────────────

  /// The seeded lifecycle-stage reference rows, in position order.
  fn list_stages(
    &self,
  ) -> impl Future<Output = Result<Vec<StageRecord>, Self::Error>> + Send + '_;

  // ── Tools ─────────────────────────────────────────────────────────────

  /// Create and persist a new tool. The store assigns `tool_id` and
  /// `created_at`. Fails if another tool has the same normalised name.
  fn add_tool(
    &self,
    input: NewTool,
  ) -> impl Future<Output = Result<Tool, Self::Error>> + Send + '_;

  /// Retrieve a tool by id, archived or not. `None` if not found.
  fn get_tool(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Tool>, Self::Error>> + Send + '_;

  /// Look up a tool by name using the normalised key (trimmed,
  /// case-folded). This is the deduplication path used by CSV import.
  fn find_tool_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Tool>, Self::Error>> + Send + 'a;

  /// Apply a partial update and return the updated tool.
  fn update_tool(
    &self,
    id: Uuid,
    patch: ToolPatch,
  ) -> impl Future<Output = Result<Tool, Self::Error>> + Send + '_;

  /// Soft-delete a tool.
  fn archive_tool(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All non-archived tools, unpaginated — for graph assembly and export.
  fn list_tools(
    &self,
  ) -> impl Future<Output = Result<Vec<Tool>, Self::Error>> + Send + '_;

  /// Filtered, sorted, paginated tool browser query.
  fn search_tools<'a>(
    &'a self,
    query: &'a ToolQuery,
  ) -> impl Future<Output = Result<Page<Tool>, Self::Error>> + Send + 'a;

  // ── Categories ────────────────────────────────────────────────────────

  fn add_category(
    &self,
    input: NewCategory,
  ) -> impl Future<Output = Result<ToolCategory, Self::Error>> + Send + '_;

  fn list_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<ToolCategory>, Self::Error>> + Send + '_;

  // ── Interactions ──────────────────────────────────────────────────────

  /// Create and persist a new interaction with `submitted_at = now()`.
  ///
  /// Fails with a self-interaction error if source and target are the same
  /// tool, and with a duplicate error if an existing interaction matches
  /// the natural key.
  fn add_interaction(
    &self,
    input: NewInteraction,
  ) -> impl Future<Output = Result<Interaction, Self::Error>> + Send + '_;

  /// Retrieve an interaction by id, archived or not. `None` if not found.
  fn get_interaction(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Interaction>, Self::Error>> + Send + '_;

  /// Exact natural-key lookup, used for duplicate detection. Archived
  /// interactions do not count as duplicates.
  fn find_interaction_by_key(
    &self,
    key: InteractionKey,
  ) -> impl Future<Output = Result<Option<Interaction>, Self::Error>> + Send + '_;

  /// Apply a partial update and return the updated interaction.
  fn update_interaction(
    &self,
    id: Uuid,
    patch: InteractionPatch,
  ) -> impl Future<Output = Result<Interaction, Self::Error>> + Send + '_;

  /// Soft-delete an interaction.
  fn archive_interaction(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Filtered interaction listing with visible/total counts.
  fn search_interactions<'a>(
    &'a self,
    query: &'a InteractionQuery,
  ) -> impl Future<Output = Result<InteractionListing, Self::Error>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn page_metadata() {
    let page = Page::new(vec![1, 2, 3], 53, 2, 25);
    assert_eq!(page.page_count, 3);
    assert!(page.has_next);
    assert!(page.has_prev);

    let last = Page::<i32>::new(vec![], 53, 3, 25);
    assert!(!last.has_next);
    assert!(last.has_prev);
  }

  #[test]
  fn empty_result_is_one_page() {
    let page = Page::<i32>::new(vec![], 0, 1, 25);
    assert_eq!(page.page_count, 1);
    assert!(!page.has_next);
    assert!(!page.has_prev);
  }
}
