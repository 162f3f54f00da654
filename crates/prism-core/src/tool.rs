//! Tool — a cataloged research tool entry (the "exemplar tool").
//!
//! Tools are created by curators through the UI, by the tools CSV upload, or
//! implicitly when an interaction import references an unknown tool name.
//! They are never hard-deleted in the common path; the `archived` flag is the
//! deletion mechanism.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::Error, stage::LifecycleStage};

/// Normalised deduplication key for a tool name: trimmed and case-folded.
/// The stored `name` keeps display case; only matching is normalised.
pub fn name_key(name: &str) -> String { name.trim().to_lowercase() }

// ─── Creation channel ────────────────────────────────────────────────────────

/// How a tool record entered the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreatedVia {
  #[default]
  Ui,
  CsvImport,
  Discovery,
}

impl CreatedVia {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Ui => "UI",
      Self::CsvImport => "CSV Import",
      Self::Discovery => "Discovery",
    }
  }
}

impl fmt::Display for CreatedVia {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for CreatedVia {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "ui" => Ok(Self::Ui),
      "csv import" => Ok(Self::CsvImport),
      "discovery" => Ok(Self::Discovery),
      _ => Err(Error::UnknownCreatedVia(s.trim().to_string())),
    }
  }
}

string_enum_serde!(CreatedVia);

// ─── Tool ────────────────────────────────────────────────────────────────────

/// A cataloged research tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
  pub tool_id:        Uuid,
  pub name:           String,
  pub description:    Option<String>,
  pub url:            Option<String>,
  /// Provider or maintaining organization.
  pub provider:       Option<String>,
  /// `None` means unknown, not closed-source.
  pub is_open_source: Option<bool>,
  pub license:        Option<String>,
  pub github_url:     Option<String>,
  /// Curator notes.
  pub notes:          Option<String>,
  pub category_id:    Option<Uuid>,
  pub stage:          Option<LifecycleStage>,
  /// Materialised implicitly during interaction import rather than curated.
  pub auto_created:   bool,
  pub created_via:    CreatedVia,
  /// Soft delete; archived tools are hidden from default queries.
  pub archived:       bool,
  pub created_at:     DateTime<Utc>,
}

impl Tool {
  /// Pending manual curation after bulk import: neither stage nor category
  /// has been assigned yet.
  pub fn is_uncategorized(&self) -> bool {
    self.stage.is_none() && self.category_id.is_none()
  }
}

// ─── NewTool ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::CatalogStore::add_tool`].
/// `tool_id` and `created_at` are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewTool {
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
  pub auto_created:   bool,
  pub created_via:    CreatedVia,
}

impl NewTool {
  /// A manually curated tool with all optional fields unset.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      description: None,
      url: None,
      provider: None,
      is_open_source: None,
      license: None,
      github_url: None,
      notes: None,
      category_id: None,
      stage: None,
      auto_created: false,
      created_via: CreatedVia::Ui,
    }
  }

  /// A tool materialised implicitly during CSV import. Stage and category
  /// stay unset ("uncategorized") until a curator assigns them.
  pub fn auto_created(name: impl Into<String>) -> Self {
    Self {
      auto_created: true,
      created_via: CreatedVia::CsvImport,
      ..Self::new(name)
    }
  }
}

// ─── ToolPatch ───────────────────────────────────────────────────────────────

/// Partial update for a tool: `Some` fields are written, `None` fields are
/// left alone. Used by the curator edit form and by import enrichment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolPatch {
  pub name:           Option<String>,
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

impl ToolPatch {
  /// `true` when the patch would write nothing.
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.description.is_none()
      && self.url.is_none()
      && self.provider.is_none()
      && self.is_open_source.is_none()
      && self.license.is_none()
      && self.github_url.is_none()
      && self.notes.is_none()
      && self.category_id.is_none()
      && self.stage.is_none()
  }
}

// ─── ToolCategory ────────────────────────────────────────────────────────────

/// A grouping of tools within (at most) one lifecycle stage. `stage` is
/// nullable so CSV-originated tools can reference an uncategorised bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCategory {
  pub category_id: Uuid,
  pub name:        String,
  pub description: Option<String>,
  pub stage:       Option<LifecycleStage>,
}

/// Input to [`crate::store::CatalogStore::add_category`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
  pub name:        String,
  pub description: Option<String>,
  pub stage:       Option<LifecycleStage>,
}
