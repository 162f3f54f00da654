//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, and the closed enumerations as their canonical display strings.

use chrono::{DateTime, Utc};
use prism_core::{
  interaction::{
    Complexity, Interaction, InteractionStatus, InteractionType, Priority,
  },
  stage::LifecycleStage,
  tool::{CreatedVia, Tool, ToolCategory},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Column order constants ──────────────────────────────────────────────────

/// Column list matching [`RawTool::from_row`].
pub const TOOL_COLUMNS: &str = "tool_id, name, description, url, provider, \
   is_open_source, license, github_url, notes, category_id, stage, \
   auto_created, created_via, archived, created_at";

/// Column list matching [`RawInteraction::from_row`].
pub const INTERACTION_COLUMNS: &str =
  "interaction_id, source_tool_id, target_tool_id, interaction_type, stage, \
   description, technical_details, benefits, challenges, examples, \
   contact_person, organization, email, priority, complexity, status, \
   submitted_by, submitted_at, archived";

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `tools` row.
pub struct RawTool {
  pub tool_id:        String,
  pub name:           String,
  pub description:    Option<String>,
  pub url:            Option<String>,
  pub provider:       Option<String>,
  pub is_open_source: Option<bool>,
  pub license:        Option<String>,
  pub github_url:     Option<String>,
  pub notes:          Option<String>,
  pub category_id:    Option<String>,
  pub stage:          Option<String>,
  pub auto_created:   bool,
  pub created_via:    String,
  pub archived:       bool,
  pub created_at:     String,
}

impl RawTool {
  /// Read a row selected with [`TOOL_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      tool_id:        row.get(0)?,
      name:           row.get(1)?,
      description:    row.get(2)?,
      url:            row.get(3)?,
      provider:       row.get(4)?,
      is_open_source: row.get(5)?,
      license:        row.get(6)?,
      github_url:     row.get(7)?,
      notes:          row.get(8)?,
      category_id:    row.get(9)?,
      stage:          row.get(10)?,
      auto_created:   row.get(11)?,
      created_via:    row.get(12)?,
      archived:       row.get(13)?,
      created_at:     row.get(14)?,
    })
  }

  pub fn into_tool(self) -> Result<Tool> {
    Ok(Tool {
      tool_id:        decode_uuid(&self.tool_id)?,
      name:           self.name,
      description:    self.description,
      url:            self.url,
      provider:       self.provider,
      is_open_source: self.is_open_source,
      license:        self.license,
      github_url:     self.github_url,
      notes:          self.notes,
      category_id:    self
        .category_id
        .as_deref()
        .map(decode_uuid)
        .transpose()?,
      stage:          self
        .stage
        .as_deref()
        .map(|s| s.parse::<LifecycleStage>())
        .transpose()?,
      auto_created:   self.auto_created,
      created_via:    self.created_via.parse::<CreatedVia>()?,
      archived:       self.archived,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from an `interactions` row.
pub struct RawInteraction {
  pub interaction_id:    String,
  pub source_tool_id:    String,
  pub target_tool_id:    String,
  pub interaction_type:  String,
  pub stage:             String,
  pub description:       String,
  pub technical_details: Option<String>,
  pub benefits:          Option<String>,
  pub challenges:        Option<String>,
  pub examples:          Option<String>,
  pub contact_person:    Option<String>,
  pub organization:      Option<String>,
  pub email:             Option<String>,
  pub priority:          String,
  pub complexity:        String,
  pub status:            String,
  pub submitted_by:      Option<String>,
  pub submitted_at:      String,
  pub archived:          bool,
}

impl RawInteraction {
  /// Read a row selected with [`INTERACTION_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      interaction_id:    row.get(0)?,
      source_tool_id:    row.get(1)?,
      target_tool_id:    row.get(2)?,
      interaction_type:  row.get(3)?,
      stage:             row.get(4)?,
      description:       row.get(5)?,
      technical_details: row.get(6)?,
      benefits:          row.get(7)?,
      challenges:        row.get(8)?,
      examples:          row.get(9)?,
      contact_person:    row.get(10)?,
      organization:      row.get(11)?,
      email:             row.get(12)?,
      priority:          row.get(13)?,
      complexity:        row.get(14)?,
      status:            row.get(15)?,
      submitted_by:      row.get(16)?,
      submitted_at:      row.get(17)?,
      archived:          row.get(18)?,
    })
  }

  pub fn into_interaction(self) -> Result<Interaction> {
    Ok(Interaction {
      interaction_id:    decode_uuid(&self.interaction_id)?,
      source_tool_id:    decode_uuid(&self.source_tool_id)?,
      target_tool_id:    decode_uuid(&self.target_tool_id)?,
      interaction_type:  self.interaction_type.parse::<InteractionType>()?,
      stage:             self.stage.parse::<LifecycleStage>()?,
      description:       self.description,
      technical_details: self.technical_details,
      benefits:          self.benefits,
      challenges:        self.challenges,
      examples:          self.examples,
      contact_person:    self.contact_person,
      organization:      self.organization,
      email:             self.email,
      priority:          self.priority.parse::<Priority>()?,
      complexity:        self.complexity.parse::<Complexity>()?,
      status:            self.status.parse::<InteractionStatus>()?,
      submitted_by:      self.submitted_by,
      submitted_at:      decode_dt(&self.submitted_at)?,
      archived:          self.archived,
    })
  }
}

/// Raw values read directly from a `categories` row.
pub struct RawCategory {
  pub category_id: String,
  pub name:        String,
  pub description: Option<String>,
  pub stage:       Option<String>,
}

impl RawCategory {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      category_id: row.get(0)?,
      name:        row.get(1)?,
      description: row.get(2)?,
      stage:       row.get(3)?,
    })
  }

  pub fn into_category(self) -> Result<ToolCategory> {
    Ok(ToolCategory {
      category_id: decode_uuid(&self.category_id)?,
      name:        self.name,
      description: self.description,
      stage:       self
        .stage
        .as_deref()
        .map(|s| s.parse::<LifecycleStage>())
        .transpose()?,
    })
  }
}
