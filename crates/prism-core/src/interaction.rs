//! Interaction — a documented connection between two tools.
//!
//! An interaction links a source tool to a target tool with a type and a
//! lifecycle stage. `(source, target, type, stage)` is the natural key used
//! for duplicate detection: no two interactions may collide on all four.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::Error, stage::LifecycleStage};

// ─── InteractionType ─────────────────────────────────────────────────────────

/// The mechanism connecting two tools. Closed enumeration; anything else is
/// a row-level validation error on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionType {
  ApiIntegration,
  DataExchange,
  MetadataExchange,
  FileFormatConversion,
  WorkflowIntegration,
  PluginExtension,
  DirectDatabaseConnection,
  WebService,
  CommandLineInterface,
  ImportExport,
  Other,
}

impl InteractionType {
  pub const ALL: [InteractionType; 11] = [
    Self::ApiIntegration,
    Self::DataExchange,
    Self::MetadataExchange,
    Self::FileFormatConversion,
    Self::WorkflowIntegration,
    Self::PluginExtension,
    Self::DirectDatabaseConnection,
    Self::WebService,
    Self::CommandLineInterface,
    Self::ImportExport,
    Self::Other,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::ApiIntegration => "API Integration",
      Self::DataExchange => "Data Exchange",
      Self::MetadataExchange => "Metadata Exchange",
      Self::FileFormatConversion => "File Format Conversion",
      Self::WorkflowIntegration => "Workflow Integration",
      Self::PluginExtension => "Plugin/Extension",
      Self::DirectDatabaseConnection => "Direct Database Connection",
      Self::WebService => "Web Service",
      Self::CommandLineInterface => "Command Line Interface",
      Self::ImportExport => "Import/Export",
      Self::Other => "Other",
    }
  }

  /// One-line definition used by the glossary endpoint.
  pub fn description(&self) -> &'static str {
    match self {
      Self::ApiIntegration => {
        "One tool drives another through a programmatic API."
      }
      Self::DataExchange => "Research data moves between the two tools.",
      Self::MetadataExchange => {
        "Descriptive metadata moves between the two tools."
      }
      Self::FileFormatConversion => {
        "One tool converts files into a format the other consumes."
      }
      Self::WorkflowIntegration => {
        "The tools participate in a shared automated workflow."
      }
      Self::PluginExtension => {
        "One tool runs inside the other as a plugin or extension."
      }
      Self::DirectDatabaseConnection => {
        "One tool reads or writes the other's database directly."
      }
      Self::WebService => {
        "The tools communicate through a hosted web service."
      }
      Self::CommandLineInterface => {
        "One tool invokes the other's command line interface."
      }
      Self::ImportExport => {
        "Manual or batch import/export of files between the tools."
      }
      Self::Other => "A connection that fits none of the defined categories.",
    }
  }
}

impl fmt::Display for InteractionType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for InteractionType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "api integration" => Ok(Self::ApiIntegration),
      "data exchange" => Ok(Self::DataExchange),
      "metadata exchange" => Ok(Self::MetadataExchange),
      "file format conversion" => Ok(Self::FileFormatConversion),
      "workflow integration" => Ok(Self::WorkflowIntegration),
      "plugin/extension" => Ok(Self::PluginExtension),
      "direct database connection" => Ok(Self::DirectDatabaseConnection),
      "web service" => Ok(Self::WebService),
      "command line interface" => Ok(Self::CommandLineInterface),
      "import/export" => Ok(Self::ImportExport),
      "other" => Ok(Self::Other),
      _ => Err(Error::UnknownInteractionType(s.trim().to_string())),
    }
  }
}

string_enum_serde!(InteractionType);

// ─── Triage enumerations ─────────────────────────────────────────────────────

/// Contributor-assessed priority of an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High,
}

impl Priority {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
    }
  }
}

impl fmt::Display for Priority {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Priority {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "low" => Ok(Self::Low),
      "medium" => Ok(Self::Medium),
      "high" => Ok(Self::High),
      _ => Err(Error::UnknownPriority(s.trim().to_string())),
    }
  }
}

string_enum_serde!(Priority);

/// Implementation complexity of an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Complexity {
  Simple,
  #[default]
  Moderate,
  Complex,
}

impl Complexity {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Simple => "simple",
      Self::Moderate => "moderate",
      Self::Complex => "complex",
    }
  }
}

impl fmt::Display for Complexity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Complexity {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "simple" => Ok(Self::Simple),
      "moderate" => Ok(Self::Moderate),
      "complex" => Ok(Self::Complex),
      _ => Err(Error::UnknownComplexity(s.trim().to_string())),
    }
  }
}

string_enum_serde!(Complexity);

/// Where the interaction sits on the road from idea to production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionStatus {
  #[default]
  Proposed,
  Pilot,
  Implemented,
  Deprecated,
}

impl InteractionStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Proposed => "proposed",
      Self::Pilot => "pilot",
      Self::Implemented => "implemented",
      Self::Deprecated => "deprecated",
    }
  }
}

impl fmt::Display for InteractionStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for InteractionStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "proposed" => Ok(Self::Proposed),
      "pilot" => Ok(Self::Pilot),
      "implemented" => Ok(Self::Implemented),
      "deprecated" => Ok(Self::Deprecated),
      _ => Err(Error::UnknownStatus(s.trim().to_string())),
    }
  }
}

string_enum_serde!(InteractionStatus);

// ─── Natural key ─────────────────────────────────────────────────────────────

/// The four fields treated as a natural key for duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InteractionKey {
  pub source_tool_id:   Uuid,
  pub target_tool_id:   Uuid,
  pub interaction_type: InteractionType,
  pub stage:            LifecycleStage,
}

// ─── Interaction ─────────────────────────────────────────────────────────────

/// A documented connection between two tools (source → target) of a specific
/// type, scoped to one lifecycle stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
  pub interaction_id:    Uuid,
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
  pub priority:          Priority,
  pub complexity:        Complexity,
  pub status:            InteractionStatus,
  pub submitted_by:      Option<String>,
  /// Server-assigned timestamp.
  pub submitted_at:      DateTime<Utc>,
  /// Soft delete; archived interactions are hidden from default queries.
  pub archived:          bool,
}

impl Interaction {
  pub fn key(&self) -> InteractionKey {
    InteractionKey {
      source_tool_id:   self.source_tool_id,
      target_tool_id:   self.target_tool_id,
      interaction_type: self.interaction_type,
      stage:            self.stage,
    }
  }
}

// ─── NewInteraction ──────────────────────────────────────────────────────────

/// Input to [`crate::store::CatalogStore::add_interaction`].
/// `interaction_id` and `submitted_at` are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewInteraction {
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
  pub priority:          Priority,
  pub complexity:        Complexity,
  pub status:            InteractionStatus,
  pub submitted_by:      Option<String>,
}

impl NewInteraction {
  /// Convenience constructor with all optional fields at their defaults.
  pub fn new(
    source_tool_id: Uuid,
    target_tool_id: Uuid,
    interaction_type: InteractionType,
    stage: LifecycleStage,
    description: impl Into<String>,
  ) -> Self {
    Self {
      source_tool_id,
      target_tool_id,
      interaction_type,
      stage,
      description: description.into(),
      technical_details: None,
      benefits: None,
      challenges: None,
      examples: None,
      contact_person: None,
      organization: None,
      email: None,
      priority: Priority::default(),
      complexity: Complexity::default(),
      status: InteractionStatus::default(),
      submitted_by: None,
    }
  }

  pub fn key(&self) -> InteractionKey {
    InteractionKey {
      source_tool_id:   self.source_tool_id,
      target_tool_id:   self.target_tool_id,
      interaction_type: self.interaction_type,
      stage:            self.stage,
    }
  }
}

// ─── InteractionPatch ────────────────────────────────────────────────────────

/// Partial update for the curation/edit form. The natural-key fields are
/// deliberately not patchable; correcting those means archiving and
/// re-recording the interaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionPatch {
  pub description:       Option<String>,
  pub technical_details: Option<String>,
  pub benefits:          Option<String>,
  pub challenges:        Option<String>,
  pub examples:          Option<String>,
  pub contact_person:    Option<String>,
  pub organization:      Option<String>,
  pub email:             Option<String>,
  pub priority:          Option<Priority>,
  pub complexity:        Option<Complexity>,
  pub status:            Option<InteractionStatus>,
  pub submitted_by:      Option<String>,
}

impl InteractionPatch {
  pub fn is_empty(&self) -> bool {
    self.description.is_none()
      && self.technical_details.is_none()
      && self.benefits.is_none()
      && self.challenges.is_none()
      && self.examples.is_none()
      && self.contact_person.is_none()
      && self.organization.is_none()
      && self.email.is_none()
      && self.priority.is_none()
      && self.complexity.is_none()
      && self.status.is_none()
      && self.submitted_by.is_none()
  }
}
