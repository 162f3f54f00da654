//! The 12-stage MaLDReTH research data lifecycle.
//!
//! Stage names are a closed enumeration and positions 0–11 are a total
//! rendering order. Stages are reference data: seeded into storage once at
//! initialisation and rarely touched thereafter.

use std::{fmt, str::FromStr};

use crate::error::Error;

/// One canonical phase of the research data lifecycle.
///
/// Declared in lifecycle order, so the discriminant doubles as the
/// rendering position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LifecycleStage {
  Conceptualise,
  Plan,
  Fund,
  Collect,
  Process,
  Analyse,
  Store,
  Publish,
  Preserve,
  Share,
  Access,
  Transform,
}

impl LifecycleStage {
  /// All stages in lifecycle order.
  pub const ALL: [LifecycleStage; 12] = [
    Self::Conceptualise,
    Self::Plan,
    Self::Fund,
    Self::Collect,
    Self::Process,
    Self::Analyse,
    Self::Store,
    Self::Publish,
    Self::Preserve,
    Self::Share,
    Self::Access,
    Self::Transform,
  ];

  /// The canonical uppercase stage name.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Conceptualise => "CONCEPTUALISE",
      Self::Plan => "PLAN",
      Self::Fund => "FUND",
      Self::Collect => "COLLECT",
      Self::Process => "PROCESS",
      Self::Analyse => "ANALYSE",
      Self::Store => "STORE",
      Self::Publish => "PUBLISH",
      Self::Preserve => "PRESERVE",
      Self::Share => "SHARE",
      Self::Access => "ACCESS",
      Self::Transform => "TRANSFORM",
    }
  }

  /// Ordinal 0–11; unique and total over the 12 stages.
  pub fn position(&self) -> u8 { *self as u8 }

  /// Display color hint for visualizations.
  pub fn color(&self) -> &'static str {
    match self {
      Self::Conceptualise => "#4e79a7",
      Self::Plan => "#a0cbe8",
      Self::Fund => "#f28e2b",
      Self::Collect => "#ffbe7d",
      Self::Process => "#59a14f",
      Self::Analyse => "#8cd17d",
      Self::Store => "#b6992d",
      Self::Publish => "#f1ce63",
      Self::Preserve => "#499894",
      Self::Share => "#86bcb6",
      Self::Access => "#e15759",
      Self::Transform => "#ff9d9a",
    }
  }

  /// One-line stage definition used by the glossary endpoint.
  pub fn description(&self) -> &'static str {
    match self {
      Self::Conceptualise => {
        "Formulate the initial research idea and define the data requirements."
      }
      Self::Plan => {
        "Design the research project and draft the data management plan."
      }
      Self::Fund => {
        "Acquire the financial resources needed to carry out the project."
      }
      Self::Collect => {
        "Gather new data or acquire existing data for the project."
      }
      Self::Process => {
        "Clean, transform, and prepare collected data for analysis."
      }
      Self::Analyse => {
        "Derive insights and results from the processed data."
      }
      Self::Store => {
        "Keep working data safe and accessible during the project."
      }
      Self::Publish => {
        "Release findings and supporting data for others to consume."
      }
      Self::Preserve => {
        "Ensure data remains usable and understandable over the long term."
      }
      Self::Share => {
        "Make data available to collaborators and the wider community."
      }
      Self::Access => {
        "Control and facilitate the discovery and retrieval of shared data."
      }
      Self::Transform => {
        "Create new datasets by reworking existing ones, starting the cycle \
         again."
      }
    }
  }
}

impl fmt::Display for LifecycleStage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for LifecycleStage {
  type Err = Error;

  /// Trim + case-insensitive, so "Preserve" and "PRESERVE" are the same
  /// stage and typo-duplicates cannot enter the catalog.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let key = s.trim().to_uppercase();
    match key.as_str() {
      "CONCEPTUALISE" => Ok(Self::Conceptualise),
      "PLAN" => Ok(Self::Plan),
      "FUND" => Ok(Self::Fund),
      "COLLECT" => Ok(Self::Collect),
      "PROCESS" => Ok(Self::Process),
      "ANALYSE" => Ok(Self::Analyse),
      "STORE" => Ok(Self::Store),
      "PUBLISH" => Ok(Self::Publish),
      "PRESERVE" => Ok(Self::Preserve),
      "SHARE" => Ok(Self::Share),
      "ACCESS" => Ok(Self::Access),
      "TRANSFORM" => Ok(Self::Transform),
      _ => Err(Error::UnknownStage(s.trim().to_string())),
    }
  }
}

string_enum_serde!(LifecycleStage);
