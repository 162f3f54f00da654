//! Row-level parsing: header resolution and per-row field extraction.
//!
//! Header lookup is case-insensitive and whitespace-tolerant, so
//! `"Source Tool"`, `"source tool"`, and `" SOURCE TOOL "` all resolve to
//! the same column. A parse failure here is a row message (a `String`), not
//! a structural [`crate::Error`] — the caller records it and moves on.

use csv::StringRecord;
use prism_core::{
  interaction::{Complexity, InteractionType, Priority, InteractionStatus},
  stage::LifecycleStage,
};

use crate::{Error, Result};

/// UTF-8 byte order mark some spreadsheet exports prepend.
const BOM: &[u8] = b"\xef\xbb\xbf";

pub fn strip_bom(data: &[u8]) -> &[u8] {
  data.strip_prefix(BOM).unwrap_or(data)
}

// ─── Header map ──────────────────────────────────────────────────────────────

/// Maps normalised column names to positions in the header record.
pub struct HeaderMap {
  columns: Vec<(String, usize)>,
}

fn normalise(name: &str) -> String { name.trim().to_lowercase() }

impl HeaderMap {
  pub fn from_headers(headers: &StringRecord) -> Self {
    let columns = headers
      .iter()
      .enumerate()
      .map(|(idx, name)| (normalise(name), idx))
      .collect();
    Self { columns }
  }

  /// Fail the upload unless every named column is present.
  pub fn require(&self, names: &[&str]) -> Result<()> {
    let missing: Vec<&str> = names
      .iter()
      .copied()
      .filter(|name| {
        let want = normalise(name);
        !self.columns.iter().any(|(have, _)| *have == want)
      })
      .collect();

    if missing.is_empty() {
      Ok(())
    } else {
      Err(Error::MissingColumns(missing.join(", ")))
    }
  }

  /// The trimmed cell under `name`, or `None` when the column is absent,
  /// the row is short, or the cell is blank.
  pub fn field<'r>(
    &self,
    record: &'r StringRecord,
    name: &str,
  ) -> Option<&'r str> {
    let want = normalise(name);
    let (_, idx) = self.columns.iter().find(|(have, _)| *have == want)?;
    record.get(*idx).map(str::trim).filter(|cell| !cell.is_empty())
  }

  fn owned(&self, record: &StringRecord, name: &str) -> Option<String> {
    self.field(record, name).map(str::to_owned)
  }
}

// ─── Tool rows ───────────────────────────────────────────────────────────────

/// One parsed row of a tools upload.
#[derive(Debug)]
pub struct ToolRow {
  pub name:           String,
  pub description:    Option<String>,
  pub url:            Option<String>,
  pub provider:       Option<String>,
  pub is_open_source: Option<bool>,
  pub license:        Option<String>,
  pub github_url:     Option<String>,
  pub notes:          Option<String>,
}

impl ToolRow {
  pub const REQUIRED: &'static [&'static str] = &["name"];

  pub fn parse(
    headers: &HeaderMap,
    record: &StringRecord,
  ) -> Result<Self, String> {
    let name = headers
      .field(record, "name")
      .ok_or_else(|| "blank tool name".to_string())?
      .to_owned();

    let is_open_source = headers
      .field(record, "is_open_source")
      .map(parse_bool)
      .transpose()?;

    Ok(Self {
      name,
      description: headers.owned(record, "description"),
      url: headers.owned(record, "url"),
      provider: headers.owned(record, "provider"),
      is_open_source,
      license: headers.owned(record, "license"),
      github_url: headers.owned(record, "github_url"),
      notes: headers.owned(record, "notes"),
    })
  }
}

fn parse_bool(cell: &str) -> Result<bool, String> {
  match cell.trim().to_lowercase().as_str() {
    "true" | "yes" | "1" => Ok(true),
    "false" | "no" | "0" => Ok(false),
    other => Err(format!("unrecognised boolean {other:?}")),
  }
}

// ─── Interaction rows ────────────────────────────────────────────────────────

/// One parsed row of an interactions upload. Enum cells are validated here;
/// an out-of-vocabulary value is a row message.
#[derive(Debug)]
pub struct InteractionRow {
  pub source_tool:       String,
  pub target_tool:       String,
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

impl InteractionRow {
  pub const REQUIRED: &'static [&'static str] = &[
    "Source Tool",
    "Target Tool",
    "Interaction Type",
    "Lifecycle Stage",
    "Description",
  ];

  pub fn parse(
    headers: &HeaderMap,
    record: &StringRecord,
  ) -> Result<Self, String> {
    let source_tool = headers
      .field(record, "Source Tool")
      .ok_or_else(|| "blank source tool".to_string())?
      .to_owned();
    let target_tool = headers
      .field(record, "Target Tool")
      .ok_or_else(|| "blank target tool".to_string())?
      .to_owned();

    let interaction_type = headers
      .field(record, "Interaction Type")
      .ok_or_else(|| "blank interaction type".to_string())?
      .parse::<InteractionType>()
      .map_err(|e| e.to_string())?;
    let stage = headers
      .field(record, "Lifecycle Stage")
      .ok_or_else(|| "blank lifecycle stage".to_string())?
      .parse::<LifecycleStage>()
      .map_err(|e| e.to_string())?;

    let description = headers
      .field(record, "Description")
      .ok_or_else(|| "blank description".to_string())?
      .to_owned();

    let priority = headers
      .field(record, "Priority")
      .map(str::parse::<Priority>)
      .transpose()
      .map_err(|e| e.to_string())?
      .unwrap_or_default();
    let complexity = headers
      .field(record, "Complexity")
      .map(str::parse::<Complexity>)
      .transpose()
      .map_err(|e| e.to_string())?
      .unwrap_or_default();
    let status = headers
      .field(record, "Status")
      .map(str::parse::<InteractionStatus>)
      .transpose()
      .map_err(|e| e.to_string())?
      .unwrap_or_default();

    Ok(Self {
      source_tool,
      target_tool,
      interaction_type,
      stage,
      description,
      technical_details: headers.owned(record, "Technical Details"),
      benefits: headers.owned(record, "Benefits"),
      challenges: headers.owned(record, "Challenges"),
      examples: headers.owned(record, "Examples"),
      contact_person: headers.owned(record, "Contact Person"),
      organization: headers.owned(record, "Organization"),
      email: headers.owned(record, "Email"),
      priority,
      complexity,
      status,
      submitted_by: headers.owned(record, "Submitted By"),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(cells: &[&str]) -> StringRecord {
    StringRecord::from(cells.to_vec())
  }

  #[test]
  fn header_lookup_is_case_insensitive() {
    let headers =
      HeaderMap::from_headers(&record(&[" NAME ", "Description", "URL"]));
    headers.require(&["name"]).unwrap();

    let row = record(&["Zenodo", "  Repository  ", ""]);
    assert_eq!(headers.field(&row, "Name"), Some("Zenodo"));
    assert_eq!(headers.field(&row, "description"), Some("Repository"));
    // Blank cells read as absent.
    assert_eq!(headers.field(&row, "url"), None);
  }

  #[test]
  fn missing_required_column_is_structural() {
    let headers = HeaderMap::from_headers(&record(&["Source Tool"]));
    let err = headers.require(InteractionRow::REQUIRED).unwrap_err();
    assert!(matches!(err, Error::MissingColumns(_)));
    assert!(err.to_string().contains("Target Tool"));
  }

  #[test]
  fn bool_cells_accept_the_spreadsheet_vocabulary() {
    for yes in ["true", "YES", "1"] {
      assert_eq!(parse_bool(yes), Ok(true));
    }
    for no in ["false", "No", "0"] {
      assert_eq!(parse_bool(no), Ok(false));
    }
    assert!(parse_bool("maybe").is_err());
  }

  #[test]
  fn bom_is_stripped() {
    assert_eq!(strip_bom(b"\xef\xbb\xbfname"), b"name");
    assert_eq!(strip_bom(b"name"), b"name");
  }

  #[test]
  fn interaction_row_rejects_unknown_type() {
    let headers = HeaderMap::from_headers(&record(&[
      "Source Tool",
      "Target Tool",
      "Interaction Type",
      "Lifecycle Stage",
      "Description",
    ]));
    let row = record(&["GitHub", "Zenodo", "Telepathy", "PRESERVE", "x"]);
    let err = InteractionRow::parse(&headers, &row).unwrap_err();
    assert!(err.contains("Telepathy"));
  }
}
