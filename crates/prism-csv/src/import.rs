//! Reconciliation loops for tool and interaction uploads.

use csv::ReaderBuilder;
use prism_core::{
  interaction::NewInteraction,
  store::CatalogStore,
  tool::{NewTool, Tool, ToolPatch},
};
use serde::Serialize;

use crate::{
  Error, Result,
  rows::{HeaderMap, InteractionRow, ToolRow, strip_bom},
};

// ─── Report ──────────────────────────────────────────────────────────────────

/// One rejected row. `row` is the 1-based line number in the uploaded file,
/// counting the header line.
#[derive(Debug, Clone, Serialize)]
pub struct RowError {
  pub row:     usize,
  pub message: String,
}

/// Outcome of one upload, returned as the upload-endpoint response body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
  /// Data rows seen (header excluded).
  pub rows:               usize,
  pub created:            usize,
  /// Existing tools that gained at least one previously-empty field.
  pub enriched:           usize,
  /// Rows that matched an existing record and carried nothing new.
  pub skipped:            usize,
  /// Rows whose natural key matched an existing interaction.
  pub duplicates:         usize,
  /// Tools materialised because an interaction row named them.
  pub tools_auto_created: usize,
  pub errors:             Vec<RowError>,
}

fn reader(data: &[u8]) -> csv::Reader<&[u8]> {
  ReaderBuilder::new()
    .trim(csv::Trim::All)
    .flexible(true)
    .from_reader(strip_bom(data))
}

// ─── Tool import ─────────────────────────────────────────────────────────────

/// Import a tools CSV: new names are created, known names are enriched.
///
/// Enrichment only ever fills fields that are currently empty — an upload
/// never overwrites curated data.
pub async fn import_tools<S: CatalogStore>(
  store: &S,
  data: &[u8],
) -> Result<ImportReport> {
  let mut rdr = reader(data);
  let headers = HeaderMap::from_headers(rdr.headers()?);
  headers.require(ToolRow::REQUIRED)?;

  let mut report = ImportReport::default();

  for (i, record) in rdr.records().enumerate() {
    // Line 1 is the header.
    let line = i + 2;
    report.rows += 1;

    let record = match record {
      Ok(record) => record,
      Err(e) => {
        report.errors.push(RowError { row: line, message: e.to_string() });
        continue;
      }
    };
    let row = match ToolRow::parse(&headers, &record) {
      Ok(row) => row,
      Err(message) => {
        report.errors.push(RowError { row: line, message });
        continue;
      }
    };

    match store
      .find_tool_by_name(&row.name)
      .await
      .map_err(Error::store)?
    {
      Some(existing) => {
        let patch = enrichment_patch(&existing, &row);
        if patch.is_empty() {
          report.skipped += 1;
        } else {
          store
            .update_tool(existing.tool_id, patch)
            .await
            .map_err(Error::store)?;
          report.enriched += 1;
        }
      }
      None => {
        let input = NewTool {
          description: row.description,
          url: row.url,
          provider: row.provider,
          is_open_source: row.is_open_source,
          license: row.license,
          github_url: row.github_url,
          notes: row.notes,
          ..NewTool::auto_created(row.name)
        };
        store.add_tool(input).await.map_err(Error::store)?;
        report.created += 1;
      }
    }
  }

  Ok(report)
}

/// The subset of `row` that lands in fields `existing` has not filled yet.
fn enrichment_patch(existing: &Tool, row: &ToolRow) -> ToolPatch {
  fn fill(
    current: &Option<String>,
    incoming: &Option<String>,
  ) -> Option<String> {
    match current {
      None => incoming.clone(),
      Some(_) => None,
    }
  }

  ToolPatch {
    description: fill(&existing.description, &row.description),
    url: fill(&existing.url, &row.url),
    provider: fill(&existing.provider, &row.provider),
    is_open_source: existing.is_open_source.is_none().then(|| row.is_open_source).flatten(),
    license: fill(&existing.license, &row.license),
    github_url: fill(&existing.github_url, &row.github_url),
    notes: fill(&existing.notes, &row.notes),
    ..Default::default()
  }
}

// ─── Interaction import ──────────────────────────────────────────────────────

/// Import an interactions CSV.
///
/// Tool names are resolved against the catalog by normalised name; unknown
/// names are materialised as uncategorized auto-created tools. Rows whose
/// natural key matches an existing interaction are counted as duplicates,
/// not errors.
pub async fn import_interactions<S: CatalogStore>(
  store: &S,
  data: &[u8],
) -> Result<ImportReport> {
  let mut rdr = reader(data);
  let headers = HeaderMap::from_headers(rdr.headers()?);
  headers.require(InteractionRow::REQUIRED)?;

  let mut report = ImportReport::default();

  for (i, record) in rdr.records().enumerate() {
    let line = i + 2;
    report.rows += 1;

    let record = match record {
      Ok(record) => record,
      Err(e) => {
        report.errors.push(RowError { row: line, message: e.to_string() });
        continue;
      }
    };
    let row = match InteractionRow::parse(&headers, &record) {
      Ok(row) => row,
      Err(message) => {
        report.errors.push(RowError { row: line, message });
        continue;
      }
    };

    let source = resolve_or_create(store, &row.source_tool, &mut report).await?;
    let target = resolve_or_create(store, &row.target_tool, &mut report).await?;

    if source.tool_id == target.tool_id {
      report.errors.push(RowError {
        row:     line,
        message: format!(
          "source and target are the same tool ({})",
          source.name
        ),
      });
      continue;
    }

    let input = NewInteraction {
      technical_details: row.technical_details,
      benefits: row.benefits,
      challenges: row.challenges,
      examples: row.examples,
      contact_person: row.contact_person,
      organization: row.organization,
      email: row.email,
      priority: row.priority,
      complexity: row.complexity,
      status: row.status,
      submitted_by: row.submitted_by,
      ..NewInteraction::new(
        source.tool_id,
        target.tool_id,
        row.interaction_type,
        row.stage,
        row.description,
      )
    };

    if store
      .find_interaction_by_key(input.key())
      .await
      .map_err(Error::store)?
      .is_some()
    {
      report.duplicates += 1;
      continue;
    }

    store.add_interaction(input).await.map_err(Error::store)?;
    report.created += 1;
  }

  Ok(report)
}

async fn resolve_or_create<S: CatalogStore>(
  store: &S,
  name: &str,
  report: &mut ImportReport,
) -> Result<Tool> {
  if let Some(tool) = store.find_tool_by_name(name).await.map_err(Error::store)?
  {
    return Ok(tool);
  }

  let tool = store
    .add_tool(NewTool::auto_created(name))
    .await
    .map_err(Error::store)?;
  report.tools_auto_created += 1;
  Ok(tool)
}

#[cfg(test)]
mod tests {
  use prism_core::{
    stage::LifecycleStage,
    store::{CatalogStore, InteractionQuery},
    tool::CreatedVia,
  };
  use prism_store_sqlite::SqliteStore;

  use super::*;

  async fn store() -> SqliteStore {
    SqliteStore::open_in_memory()
      .await
      .expect("in-memory store")
  }

  const INTERACTION_HEADER: &str = "Source Tool,Target Tool,Interaction Type,\
Lifecycle Stage,Description";

  // ── Tool import ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn new_tools_are_created() {
    let s = store().await;
    let csv = "name,provider,license\nZenodo,CERN,\nGitHub,,MIT\n";

    let report = import_tools(&s, csv.as_bytes()).await.unwrap();
    assert_eq!(report.rows, 2);
    assert_eq!(report.created, 2);
    assert!(report.errors.is_empty());

    let zenodo = s.find_tool_by_name("zenodo").await.unwrap().unwrap();
    assert_eq!(zenodo.provider.as_deref(), Some("CERN"));
    assert!(zenodo.license.is_none());
    assert_eq!(zenodo.created_via, CreatedVia::CsvImport);
  }

  #[tokio::test]
  async fn reimport_is_idempotent() {
    let s = store().await;
    let csv = "name,provider\nZenodo,CERN\n";

    import_tools(&s, csv.as_bytes()).await.unwrap();
    let second = import_tools(&s, csv.as_bytes()).await.unwrap();

    assert_eq!(second.created, 0);
    assert_eq!(second.enriched, 0);
    assert_eq!(second.skipped, 1);
  }

  #[tokio::test]
  async fn enrichment_fills_only_empty_fields() {
    let s = store().await;
    // First pass leaves the license blank.
    import_tools(&s, "name,license,provider\nZenodo,,CERN\n".as_bytes())
      .await
      .unwrap();
    // Second pass supplies a license and a conflicting provider.
    let report = import_tools(
      &s,
      "name,license,provider\nZenodo,MIT,NotCERN\n".as_bytes(),
    )
    .await
    .unwrap();

    assert_eq!(report.enriched, 1);
    assert_eq!(report.created, 0);

    let zenodo = s.find_tool_by_name("Zenodo").await.unwrap().unwrap();
    assert_eq!(zenodo.license.as_deref(), Some("MIT"));
    // The curated provider was not overwritten.
    assert_eq!(zenodo.provider.as_deref(), Some("CERN"));
  }

  #[tokio::test]
  async fn blank_name_is_a_row_error() {
    let s = store().await;
    let csv = "name\nZenodo\n\"  \"\n";

    let report = import_tools(&s, csv.as_bytes()).await.unwrap();
    assert_eq!(report.created, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].row, 3);
  }

  #[tokio::test]
  async fn missing_name_column_aborts_the_upload() {
    let s = store().await;
    let err = import_tools(&s, "title\nZenodo\n".as_bytes())
      .await
      .unwrap_err();
    assert!(matches!(err, Error::MissingColumns(_)));
  }

  #[tokio::test]
  async fn bom_and_header_case_are_tolerated() {
    let s = store().await;
    let csv = b"\xef\xbb\xbfNAME,Provider\nZenodo,CERN\n";

    let report = import_tools(&s, csv).await.unwrap();
    assert_eq!(report.created, 1);
  }

  // ── Interaction import ────────────────────────────────────────────────────

  #[tokio::test]
  async fn unknown_tool_names_are_auto_created() {
    let s = store().await;
    let csv = format!(
      "{INTERACTION_HEADER}\n\
       GitHub,Zenodo,Data Exchange,PRESERVE,Release archiving\n"
    );

    let report = import_interactions(&s, csv.as_bytes()).await.unwrap();
    assert_eq!(report.created, 1);
    assert_eq!(report.tools_auto_created, 2);

    let github = s.find_tool_by_name("GitHub").await.unwrap().unwrap();
    assert!(github.auto_created);
    assert!(github.stage.is_none());
    assert!(github.category_id.is_none());
    assert_eq!(github.created_via, CreatedVia::CsvImport);
  }

  #[tokio::test]
  async fn duplicate_rows_in_one_file_store_once() {
    let s = store().await;
    let csv = format!(
      "{INTERACTION_HEADER}\n\
       GitHub,Zenodo,Data Exchange,PRESERVE,Release archiving\n\
       GitHub,Zenodo,Data Exchange,PRESERVE,Release archiving again\n"
    );

    let report = import_interactions(&s, csv.as_bytes()).await.unwrap();
    assert_eq!(report.created, 1);
    assert_eq!(report.duplicates, 1);
    assert!(report.errors.is_empty());

    let listing = s
      .search_interactions(&InteractionQuery::default())
      .await
      .unwrap();
    assert_eq!(listing.total, 1);
  }

  #[tokio::test]
  async fn duplicates_across_uploads_are_detected() {
    let s = store().await;
    let csv = format!(
      "{INTERACTION_HEADER}\n\
       GitHub,Zenodo,Data Exchange,PRESERVE,Release archiving\n"
    );

    import_interactions(&s, csv.as_bytes()).await.unwrap();
    let second = import_interactions(&s, csv.as_bytes()).await.unwrap();

    assert_eq!(second.created, 0);
    assert_eq!(second.duplicates, 1);
    // Both tools already exist by now.
    assert_eq!(second.tools_auto_created, 0);
  }

  #[tokio::test]
  async fn invalid_enum_value_fails_the_row_not_the_batch() {
    let s = store().await;
    let csv = format!(
      "{INTERACTION_HEADER}\n\
       GitHub,Zenodo,Telepathy,PRESERVE,Nonsense\n\
       GitHub,Zenodo,Data Exchange,PRESERVE,Release archiving\n"
    );

    let report = import_interactions(&s, csv.as_bytes()).await.unwrap();
    assert_eq!(report.rows, 2);
    assert_eq!(report.created, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].row, 2);
    assert!(report.errors[0].message.contains("Telepathy"));

    let listing = s
      .search_interactions(&InteractionQuery::default())
      .await
      .unwrap();
    assert_eq!(listing.total, 1);
  }

  #[tokio::test]
  async fn self_interaction_row_is_rejected() {
    let s = store().await;
    // Name matching is normalised, so these resolve to the same tool.
    let csv = format!(
      "{INTERACTION_HEADER}\n\
       GitHub,github,API Integration,PUBLISH,Self link\n"
    );

    let report = import_interactions(&s, csv.as_bytes()).await.unwrap();
    assert_eq!(report.created, 0);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].message.contains("same tool"));
  }

  #[tokio::test]
  async fn optional_triage_cells_parse_or_default() {
    let s = store().await;
    let csv = format!(
      "{INTERACTION_HEADER},Priority,Complexity,Status\n\
       GitHub,Zenodo,Data Exchange,PRESERVE,Release archiving,high,simple,\n"
    );

    import_interactions(&s, csv.as_bytes()).await.unwrap();
    let listing = s
      .search_interactions(&InteractionQuery::default())
      .await
      .unwrap();
    let stored = &listing.items[0];
    assert_eq!(stored.priority.as_str(), "high");
    assert_eq!(stored.complexity.as_str(), "simple");
    // Blank status falls back to the default.
    assert_eq!(stored.status.as_str(), "proposed");
    assert_eq!(stored.stage, LifecycleStage::Preserve);
  }
}
