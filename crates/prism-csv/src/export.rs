//! Catalog dumps in the same column vocabulary the importers accept, so an
//! export can be re-imported losslessly.

use std::collections::HashMap;

use csv::Writer;
use prism_core::{interaction::Interaction, tool::Tool};
use uuid::Uuid;

use crate::{Error, Result};

const INTERACTION_HEADERS: [&str; 16] = [
  "Source Tool",
  "Target Tool",
  "Interaction Type",
  "Lifecycle Stage",
  "Description",
  "Technical Details",
  "Benefits",
  "Challenges",
  "Examples",
  "Contact Person",
  "Organization",
  "Email",
  "Priority",
  "Complexity",
  "Status",
  "Submitted By",
];

const TOOL_HEADERS: [&str; 8] = [
  "name",
  "description",
  "url",
  "provider",
  "is_open_source",
  "license",
  "github_url",
  "notes",
];

fn finish(wtr: Writer<Vec<u8>>) -> Result<String> {
  let bytes = wtr
    .into_inner()
    .map_err(|e| Error::Write(e.to_string()))?;
  String::from_utf8(bytes).map_err(|e| Error::Write(e.to_string()))
}

fn opt(cell: &Option<String>) -> &str {
  cell.as_deref().unwrap_or("")
}

/// Render interactions as CSV. `tools` supplies the id → name mapping;
/// interactions referencing a tool outside it are left out so the file
/// never contains unresolvable names.
pub fn interactions_to_csv(
  tools: &[Tool],
  interactions: &[Interaction],
) -> Result<String> {
  let names: HashMap<Uuid, &str> =
    tools.iter().map(|t| (t.tool_id, t.name.as_str())).collect();

  let mut wtr = Writer::from_writer(Vec::new());
  wtr.write_record(INTERACTION_HEADERS)?;

  for interaction in interactions {
    let (Some(&source), Some(&target)) = (
      names.get(&interaction.source_tool_id),
      names.get(&interaction.target_tool_id),
    ) else {
      continue;
    };

    wtr.write_record([
      source,
      target,
      interaction.interaction_type.as_str(),
      interaction.stage.as_str(),
      interaction.description.as_str(),
      opt(&interaction.technical_details),
      opt(&interaction.benefits),
      opt(&interaction.challenges),
      opt(&interaction.examples),
      opt(&interaction.contact_person),
      opt(&interaction.organization),
      opt(&interaction.email),
      interaction.priority.as_str(),
      interaction.complexity.as_str(),
      interaction.status.as_str(),
      opt(&interaction.submitted_by),
    ])?;
  }

  finish(wtr)
}

/// Render the tool table as CSV under the tool-import headers.
pub fn tools_to_csv(tools: &[Tool]) -> Result<String> {
  let mut wtr = Writer::from_writer(Vec::new());
  wtr.write_record(TOOL_HEADERS)?;

  for tool in tools {
    let open_source = match tool.is_open_source {
      Some(true) => "true",
      Some(false) => "false",
      None => "",
    };
    wtr.write_record([
      tool.name.as_str(),
      opt(&tool.description),
      opt(&tool.url),
      opt(&tool.provider),
      open_source,
      opt(&tool.license),
      opt(&tool.github_url),
      opt(&tool.notes),
    ])?;
  }

  finish(wtr)
}

#[cfg(test)]
mod tests {
  use prism_core::store::{CatalogStore, InteractionQuery};
  use prism_store_sqlite::SqliteStore;

  use super::*;
  use crate::import::{import_interactions, import_tools};

  #[tokio::test]
  async fn export_then_import_preserves_the_tuples() {
    let first = SqliteStore::open_in_memory().await.unwrap();
    let csv = "Source Tool,Target Tool,Interaction Type,Lifecycle Stage,\
Description\n\
GitHub,Zenodo,Data Exchange,PRESERVE,Release archiving\n\
DMPTool,Zenodo,API Integration,PLAN,DMP deposit linkage\n";
    import_interactions(&first, csv.as_bytes()).await.unwrap();

    let tools = first.list_tools().await.unwrap();
    let listing = first
      .search_interactions(&InteractionQuery::default())
      .await
      .unwrap();
    let exported = interactions_to_csv(&tools, &listing.items).unwrap();

    // Round trip into a fresh store.
    let second = SqliteStore::open_in_memory().await.unwrap();
    let report = import_interactions(&second, exported.as_bytes())
      .await
      .unwrap();
    assert_eq!(report.created, 2);
    assert!(report.errors.is_empty());

    let replayed = second
      .search_interactions(&InteractionQuery::default())
      .await
      .unwrap();
    let mut tuples: Vec<(String, String)> = replayed
      .items
      .iter()
      .map(|i| (i.interaction_type.to_string(), i.description.clone()))
      .collect();
    tuples.sort();
    assert_eq!(tuples[0].1, "DMP deposit linkage");
    assert_eq!(tuples[1].1, "Release archiving");
  }

  #[tokio::test]
  async fn exported_interactions_reimport_as_duplicates() {
    let s = SqliteStore::open_in_memory().await.unwrap();
    let csv = "Source Tool,Target Tool,Interaction Type,Lifecycle Stage,\
Description\n\
GitHub,Zenodo,Data Exchange,PRESERVE,Release archiving\n";
    import_interactions(&s, csv.as_bytes()).await.unwrap();

    let tools = s.list_tools().await.unwrap();
    let listing = s
      .search_interactions(&InteractionQuery::default())
      .await
      .unwrap();
    let exported = interactions_to_csv(&tools, &listing.items).unwrap();

    let report = import_interactions(&s, exported.as_bytes()).await.unwrap();
    assert_eq!(report.created, 0);
    assert_eq!(report.duplicates, 1);
  }

  #[tokio::test]
  async fn tools_export_round_trips() {
    let s = SqliteStore::open_in_memory().await.unwrap();
    import_tools(
      &s,
      "name,provider,is_open_source\nZenodo,CERN,yes\n".as_bytes(),
    )
    .await
    .unwrap();

    let exported = tools_to_csv(&s.list_tools().await.unwrap()).unwrap();
    assert!(exported.starts_with("name,description,url,provider"));

    let fresh = SqliteStore::open_in_memory().await.unwrap();
    let report = import_tools(&fresh, exported.as_bytes()).await.unwrap();
    assert_eq!(report.created, 1);

    let zenodo = fresh.find_tool_by_name("Zenodo").await.unwrap().unwrap();
    assert_eq!(zenodo.provider.as_deref(), Some("CERN"));
    assert_eq!(zenodo.is_open_source, Some(true));
  }
}
