//! Integration tests for `SqliteStore` against an in-memory database.

use prism_core::{
  interaction::{InteractionType, NewInteraction},
  stage::LifecycleStage,
  store::{CatalogStore, InteractionQuery, ToolQuery, ToolSort},
  tool::{NewCategory, NewTool, ToolPatch},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Stages ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stages_are_seeded_in_lifecycle_order() {
  let s = store().await;
  let stages = s.list_stages().await.unwrap();

  assert_eq!(stages.len(), 12);
  assert_eq!(stages[0].name, LifecycleStage::Conceptualise);
  assert_eq!(stages[11].name, LifecycleStage::Transform);
  for (i, record) in stages.iter().enumerate() {
    assert_eq!(record.position as usize, i);
    assert!(!record.color.is_empty());
  }
}

#[tokio::test]
async fn schema_init_is_idempotent() {
  let s = store().await;
  // Running init again must not duplicate the seed rows.
  s.init_schema().await.unwrap();
  let stages = s.list_stages().await.unwrap();
  assert_eq!(stages.len(), 12);
}

// ─── Tools ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_tool() {
  let s = store().await;

  let tool = s.add_tool(NewTool::new("Zenodo")).await.unwrap();
  assert_eq!(tool.name, "Zenodo");
  assert!(!tool.auto_created);

  let fetched = s.get_tool(tool.tool_id).await.unwrap().unwrap();
  assert_eq!(fetched.tool_id, tool.tool_id);
  assert_eq!(fetched.name, "Zenodo");
}

#[tokio::test]
async fn get_tool_missing_returns_none() {
  let s = store().await;
  assert!(s.get_tool(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn find_tool_by_name_is_normalised() {
  let s = store().await;
  let tool = s.add_tool(NewTool::new("Zenodo")).await.unwrap();

  let found = s.find_tool_by_name("  zenodo ").await.unwrap().unwrap();
  assert_eq!(found.tool_id, tool.tool_id);
  // Display case is preserved.
  assert_eq!(found.name, "Zenodo");
}

#[tokio::test]
async fn duplicate_tool_name_is_rejected() {
  let s = store().await;
  s.add_tool(NewTool::new("Zenodo")).await.unwrap();

  let err = s.add_tool(NewTool::new("ZENODO")).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateToolName(_)));
}

#[tokio::test]
async fn update_tool_applies_patch() {
  let s = store().await;
  let tool = s.add_tool(NewTool::new("Zenodo")).await.unwrap();

  let patch = ToolPatch {
    license: Some("MIT".to_string()),
    stage: Some(LifecycleStage::Preserve),
    ..Default::default()
  };
  let updated = s.update_tool(tool.tool_id, patch).await.unwrap();

  assert_eq!(updated.license.as_deref(), Some("MIT"));
  assert_eq!(updated.stage, Some(LifecycleStage::Preserve));
  // Untouched fields survive.
  assert_eq!(updated.name, "Zenodo");
}

#[tokio::test]
async fn update_missing_tool_fails() {
  let s = store().await;
  let patch = ToolPatch {
    license: Some("MIT".to_string()),
    ..Default::default()
  };
  let err = s.update_tool(Uuid::new_v4(), patch).await.unwrap_err();
  assert!(matches!(err, Error::ToolNotFound(_)));
}

#[tokio::test]
async fn archived_tools_hidden_from_default_queries() {
  let s = store().await;
  let tool = s.add_tool(NewTool::new("Zenodo")).await.unwrap();
  s.archive_tool(tool.tool_id).await.unwrap();

  assert!(s.list_tools().await.unwrap().is_empty());
  let page = s.search_tools(&ToolQuery::default()).await.unwrap();
  assert_eq!(page.total, 0);

  // Still reachable by id.
  let fetched = s.get_tool(tool.tool_id).await.unwrap().unwrap();
  assert!(fetched.archived);
}

#[tokio::test]
async fn search_tools_text_filter() {
  let s = store().await;
  s.add_tool(NewTool {
    provider: Some("CERN".to_string()),
    ..NewTool::new("Zenodo")
  })
  .await
  .unwrap();
  s.add_tool(NewTool::new("GitHub")).await.unwrap();

  let query = ToolQuery {
    text: Some("cern".to_string()),
    ..Default::default()
  };
  let page = s.search_tools(&query).await.unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.items[0].name, "Zenodo");
}

#[tokio::test]
async fn search_tools_filters_combine_with_and() {
  let s = store().await;
  s.add_tool(NewTool {
    stage: Some(LifecycleStage::Preserve),
    is_open_source: Some(true),
    ..NewTool::new("Zenodo")
  })
  .await
  .unwrap();
  s.add_tool(NewTool {
    stage: Some(LifecycleStage::Preserve),
    is_open_source: Some(false),
    ..NewTool::new("Archivematica")
  })
  .await
  .unwrap();
  s.add_tool(NewTool {
    stage: Some(LifecycleStage::Publish),
    is_open_source: Some(true),
    ..NewTool::new("OJS")
  })
  .await
  .unwrap();

  let query = ToolQuery {
    stages: vec![LifecycleStage::Preserve],
    open_source: Some(true),
    ..Default::default()
  };
  let page = s.search_tools(&query).await.unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.items[0].name, "Zenodo");
}

#[tokio::test]
async fn search_tools_uncategorized_filter() {
  let s = store().await;
  s.add_tool(NewTool::auto_created("MysteryTool")).await.unwrap();
  s.add_tool(NewTool {
    stage: Some(LifecycleStage::Collect),
    ..NewTool::new("REDCap")
  })
  .await
  .unwrap();

  let query = ToolQuery {
    uncategorized: Some(true),
    ..Default::default()
  };
  let page = s.search_tools(&query).await.unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.items[0].name, "MysteryTool");
  assert!(page.items[0].auto_created);
}

#[tokio::test]
async fn search_tools_pagination_metadata() {
  let s = store().await;
  for i in 0..7 {
    s.add_tool(NewTool::new(format!("Tool {i:02}"))).await.unwrap();
  }

  let query = ToolQuery { page: 2, per_page: 3, ..Default::default() };
  let page = s.search_tools(&query).await.unwrap();

  assert_eq!(page.total, 7);
  assert_eq!(page.page_count, 3);
  assert_eq!(page.items.len(), 3);
  assert!(page.has_next);
  assert!(page.has_prev);
  // Default name sort: page 2 of 3 holds tools 03..05.
  assert_eq!(page.items[0].name, "Tool 03");
}

#[tokio::test]
async fn search_tools_tolerates_absurd_page_numbers() {
  let s = store().await;
  s.add_tool(NewTool::new("Zenodo")).await.unwrap();

  // Page numbers arrive unchecked from query params.
  let query = ToolQuery { page: usize::MAX, ..Default::default() };
  let page = s.search_tools(&query).await.unwrap();

  assert_eq!(page.total, 1);
  assert!(page.items.is_empty());
  assert!(!page.has_next);

  let query = ToolQuery {
    page:     usize::MAX,
    per_page: usize::MAX,
    ..Default::default()
  };
  let page = s.search_tools(&query).await.unwrap();
  assert_eq!(page.total, 1);
}

#[tokio::test]
async fn search_tools_text_matches_wildcards_literally() {
  let s = store().await;
  s.add_tool(NewTool {
    description: Some("100% open".to_string()),
    ..NewTool::new("OpenRefine")
  })
  .await
  .unwrap();
  s.add_tool(NewTool::new("GitHub")).await.unwrap();
  s.add_tool(NewTool::new("a_b")).await.unwrap();
  s.add_tool(NewTool::new("axb")).await.unwrap();

  // A bare "%" must not match every row.
  let query = ToolQuery {
    text: Some("100%".to_string()),
    ..Default::default()
  };
  let page = s.search_tools(&query).await.unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.items[0].name, "OpenRefine");

  // "_" matches itself, not any single character.
  let query = ToolQuery {
    text: Some("a_b".to_string()),
    ..Default::default()
  };
  let page = s.search_tools(&query).await.unwrap();
  assert_eq!(page.total, 1);
  assert_eq!(page.items[0].name, "a_b");
}

#[tokio::test]
async fn renaming_onto_a_taken_name_is_rejected() {
  let s = store().await;
  s.add_tool(NewTool::new("Zenodo")).await.unwrap();
  let github = s.add_tool(NewTool::new("GitHub")).await.unwrap();

  let patch = ToolPatch {
    name: Some("ZENODO".to_string()),
    ..Default::default()
  };
  let err = s.update_tool(github.tool_id, patch).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateToolName(_)));

  // Renaming a tool to a case variant of its own name is fine.
  let patch = ToolPatch {
    name: Some("github".to_string()),
    ..Default::default()
  };
  let renamed = s.update_tool(github.tool_id, patch).await.unwrap();
  assert_eq!(renamed.name, "github");
}

#[tokio::test]
async fn search_tools_sort_by_stage_position() {
  let s = store().await;
  s.add_tool(NewTool {
    stage: Some(LifecycleStage::Preserve),
    ..NewTool::new("Zenodo")
  })
  .await
  .unwrap();
  s.add_tool(NewTool {
    stage: Some(LifecycleStage::Conceptualise),
    ..NewTool::new("Miro")
  })
  .await
  .unwrap();
  s.add_tool(NewTool::new("Uncategorized")).await.unwrap();

  let query = ToolQuery { sort: ToolSort::Stage, ..Default::default() };
  let page = s.search_tools(&query).await.unwrap();

  assert_eq!(page.items[0].name, "Miro");
  assert_eq!(page.items[1].name, "Zenodo");
  // Tools without a stage sort after the lifecycle.
  assert_eq!(page.items[2].name, "Uncategorized");
}

// ─── Categories ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_list_categories() {
  let s = store().await;
  s.add_category(NewCategory {
    name: "Data repositories".to_string(),
    description: None,
    stage: Some(LifecycleStage::Preserve),
  })
  .await
  .unwrap();
  s.add_category(NewCategory {
    name: "Uncategorised imports".to_string(),
    description: None,
    stage: None,
  })
  .await
  .unwrap();

  let categories = s.list_categories().await.unwrap();
  assert_eq!(categories.len(), 2);
  assert_eq!(categories[0].name, "Data repositories");
  assert!(categories[1].stage.is_none());
}

// ─── Interactions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_interaction_assigns_timestamp_and_id() {
  let s = store().await;
  let github = s.add_tool(NewTool::new("GitHub")).await.unwrap();
  let zenodo = s.add_tool(NewTool::new("Zenodo")).await.unwrap();

  let interaction = s
    .add_interaction(NewInteraction::new(
      github.tool_id,
      zenodo.tool_id,
      InteractionType::DataExchange,
      LifecycleStage::Preserve,
      "Release archiving",
    ))
    .await
    .unwrap();

  let fetched = s
    .get_interaction(interaction.interaction_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched.description, "Release archiving");
  assert_eq!(fetched.stage, LifecycleStage::Preserve);
}

#[tokio::test]
async fn self_interaction_is_rejected() {
  let s = store().await;
  let github = s.add_tool(NewTool::new("GitHub")).await.unwrap();

  let err = s
    .add_interaction(NewInteraction::new(
      github.tool_id,
      github.tool_id,
      InteractionType::ApiIntegration,
      LifecycleStage::Publish,
      "self",
    ))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::SelfInteraction));
}

#[tokio::test]
async fn interaction_with_unknown_tool_is_rejected() {
  let s = store().await;
  let github = s.add_tool(NewTool::new("GitHub")).await.unwrap();

  let err = s
    .add_interaction(NewInteraction::new(
      github.tool_id,
      Uuid::new_v4(),
      InteractionType::ApiIntegration,
      LifecycleStage::Publish,
      "dangling",
    ))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ToolNotFound(_)));
}

#[tokio::test]
async fn natural_key_collision_is_a_duplicate() {
  let s = store().await;
  let github = s.add_tool(NewTool::new("GitHub")).await.unwrap();
  let zenodo = s.add_tool(NewTool::new("Zenodo")).await.unwrap();

  let first = NewInteraction::new(
    github.tool_id,
    zenodo.tool_id,
    InteractionType::DataExchange,
    LifecycleStage::Preserve,
    "Release archiving",
  );
  let stored = s.add_interaction(first.clone()).await.unwrap();

  // Same key, different description — still a duplicate.
  let second = NewInteraction {
    description: "Different wording".to_string(),
    ..first.clone()
  };
  let err = s.add_interaction(second).await.unwrap_err();
  match err {
    Error::DuplicateInteraction(id) => assert_eq!(id, stored.interaction_id),
    other => panic!("expected duplicate, got {other:?}"),
  }

  // A different stage is a different natural key.
  let third = NewInteraction { stage: LifecycleStage::Publish, ..first };
  s.add_interaction(third).await.unwrap();
}

#[tokio::test]
async fn find_interaction_by_key_ignores_archived() {
  let s = store().await;
  let github = s.add_tool(NewTool::new("GitHub")).await.unwrap();
  let zenodo = s.add_tool(NewTool::new("Zenodo")).await.unwrap();

  let input = NewInteraction::new(
    github.tool_id,
    zenodo.tool_id,
    InteractionType::DataExchange,
    LifecycleStage::Preserve,
    "Release archiving",
  );
  let stored = s.add_interaction(input.clone()).await.unwrap();
  assert!(
    s.find_interaction_by_key(stored.key())
      .await
      .unwrap()
      .is_some()
  );

  s.archive_interaction(stored.interaction_id).await.unwrap();
  assert!(
    s.find_interaction_by_key(stored.key())
      .await
      .unwrap()
      .is_none()
  );
}

#[tokio::test]
async fn search_interactions_filters_and_counts() {
  let s = store().await;
  let github = s.add_tool(NewTool::new("GitHub")).await.unwrap();
  let zenodo = s.add_tool(NewTool::new("Zenodo")).await.unwrap();
  let dmptool = s.add_tool(NewTool::new("DMPTool")).await.unwrap();

  s.add_interaction(NewInteraction::new(
    github.tool_id,
    zenodo.tool_id,
    InteractionType::DataExchange,
    LifecycleStage::Preserve,
    "Release archiving",
  ))
  .await
  .unwrap();
  s.add_interaction(NewInteraction::new(
    dmptool.tool_id,
    zenodo.tool_id,
    InteractionType::ApiIntegration,
    LifecycleStage::Plan,
    "DMP deposit linkage",
  ))
  .await
  .unwrap();

  let by_type = InteractionQuery {
    interaction_type: Some(InteractionType::DataExchange),
    ..Default::default()
  };
  let listing = s.search_interactions(&by_type).await.unwrap();
  assert_eq!(listing.visible, 1);
  assert_eq!(listing.total, 2);

  // Free text matches tool names too.
  let by_text = InteractionQuery {
    text: Some("github".to_string()),
    ..Default::default()
  };
  let listing = s.search_interactions(&by_text).await.unwrap();
  assert_eq!(listing.visible, 1);
  assert_eq!(listing.items[0].source_tool_id, github.tool_id);

  let by_stage = InteractionQuery {
    stage: Some(LifecycleStage::Plan),
    ..Default::default()
  };
  let listing = s.search_interactions(&by_stage).await.unwrap();
  assert_eq!(listing.visible, 1);
  assert_eq!(listing.items[0].target_tool_id, zenodo.tool_id);
}

#[tokio::test]
async fn search_interactions_text_matches_wildcards_literally() {
  let s = store().await;
  let github = s.add_tool(NewTool::new("GitHub")).await.unwrap();
  let zenodo = s.add_tool(NewTool::new("Zenodo")).await.unwrap();
  let dmptool = s.add_tool(NewTool::new("DMPTool")).await.unwrap();

  s.add_interaction(NewInteraction::new(
    github.tool_id,
    zenodo.tool_id,
    InteractionType::DataExchange,
    LifecycleStage::Preserve,
    "Archives 100% of tagged releases",
  ))
  .await
  .unwrap();
  s.add_interaction(NewInteraction::new(
    dmptool.tool_id,
    zenodo.tool_id,
    InteractionType::ApiIntegration,
    LifecycleStage::Plan,
    "DMP deposit linkage",
  ))
  .await
  .unwrap();

  let query = InteractionQuery {
    text: Some("100%".to_string()),
    ..Default::default()
  };
  let listing = s.search_interactions(&query).await.unwrap();
  assert_eq!(listing.visible, 1);
  assert!(listing.items[0].description.contains("100%"));
}

#[tokio::test]
async fn update_interaction_applies_patch() {
  let s = store().await;
  let github = s.add_tool(NewTool::new("GitHub")).await.unwrap();
  let zenodo = s.add_tool(NewTool::new("Zenodo")).await.unwrap();

  let stored = s
    .add_interaction(NewInteraction::new(
      github.tool_id,
      zenodo.tool_id,
      InteractionType::DataExchange,
      LifecycleStage::Preserve,
      "Release archiving",
    ))
    .await
    .unwrap();

  let patch = prism_core::interaction::InteractionPatch {
    status: Some(prism_core::interaction::InteractionStatus::Implemented),
    benefits: Some("DOI per release".to_string()),
    ..Default::default()
  };
  let updated = s
    .update_interaction(stored.interaction_id, patch)
    .await
    .unwrap();

  assert_eq!(
    updated.status,
    prism_core::interaction::InteractionStatus::Implemented
  );
  assert_eq!(updated.benefits.as_deref(), Some("DOI per release"));
  assert_eq!(updated.description, "Release archiving");
}
