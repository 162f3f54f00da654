//! Visualization data assembly.
//!
//! Transforms the relational tool/interaction/stage data into the node/edge
//! JSON consumed by the client-rendered radial, circular, and network
//! diagrams. Pure; callers fetch the data and pass it in.

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::{
  interaction::{Interaction, InteractionType},
  stage::LifecycleStage,
  tool::Tool,
};

/// Node color for tools that have not been assigned a stage yet.
pub const UNCATEGORIZED_COLOR: &str = "#9aa0a6";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
  Stage,
  Tool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
  pub id:    String,
  pub label: String,
  pub kind:  NodeKind,
  /// Stage-derived display color.
  pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
  pub source:           String,
  pub target:           String,
  pub interaction_type: InteractionType,
  pub stage:            LifecycleStage,
}

#[derive(Debug, Clone, Serialize)]
pub struct Graph {
  pub nodes: Vec<GraphNode>,
  pub edges: Vec<GraphEdge>,
}

pub fn stage_node_id(stage: LifecycleStage) -> String {
  format!("stage:{stage}")
}

pub fn tool_node_id(id: Uuid) -> String { format!("tool:{id}") }

/// Assemble the visualization graph from the supplied dataset.
///
/// Nodes are the 12 lifecycle stages plus every supplied tool. An
/// interaction whose endpoint is not among the supplied tools is dropped
/// rather than rendered dangling, so every edge's source and target are
/// guaranteed to appear in the node list. Callers are expected to pass the
/// full non-archived dataset — the catalog is treated as one connected
/// dataset, not filtered nodes against filtered edges.
pub fn assemble(tools: &[Tool], interactions: &[Interaction]) -> Graph {
  let mut nodes = Vec::with_capacity(LifecycleStage::ALL.len() + tools.len());

  for stage in LifecycleStage::ALL {
    nodes.push(GraphNode {
      id:    stage_node_id(stage),
      label: stage.as_str().to_string(),
      kind:  NodeKind::Stage,
      color: stage.color().to_string(),
    });
  }

  let mut tool_ids: HashSet<Uuid> = HashSet::with_capacity(tools.len());
  for tool in tools {
    tool_ids.insert(tool.tool_id);
    let color = tool
      .stage
      .map(|s| s.color())
      .unwrap_or(UNCATEGORIZED_COLOR)
      .to_string();
    nodes.push(GraphNode {
      id: tool_node_id(tool.tool_id),
      label: tool.name.clone(),
      kind: NodeKind::Tool,
      color,
    });
  }

  let edges = interactions
    .iter()
    .filter(|i| {
      tool_ids.contains(&i.source_tool_id) && tool_ids.contains(&i.target_tool_id)
    })
    .map(|i| GraphEdge {
      source:           tool_node_id(i.source_tool_id),
      target:           tool_node_id(i.target_tool_id),
      interaction_type: i.interaction_type,
      stage:            i.stage,
    })
    .collect();

  Graph { nodes, edges }
}
