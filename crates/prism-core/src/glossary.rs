//! Static glossary content.
//!
//! The one immutable home for definition text, so literal strings are not
//! scattered across call sites. Stage and interaction-type definitions live
//! on their enums; this module holds the standalone MaLDReTH terms.

/// A glossary term and its definition.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct GlossaryEntry {
  pub term:       &'static str,
  pub definition: &'static str,
}

/// Standalone terms rendered on the glossary page.
pub const TERMS: &[GlossaryEntry] = &[
  GlossaryEntry {
    term:       "MaLDReTH",
    definition: "Mapping the Landscape of Digital Research Tools Harmonised \
                 — the 12-stage reference lifecycle model this catalog is \
                 organized around.",
  },
  GlossaryEntry {
    term:       "Exemplar Tool",
    definition: "A cataloged research tool entry.",
  },
  GlossaryEntry {
    term:       "Lifecycle Stage",
    definition: "One of the 12 canonical phases of the research data \
                 lifecycle (CONCEPTUALISE through TRANSFORM).",
  },
  GlossaryEntry {
    term:       "Interaction",
    definition: "A documented connection between two tools (source to \
                 target) of a specific type, scoped to one lifecycle stage.",
  },
  GlossaryEntry {
    term:       "Auto-created tool",
    definition: "A tool record materialized implicitly during interaction \
                 import because its name did not match any existing catalog \
                 entry.",
  },
  GlossaryEntry {
    term:       "Uncategorized tool",
    definition: "A tool lacking an assigned stage and category, typically \
                 pending manual curation after bulk import.",
  },
];
