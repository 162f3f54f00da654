//! SQL schema for the PRISM SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

use prism_core::stage::LifecycleStage;

/// Table DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
const DDL: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Lifecycle reference data; seeded below, rarely mutated thereafter.
CREATE TABLE IF NOT EXISTS stages (
    name       TEXT PRIMARY KEY,        -- canonical uppercase stage name
    position   INTEGER NOT NULL UNIQUE, -- 0..11, total rendering order
    color      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    category_id TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT,
    stage       TEXT REFERENCES stages(name) -- NULL = uncategorised bucket
);

CREATE TABLE IF NOT EXISTS tools (
    tool_id        TEXT PRIMARY KEY,
    name           TEXT NOT NULL,           -- display case preserved
    name_key       TEXT NOT NULL UNIQUE,    -- trimmed + case-folded dedup key
    description    TEXT,
    url            TEXT,
    provider       TEXT,
    is_open_source INTEGER,                 -- NULL = unknown
    license        TEXT,
    github_url     TEXT,
    notes          TEXT,
    category_id    TEXT REFERENCES categories(category_id),
    stage          TEXT REFERENCES stages(name),
    auto_created   INTEGER NOT NULL DEFAULT 0,
    created_via    TEXT NOT NULL,
    archived       INTEGER NOT NULL DEFAULT 0,
    created_at     TEXT NOT NULL            -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS interactions (
    interaction_id    TEXT PRIMARY KEY,
    source_tool_id    TEXT NOT NULL REFERENCES tools(tool_id),
    target_tool_id    TEXT NOT NULL REFERENCES tools(tool_id),
    interaction_type  TEXT NOT NULL,
    stage             TEXT NOT NULL REFERENCES stages(name),
    description       TEXT NOT NULL,
    technical_details TEXT,
    benefits          TEXT,
    challenges        TEXT,
    examples          TEXT,
    contact_person    TEXT,
    organization      TEXT,
    email             TEXT,
    priority          TEXT NOT NULL DEFAULT 'medium',
    complexity        TEXT NOT NULL DEFAULT 'moderate',
    status            TEXT NOT NULL DEFAULT 'proposed',
    submitted_by      TEXT,
    submitted_at      TEXT NOT NULL,        -- ISO 8601 UTC; server-assigned
    archived          INTEGER NOT NULL DEFAULT 0,
    CHECK  (source_tool_id != target_tool_id),
    UNIQUE (source_tool_id, target_tool_id, interaction_type, stage)
);

CREATE INDEX IF NOT EXISTS tools_stage_idx        ON tools(stage);
CREATE INDEX IF NOT EXISTS interactions_stage_idx ON interactions(stage);
CREATE INDEX IF NOT EXISTS interactions_type_idx  ON interactions(interaction_type);
";

/// Full schema script: DDL plus idempotent stage seeding from the core enum,
/// so names, positions, and colors have a single source of truth.
pub fn schema_sql() -> String {
  let mut sql = String::from(DDL);
  for stage in LifecycleStage::ALL {
    sql.push_str(&format!(
      "INSERT OR IGNORE INTO stages (name, position, color) \
       VALUES ('{}', {}, '{}');\n",
      stage.as_str(),
      stage.position(),
      stage.color(),
    ));
  }
  sql.push_str("\nPRAGMA user_version = 1;\n");
  sql
}
