//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use prism_core::{
  interaction::{
    Interaction, InteractionKey, InteractionPatch, NewInteraction,
  },
  stage::LifecycleStage,
  store::{
    CatalogStore, InteractionListing, InteractionQuery, Page, SortOrder,
    StageRecord, ToolQuery, ToolSort,
  },
  tool::{NewCategory, NewTool, Tool, ToolCategory, ToolPatch, name_key},
};

use crate::{
  Error, Result,
  encode::{
    INTERACTION_COLUMNS, RawCategory, RawInteraction, RawTool, TOOL_COLUMNS,
    encode_dt, encode_uuid,
  },
  schema::schema_sql,
};

/// Wrap free text in `%…%` for a `LIKE … ESCAPE '\'` clause, escaping the
/// wildcard characters so user input matches literally.
fn like_pattern(text: &str) -> String {
  let escaped = text
    .replace('\\', "\\\\")
    .replace('%', "\\%")
    .replace('_', "\\_");
  format!("%{escaped}%")
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A PRISM catalog store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path`, run schema initialisation, and
  /// seed the lifecycle stage reference rows.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  pub(crate) async fn init_schema(&self) -> Result<()> {
    let sql = schema_sql();
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch a single tool by normalised name key.
  async fn find_tool_by_key(&self, key: String) -> Result<Option<Tool>> {
    let raw: Option<RawTool> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {TOOL_COLUMNS} FROM tools WHERE name_key = ?1"),
              rusqlite::params![key],
              RawTool::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawTool::into_tool).transpose()
  }

  /// Insert a fully-built [`Tool`] into the `tools` table.
  async fn insert_tool(&self, tool: &Tool) -> Result<()> {
    let tool_id_str     = encode_uuid(tool.tool_id);
    let name            = tool.name.clone();
    let key             = name_key(&tool.name);
    let description     = tool.description.clone();
    let url             = tool.url.clone();
    let provider        = tool.provider.clone();
    let is_open_source  = tool.is_open_source;
    let license         = tool.license.clone();
    let github_url      = tool.github_url.clone();
    let notes           = tool.notes.clone();
    let category_id_str = tool.category_id.map(encode_uuid);
    let stage_str       = tool.stage.map(|s| s.as_str().to_owned());
    let auto_created    = tool.auto_created;
    let created_via     = tool.created_via.as_str().to_owned();
    let archived        = tool.archived;
    let created_at_str  = encode_dt(tool.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tools (
             tool_id, name, name_key, description, url, provider,
             is_open_source, license, github_url, notes, category_id, stage,
             auto_created, created_via, archived, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                     ?13, ?14, ?15, ?16)",
          rusqlite::params![
            tool_id_str,
            name,
            key,
            description,
            url,
            provider,
            is_open_source,
            license,
            github_url,
            notes,
            category_id_str,
            stage_str,
            auto_created,
            created_via,
            archived,
            created_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Stages ────────────────────────────────────────────────────────────────

  async fn list_stages(&self) -> Result<Vec<StageRecord>> {
    let rows: Vec<(String, i64, String)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT name, position, color FROM stages ORDER BY position")?;
        let rows = stmt
          .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(name, position, color)| {
        let stage = name.parse::<LifecycleStage>()?;
        Ok(StageRecord {
          name: stage,
          position: position as u8,
          color,
          description: stage.description().to_string(),
        })
      })
      .collect()
  }

  // ── Tools ─────────────────────────────────────────────────────────────────

  async fn add_tool(&self, input: NewTool) -> Result<Tool> {
    if self.find_tool_by_key(name_key(&input.name)).await?.is_some() {
      return Err(Error::DuplicateToolName(input.name));
    }

    let tool = Tool {
      tool_id:        Uuid::new_v4(),
      name:           input.name,
      description:    input.description,
      url:            input.url,
      provider:       input.provider,
      is_open_source: input.is_open_source,
      license:        input.license,
      github_url:     input.github_url,
      notes:          input.notes,
      category_id:    input.category_id,
      stage:          input.stage,
      auto_created:   input.auto_created,
      created_via:    input.created_via,
      archived:       false,
      created_at:     Utc::now(),
    };

    self.insert_tool(&tool).await?;
    Ok(tool)
  }

  async fn get_tool(&self, id: Uuid) -> Result<Option<Tool>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawTool> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {TOOL_COLUMNS} FROM tools WHERE tool_id = ?1"),
              rusqlite::params![id_str],
              RawTool::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawTool::into_tool).transpose()
  }

  async fn find_tool_by_name(&self, name: &str) -> Result<Option<Tool>> {
    self.find_tool_by_key(name_key(name)).await
  }

  async fn update_tool(&self, id: Uuid, patch: ToolPatch) -> Result<Tool> {
    if patch.is_empty() {
      return self.get_tool(id).await?.ok_or(Error::ToolNotFound(id));
    }

    // Renames must respect the same name uniqueness as creation.
    if let Some(name) = &patch.name
      && let Some(existing) = self.find_tool_by_key(name_key(name)).await?
      && existing.tool_id != id
    {
      return Err(Error::DuplicateToolName(name.clone()));
    }

    let id_str = encode_uuid(id);
    let changed: usize = self
      .conn
      .call(move |conn| {
        let mut sets: Vec<&'static str> = Vec::new();
        let mut vals: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(name) = &patch.name {
          sets.push("name = ?");
          vals.push(Box::new(name.clone()));
          sets.push("name_key = ?");
          vals.push(Box::new(name_key(name)));
        }
        if let Some(v) = &patch.description {
          sets.push("description = ?");
          vals.push(Box::new(v.clone()));
        }
        if let Some(v) = &patch.url {
          sets.push("url = ?");
          vals.push(Box::new(v.clone()));
        }
        if let Some(v) = &patch.provider {
          sets.push("provider = ?");
          vals.push(Box::new(v.clone()));
        }
        if let Some(v) = patch.is_open_source {
          sets.push("is_open_source = ?");
          vals.push(Box::new(v));
        }
        if let Some(v) = &patch.license {
          sets.push("license = ?");
          vals.push(Box::new(v.clone()));
        }
        if let Some(v) = &patch.github_url {
          sets.push("github_url = ?");
          vals.push(Box::new(v.clone()));
        }
        if let Some(v) = &patch.notes {
          sets.push("notes = ?");
          vals.push(Box::new(v.clone()));
        }
        if let Some(v) = patch.category_id {
          sets.push("category_id = ?");
          vals.push(Box::new(encode_uuid(v)));
        }
        if let Some(v) = patch.stage {
          sets.push("stage = ?");
          vals.push(Box::new(v.as_str()));
        }

        let sql =
          format!("UPDATE tools SET {} WHERE tool_id = ?", sets.join(", "));
        vals.push(Box::new(id_str));

        let n = conn.execute(
          &sql,
          rusqlite::params_from_iter(vals.iter().map(|v| v.as_ref())),
        )?;
        Ok(n)
      })
      .await?;

    if changed == 0 {
      return Err(Error::ToolNotFound(id));
    }
    self.get_tool(id).await?.ok_or(Error::ToolNotFound(id))
  }

  async fn archive_tool(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE tools SET archived = 1 WHERE tool_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::ToolNotFound(id));
    }
    Ok(())
  }

  async fn list_tools(&self) -> Result<Vec<Tool>> {
    let raws: Vec<RawTool> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TOOL_COLUMNS} FROM tools
           WHERE archived = 0
           ORDER BY name COLLATE NOCASE"
        ))?;
        let rows = stmt
          .query_map([], RawTool::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTool::into_tool).collect()
  }

  async fn search_tools(&self, query: &ToolQuery) -> Result<Page<Tool>> {
    let text_pattern = query
      .text
      .as_deref()
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .map(like_pattern);
    let stage_strs: Vec<String> = query
      .stages
      .iter()
      .map(|s| s.as_str().to_owned())
      .collect();
    let open_source      = query.open_source;
    let uncategorized    = query.uncategorized;
    let include_archived = query.include_archived;

    let page     = query.page.max(1);
    let per_page = query.per_page.max(1);
    // Page numbers arrive unchecked from query params; saturate instead of
    // overflowing on absurd values.
    let limit    = per_page.min(i64::MAX as usize) as i64;
    let offset   = page
      .saturating_sub(1)
      .saturating_mul(per_page)
      .min(i64::MAX as usize) as i64;

    // Uncategorized tools take the sentinel position so they sort after the
    // lifecycle under the default ascending order.
    let order_clause = {
      let dir = match query.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
      };
      match query.sort {
        ToolSort::Name => format!("name COLLATE NOCASE {dir}"),
        ToolSort::Provider => {
          format!("provider COLLATE NOCASE {dir}, name COLLATE NOCASE ASC")
        }
        ToolSort::Stage => format!(
          "COALESCE((SELECT position FROM stages st WHERE st.name = stage), 99) \
           {dir}, name COLLATE NOCASE ASC"
        ),
      }
    };

    let (raws, total): (Vec<RawTool>, i64) = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<String> = Vec::new();
        let mut vals: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if !include_archived {
          conds.push("archived = 0".to_string());
        }
        if let Some(pattern) = &text_pattern {
          conds.push(
            "(name LIKE ? ESCAPE '\\' \
              OR IFNULL(description, '') LIKE ? ESCAPE '\\' \
              OR IFNULL(provider, '') LIKE ? ESCAPE '\\')"
              .to_string(),
          );
          vals.push(Box::new(pattern.clone()));
          vals.push(Box::new(pattern.clone()));
          vals.push(Box::new(pattern.clone()));
        }
        if !stage_strs.is_empty() {
          let placeholders = vec!["?"; stage_strs.len()].join(", ");
          conds.push(format!("stage IN ({placeholders})"));
          for s in &stage_strs {
            vals.push(Box::new(s.clone()));
          }
        }
        if let Some(open) = open_source {
          conds.push("is_open_source = ?".to_string());
          vals.push(Box::new(open));
        }
        match uncategorized {
          Some(true) => {
            conds.push("stage IS NULL AND category_id IS NULL".to_string());
          }
          Some(false) => {
            conds
              .push("(stage IS NOT NULL OR category_id IS NOT NULL)".to_string());
          }
          None => {}
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM tools {where_clause}"),
          rusqlite::params_from_iter(vals.iter().map(|v| v.as_ref())),
          |r| r.get(0),
        )?;

        vals.push(Box::new(limit));
        vals.push(Box::new(offset));

        let sql = format!(
          "SELECT {TOOL_COLUMNS} FROM tools
           {where_clause}
           ORDER BY {order_clause}
           LIMIT ? OFFSET ?"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(vals.iter().map(|v| v.as_ref())),
            RawTool::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((rows, total))
      })
      .await?;

    let items: Vec<Tool> = raws
      .into_iter()
      .map(RawTool::into_tool)
      .collect::<Result<_>>()?;

    Ok(Page::new(items, total as usize, page, per_page))
  }

  // ── Categories ────────────────────────────────────────────────────────────

  async fn add_category(&self, input: NewCategory) -> Result<ToolCategory> {
    let category = ToolCategory {
      category_id: Uuid::new_v4(),
      name:        input.name,
      description: input.description,
      stage:       input.stage,
    };

    let id_str      = encode_uuid(category.category_id);
    let name        = category.name.clone();
    let description = category.description.clone();
    let stage_str   = category.stage.map(|s| s.as_str().to_owned());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO categories (category_id, name, description, stage)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, description, stage_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(category)
  }

  async fn list_categories(&self) -> Result<Vec<ToolCategory>> {
    let raws: Vec<RawCategory> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT category_id, name, description, stage FROM categories
           ORDER BY name COLLATE NOCASE",
        )?;
        let rows = stmt
          .query_map([], RawCategory::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCategory::into_category).collect()
  }

  // ── Interactions ──────────────────────────────────────────────────────────

  async fn add_interaction(&self, input: NewInteraction) -> Result<Interaction> {
    if input.source_tool_id == input.target_tool_id {
      return Err(Error::SelfInteraction);
    }
    if self.get_tool(input.source_tool_id).await?.is_none() {
      return Err(Error::ToolNotFound(input.source_tool_id));
    }
    if self.get_tool(input.target_tool_id).await?.is_none() {
      return Err(Error::ToolNotFound(input.target_tool_id));
    }
    if let Some(existing) = self.find_interaction_by_key(input.key()).await? {
      return Err(Error::DuplicateInteraction(existing.interaction_id));
    }

    let interaction = Interaction {
      interaction_id:    Uuid::new_v4(),
      source_tool_id:    input.source_tool_id,
      target_tool_id:    input.target_tool_id,
      interaction_type:  input.interaction_type,
      stage:             input.stage,
      description:       input.description,
      technical_details: input.technical_details,
      benefits:          input.benefits,
      challenges:        input.challenges,
      examples:          input.examples,
      contact_person:    input.contact_person,
      organization:      input.organization,
      email:             input.email,
      priority:          input.priority,
      complexity:        input.complexity,
      status:            input.status,
      submitted_by:      input.submitted_by,
      submitted_at:      Utc::now(),
      archived:          false,
    };

    let id_str            = encode_uuid(interaction.interaction_id);
    let source_str        = encode_uuid(interaction.source_tool_id);
    let target_str        = encode_uuid(interaction.target_tool_id);
    let type_str          = interaction.interaction_type.as_str();
    let stage_str         = interaction.stage.as_str();
    let description       = interaction.description.clone();
    let technical_details = interaction.technical_details.clone();
    let benefits          = interaction.benefits.clone();
    let challenges        = interaction.challenges.clone();
    let examples          = interaction.examples.clone();
    let contact_person    = interaction.contact_person.clone();
    let organization      = interaction.organization.clone();
    let email             = interaction.email.clone();
    let priority_str      = interaction.priority.as_str();
    let complexity_str    = interaction.complexity.as_str();
    let status_str        = interaction.status.as_str();
    let submitted_by      = interaction.submitted_by.clone();
    let submitted_at_str  = encode_dt(interaction.submitted_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO interactions (
             interaction_id, source_tool_id, target_tool_id, interaction_type,
             stage, description, technical_details, benefits, challenges,
             examples, contact_person, organization, email, priority,
             complexity, status, submitted_by, submitted_at, archived
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                     ?14, ?15, ?16, ?17, ?18, 0)",
          rusqlite::params![
            id_str,
            source_str,
            target_str,
            type_str,
            stage_str,
            description,
            technical_details,
            benefits,
            challenges,
            examples,
            contact_person,
            organization,
            email,
            priority_str,
            complexity_str,
            status_str,
            submitted_by,
            submitted_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(interaction)
  }

  async fn get_interaction(&self, id: Uuid) -> Result<Option<Interaction>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawInteraction> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {INTERACTION_COLUMNS} FROM interactions
                 WHERE interaction_id = ?1"
              ),
              rusqlite::params![id_str],
              RawInteraction::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawInteraction::into_interaction).transpose()
  }

  async fn find_interaction_by_key(
    &self,
    key: InteractionKey,
  ) -> Result<Option<Interaction>> {
    let source_str = encode_uuid(key.source_tool_id);
    let target_str = encode_uuid(key.target_tool_id);
    let type_str   = key.interaction_type.as_str();
    let stage_str  = key.stage.as_str();

    let raw: Option<RawInteraction> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {INTERACTION_COLUMNS} FROM interactions
                 WHERE source_tool_id = ?1
                   AND target_tool_id = ?2
                   AND interaction_type = ?3
                   AND stage = ?4
                   AND archived = 0"
              ),
              rusqlite::params![source_str, target_str, type_str, stage_str],
              RawInteraction::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawInteraction::into_interaction).transpose()
  }

  async fn update_interaction(
    &self,
    id: Uuid,
    patch: InteractionPatch,
  ) -> Result<Interaction> {
    if patch.is_empty() {
      return self
        .get_interaction(id)
        .await?
        .ok_or(Error::InteractionNotFound(id));
    }

    let id_str = encode_uuid(id);
    let changed: usize = self
      .conn
      .call(move |conn| {
        let mut sets: Vec<&'static str> = Vec::new();
        let mut vals: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(v) = &patch.description {
          sets.push("description = ?");
          vals.push(Box::new(v.clone()));
        }
        if let Some(v) = &patch.technical_details {
          sets.push("technical_details = ?");
          vals.push(Box::new(v.clone()));
        }
        if let Some(v) = &patch.benefits {
          sets.push("benefits = ?");
          vals.push(Box::new(v.clone()));
        }
        if let Some(v) = &patch.challenges {
          sets.push("challenges = ?");
          vals.push(Box::new(v.clone()));
        }
        if let Some(v) = &patch.examples {
          sets.push("examples = ?");
          vals.push(Box::new(v.clone()));
        }
        if let Some(v) = &patch.contact_person {
          sets.push("contact_person = ?");
          vals.push(Box::new(v.clone()));
        }
        if let Some(v) = &patch.organization {
          sets.push("organization = ?");
          vals.push(Box::new(v.clone()));
        }
        if let Some(v) = &patch.email {
          sets.push("email = ?");
          vals.push(Box::new(v.clone()));
        }
        if let Some(v) = patch.priority {
          sets.push("priority = ?");
          vals.push(Box::new(v.as_str()));
        }
        if let Some(v) = patch.complexity {
          sets.push("complexity = ?");
          vals.push(Box::new(v.as_str()));
        }
        if let Some(v) = patch.status {
          sets.push("status = ?");
          vals.push(Box::new(v.as_str()));
        }
        if let Some(v) = &patch.submitted_by {
          sets.push("submitted_by = ?");
          vals.push(Box::new(v.clone()));
        }

        let sql = format!(
          "UPDATE interactions SET {} WHERE interaction_id = ?",
          sets.join(", ")
        );
        vals.push(Box::new(id_str));

        let n = conn.execute(
          &sql,
          rusqlite::params_from_iter(vals.iter().map(|v| v.as_ref())),
        )?;
        Ok(n)
      })
      .await?;

    if changed == 0 {
      return Err(Error::InteractionNotFound(id));
    }
    self
      .get_interaction(id)
      .await?
      .ok_or(Error::InteractionNotFound(id))
  }

  async fn archive_interaction(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE interactions SET archived = 1 WHERE interaction_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::InteractionNotFound(id));
    }
    Ok(())
  }

  async fn search_interactions(
    &self,
    query: &InteractionQuery,
  ) -> Result<InteractionListing> {
    let text_pattern = query
      .text
      .as_deref()
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .map(like_pattern);
    let type_str         = query.interaction_type.map(|t| t.as_str());
    let stage_str        = query.stage.map(|s| s.as_str());
    let include_archived = query.include_archived;

    let (raws, total): (Vec<RawInteraction>, i64) = self
      .conn
      .call(move |conn| {
        let base_cond = if include_archived { "1 = 1" } else { "archived = 0" };

        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM interactions WHERE {base_cond}"),
          [],
          |r| r.get(0),
        )?;

        let mut conds: Vec<String> = vec![base_cond.to_string()];
        let mut vals: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(t) = type_str {
          conds.push("interaction_type = ?".to_string());
          vals.push(Box::new(t));
        }
        if let Some(s) = stage_str {
          conds.push("stage = ?".to_string());
          vals.push(Box::new(s));
        }
        if let Some(pattern) = &text_pattern {
          conds.push(
            "(description LIKE ? ESCAPE '\\' \
              OR IFNULL(technical_details, '') LIKE ? ESCAPE '\\' \
              OR EXISTS (
                SELECT 1 FROM tools t
                WHERE t.tool_id IN
                  (interactions.source_tool_id, interactions.target_tool_id)
                  AND t.name LIKE ? ESCAPE '\\'))"
              .to_string(),
          );
          vals.push(Box::new(pattern.clone()));
          vals.push(Box::new(pattern.clone()));
          vals.push(Box::new(pattern.clone()));
        }

        let sql = format!(
          "SELECT {INTERACTION_COLUMNS} FROM interactions
           WHERE {}
           ORDER BY submitted_at DESC",
          conds.join(" AND ")
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(vals.iter().map(|v| v.as_ref())),
            RawInteraction::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((rows, total))
      })
      .await?;

    let items: Vec<Interaction> = raws
      .into_iter()
      .map(RawInteraction::into_interaction)
      .collect::<Result<_>>()?;

    let visible = items.len();
    Ok(InteractionListing { items, visible, total: total as usize })
  }
}
