//! Storage layer for Berth data.
//!
//! A single SQLite database (`berth.db` in the data directory) holds
//! categories, projects, and configuration:
//!
//! - `category` - unique-named groupings, ids never reused
//! - `project` - one row per tracked project, FK to `category` with
//!   `ON DELETE CASCADE`
//! - `config` - key/value settings
//!
//! The store opens in WAL mode with foreign keys enforced. Every mutating
//! operation is a single parameterized statement, durably flushed before
//! returning. The sentinel "Unnamed" category (row id 0, below the
//! autoincrement range) is ensured on every open so projects created
//! without a category always have a home.

use crate::models::{Category, NewProject, Project, ProjectUpdate, ProjectWithCategory};
use crate::{Error, Result};
use rusqlite::{Connection, params};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the sentinel category that owns projects created without an
/// explicit category.
pub const UNNAMED_CATEGORY: &str = "Unnamed";

/// Database filename inside the data directory.
const DB_FILE: &str = "berth.db";

/// Storage manager for all Berth data.
pub struct Store {
    /// Path to the database file
    db_path: PathBuf,
    /// SQLite connection
    conn: Connection,
}

impl Store {
    /// Open (creating if absent) the store in the given data directory.
    ///
    /// Ensures the directory, the schema, and the sentinel category exist.
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join(DB_FILE);
        let conn = Connection::open(&db_path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;",
        )?;

        Self::init_schema(&conn)?;
        Self::ensure_unnamed_category(&conn)?;

        Ok(Self { db_path, conn })
    }

    /// Path to the backing database file.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Initialize the SQLite schema.
    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS project (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                language TEXT NOT NULL,
                path TEXT NOT NULL,
                uses_virtual_env BOOLEAN NOT NULL DEFAULT 0,
                virtual_env_manager TEXT,
                category_id INTEGER NOT NULL REFERENCES category(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS config (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Ensure the sentinel category exists.
    ///
    /// Inserted with explicit id 0 so user-created categories start at 1
    /// and the autoincrement sequence is untouched.
    fn ensure_unnamed_category(conn: &Connection) -> Result<()> {
        conn.execute(
            "INSERT OR IGNORE INTO category (id, name) VALUES (0, ?1)",
            params![UNNAMED_CATEGORY],
        )?;
        Ok(())
    }

    // === Category Operations ===

    /// Add a new category and return its id.
    ///
    /// The name is trimmed before validation and storage. Fails with
    /// `InvalidInput` for empty names and `Duplicate` for name collisions;
    /// nothing is mutated on failure.
    pub fn add_category(&mut self, name: &str) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "category name cannot be empty".to_string(),
            ));
        }

        self.conn
            .execute("INSERT INTO category (name) VALUES (?1)", params![name])
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    Error::Duplicate(format!("category '{}'", name))
                } else {
                    e.into()
                }
            })?;

        Ok(self.conn.last_insert_rowid())
    }

    /// List all categories, ordered by name.
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM category ORDER BY name")?;

        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Get a category by id.
    pub fn get_category(&self, id: i64) -> Result<Category> {
        self.conn
            .query_row(
                "SELECT id, name FROM category WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .map_err(|e| not_found_or(e, || format!("category {}", id)))
    }

    /// Look up a category by its (trimmed) name.
    pub fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let category = self
            .conn
            .query_row(
                "SELECT id, name FROM category WHERE name = ?1",
                params![name.trim()],
                |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .ok();
        Ok(category)
    }

    /// Rename a category in place.
    ///
    /// Fails with `InvalidInput` for empty names, `Duplicate` when another
    /// category already holds the trimmed name, and `NotFound` for an
    /// unknown id.
    pub fn edit_category(&mut self, id: i64, new_name: &str) -> Result<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(Error::InvalidInput(
                "category name cannot be empty".to_string(),
            ));
        }

        let rows = self
            .conn
            .execute(
                "UPDATE category SET name = ?1 WHERE id = ?2",
                params![new_name, id],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    Error::Duplicate(format!("category '{}'", new_name))
                } else {
                    e.into()
                }
            })?;

        if rows == 0 {
            return Err(Error::NotFound(format!("category {}", id)));
        }
        Ok(())
    }

    /// Delete a category and, through the FK cascade, every project that
    /// references it. The cascade is atomic; it never partially applies.
    pub fn delete_category(&mut self, id: i64) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM category WHERE id = ?1", params![id])?;

        if rows == 0 {
            return Err(Error::NotFound(format!("category {}", id)));
        }
        Ok(())
    }

    /// Id of the sentinel "Unnamed" category, re-created if it was deleted.
    pub fn unnamed_category_id(&mut self) -> Result<i64> {
        Self::ensure_unnamed_category(&self.conn)?;
        let id = self.conn.query_row(
            "SELECT id FROM category WHERE name = ?1",
            params![UNNAMED_CATEGORY],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    // === Project Operations ===

    /// Add a new project and return its id.
    ///
    /// Name and path are trimmed and must be non-empty. A missing
    /// `category_id` resolves to the sentinel category.
    pub fn add_project(&mut self, project: &NewProject) -> Result<i64> {
        let name = project.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "project name cannot be empty".to_string(),
            ));
        }
        let path = project.path.trim();
        if path.is_empty() {
            return Err(Error::InvalidInput(
                "project path cannot be empty".to_string(),
            ));
        }

        let category_id = match project.category_id {
            Some(id) => id,
            None => self.unnamed_category_id()?,
        };

        self.conn
            .execute(
                "INSERT INTO project (name, language, path, uses_virtual_env, virtual_env_manager, category_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    name,
                    project.language,
                    path,
                    project.uses_virtual_env,
                    project.virtual_env_manager,
                    category_id,
                ],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    Error::NotFound(format!("category {}", category_id))
                } else {
                    e.into()
                }
            })?;

        Ok(self.conn.last_insert_rowid())
    }

    /// List all projects, each annotated with its owning category's current
    /// name (inner join), ordered by category name then project name.
    pub fn list_projects(&self) -> Result<Vec<ProjectWithCategory>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.name, p.language, p.path, p.uses_virtual_env,
                    p.virtual_env_manager, p.category_id, c.name
             FROM project p
             INNER JOIN category c ON p.category_id = c.id
             ORDER BY c.name, p.name",
        )?;

        let projects = stmt
            .query_map([], |row| {
                Ok(ProjectWithCategory {
                    project: Project {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        language: row.get(2)?,
                        path: row.get(3)?,
                        uses_virtual_env: row.get(4)?,
                        virtual_env_manager: row.get(5)?,
                        category_id: row.get(6)?,
                    },
                    category_name: row.get(7)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(projects)
    }

    /// Get a project by id.
    pub fn get_project(&self, id: i64) -> Result<Project> {
        self.conn
            .query_row(
                "SELECT id, name, language, path, uses_virtual_env, virtual_env_manager, category_id
                 FROM project WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Project {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        language: row.get(2)?,
                        path: row.get(3)?,
                        uses_virtual_env: row.get(4)?,
                        virtual_env_manager: row.get(5)?,
                        category_id: row.get(6)?,
                    })
                },
            )
            .map_err(|e| not_found_or(e, || format!("project {}", id)))
    }

    /// Apply a partial update to a project.
    ///
    /// Only present fields are written; an empty field set is rejected.
    /// Cross-field consistency is not validated (a `virtual_env_manager`
    /// may coexist with `uses_virtual_env = false`).
    pub fn update_project(&mut self, id: i64, update: &ProjectUpdate) -> Result<()> {
        if update.is_empty() {
            return Err(Error::InvalidInput("no fields to update".to_string()));
        }

        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(name) = &update.name {
            sets.push("name = ?");
            values.push(Box::new(name.clone()));
        }
        if let Some(language) = &update.language {
            sets.push("language = ?");
            values.push(Box::new(language.clone()));
        }
        if let Some(path) = &update.path {
            sets.push("path = ?");
            values.push(Box::new(path.clone()));
        }
        if let Some(uses_virtual_env) = update.uses_virtual_env {
            sets.push("uses_virtual_env = ?");
            values.push(Box::new(uses_virtual_env));
        }
        if let Some(manager) = &update.virtual_env_manager {
            sets.push("virtual_env_manager = ?");
            values.push(Box::new(manager.clone()));
        }
        if let Some(category_id) = update.category_id {
            sets.push("category_id = ?");
            values.push(Box::new(category_id));
        }

        let sql = format!("UPDATE project SET {} WHERE id = ?", sets.join(", "));
        values.push(Box::new(id));

        let value_refs: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();

        let rows = self
            .conn
            .execute(&sql, value_refs.as_slice())
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    Error::NotFound(format!(
                        "category {}",
                        update.category_id.unwrap_or_default()
                    ))
                } else {
                    e.into()
                }
            })?;

        if rows == 0 {
            return Err(Error::NotFound(format!("project {}", id)));
        }
        Ok(())
    }

    /// Delete a project by id.
    pub fn delete_project(&mut self, id: i64) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM project WHERE id = ?1", params![id])?;

        if rows == 0 {
            return Err(Error::NotFound(format!("project {}", id)));
        }
        Ok(())
    }

    // === Config Operations ===

    /// Get a configuration value.
    pub fn get_config(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM config WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .ok();
        Ok(value)
    }

    /// Set a configuration value.
    pub fn set_config(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO config (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// List all configuration values.
    pub fn list_configs(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM config ORDER BY key")?;
        let configs: Vec<(String, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(configs)
    }

    /// Get a boolean config value, defaulting to `default` when unset.
    pub fn get_config_bool(&self, key: &str, default: bool) -> bool {
        match self.get_config(key) {
            Ok(Some(value)) => {
                let value = value.to_lowercase();
                value == "true" || value == "1" || value == "yes"
            }
            _ => default,
        }
    }
}

/// True when the error is a SQLite constraint violation (UNIQUE or FK).
fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Map `QueryReturnedNoRows` to `NotFound`, everything else to `Database`.
fn not_found_or(e: rusqlite::Error, entity: impl FnOnce() -> String) -> Error {
    if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
        Error::NotFound(entity())
    } else {
        e.into()
    }
}
