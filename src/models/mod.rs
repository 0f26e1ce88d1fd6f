//! Data models for Berth entities.
//!
//! This module defines the core data structures:
//! - `Category` - A named grouping that owns zero or more projects
//! - `Project` - A filesystem location with language and environment metadata
//! - `NewProject` - Fields for creating a project (category optional)
//! - `ProjectUpdate` - Optional-field struct for partial updates
//! - `ProjectWithCategory` - A project annotated with its category's name

use serde::{Deserialize, Serialize};

/// A named grouping of projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Row id, assigned by the store and never reused
    pub id: i64,

    /// Unique display name (stored trimmed)
    pub name: String,
}

/// A project tracked by Berth, owned by exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Row id, assigned by the store and never reused
    pub id: i64,

    /// Display name
    pub name: String,

    /// Free-text language label (e.g. "Rust", "Python")
    pub language: String,

    /// Filesystem location; not validated for existence
    pub path: String,

    /// Whether the project uses a virtual environment
    pub uses_virtual_env: bool,

    /// Virtual environment manager, meaningful when `uses_virtual_env` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_env_manager: Option<String>,

    /// Owning category id
    pub category_id: i64,
}

/// Fields for creating a new project.
///
/// `category_id` of `None` files the project under the sentinel
/// "Unnamed" category.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    pub language: String,
    pub path: String,
    pub uses_virtual_env: bool,
    pub virtual_env_manager: Option<String>,
    pub category_id: Option<i64>,
}

/// A partial update to a project; only present fields are applied.
///
/// `virtual_env_manager` is doubly optional: the outer `Option` marks
/// whether the field is part of the update, the inner one is the stored
/// value (which may be cleared to `None`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub language: Option<String>,
    pub path: Option<String>,
    pub uses_virtual_env: Option<bool>,
    pub virtual_env_manager: Option<Option<String>>,
    pub category_id: Option<i64>,
}

impl ProjectUpdate {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.language.is_none()
            && self.path.is_none()
            && self.uses_virtual_env.is_none()
            && self.virtual_env_manager.is_none()
            && self.category_id.is_none()
    }
}

/// A project joined with its owning category's current name.
///
/// The category name is computed at query time, never stored redundantly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectWithCategory {
    #[serde(flatten)]
    pub project: Project,

    /// Current name of the owning category
    pub category_name: String,
}
