//! Non-interactive command implementations for the Berth CLI.
//!
//! The interactive workflows live in `crate::workflow`; this module holds
//! the read-only listing/show commands, configuration management, and the
//! `Output` trait every command result implements.

use crate::Result;
use crate::models::{Category, ProjectWithCategory};
use crate::storage::Store;
use serde::Serialize;
use std::fmt::Write as _;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to a JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn to_json_string<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

// === Categories ===

#[derive(Debug, Serialize)]
pub struct CategoryList {
    pub categories: Vec<Category>,
}

/// List all categories.
pub fn category_list(store: &Store) -> Result<CategoryList> {
    Ok(CategoryList {
        categories: store.list_categories()?,
    })
}

impl Output for CategoryList {
    fn to_json(&self) -> String {
        to_json_string(self)
    }

    fn to_human(&self) -> String {
        if self.categories.is_empty() {
            return "No categories.".to_string();
        }
        let mut out = String::new();
        for category in &self.categories {
            let _ = writeln!(out, "{:>4}  {}", category.id, category.name);
        }
        out.trim_end().to_string()
    }
}

// === Projects ===

#[derive(Debug, Serialize)]
pub struct ProjectList {
    pub projects: Vec<ProjectWithCategory>,
}

/// List all projects, optionally restricted to one category name.
pub fn project_list(store: &Store, category: Option<&str>) -> Result<ProjectList> {
    let mut projects = store.list_projects()?;
    if let Some(category) = category {
        let category = category.trim();
        projects.retain(|p| p.category_name == category);
    }
    Ok(ProjectList { projects })
}

impl Output for ProjectList {
    fn to_json(&self) -> String {
        to_json_string(self)
    }

    fn to_human(&self) -> String {
        if self.projects.is_empty() {
            return "No projects.".to_string();
        }
        // Rows come pre-sorted by category then name, so grouping is a
        // matter of printing a header whenever the category changes.
        let mut out = String::new();
        let mut current_category: Option<&str> = None;
        for p in &self.projects {
            if current_category != Some(p.category_name.as_str()) {
                let _ = writeln!(out, "{}:", p.category_name);
                current_category = Some(p.category_name.as_str());
            }
            let _ = writeln!(
                out,
                "{:>4}  {:<24} {:<12} {}",
                p.project.id, p.project.name, p.project.language, p.project.path
            );
        }
        out.trim_end().to_string()
    }
}

/// Show one project with its category name.
pub fn project_show(store: &Store, id: i64) -> Result<ProjectWithCategory> {
    let project = store.get_project(id)?;
    let category = store.get_category(project.category_id)?;
    Ok(ProjectWithCategory {
        project,
        category_name: category.name,
    })
}

impl Output for ProjectWithCategory {
    fn to_json(&self) -> String {
        to_json_string(self)
    }

    fn to_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Project:  {} (id {})", self.project.name, self.project.id);
        let _ = writeln!(out, "Category: {}", self.category_name);
        let _ = writeln!(out, "Language: {}", self.project.language);
        let _ = writeln!(out, "Path:     {}", self.project.path);
        if self.project.uses_virtual_env {
            let manager = self
                .project
                .virtual_env_manager
                .as_deref()
                .unwrap_or("(unspecified)");
            let _ = writeln!(out, "Venv:     yes, managed by {}", manager);
        } else {
            let _ = writeln!(out, "Venv:     no");
        }
        out.trim_end().to_string()
    }
}

// === Config ===

#[derive(Debug, Serialize)]
pub struct ConfigValue {
    pub key: String,
    pub value: Option<String>,
}

/// Get a configuration value.
pub fn config_get(store: &Store, key: &str) -> Result<ConfigValue> {
    Ok(ConfigValue {
        key: key.to_string(),
        value: store.get_config(key)?,
    })
}

impl Output for ConfigValue {
    fn to_json(&self) -> String {
        to_json_string(self)
    }

    fn to_human(&self) -> String {
        match &self.value {
            Some(value) => format!("{} = {}", self.key, value),
            None => format!("{} is not set", self.key),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigUpdated {
    pub key: String,
    pub value: String,
}

/// Set a configuration value.
pub fn config_set(store: &mut Store, key: &str, value: &str) -> Result<ConfigUpdated> {
    store.set_config(key, value)?;
    Ok(ConfigUpdated {
        key: key.to_string(),
        value: value.to_string(),
    })
}

impl Output for ConfigUpdated {
    fn to_json(&self) -> String {
        to_json_string(self)
    }

    fn to_human(&self) -> String {
        format!("Set {} = {}", self.key, self.value)
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct ConfigList {
    pub configs: Vec<ConfigEntry>,
}

/// List all configuration values.
pub fn config_list(store: &Store) -> Result<ConfigList> {
    let configs = store
        .list_configs()?
        .into_iter()
        .map(|(key, value)| ConfigEntry { key, value })
        .collect();
    Ok(ConfigList { configs })
}

impl Output for ConfigList {
    fn to_json(&self) -> String {
        to_json_string(self)
    }

    fn to_human(&self) -> String {
        if self.configs.is_empty() {
            return "No configuration set.".to_string();
        }
        let mut out = String::new();
        for entry in &self.configs {
            let _ = writeln!(out, "{} = {}", entry.key, entry.value);
        }
        out.trim_end().to_string()
    }
}

// === System ===

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub built: &'static str,
}

/// Build metadata injected by build.rs.
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: crate::cli::package_version(),
        commit: crate::cli::git_commit(),
        built: crate::cli::build_timestamp(),
    }
}

impl Output for BuildInfo {
    fn to_json(&self) -> String {
        to_json_string(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Version: {}\nCommit:  {}\nBuilt:   {}",
            self.version, self.commit, self.built
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewProject;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_project_list_filter_by_category() {
        let (_dir, mut store) = create_test_store();
        let backend = store.add_category("Backend").unwrap();
        store
            .add_project(&NewProject {
                name: "Api".to_string(),
                path: "/a".to_string(),
                category_id: Some(backend),
                ..Default::default()
            })
            .unwrap();
        store
            .add_project(&NewProject {
                name: "Scratch".to_string(),
                path: "/s".to_string(),
                ..Default::default()
            })
            .unwrap();

        let all = project_list(&store, None).unwrap();
        assert_eq!(all.projects.len(), 2);

        let filtered = project_list(&store, Some("Backend")).unwrap();
        assert_eq!(filtered.projects.len(), 1);
        assert_eq!(filtered.projects[0].project.name, "Api");
    }

    #[test]
    fn test_project_list_human_groups_by_category() {
        let (_dir, mut store) = create_test_store();
        let backend = store.add_category("Backend").unwrap();
        store
            .add_project(&NewProject {
                name: "Api".to_string(),
                path: "/a".to_string(),
                category_id: Some(backend),
                ..Default::default()
            })
            .unwrap();

        let listing = project_list(&store, None).unwrap().to_human();
        assert!(listing.starts_with("Backend:"));
        assert!(listing.contains("Api"));
    }

    #[test]
    fn test_project_show_annotates_category() {
        let (_dir, mut store) = create_test_store();
        let backend = store.add_category("Backend").unwrap();
        let id = store
            .add_project(&NewProject {
                name: "Api".to_string(),
                path: "/a".to_string(),
                category_id: Some(backend),
                ..Default::default()
            })
            .unwrap();

        let shown = project_show(&store, id).unwrap();
        assert_eq!(shown.category_name, "Backend");

        let json: serde_json::Value = serde_json::from_str(&shown.to_json()).unwrap();
        assert_eq!(json["category_name"], "Backend");
        assert_eq!(json["name"], "Api");
    }

    #[test]
    fn test_config_round_trip_through_commands() {
        let (_dir, mut store) = create_test_store();

        assert_eq!(config_get(&store, "editor").unwrap().value, None);
        config_set(&mut store, "editor", "hx").unwrap();
        assert_eq!(
            config_get(&store, "editor").unwrap().value,
            Some("hx".to_string())
        );

        let listing = config_list(&store).unwrap();
        assert_eq!(listing.configs.len(), 1);
        assert_eq!(listing.configs[0].key, "editor");
    }
}
