//! Interactive workflows for Berth.
//!
//! Each workflow is a short, linear chain of prompts against the store:
//! pick-and-open from the menu, add/edit/delete a project or category.
//! A `None` from any prompt means the user backed out, and the whole
//! workflow unwinds as `WorkflowOutcome::Cancelled` without having touched
//! the store. Store failures abort the workflow and surface to the caller;
//! they are never retried.
//!
//! Values already supplied on the command line skip their prompts, so every
//! mutating workflow can also run fully non-interactively.

pub mod prompt;

pub use prompt::{Prompter, TerminalPrompter};

use crate::commands::Output;
use crate::models::{Category, NewProject, ProjectUpdate, ProjectWithCategory};
use crate::storage::Store;
use crate::{Error, Result, launch, workspace};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;

/// How an interactive workflow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The workflow ran to completion.
    Done { message: String, id: Option<i64> },
    /// The user backed out at a prompt; nothing was changed.
    Cancelled,
    /// There was nothing to operate on (e.g. no projects yet).
    Empty { message: String },
}

impl Output for WorkflowOutcome {
    fn to_json(&self) -> String {
        let value = match self {
            Self::Done { message, id } => json!({"status": "ok", "message": message, "id": id}),
            Self::Cancelled => json!({"status": "cancelled"}),
            Self::Empty { message } => json!({"status": "empty", "message": message}),
        };
        value.to_string()
    }

    fn to_human(&self) -> String {
        match self {
            Self::Done { message, .. } => message.clone(),
            Self::Cancelled => "Cancelled.".to_string(),
            Self::Empty { message } => message.clone(),
        }
    }
}

/// Project field values supplied on the command line; anything missing is
/// prompted for.
#[derive(Debug, Clone, Default)]
pub struct ProjectArgs {
    pub name: Option<String>,
    /// Category name (not id)
    pub category: Option<String>,
    pub language: Option<String>,
    pub path: Option<String>,
    pub virtual_env: Option<bool>,
    pub virtual_env_manager: Option<String>,
}

impl ProjectArgs {
    /// True when name, language, and path are all present, i.e. the add
    /// workflow needs no prompts.
    fn fully_specified(&self) -> bool {
        self.name.is_some() && self.language.is_some() && self.path.is_some()
    }
}

/// Pick a category, then a project within it, and open it in the editor.
/// Never mutates the store.
pub fn open_menu(store: &Store, prompter: &mut dyn Prompter) -> Result<WorkflowOutcome> {
    let projects = store.list_projects()?;
    if projects.is_empty() {
        return Ok(WorkflowOutcome::Empty {
            message: "No projects yet. Run `bt project add` first.".to_string(),
        });
    }

    let mut groups: BTreeMap<String, Vec<&ProjectWithCategory>> = BTreeMap::new();
    for project in &projects {
        groups
            .entry(project.category_name.clone())
            .or_default()
            .push(project);
    }

    let category_names: Vec<String> = groups.keys().cloned().collect();
    let Some(choice) = prompter.select("Category", &category_names, 0)? else {
        return Ok(WorkflowOutcome::Cancelled);
    };
    let in_category = &groups[&category_names[choice]];

    let labels: Vec<String> = in_category
        .iter()
        .map(|p| format!("{} ({})", p.project.name, p.project.language))
        .collect();
    let Some(choice) = prompter.select("Project", &labels, 0)? else {
        return Ok(WorkflowOutcome::Cancelled);
    };
    let project = &in_category[choice].project;

    let editor = launch::open_project(store, project)?;
    Ok(WorkflowOutcome::Done {
        message: format!("Opened '{}' in {}", project.name, editor),
        id: Some(project.id),
    })
}

/// Open a single project by id, or pick one when no id is given.
pub fn open_project(
    store: &Store,
    prompter: &mut dyn Prompter,
    id: Option<i64>,
) -> Result<WorkflowOutcome> {
    let project = match id {
        Some(id) => store.get_project(id)?,
        None => {
            let projects = store.list_projects()?;
            if projects.is_empty() {
                return Ok(WorkflowOutcome::Empty {
                    message: "No projects yet. Run `bt project add` first.".to_string(),
                });
            }
            let Some(choice) = prompter.select("Project", &project_labels(&projects), 0)? else {
                return Ok(WorkflowOutcome::Cancelled);
            };
            projects[choice].project.clone()
        }
    };

    let editor = launch::open_project(store, &project)?;
    Ok(WorkflowOutcome::Done {
        message: format!("Opened '{}' in {}", project.name, editor),
        id: Some(project.id),
    })
}

/// Add a category.
pub fn add_category(
    store: &mut Store,
    prompter: &mut dyn Prompter,
    name: Option<String>,
) -> Result<WorkflowOutcome> {
    let name = match name {
        Some(name) => name,
        None => {
            let Some(name) = prompter.input("Category name")? else {
                return Ok(WorkflowOutcome::Cancelled);
            };
            name
        }
    };

    let id = store.add_category(&name)?;
    Ok(WorkflowOutcome::Done {
        message: format!("Added category '{}' (id {})", name.trim(), id),
        id: Some(id),
    })
}

/// Rename a category.
pub fn edit_category(
    store: &mut Store,
    prompter: &mut dyn Prompter,
    id: Option<i64>,
    new_name: Option<String>,
) -> Result<WorkflowOutcome> {
    let current = match id {
        Some(id) => store.get_category(id)?,
        None => match pick_category(store, prompter)? {
            Picked::One(category) => category,
            Picked::Cancelled => return Ok(WorkflowOutcome::Cancelled),
            Picked::Nothing(outcome) => return Ok(outcome),
        },
    };

    let name = match new_name {
        Some(name) => name,
        None => {
            let Some(name) = prompter.input_with_default("New category name", &current.name)?
            else {
                return Ok(WorkflowOutcome::Cancelled);
            };
            name
        }
    };

    store.edit_category(current.id, &name)?;
    Ok(WorkflowOutcome::Done {
        message: format!("Renamed category '{}' to '{}'", current.name, name.trim()),
        id: Some(current.id),
    })
}

/// Delete a category and every project in it.
pub fn delete_category(
    store: &mut Store,
    prompter: &mut dyn Prompter,
    id: Option<i64>,
    yes: bool,
) -> Result<WorkflowOutcome> {
    let category = match id {
        Some(id) => store.get_category(id)?,
        None => match pick_category(store, prompter)? {
            Picked::One(category) => category,
            Picked::Cancelled => return Ok(WorkflowOutcome::Cancelled),
            Picked::Nothing(outcome) => return Ok(outcome),
        },
    };

    if !yes {
        let question = format!(
            "Delete category '{}' and every project in it?",
            category.name
        );
        match prompter.confirm(&question, false)? {
            Some(true) => {}
            _ => return Ok(WorkflowOutcome::Cancelled),
        }
    }

    store.delete_category(category.id)?;
    Ok(WorkflowOutcome::Done {
        message: format!("Deleted category '{}'", category.name),
        id: Some(category.id),
    })
}

/// Add a project, prompting for anything not supplied in `args`.
pub fn add_project(
    store: &mut Store,
    prompter: &mut dyn Prompter,
    args: ProjectArgs,
) -> Result<WorkflowOutcome> {
    let non_interactive = args.fully_specified();

    // Category comes first, as in the menu. A fully flag-specified add
    // without a category falls back to the store's sentinel.
    let category_id = match &args.category {
        Some(name) => Some(resolve_category(store, name)?.id),
        None if non_interactive => None,
        None => match pick_category(store, prompter)? {
            Picked::One(category) => Some(category.id),
            Picked::Cancelled => return Ok(WorkflowOutcome::Cancelled),
            Picked::Nothing(outcome) => return Ok(outcome),
        },
    };

    let Some(name) = value_or_input(prompter, args.name, "Project name")? else {
        return Ok(WorkflowOutcome::Cancelled);
    };
    let Some(language) = value_or_input(prompter, args.language, "Language")? else {
        return Ok(WorkflowOutcome::Cancelled);
    };
    let Some(path) = value_or_input(prompter, args.path, "Project path")? else {
        return Ok(WorkflowOutcome::Cancelled);
    };

    let uses_virtual_env = match args.virtual_env {
        Some(flag) => flag,
        None if args.virtual_env_manager.is_some() => true,
        None if non_interactive => false,
        None => {
            let Some(answer) = prompter.confirm("Uses a virtual environment?", false)? else {
                return Ok(WorkflowOutcome::Cancelled);
            };
            answer
        }
    };

    let virtual_env_manager = if uses_virtual_env {
        match args.virtual_env_manager {
            Some(manager) => Some(manager),
            None if non_interactive => None,
            None => {
                let Some(manager) = prompter.input("Virtual environment manager")? else {
                    return Ok(WorkflowOutcome::Cancelled);
                };
                Some(manager)
            }
        }
    } else {
        args.virtual_env_manager
    };

    let id = store.add_project(&NewProject {
        name: name.clone(),
        language,
        path: path.clone(),
        uses_virtual_env,
        virtual_env_manager,
        category_id,
    })?;

    // Best-effort workspace descriptor; the project is already saved, so a
    // failure here must not fail the workflow.
    if store.get_config_bool("workspace_file_enabled", true) {
        if let Err(e) = workspace::write_descriptor(name.trim(), Path::new(path.trim())) {
            eprintln!("Warning: could not write workspace file: {}", e);
        }
    }

    Ok(WorkflowOutcome::Done {
        message: format!("Added project '{}' (id {})", name.trim(), id),
        id: Some(id),
    })
}

/// Edit a project.
///
/// With field flags present, applies them as a partial update (picking the
/// project interactively when no id is given). With no flags, walks the
/// full prompt chain with the current values as defaults.
pub fn edit_project(
    store: &mut Store,
    prompter: &mut dyn Prompter,
    id: Option<i64>,
    args: ProjectArgs,
) -> Result<WorkflowOutcome> {
    let flag_update = flags_to_update(store, &args)?;

    let current = match id {
        Some(id) => store.get_project(id)?,
        None => {
            let projects = store.list_projects()?;
            if projects.is_empty() {
                return Ok(WorkflowOutcome::Empty {
                    message: "No projects yet. Run `bt project add` first.".to_string(),
                });
            }
            let Some(choice) = prompter.select("Project", &project_labels(&projects), 0)? else {
                return Ok(WorkflowOutcome::Cancelled);
            };
            projects[choice].project.clone()
        }
    };

    if !flag_update.is_empty() {
        store.update_project(current.id, &flag_update)?;
        return Ok(WorkflowOutcome::Done {
            message: format!("Updated project '{}'", current.name),
            id: Some(current.id),
        });
    }

    // Same field sequence as add, pre-filled from the existing record.
    let categories = store.list_categories()?;
    let names: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
    let default = categories
        .iter()
        .position(|c| c.id == current.category_id)
        .unwrap_or(0);
    let Some(choice) = prompter.select("Category", &names, default)? else {
        return Ok(WorkflowOutcome::Cancelled);
    };
    let category_id = categories[choice].id;

    let Some(name) = prompter.input_with_default("Project name", &current.name)? else {
        return Ok(WorkflowOutcome::Cancelled);
    };
    let Some(language) = prompter.input_with_default("Language", &current.language)? else {
        return Ok(WorkflowOutcome::Cancelled);
    };
    let Some(path) = prompter.input_with_default("Project path", &current.path)? else {
        return Ok(WorkflowOutcome::Cancelled);
    };
    let Some(uses_virtual_env) =
        prompter.confirm("Uses a virtual environment?", current.uses_virtual_env)?
    else {
        return Ok(WorkflowOutcome::Cancelled);
    };
    let virtual_env_manager = if uses_virtual_env {
        let previous = current.virtual_env_manager.as_deref().unwrap_or("");
        let Some(manager) = prompter.input_with_default("Virtual environment manager", previous)?
        else {
            return Ok(WorkflowOutcome::Cancelled);
        };
        Some(manager)
    } else {
        None
    };

    store.update_project(
        current.id,
        &ProjectUpdate {
            name: Some(name.clone()),
            language: Some(language),
            path: Some(path),
            uses_virtual_env: Some(uses_virtual_env),
            virtual_env_manager: Some(virtual_env_manager),
            category_id: Some(category_id),
        },
    )?;

    Ok(WorkflowOutcome::Done {
        message: format!("Updated project '{}'", name.trim()),
        id: Some(current.id),
    })
}

/// Delete a project.
pub fn delete_project(
    store: &mut Store,
    prompter: &mut dyn Prompter,
    id: Option<i64>,
    yes: bool,
) -> Result<WorkflowOutcome> {
    let project = match id {
        Some(id) => store.get_project(id)?,
        None => {
            let projects = store.list_projects()?;
            if projects.is_empty() {
                return Ok(WorkflowOutcome::Empty {
                    message: "No projects yet. Run `bt project add` first.".to_string(),
                });
            }
            let Some(choice) = prompter.select("Project", &project_labels(&projects), 0)? else {
                return Ok(WorkflowOutcome::Cancelled);
            };
            projects[choice].project.clone()
        }
    };

    if !yes {
        let question = format!("Delete project '{}'?", project.name);
        match prompter.confirm(&question, false)? {
            Some(true) => {}
            _ => return Ok(WorkflowOutcome::Cancelled),
        }
    }

    store.delete_project(project.id)?;
    Ok(WorkflowOutcome::Done {
        message: format!("Deleted project '{}'", project.name),
        id: Some(project.id),
    })
}

/// Result of asking the user to pick a category.
enum Picked {
    One(Category),
    Cancelled,
    Nothing(WorkflowOutcome),
}

fn pick_category(store: &Store, prompter: &mut dyn Prompter) -> Result<Picked> {
    let categories = store.list_categories()?;
    if categories.is_empty() {
        return Ok(Picked::Nothing(WorkflowOutcome::Empty {
            message: "No categories yet. Run `bt category add` first.".to_string(),
        }));
    }
    let names: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();
    match prompter.select("Category", &names, 0)? {
        Some(choice) => Ok(Picked::One(categories[choice].clone())),
        None => Ok(Picked::Cancelled),
    }
}

fn project_labels(projects: &[ProjectWithCategory]) -> Vec<String> {
    projects
        .iter()
        .map(|p| format!("{} [{}]", p.project.name, p.category_name))
        .collect()
}

fn resolve_category(store: &Store, name: &str) -> Result<Category> {
    store
        .find_category_by_name(name)?
        .ok_or_else(|| Error::NotFound(format!("category '{}'", name.trim())))
}

fn value_or_input(
    prompter: &mut dyn Prompter,
    value: Option<String>,
    prompt: &str,
) -> Result<Option<String>> {
    match value {
        Some(value) => Ok(Some(value)),
        None => prompter.input(prompt),
    }
}

fn flags_to_update(store: &Store, args: &ProjectArgs) -> Result<ProjectUpdate> {
    let category_id = match &args.category {
        Some(name) => Some(resolve_category(store, name)?.id),
        None => None,
    };
    Ok(ProjectUpdate {
        name: args.name.clone(),
        language: args.language.clone(),
        path: args.path.clone(),
        uses_virtual_env: args.virtual_env,
        virtual_env_manager: args.virtual_env_manager.clone().map(Some),
        category_id,
    })
}
