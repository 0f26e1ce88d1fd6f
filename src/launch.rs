//! Launching projects in the user's editor.
//!
//! Resolution order for the editor command: the `editor` config key, then
//! `$VISUAL`, then `$EDITOR`, then `code`. The configured value may carry
//! arguments ("code -n"); the project path is appended as the final
//! argument.

use crate::models::Project;
use crate::storage::Store;
use crate::{Error, Result};
use std::env;
use std::process::Command;

/// Fallback editor when nothing is configured.
const DEFAULT_EDITOR: &str = "code";

/// Resolve the editor command line to use for opening projects.
pub fn resolve_editor(store: &Store) -> Result<String> {
    if let Some(editor) = store.get_config("editor")? {
        let editor = editor.trim().to_string();
        if !editor.is_empty() {
            return Ok(editor);
        }
    }

    for var in ["VISUAL", "EDITOR"] {
        if let Ok(value) = env::var(var) {
            let value = value.trim().to_string();
            if !value.is_empty() {
                return Ok(value);
            }
        }
    }

    Ok(DEFAULT_EDITOR.to_string())
}

/// Open the project's path with the resolved editor and wait for it to
/// return. Returns the program name that was launched.
pub fn open_project(store: &Store, project: &Project) -> Result<String> {
    let editor = resolve_editor(store)?;

    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| Error::NoEditor("empty editor command".to_string()))?
        .to_string();

    Command::new(&program)
        .args(parts)
        .arg(&project.path)
        .status()
        .map_err(|e| Error::NoEditor(format!("failed to run '{}': {}", program, e)))?;

    Ok(program)
}
