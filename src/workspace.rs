//! Workspace descriptor files.
//!
//! When a project is added, a `<project-name>.code-workspace` file is
//! dropped into the project's directory so editors that understand the
//! format can open it as a workspace. The write is best-effort: callers
//! treat a failure here as a warning, never as a failed workflow.

use crate::Result;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// Write a minimal workspace descriptor into `project_path` if the
/// directory exists and no descriptor is present yet.
///
/// Returns the path of the written file, or `None` when the write was
/// skipped (missing directory or existing descriptor).
pub fn write_descriptor(project_name: &str, project_path: &Path) -> Result<Option<PathBuf>> {
    if !project_path.is_dir() {
        return Ok(None);
    }

    let file_path = project_path.join(format!("{}.code-workspace", project_name));
    if file_path.exists() {
        return Ok(None);
    }

    let document = json!({
        "folders": [
            { "path": "." }
        ]
    });

    fs::write(&file_path, serde_json::to_string_pretty(&document)?)?;
    Ok(Some(file_path))
}
