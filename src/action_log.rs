//! Action logging for Berth commands.
//!
//! Every command invocation is appended to `<data-dir>/action.log` as a
//! JSONL entry. Logging is best-effort: failures degrade to a warning on
//! stderr and never fail the command itself. The `action_log_enabled`
//! config key (default true) turns it off.

use crate::storage::Store;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Log filename inside the data directory.
const LOG_FILE: &str = "action.log";

/// A single action log entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionLog {
    /// ISO 8601 timestamp when the action occurred
    pub timestamp: DateTime<Utc>,

    /// Command name (e.g. "project add", "menu")
    pub command: String,

    /// Command arguments as JSON, sanitized
    pub args: serde_json::Value,

    /// Whether the command succeeded
    pub success: bool,

    /// Error message if the command failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Command execution duration in milliseconds
    pub duration_ms: u64,

    /// User who executed the command
    pub user: String,
}

/// Log an action to `<data-dir>/action.log`.
///
/// This function never propagates logging problems to the command path; it
/// falls back to a stderr warning at worst.
pub fn log_action(
    data_dir: &Path,
    command: &str,
    args: serde_json::Value,
    success: bool,
    error: Option<String>,
    duration_ms: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let enabled = match Store::open(data_dir) {
        Ok(store) => store.get_config_bool("action_log_enabled", true),
        Err(_) => true,
    };
    if !enabled {
        return Ok(());
    }

    let entry = ActionLog {
        timestamp: Utc::now(),
        command: command.to_string(),
        args: sanitize_args(&args),
        success,
        error,
        duration_ms,
        user: get_current_user(),
    };

    if let Err(e) = write_log_entry(&data_dir.join(LOG_FILE), &entry) {
        eprintln!("Warning: failed to write action log: {}", e);
    }

    Ok(())
}

/// Append a log entry to the log file.
fn write_log_entry(path: &Path, entry: &ActionLog) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(entry)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", json)?;

    Ok(())
}

/// Sanitize arguments before they hit the log.
///
/// Path-like strings are reduced to their basename, long strings are
/// truncated, large arrays are summarized, and values under secret-looking
/// keys are redacted.
fn sanitize_args(args: &serde_json::Value) -> serde_json::Value {
    match args {
        serde_json::Value::Object(map) => {
            let mut sanitized = serde_json::Map::new();
            for (key, value) in map {
                let key_lower = key.to_lowercase();
                if key_lower.contains("token")
                    || key_lower.contains("secret")
                    || key_lower.contains("password")
                {
                    sanitized.insert(
                        key.clone(),
                        serde_json::Value::String("[REDACTED]".to_string()),
                    );
                } else {
                    sanitized.insert(key.clone(), sanitize_args(value));
                }
            }
            serde_json::Value::Object(sanitized)
        }
        serde_json::Value::Array(arr) => {
            if arr.len() > 10 {
                serde_json::Value::String(format!("[Array with {} items]", arr.len()))
            } else {
                serde_json::Value::Array(arr.iter().map(sanitize_args).collect())
            }
        }
        serde_json::Value::String(s) => {
            let sanitized = if s.contains('/') || s.contains('\\') {
                s.rsplit(['/', '\\']).next().unwrap_or(s).to_string()
            } else {
                s.clone()
            };

            if sanitized.len() > 100 {
                serde_json::Value::String(format!(
                    "{}... ({} chars)",
                    &sanitized[..97],
                    sanitized.len()
                ))
            } else {
                serde_json::Value::String(sanitized)
            }
        }
        _ => args.clone(),
    }
}

/// Get the current user's username.
fn get_current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_simple_string() {
        let value = serde_json::json!("hello");
        assert_eq!(sanitize_args(&value), serde_json::json!("hello"));
    }

    #[test]
    fn test_sanitize_file_path() {
        let value = serde_json::json!("/very/long/path/to/project");
        assert_eq!(sanitize_args(&value), serde_json::json!("project"));
    }

    #[test]
    fn test_sanitize_windows_path() {
        let value = serde_json::json!("C:\\Users\\dev\\project");
        assert_eq!(sanitize_args(&value), serde_json::json!("project"));
    }

    #[test]
    fn test_sanitize_long_string() {
        let long = "a".repeat(150);
        let sanitized = sanitize_args(&serde_json::json!(long));
        if let serde_json::Value::String(s) = sanitized {
            assert!(s.contains("... (150 chars)"));
        } else {
            panic!("expected string value");
        }
    }

    #[test]
    fn test_sanitize_secretish_keys() {
        let value = serde_json::json!({
            "name": "Api",
            "api_token": "abc123",
        });
        let sanitized = sanitize_args(&value);
        assert_eq!(sanitized["name"], "Api");
        assert_eq!(sanitized["api_token"], "[REDACTED]");
    }

    #[test]
    fn test_sanitize_large_array() {
        let arr: Vec<i32> = (0..15).collect();
        let sanitized = sanitize_args(&serde_json::json!(arr));
        assert_eq!(sanitized, serde_json::json!("[Array with 15 items]"));
    }

    #[test]
    fn test_log_action_appends_jsonl() {
        let dir = TempDir::new().unwrap();

        log_action(
            dir.path(),
            "project add",
            serde_json::json!({"name": "Api"}),
            true,
            None,
            12,
        )
        .unwrap();
        log_action(
            dir.path(),
            "project rm",
            serde_json::json!({"id": 1}),
            false,
            Some("Not found: project 1".to_string()),
            3,
        )
        .unwrap();

        let content = std::fs::read_to_string(dir.path().join(LOG_FILE)).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: ActionLog = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.command, "project add");
        assert!(first.success);

        let second: ActionLog = serde_json::from_str(lines[1]).unwrap();
        assert!(!second.success);
        assert!(second.error.is_some());
    }

    #[test]
    fn test_log_action_respects_disable_flag() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = Store::open(dir.path()).unwrap();
            store.set_config("action_log_enabled", "false").unwrap();
        }

        log_action(dir.path(), "menu", serde_json::json!({}), true, None, 1).unwrap();

        assert!(!dir.path().join(LOG_FILE).exists());
    }
}
