//! Berth - a categorized project launcher for the terminal.
//!
//! This library provides the core functionality for the `bt` CLI tool:
//! a SQLite-backed store of projects grouped into named categories, and
//! the interactive workflows (pickers and prompt chains) for managing and
//! opening them.

pub mod action_log;
pub mod cli;
pub mod commands;
pub mod launch;
pub mod models;
pub mod storage;
pub mod workflow;
pub mod workspace;

/// Library-level error type for Berth operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    Duplicate(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No editor available: {0}")]
    NoEditor(String),
}

/// Result type alias for Berth operations.
pub type Result<T> = std::result::Result<T, Error>;
