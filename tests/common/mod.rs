//! Common test utilities for berth integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't touch the
//! user's real `~/.local/share/berth/` directory.

#![allow(dead_code)]

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with isolated data storage.
///
/// Each `TestEnv` creates two temporary directories:
/// - `data_dir`: Holds berth's database and action log (via `BERTH_DATA_DIR`)
/// - `work_dir`: Scratch space for project paths
///
/// The `bt()` method returns a `Command` that sets `BERTH_DATA_DIR`
/// per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub data_dir: TempDir,
    pub work_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with isolated directories.
    pub fn new() -> Self {
        Self {
            data_dir: TempDir::new().unwrap(),
            work_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the bt binary with isolated data directory.
    ///
    /// Scrubs `VISUAL`/`EDITOR` so launcher behavior is deterministic.
    pub fn bt(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_bt"));
        cmd.current_dir(self.work_dir.path());
        cmd.env("BERTH_DATA_DIR", self.data_dir.path());
        cmd.env_remove("VISUAL");
        cmd.env_remove("EDITOR");
        cmd
    }

    /// Get the path to the data directory.
    pub fn data_path(&self) -> &std::path::Path {
        self.data_dir.path()
    }

    /// Get the path to the scratch work directory.
    pub fn work_path(&self) -> &std::path::Path {
        self.work_dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse JSON output from a command.
pub fn parse_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("Failed to parse JSON output")
}
