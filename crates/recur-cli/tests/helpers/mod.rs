use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// Test harness running the CLI inside an isolated working directory, so no
/// stray `recur.toml` is picked up.
pub struct CliTestHarness {
    temp_dir: TempDir,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("recur").expect("Failed to find recur binary");
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Write a `recur.toml` into the working directory
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.dir().join("recur.toml"), contents).expect("Failed to write config");
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}

/// Common test fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Three Mondays in January 2024
    pub fn weekly_rule_args() -> Vec<&'static str> {
        vec![
            "FREQ=WEEKLY;COUNT=3",
            "--start", "2024-01-01 09:00",
            "--timezone", "UTC",
        ]
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    /// Predicate to check if output contains the occurrence table headers
    pub fn has_occurrence_table_headers() -> impl Predicate<str> {
        predicate::str::contains("Occurrence")
            .and(predicate::str::contains("Day"))
            .and(predicate::str::contains("Month"))
    }

    /// Predicate to check for error messages
    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
