//! Common test utilities for Wakeful CLI tests.
//!
//! Provides `TestEnv`, an isolated project directory plus helpers to run the
//! wakeful binary against it. The two connection environment variables are
//! stripped from every run so tests behave the same on any machine.

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const ENV_VARS: &[&str] = &["SUPABASE_URL", "SUPABASE_SERVICE_ROLE_KEY"];

/// Result of running a wakeful CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment: a temp project directory and the binary path
pub struct TestEnv {
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("create temp project dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_wakeful")),
        }
    }

    /// Get a path relative to the project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Write a file into the project, creating parent directories
    pub fn write_project_file(&self, relative: &str, content: &str) {
        let full = self.project_path(relative);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("create parent directories");
        }
        std::fs::write(&full, content).expect("write project file");
    }

    /// Read a file from the project
    pub fn read_project_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.project_path(relative))
            .unwrap_or_else(|e| panic!("failed to read {}: {}", relative, e))
    }

    /// Run wakeful in the project directory with a clean environment
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run wakeful with extra environment variables set
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .stdin(Stdio::null());

        for name in ENV_VARS {
            cmd.env_remove(name);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute wakeful");
        output_to_result(output)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Relative destinations of the five managed files
pub const MANAGED_FILES: &[&str] = &[
    "app/api/keep-alive/route.ts",
    "utils/keep-alive.ts",
    "config/keep-alive.ts",
    "keep-alive.sql",
    "vercel.json",
];

/// Canonical path of the database client module
pub const CLIENT_MODULE: &str = "utils/db/client.ts";
