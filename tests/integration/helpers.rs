//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// A dependencies.yaml file in a temporary directory
pub struct TestFile {
  _dir: TempDir,
  pub path: PathBuf,
}

impl TestFile {
  pub fn new(content: &str) -> Result<Self> {
    let dir = TempDir::new()?;
    let path = dir.path().join("dependencies.yaml");
    std::fs::write(&path, content)?;
    Ok(Self { _dir: dir, path })
  }

  pub fn read(&self) -> Result<String> {
    std::fs::read_to_string(&self.path).context("Failed to read test file")
  }
}

/// Run the check-alpha-spec binary; callers assert on status and output
pub fn run_check(args: &[&str], file: &TestFile) -> Result<Output> {
  Command::new(env!("CARGO_BIN_EXE_check-alpha-spec"))
    .args(args)
    .arg(&file.path)
    .output()
    .context("Failed to run check-alpha-spec")
}

pub fn stdout_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}

/// A minimal dependencies.yaml with one tracked package
pub fn simple_yaml(requirement: &str) -> String {
  format!(
    "\
dependencies:
  run:
    common:
      - output_types: [pyproject]
        packages:
          - {}
",
    requirement
  )
}
