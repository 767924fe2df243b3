//! Integration tests for --fix application

use crate::helpers::{TestFile, run_check, simple_yaml, stdout_of};
use anyhow::Result;

#[test]
fn test_fix_adds_alpha_spec_in_place() -> Result<()> {
  let file = TestFile::new(&simple_yaml("cudf>=24.0"))?;
  let output = run_check(&["--mode", "development", "--fix"], &file)?;

  // Fixed files still fail the run so pre-commit makes the user re-stage.
  assert_eq!(output.status.code(), Some(3));
  assert!(stdout_of(&output).contains("Fixes were applied"));
  assert_eq!(file.read()?, simple_yaml("cudf>=24.0,>=0.0.0a0"));
  Ok(())
}

#[test]
fn test_fix_removes_alpha_spec_in_place() -> Result<()> {
  let file = TestFile::new(&simple_yaml("cudf>=24.0,>=0.0.0a0"))?;
  let output = run_check(&["--mode", "release", "--fix"], &file)?;

  assert_eq!(output.status.code(), Some(3));
  assert_eq!(file.read()?, simple_yaml("cudf>=24.0"));
  Ok(())
}

#[test]
fn test_fix_is_idempotent() -> Result<()> {
  let file = TestFile::new(&simple_yaml("cudf>=24.0"))?;
  run_check(&["--mode", "development", "--fix"], &file)?;
  let fixed_once = file.read()?;

  let output = run_check(&["--mode", "development", "--fix"], &file)?;
  assert_eq!(output.status.code(), Some(0));
  assert_eq!(file.read()?, fixed_once);
  Ok(())
}

#[test]
fn test_fix_preserves_anchor_declaration() -> Result<()> {
  let file = TestFile::new(
    "\
dependencies:
  run:
    common:
      - packages:
          - &cudf_dep cudf>=24.0
  test:
    common:
      - packages:
          - *cudf_dep
",
  )?;
  let output = run_check(&["--mode", "development", "--fix"], &file)?;

  assert_eq!(output.status.code(), Some(3));
  let fixed = file.read()?;
  assert!(fixed.contains("- &cudf_dep cudf>=24.0,>=0.0.0a0"));
  assert!(fixed.contains("- *cudf_dep"));

  // The fixed file parses cleanly and needs no further changes.
  let output = run_check(&["--mode", "development"], &file)?;
  assert_eq!(output.status.code(), Some(0));
  Ok(())
}

#[test]
fn test_fix_touches_only_flagged_requirements() -> Result<()> {
  let file = TestFile::new(
    "\
dependencies:
  run:
    common:
      - packages:
          - rmm>=24.0
          - numpy>=1.0
          - cudf>=24.0,>=0.0.0a0
",
  )?;
  let output = run_check(&["--mode", "development", "--fix"], &file)?;

  assert_eq!(output.status.code(), Some(3));
  let fixed = file.read()?;
  assert!(fixed.contains("- rmm>=24.0,>=0.0.0a0"));
  assert!(fixed.contains("- numpy>=1.0\n"));
  assert!(fixed.contains("- cudf>=24.0,>=0.0.0a0\n"));
  Ok(())
}

#[test]
fn test_without_fix_file_is_untouched() -> Result<()> {
  let content = simple_yaml("cudf>=24.0");
  let file = TestFile::new(&content)?;
  run_check(&["--mode", "development"], &file)?;

  assert_eq!(file.read()?, content);
  Ok(())
}
