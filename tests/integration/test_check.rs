//! Integration tests for check reporting and exit codes

use crate::helpers::{TestFile, run_check, simple_yaml, stderr_of, stdout_of};
use anyhow::Result;

#[test]
fn test_clean_file_exits_zero() -> Result<()> {
  let file = TestFile::new(&simple_yaml("cudf>=24.0,>=0.0.0a0"))?;
  let output = run_check(&["--mode", "development"], &file)?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
  assert!(stdout_of(&output).contains("No alpha-spec issues"));
  Ok(())
}

#[test]
fn test_missing_alpha_spec_fails_in_development() -> Result<()> {
  let file = TestFile::new(&simple_yaml("cudf>=24.0"))?;
  let output = run_check(&["--mode", "development"], &file)?;

  assert_eq!(output.status.code(), Some(3));
  let stdout = stdout_of(&output);
  assert!(stdout.contains("add alpha spec for RAPIDS package cudf"));
  assert!(stdout.contains("fix: cudf>=24.0,>=0.0.0a0"));
  Ok(())
}

#[test]
fn test_alpha_spec_fails_in_release() -> Result<()> {
  let file = TestFile::new(&simple_yaml("cudf>=24.0,>=0.0.0a0"))?;
  let output = run_check(&["--mode", "release"], &file)?;

  assert_eq!(output.status.code(), Some(3));
  let stdout = stdout_of(&output);
  assert!(stdout.contains("remove alpha spec for RAPIDS package cudf"));
  assert!(stdout.contains("fix: cudf>=24.0"));
  Ok(())
}

#[test]
fn test_release_mode_accepts_missing_alpha_spec() -> Result<()> {
  let file = TestFile::new(&simple_yaml("cudf>=24.0"))?;
  let output = run_check(&["--mode", "release"], &file)?;

  assert_eq!(output.status.code(), Some(0));
  Ok(())
}

#[test]
fn test_development_is_the_default_mode() -> Result<()> {
  let file = TestFile::new(&simple_yaml("cudf>=24.0"))?;
  let output = run_check(&[], &file)?;

  assert_eq!(output.status.code(), Some(3));
  Ok(())
}

#[test]
fn test_untracked_package_is_ignored() -> Result<()> {
  let file = TestFile::new(&simple_yaml("numpy>=1.0"))?;
  let output = run_check(&["--mode", "development"], &file)?;

  assert_eq!(output.status.code(), Some(0));
  Ok(())
}

#[test]
fn test_cuda_suffixed_package_is_tracked() -> Result<()> {
  let file = TestFile::new(&simple_yaml("rmm-cu12>=24.0"))?;
  let output = run_check(&["--mode", "development"], &file)?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stdout_of(&output).contains("add alpha spec for RAPIDS package rmm-cu12"));
  Ok(())
}

#[test]
fn test_exempt_package_suffix_is_not_tracked() -> Result<()> {
  let file = TestFile::new(&simple_yaml("dask-cuda-cu12>=24.0"))?;
  let output = run_check(&["--mode", "development"], &file)?;

  assert_eq!(output.status.code(), Some(0));
  Ok(())
}

#[test]
fn test_invalid_yaml_is_a_hard_error() -> Result<()> {
  let file = TestFile::new("dependencies:\n  - a\n b: [\n")?;
  let output = run_check(&["--mode", "development"], &file)?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr_of(&output).contains("YAML parse error"));
  Ok(())
}

#[test]
fn test_json_report() -> Result<()> {
  let file = TestFile::new(&simple_yaml("cudf>=24.0"))?;
  let output = run_check(&["--mode", "development", "--json"], &file)?;

  assert_eq!(output.status.code(), Some(3));
  let report: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;
  assert_eq!(report["mode"], "development");
  assert_eq!(report["total_warnings"], 1);
  let warning = &report["files"][0]["warnings"][0];
  assert_eq!(warning["message"], "add alpha spec for RAPIDS package cudf");
  assert_eq!(warning["replacements"][0]["text"], "cudf>=24.0,>=0.0.0a0");
  Ok(())
}

#[test]
fn test_aliased_requirement_warned_once() -> Result<()> {
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
  let output = run_check(&["--mode", "development"], &file)?;

  assert_eq!(output.status.code(), Some(3));
  let stdout = stdout_of(&output);
  assert_eq!(stdout.matches("add alpha spec for RAPIDS package cudf").count(), 1);
  Ok(())
}
