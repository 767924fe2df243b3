//! Check command: lint dependencies.yaml files for alpha-spec compliance

use crate::checks::alpha_spec::check_alpha_spec;
use crate::core::config::{Mode, PackagePolicy};
use crate::core::error::{AlphaError, AlphaResult, ResultExt};
use crate::lint::{LintWarning, Linter};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Report for one linted file
#[derive(Debug, Serialize)]
pub struct FileReport {
  pub path: PathBuf,
  pub warnings: Vec<LintWarning>,
  /// Whether fixes were written back to the file
  pub fixed: bool,
}

/// Report for a whole check run
#[derive(Debug, Serialize)]
pub struct CheckReport {
  pub mode: Mode,
  pub total_warnings: usize,
  pub files: Vec<FileReport>,
}

/// Run the alpha-spec check over every file. Returns `true` when no warnings
/// were emitted; parse and I/O failures abort with an error instead.
pub fn run(files: &[PathBuf], mode: Mode, fix: bool, json: bool) -> AlphaResult<bool> {
  let policy = PackagePolicy::default();
  let mut linters = Vec::new();

  for path in files {
    let linter = check_file(path, &policy, mode, fix)?;
    linters.push(linter);
  }

  let total_warnings: usize = linters.iter().map(|l| l.warnings.len()).sum();
  let report = CheckReport {
    mode,
    total_warnings,
    files: linters
      .iter()
      .map(|linter| FileReport {
        path: linter.path.clone(),
        warnings: linter.warnings.clone(),
        fixed: fix && linter.has_warnings(),
      })
      .collect(),
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_report(&report, &linters, mode, fix);
  }

  Ok(total_warnings == 0)
}

/// Lint one file, writing fixes back when requested
fn check_file(path: &Path, policy: &PackagePolicy, mode: Mode, fix: bool) -> AlphaResult<Linter> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

  let mut linter = Linter::new(path, content);
  check_alpha_spec(&mut linter, policy, mode).map_err(|e| AlphaError::Yaml {
    path: path.to_path_buf(),
    message: e.to_string(),
  })?;

  if fix && linter.has_warnings() {
    std::fs::write(path, linter.fix_content())
      .with_context(|| format!("Failed to write {}", path.display()))?;
  }

  Ok(linter)
}

fn print_report(report: &CheckReport, linters: &[Linter], mode: Mode, fix: bool) {
  if report.total_warnings == 0 {
    println!("✅ No alpha-spec issues found ({} mode)", mode);
    return;
  }

  for linter in linters {
    if !linter.has_warnings() {
      continue;
    }
    println!("📄 {}", linter.path.display());
    for warning in &linter.warnings {
      let (line, column) = linter.line_col(warning.span.start);
      println!("   {}:{}: warning: {}", line, column, warning.message);
      for replacement in &warning.replacements {
        println!("      fix: {}", replacement.text);
      }
    }
    println!();
  }

  println!("⚠️  Found {} warning(s) in {} mode", report.total_warnings, mode);
  if fix {
    println!("✏️  Fixes were applied in place; review and re-stage the files");
  } else {
    println!();
    println!("To apply the fixes:");
    println!("  check-alpha-spec --mode {} --fix <FILES>", mode);
  }
}
