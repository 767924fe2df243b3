//! Static policy configuration: the tracked RAPIDS packages, the CUDA-suffix
//! naming convention, and the lint mode.

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

/// The specifier that marks a requirement as accepting pre-release builds.
/// Not a real version constraint; it is a policy marker.
pub const ALPHA_SPECIFIER: &str = ">=0.0.0a0";

/// RAPIDS packages whose requirements carry the alpha spec in development mode
const ALPHA_SPEC_PACKAGES: &[&str] = &[
  "cubinlinker",
  "cucim",
  "cudf",
  "cugraph",
  "cugraph-dgl",
  "cugraph-equivariant",
  "cugraph-pyg",
  "cuml",
  "cuproj",
  "cuspatial",
  "cuxfilter",
  "dask-cuda",
  "dask-cudf",
  "distributed-ucxx",
  "librmm",
  "libucx",
  "nx-cugraph",
  "ptxcompiler",
  "pylibcugraph",
  "pylibcugraphops",
  "pylibraft",
  "pylibwholegraph",
  "pynvjitlink",
  "raft-dask",
  "rmm",
  "ucx-py",
  "ucxx",
];

/// Tracked packages that are never published with a CUDA suffix
const NON_CUDA_SUFFIXED_PACKAGES: &[&str] = &["dask-cuda"];

static CUDA_SUFFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(?P<package>.*)-cu[0-9]{2}$").expect("CUDA suffix regex is valid")
});

/// Lint mode: development requires the alpha spec, release forbids it
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  Development,
  Release,
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Mode::Development => write!(f, "development"),
      Mode::Release => write!(f, "release"),
    }
  }
}

/// The tracked package set and its suffix conventions
#[derive(Debug, Clone)]
pub struct PackagePolicy {
  packages: BTreeSet<String>,
  cuda_suffixed: BTreeSet<String>,
}

impl Default for PackagePolicy {
  fn default() -> Self {
    let packages: BTreeSet<String> = ALPHA_SPEC_PACKAGES.iter().map(|p| p.to_string()).collect();
    let cuda_suffixed = packages
      .iter()
      .filter(|p| !NON_CUDA_SUFFIXED_PACKAGES.contains(&p.as_str()))
      .cloned()
      .collect();
    Self { packages, cuda_suffixed }
  }
}

impl PackagePolicy {
  /// Build a policy from explicit package lists (used by tests; production
  /// code uses the RAPIDS defaults)
  pub fn new(packages: &[&str], non_cuda_suffixed: &[&str]) -> Self {
    let packages: BTreeSet<String> = packages.iter().map(|p| p.to_string()).collect();
    let cuda_suffixed = packages
      .iter()
      .filter(|p| !non_cuda_suffixed.contains(&p.as_str()))
      .cloned()
      .collect();
    Self { packages, cuda_suffixed }
  }

  /// Whether `name` references a tracked package, directly or via CUDA suffix
  pub fn is_tracked(&self, name: &str) -> bool {
    self.packages.contains(name) || self.is_cuda_suffixed(name)
  }

  /// Whether `name` is a CUDA-suffixed instance of a tracked base package
  /// (`rmm-cu12` matches `rmm`; the suffix is exactly `-cu` plus two digits)
  pub fn is_cuda_suffixed(&self, name: &str) -> bool {
    CUDA_SUFFIX_REGEX
      .captures(name)
      .is_some_and(|caps| self.cuda_suffixed.contains(&caps["package"]))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tracked_packages() {
    let policy = PackagePolicy::default();
    assert!(policy.is_tracked("cudf"));
    assert!(policy.is_tracked("rmm"));
    assert!(policy.is_tracked("dask-cuda"));
    assert!(!policy.is_tracked("numpy"));
    assert!(!policy.is_tracked("pandas"));
  }

  #[test]
  fn test_cuda_suffix_matching() {
    let policy = PackagePolicy::default();
    assert!(policy.is_tracked("rmm-cu12"));
    assert!(policy.is_tracked("cudf-cu11"));
    assert!(policy.is_cuda_suffixed("pylibraft-cu12"));

    // Suffix must be exactly two digits at the end of the name.
    assert!(!policy.is_tracked("rmm-cu1"));
    assert!(!policy.is_tracked("rmm-cu123"));
    assert!(!policy.is_tracked("rmm-cu12x"));
  }

  #[test]
  fn test_dask_cuda_is_exempt_from_suffixing() {
    let policy = PackagePolicy::default();
    assert!(policy.is_tracked("dask-cuda"));
    assert!(!policy.is_tracked("dask-cuda-cu12"));
    assert!(!policy.is_cuda_suffixed("dask-cuda-cu12"));
  }

  #[test]
  fn test_untracked_base_with_suffix() {
    let policy = PackagePolicy::default();
    assert!(!policy.is_tracked("numpy-cu12"));
  }

  #[test]
  fn test_custom_policy() {
    let policy = PackagePolicy::new(&["apkg", "bpkg"], &["bpkg"]);
    assert!(policy.is_tracked("apkg-cu12"));
    assert!(!policy.is_tracked("bpkg-cu12"));
    assert!(policy.is_tracked("bpkg"));
  }

  #[test]
  fn test_mode_display() {
    assert_eq!(Mode::Development.to_string(), "development");
    assert_eq!(Mode::Release.to_string(), "release");
  }
}
