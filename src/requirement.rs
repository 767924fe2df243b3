//! Dependency requirement-string parsing
//!
//! Parses strings like `cudf>=24.0,>=0.0.0a0` or `ucx-py[extra1,extra2]` into
//! a package name, extras, and a specifier set. A string that does not follow
//! the grammar is reported as [`InvalidRequirement`]; callers treat that as
//! "not a requirement" and skip the node rather than failing the run.

use crate::specifier::SpecifierSet;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static REQUIREMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"(?x)^\s*
      (?P<name>[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)
      \s*(?:\[(?P<extras>[^\]]*)\])?
      \s*(?P<specs>.*?)\s*$",
  )
  .expect("requirement regex is valid")
});

static CLAUSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\s*(?P<op>===|==|~=|!=|<=|>=|<|>)\s*(?P<version>[A-Za-z0-9._*+!-]+)\s*$")
    .expect("clause regex is valid")
});

static EXTRA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$").expect("extra regex is valid")
});

/// The input does not follow the dependency-specifier grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRequirement {
  input: String,
}

impl InvalidRequirement {
  fn new(input: &str) -> Self {
    Self { input: input.to_string() }
  }
}

impl fmt::Display for InvalidRequirement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "invalid requirement: {:?}", self.input)
  }
}

impl std::error::Error for InvalidRequirement {}

/// A parsed package requirement
#[derive(Debug, Clone, PartialEq)]
pub struct Requirement {
  /// The package name as written, including any CUDA suffix
  pub name: String,
  pub extras: Vec<String>,
  pub specifiers: SpecifierSet,
}

impl FromStr for Requirement {
  type Err = InvalidRequirement;

  fn from_str(input: &str) -> Result<Self, Self::Err> {
    let caps = REQUIREMENT_REGEX
      .captures(input)
      .ok_or_else(|| InvalidRequirement::new(input))?;

    let name = caps["name"].to_string();

    let mut extras = Vec::new();
    if let Some(extras_text) = caps.name("extras") {
      for extra in extras_text.as_str().split(',') {
        let extra = extra.trim();
        if !EXTRA_REGEX.is_match(extra) {
          return Err(InvalidRequirement::new(input));
        }
        extras.push(extra.to_string());
      }
    }

    let mut specifiers = SpecifierSet::new();
    let specs = caps["specs"].trim();
    if !specs.is_empty() {
      for clause in specs.split(',') {
        let clause_caps = CLAUSE_REGEX
          .captures(clause)
          .ok_or_else(|| InvalidRequirement::new(input))?;
        // Normalized clause text: operator and version with no whitespace.
        specifiers.push(format!("{}{}", &clause_caps["op"], &clause_caps["version"]));
      }
    }

    Ok(Requirement { name, extras, specifiers })
  }
}
