//! Specifier-set algebra and the canonical clause ordering
//!
//! Clauses are compared as strings, never as semantic version ranges. The
//! only structure imposed is the serialization order, which must be
//! deterministic so rewritten requirement strings are stable.

use crate::core::config::ALPHA_SPECIFIER;
use std::cmp::Ordering;

/// A set of specifier clauses (`>=24.0`, `!=24.2.1`, ...), deduplicated by
/// normalized text and kept in insertion order until serialized
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecifierSet {
  clauses: Vec<String>,
}

impl SpecifierSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert a clause; duplicates (by string equality) are ignored
  pub fn push(&mut self, clause: impl Into<String>) {
    let clause = clause.into();
    if !self.clauses.contains(&clause) {
      self.clauses.push(clause);
    }
  }

  pub fn contains(&self, clause: &str) -> bool {
    self.clauses.iter().any(|c| c == clause)
  }

  /// Whether the set carries the alpha sentinel clause
  pub fn has_alpha(&self) -> bool {
    self.contains(ALPHA_SPECIFIER)
  }

  /// This set with the alpha sentinel added (at most once)
  pub fn with_alpha(&self) -> Self {
    let mut set = self.clone();
    set.push(ALPHA_SPECIFIER);
    set
  }

  /// This set with the alpha sentinel removed
  pub fn without_alpha(&self) -> Self {
    Self {
      clauses: self.clauses.iter().filter(|c| *c != ALPHA_SPECIFIER).cloned().collect(),
    }
  }

  pub fn len(&self) -> usize {
    self.clauses.len()
  }

  pub fn is_empty(&self) -> bool {
    self.clauses.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.clauses.iter().map(String::as_str)
  }

  /// Canonical serialization: clauses joined by commas in the deterministic
  /// order defined by [`compare_specs`]. Empty sets serialize to "".
  pub fn canonical(&self) -> String {
    let mut clauses: Vec<&str> = self.clauses.iter().map(String::as_str).collect();
    // compare_specs is a strict weak ordering; distinct clauses can tie, so
    // the stable sort (insertion order for ties) keeps output deterministic.
    clauses.sort_by(|a, b| compare_specs(a, b));
    clauses.join(",")
  }
}

/// Serialization order for specifier clauses:
/// 1. identical text compares equal;
/// 2. the alpha sentinel sorts after everything else;
/// 3. otherwise, lexical comparison with comparison-operator characters
///    (`<`, `>`, `=`) stripped.
///
/// Distinct clauses that differ only in operator characters compare equal
/// here while remaining distinct set members; use a stable sort.
pub fn compare_specs(a: &str, b: &str) -> Ordering {
  if a == b {
    return Ordering::Equal;
  }
  if a == ALPHA_SPECIFIER {
    return Ordering::Greater;
  }
  if b == ALPHA_SPECIFIER {
    return Ordering::Less;
  }
  sort_key(a).cmp(&sort_key(b))
}

fn sort_key(clause: &str) -> String {
  clause.chars().filter(|c| !matches!(c, '<' | '>' | '=')).collect()
}
