//! Alpha-spec check for dependencies.yaml
//!
//! Walks the fixed document shape
//!
//! ```text
//! root(map) . "dependencies"(map) . *(map) . "common"(seq) . *(map) . "packages"(seq) . *
//! root(map) . "dependencies"(map) . *(map) . "specific"(seq) . *(map) . "matrices"(seq) . *(map) . "packages"(seq) . *
//! ```
//!
//! and evaluates every package-requirement scalar against the mode policy:
//! development requires the alpha spec, release forbids it. Nodes that do not
//! match the expected kind or key at any step are skipped, never errors; the
//! shape is only partially populated in many real files.

use crate::core::config::{Mode, PackagePolicy};
use crate::lint::Linter;
use crate::requirement::Requirement;
use crate::yaml::{Document, LoadError, Node, load_documents};
use std::collections::HashSet;
use std::rc::Rc;

/// Run the alpha-spec check over every document in the linter's content.
///
/// Invalid YAML is fatal for the whole input: the error is returned before
/// any warning is recorded. Requirement strings that fail to parse, or name
/// untracked packages, are silently skipped.
pub fn check_alpha_spec(linter: &mut Linter, policy: &PackagePolicy, mode: Mode) -> Result<(), LoadError> {
  let documents = load_documents(&linter.content)?;
  for document in &documents {
    let mut walk = AlphaSpecWalk {
      policy,
      mode,
      document,
      used_anchors: HashSet::new(),
    };
    walk.check_root(linter, &document.root);
  }
  Ok(())
}

/// One document walk: pure depth-first descent in document order, with the
/// used-anchor set as its only mutable state
struct AlphaSpecWalk<'a> {
  policy: &'a PackagePolicy,
  mode: Mode,
  document: &'a Document,
  /// Anchors whose node has already been evaluated (warned or not); later
  /// alias occurrences of the same anchor are never re-flagged
  used_anchors: HashSet<String>,
}

impl AlphaSpecWalk<'_> {
  fn check_root(&mut self, linter: &mut Linter, node: &Rc<Node>) {
    let Some(entries) = node.as_mapping() else { return };
    for (key, value) in entries {
      if key.as_str() == Some("dependencies") {
        self.check_dependencies(linter, value);
      }
    }
  }

  fn check_dependencies(&mut self, linter: &mut Linter, node: &Rc<Node>) {
    let Some(entries) = node.as_mapping() else { return };
    for (_, dependency) in entries {
      let Some(dependency_entries) = dependency.as_mapping() else { continue };
      for (key, value) in dependency_entries {
        match key.as_str() {
          Some("common") => self.check_common(linter, value),
          Some("specific") => self.check_specific(linter, value),
          _ => {}
        }
      }
    }
  }

  fn check_common(&mut self, linter: &mut Linter, node: &Rc<Node>) {
    let Some(dependency_sets) = node.as_sequence() else { return };
    for dependency_set in dependency_sets {
      let Some(entries) = dependency_set.as_mapping() else { continue };
      for (key, value) in entries {
        if key.as_str() == Some("packages") {
          self.check_packages(linter, value);
        }
      }
    }
  }

  fn check_specific(&mut self, linter: &mut Linter, node: &Rc<Node>) {
    let Some(matchers) = node.as_sequence() else { return };
    for matcher in matchers {
      let Some(entries) = matcher.as_mapping() else { continue };
      for (key, value) in entries {
        if key.as_str() == Some("matrices") {
          self.check_matrices(linter, value);
        }
      }
    }
  }

  fn check_matrices(&mut self, linter: &mut Linter, node: &Rc<Node>) {
    let Some(matrices) = node.as_sequence() else { return };
    for matrix in matrices {
      let Some(entries) = matrix.as_mapping() else { continue };
      for (key, value) in entries {
        if key.as_str() == Some("packages") {
          self.check_packages(linter, value);
        }
      }
    }
  }

  fn check_packages(&mut self, linter: &mut Linter, node: &Rc<Node>) {
    let Some(package_specs) = node.as_sequence() else { return };
    for package_spec in package_specs {
      self.check_package_spec(linter, package_spec);
    }
  }

  /// The policy decision for one candidate requirement node
  fn check_package_spec(&mut self, linter: &mut Linter, node: &Rc<Node>) {
    let Some(text) = node.as_str() else { return };
    // Not a requirement string: soft skip, even if it looks like a typo of a
    // tracked package.
    let Ok(requirement) = text.parse::<Requirement>() else { return };
    if !self.policy.is_tracked(&requirement.name) {
      return;
    }

    let anchor = self.document.anchor_for(node).map(str::to_string);
    if let Some(name) = &anchor {
      // Mark the anchor used whether or not a warning is emitted below, so
      // alias occurrences are never evaluated a second time.
      if !self.used_anchors.insert(name.clone()) {
        return;
      }
    }

    let prefix = anchor.map(|name| format!("&{} ", name)).unwrap_or_default();
    let has_alpha = requirement.specifiers.has_alpha();

    match self.mode {
      Mode::Development if !has_alpha => {
        let fixed = requirement.specifiers.with_alpha();
        linter
          .add_warning(
            node.span,
            format!("add alpha spec for RAPIDS package {}", requirement.name),
          )
          .add_replacement(
            node.span,
            format!("{}{}{}", prefix, requirement.name, fixed.canonical()),
          );
      }
      Mode::Release if has_alpha => {
        let fixed = requirement.specifiers.without_alpha();
        linter
          .add_warning(
            node.span,
            format!("remove alpha spec for RAPIDS package {}", requirement.name),
          )
          .add_replacement(
            node.span,
            format!("{}{}{}", prefix, requirement.name, fixed.canonical()),
          );
      }
      _ => {}
    }
  }
}
