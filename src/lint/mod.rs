//! Warning accumulation and span-exact autofixing for one linted file
//!
//! The checks push warnings here; they never apply text edits themselves.
//! Each warning may carry replacement texts addressed by byte span, and
//! [`Linter::fix_content`] splices them into the original content.

use crate::core::span::Span;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One span-exact text substitution
#[derive(Debug, Clone, Serialize)]
pub struct Replacement {
  pub span: Span,
  pub text: String,
}

/// A single lint warning, optionally carrying machine-applicable fixes
#[derive(Debug, Clone, Serialize)]
pub struct LintWarning {
  pub span: Span,
  pub message: String,
  pub replacements: Vec<Replacement>,
}

impl LintWarning {
  /// Attach a fix replacing `span` with `text`
  pub fn add_replacement(&mut self, span: Span, text: impl Into<String>) -> &mut Self {
    self.replacements.push(Replacement { span, text: text.into() });
    self
  }
}

/// Accumulates warnings against one file's content
#[derive(Debug)]
pub struct Linter {
  pub path: PathBuf,
  pub content: String,
  pub warnings: Vec<LintWarning>,
}

impl Linter {
  pub fn new(path: impl AsRef<Path>, content: impl Into<String>) -> Self {
    Self {
      path: path.as_ref().to_path_buf(),
      content: content.into(),
      warnings: Vec::new(),
    }
  }

  /// Record a warning; chain [`LintWarning::add_replacement`] on the return
  /// value to attach a fix
  pub fn add_warning(&mut self, span: Span, message: impl Into<String>) -> &mut LintWarning {
    self.warnings.push(LintWarning {
      span,
      message: message.into(),
      replacements: Vec::new(),
    });
    let last = self.warnings.len() - 1;
    &mut self.warnings[last]
  }

  pub fn has_warnings(&self) -> bool {
    !self.warnings.is_empty()
  }

  /// Apply every recorded replacement to the content and return the result.
  ///
  /// Replacements are applied in span order. Overlapping spans indicate a
  /// checker bug; the later replacement is dropped rather than producing
  /// corrupt output.
  pub fn fix_content(&self) -> String {
    let mut replacements: Vec<&Replacement> = self
      .warnings
      .iter()
      .flat_map(|warning| warning.replacements.iter())
      .collect();
    replacements.sort_by_key(|r| (r.span.start, r.span.end));

    let mut fixed = String::with_capacity(self.content.len());
    let mut cursor = 0;
    for replacement in replacements {
      if replacement.span.start < cursor {
        continue;
      }
      fixed.push_str(&self.content[cursor..replacement.span.start]);
      fixed.push_str(&replacement.text);
      cursor = replacement.span.end;
    }
    fixed.push_str(&self.content[cursor..]);
    fixed
  }

  /// 1-based line and column of a byte offset, for terminal output.
  /// The column counts characters, not bytes.
  pub fn line_col(&self, offset: usize) -> (usize, usize) {
    let offset = offset.min(self.content.len());
    let prefix = &self.content[..offset];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let line_start = prefix.rfind('\n').map_or(0, |newline| newline + 1);
    let column = self.content[line_start..offset].chars().count() + 1;
    (line, column)
  }
}
