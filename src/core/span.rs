//! Byte-offset source ranges

use serde::Serialize;

/// A half-open byte range `[start, end)` into the original source text.
///
/// Spans always address bytes, never characters, so they can be used to
/// splice replacement text directly into the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
  /// Byte offset of the first byte covered by the span
  pub start: usize,
  /// Byte offset one past the last byte covered by the span
  pub end: usize,
}

impl Span {
  /// Create a span covering `[start, end)`
  pub fn new(start: usize, end: usize) -> Self {
    Self { start, end }
  }

  /// Number of bytes covered
  pub fn len(&self) -> usize {
    self.end.saturating_sub(self.start)
  }

  /// Whether the span covers no bytes
  pub fn is_empty(&self) -> bool {
    self.end <= self.start
  }
}
