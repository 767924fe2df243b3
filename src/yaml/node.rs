//! Composed YAML nodes with source spans

use crate::core::span::Span;
use std::rc::Rc;

/// The three YAML node kinds
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
  /// A scalar with its resolved text value
  Scalar(String),
  /// A sequence of child nodes in document order
  Sequence(Vec<Rc<Node>>),
  /// A mapping of key/value node pairs in document order
  Mapping(Vec<(Rc<Node>, Rc<Node>)>),
}

/// A YAML parse-tree node, immutable once composed.
///
/// Aliases share the anchored node via `Rc`, so "the same node appearing at a
/// second document position" is literally the same allocation; callers can
/// use [`Rc::ptr_eq`] for identity checks. The span addresses the node's text
/// in the original source and, for anchored nodes, includes the `&name `
/// declaration so span replacement stays safe on anchor-defining occurrences.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
  pub kind: NodeKind,
  pub span: Span,
}

impl Node {
  /// The scalar value, if this node is a scalar
  pub fn as_str(&self) -> Option<&str> {
    match &self.kind {
      NodeKind::Scalar(value) => Some(value),
      _ => None,
    }
  }

  /// The child nodes, if this node is a sequence
  pub fn as_sequence(&self) -> Option<&[Rc<Node>]> {
    match &self.kind {
      NodeKind::Sequence(items) => Some(items),
      _ => None,
    }
  }

  /// The key/value pairs, if this node is a mapping
  pub fn as_mapping(&self) -> Option<&[(Rc<Node>, Rc<Node>)]> {
    match &self.kind {
      NodeKind::Mapping(entries) => Some(entries),
      _ => None,
    }
  }
}
