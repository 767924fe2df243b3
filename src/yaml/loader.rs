//! Anchor-preserving YAML composition over the saphyr event stream
//!
//! The streaming parser resolves aliases by numeric anchor id and resets its
//! anchor state as soon as the next document starts. This composer rebuilds
//! the node tree from the event stream, keeps aliases pointing at the same
//! shared node, and snapshots the anchor table (name → node) the moment each
//! document's composition completes, before the reset can discard it.
//!
//! The event stream only carries numeric anchor ids, so anchor names are
//! recovered from the source text at the anchored node's position; the node
//! span is widened to cover the `&name ` declaration at the same time.

use crate::core::span::Span;
use crate::yaml::node::{Node, NodeKind};
use saphyr_parser::{Event, Parser, ScanError};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// One composed document: the root node plus the anchor table captured when
/// this document's composition completed
#[derive(Debug)]
pub struct Document {
  pub root: Rc<Node>,
  /// Anchor name → anchored node, in declaration order. Redefining an anchor
  /// name within a document replaces the earlier binding.
  pub anchors: Vec<(String, Rc<Node>)>,
}

impl Document {
  /// Reverse lookup: the anchor name bound to exactly this node, if any.
  /// Identity match, not structural equality.
  pub fn anchor_for(&self, node: &Rc<Node>) -> Option<&str> {
    self
      .anchors
      .iter()
      .find(|(_, anchored)| Rc::ptr_eq(anchored, node))
      .map(|(name, _)| name.as_str())
  }
}

/// Errors from composing a YAML stream. Any of these fail the whole input;
/// there is no partial-document recovery.
#[derive(Debug)]
pub enum LoadError {
  /// The input is not syntactically valid YAML
  Scan(ScanError),
  /// The event stream could not be composed into a tree
  Compose(String),
}

impl fmt::Display for LoadError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LoadError::Scan(e) => write!(f, "{}", e),
      LoadError::Compose(message) => write!(f, "{}", message),
    }
  }
}

impl std::error::Error for LoadError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      LoadError::Scan(e) => Some(e),
      LoadError::Compose(_) => None,
    }
  }
}

impl From<ScanError> for LoadError {
  fn from(err: ScanError) -> Self {
    LoadError::Scan(err)
  }
}

/// Compose every document in `text`.
///
/// Single-use per input: the per-document anchor state is rebuilt from
/// scratch for each document and never shared across documents.
pub fn load_documents(text: &str) -> Result<Vec<Document>, LoadError> {
  let mut composer = Composer::new(text);
  let parser = Parser::new_from_str(text);
  for item in parser {
    let (event, span) = item?;
    composer.on_event(event, span)?;
  }
  Ok(composer.documents)
}

/// An in-progress collection node
enum Frame {
  Sequence {
    anchor_id: usize,
    start: usize,
    items: Vec<Rc<Node>>,
  },
  Mapping {
    anchor_id: usize,
    start: usize,
    entries: Vec<(Rc<Node>, Rc<Node>)>,
    pending_key: Option<Rc<Node>>,
  },
}

struct Composer<'a> {
  text: &'a str,
  /// Byte offset of each character, for translating parser positions
  char_offsets: Vec<usize>,
  stack: Vec<Frame>,
  root: Option<Rc<Node>>,
  anchors_by_id: HashMap<usize, Rc<Node>>,
  anchors: Vec<(String, Rc<Node>)>,
  documents: Vec<Document>,
}

impl<'a> Composer<'a> {
  fn new(text: &'a str) -> Self {
    // The parser counts characters; spans must address bytes.
    let char_offsets = text
      .char_indices()
      .map(|(offset, _)| offset)
      .chain([text.len()])
      .collect();
    Self {
      text,
      char_offsets,
      stack: Vec::new(),
      root: None,
      anchors_by_id: HashMap::new(),
      anchors: Vec::new(),
      documents: Vec::new(),
    }
  }

  fn byte_offset(&self, char_index: usize) -> usize {
    self
      .char_offsets
      .get(char_index)
      .copied()
      .unwrap_or(self.text.len())
  }

  fn on_event(&mut self, event: Event, span: saphyr_parser::Span) -> Result<(), LoadError> {
    let start = self.byte_offset(span.start.index());
    let end = self.byte_offset(span.end.index());

    match event {
      Event::DocumentStart { .. } => {
        self.root = None;
        self.anchors_by_id.clear();
        self.anchors.clear();
      }
      Event::DocumentEnd { .. } => {
        // Snapshot the anchor table now; the next document resets it.
        if let Some(root) = self.root.take() {
          self.documents.push(Document {
            root,
            anchors: std::mem::take(&mut self.anchors),
          });
        }
      }
      Event::Scalar(value, _, anchor_id, _) => {
        let node = Node {
          kind: NodeKind::Scalar(value),
          span: Span::new(start, end),
        };
        let node = self.bind_anchor(node, anchor_id);
        self.attach(node)?;
      }
      Event::SequenceStart(anchor_id, _) => {
        self.stack.push(Frame::Sequence {
          anchor_id,
          start,
          items: Vec::new(),
        });
      }
      Event::SequenceEnd => {
        let Some(Frame::Sequence { anchor_id, start, items }) = self.stack.pop() else {
          return Err(LoadError::Compose("unexpected end of sequence".to_string()));
        };
        let node = Node {
          kind: NodeKind::Sequence(items),
          span: Span::new(start, end),
        };
        let node = self.bind_anchor(node, anchor_id);
        self.attach(node)?;
      }
      Event::MappingStart(anchor_id, _) => {
        self.stack.push(Frame::Mapping {
          anchor_id,
          start,
          entries: Vec::new(),
          pending_key: None,
        });
      }
      Event::MappingEnd => {
        let Some(Frame::Mapping { anchor_id, start, entries, pending_key }) = self.stack.pop() else {
          return Err(LoadError::Compose("unexpected end of mapping".to_string()));
        };
        if pending_key.is_some() {
          return Err(LoadError::Compose("mapping ended with a dangling key".to_string()));
        }
        let node = Node {
          kind: NodeKind::Mapping(entries),
          span: Span::new(start, end),
        };
        let node = self.bind_anchor(node, anchor_id);
        self.attach(node)?;
      }
      Event::Alias(anchor_id) => {
        // Aliases reuse the anchored node; identity is preserved.
        let node = self
          .anchors_by_id
          .get(&anchor_id)
          .cloned()
          .ok_or_else(|| LoadError::Compose(format!("alias references unknown anchor id {}", anchor_id)))?;
        self.attach(node)?;
      }
      // Stream markers carry no structure.
      _ => {}
    }
    Ok(())
  }

  /// Register an anchored node, recovering the anchor name from the source
  /// text and widening the node span over the `&name ` declaration
  fn bind_anchor(&mut self, mut node: Node, anchor_id: usize) -> Rc<Node> {
    if anchor_id == 0 {
      return Rc::new(node);
    }
    let name = anchor_name(self.text, &mut node.span);
    let node = Rc::new(node);
    self.anchors_by_id.insert(anchor_id, Rc::clone(&node));
    if let Some(name) = name {
      if let Some(entry) = self.anchors.iter_mut().find(|(existing, _)| *existing == name) {
        entry.1 = Rc::clone(&node);
      } else {
        self.anchors.push((name, Rc::clone(&node)));
      }
    }
    node
  }

  /// Attach a completed node to its parent collection, or make it the root
  fn attach(&mut self, node: Rc<Node>) -> Result<(), LoadError> {
    match self.stack.last_mut() {
      Some(Frame::Sequence { items, .. }) => items.push(node),
      Some(Frame::Mapping { entries, pending_key, .. }) => match pending_key.take() {
        None => *pending_key = Some(node),
        Some(key) => entries.push((key, node)),
      },
      None => {
        if self.root.is_some() {
          return Err(LoadError::Compose("multiple root nodes in one document".to_string()));
        }
        self.root = Some(node);
      }
    }
    Ok(())
  }
}

/// Characters that can appear in a YAML anchor name
fn is_anchor_char(c: char) -> bool {
  !c.is_whitespace()
    && !matches!(
      c,
      ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%' | '@' | '`'
    )
}

/// Locate the `&name` declaration for an anchored node and widen `span` to
/// include it, so replacing the span re-emits a complete node.
///
/// Depending on the parser, the reported node span either already starts at
/// the `&` or starts at the node content with the declaration just before it
/// (possibly separated by whitespace and a tag). Both layouts are handled.
fn anchor_name(text: &str, span: &mut Span) -> Option<String> {
  let bytes = text.as_bytes();

  if bytes.get(span.start) == Some(&b'&') {
    let name: String = text[span.start + 1..]
      .chars()
      .take_while(|&c| is_anchor_char(c))
      .collect();
    return if name.is_empty() { None } else { Some(name) };
  }

  let mut end = span.start.min(bytes.len());
  loop {
    while end > 0 && (bytes[end - 1] as char).is_whitespace() {
      end -= 1;
    }
    if end == 0 {
      return None;
    }
    let mut start = end;
    while start > 0 && is_anchor_char(bytes[start - 1] as char) {
      start -= 1;
    }
    if start == end {
      return None;
    }
    match bytes.get(start.wrapping_sub(1)) {
      Some(b'&') => {
        span.start = start - 1;
        return Some(text[start..end].to_string());
      }
      Some(b'!') => {
        // A tag sits between the anchor and the node; keep scanning back.
        end = start - 1;
        while end > 0 && bytes[end - 1] == b'!' {
          end -= 1;
        }
      }
      _ => return None,
    }
  }
}
