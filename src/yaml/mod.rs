//! Anchor-preserving YAML composition
//!
//! - **node**: the composed node tree with byte-offset source spans
//! - **loader**: event-stream composition that snapshots each document's
//!   anchor table before the parser resets it

pub mod loader;
pub mod node;

pub use loader::{Document, LoadError, load_documents};
pub use node::Node;
