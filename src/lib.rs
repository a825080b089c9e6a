//! # Confedit
//!
//! A structure-preserving parser and editor for configuration files that
//! encode nested key/value data as array-literal code (`return [ ... ];`
//! blocks with `'key' => value,` entries).
//!
//! Such files mix real data with comments, blank separators, and indentation
//! conventions that must survive round-trip edits. Confedit never treats the
//! file as a plain map: it builds an editable, line-addressable document tree
//! over the text, lets callers query and mutate nodes by dotted path, and
//! re-renders the tree back to lines with correct indentation, spacing, and
//! ordering.
//!
//! ## Features
//!
//! - **Document tree**: File, Section, Value, Comment, and RichComment nodes
//!   with exact line ranges and original source lines
//! - **Dotted-path selection**: resolve or auto-create nodes by `a.b.c`
//!   paths, with soft (create-or-leave) and hard (overwrite) assignment
//! - **Structural mutations**: move, reorder, rename, cut, and copy nodes,
//!   including cross-scope moves by absolute path
//! - **Comment binding**: attach plain or banner-block comments directly
//!   before any data node
//! - **Reflow**: line ranges and vertical padding recompute after every edit
//! - **Exact re-serialization**: untouched nodes reproduce their source
//!   lines; content outside the data block passes through unchanged
//!
//! ## Example
//!
//! ```rust
//! use confedit::Document;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = [
//!     "<?php",
//!     "",
//!     "return [",
//!     "    'name' => 'My App',",
//!     "    'database' => [",
//!     "        'host' => env('DB_HOST', 'localhost'),",
//!     "        'port' => 3306,",
//!     "    ],",
//!     "];",
//! ];
//! let lines: Vec<String> = source.iter().map(|s| s.to_string()).collect();
//!
//! let mut doc = Document::parse(&lines)?;
//!
//! // Untouched documents render back to their source lines.
//! assert_eq!(doc.to_lines(), lines);
//!
//! // Select by dotted path and overwrite.
//! let port = doc.find("database.port").expect("port exists");
//! assert_eq!(doc.payload(port), Some("3306"));
//! doc.set(port, "5432")?;
//! assert!(doc.is_dirty(port));
//!
//! // Auto-create a nested value; a second soft assignment never overwrites.
//! doc.value("cache.driver", Some("'file'"))?;
//! doc.value("cache.driver", Some("'redis'"))?;
//! let driver = doc.find("cache.driver").expect("driver exists");
//! assert_eq!(doc.payload(driver), Some("'file'"));
//! # Ok(())
//! # }
//! ```

// Module declarations
mod document;
mod error;
mod node;
mod parser;
mod render;
mod scanner;
mod value;

// Public API exports
pub use document::Document;
pub use error::{DocError, DocResult};
pub use node::{NodeData, NodeId, NodeKind, NodeSummary};
pub use parser::{FlatKind, FlatNode, ParsedFile, parse};
pub use scanner::{LineToken, classify_line};
pub use value::{ARRAY_BLOCK_THRESHOLD, ValueKind, classify, split_elements};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
