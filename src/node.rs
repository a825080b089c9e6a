//! Node model for the document tree.
//!
//! Nodes live in an arena owned by [`Document`](crate::Document) and are
//! addressed through copyable [`NodeId`] handles. A parent's ordered child
//! vector IS the document order; line ranges are derived from that order by
//! reflow, never the other way around.

/// Handle to a node in a document's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a node is, with its kind-specific content
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The unique root: owns the data-block marker lines
    File { open: String, close: String },

    /// Nested associative array block
    Section,

    /// Leaf scalar/expression; `None` means empty/deleted
    Value { payload: Option<String> },

    /// Plain `//` comment; the label may span multiple lines
    Comment { label: String },

    /// Banner-decorated block comment: title plus description body
    RichComment {
        label: String,
        description: Vec<String>,
    },
}

/// One element of the document tree
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: NodeKind,

    /// Last path segment; synthetic (`#comment-N`) for comments
    pub key: String,

    /// Quote style the key was written with in the source
    pub quote: char,

    pub parent: Option<NodeId>,

    /// Ordered children; only File/Section nodes ever hold any
    pub children: Vec<NodeId>,

    /// Current line range in the rendered output (inclusive)
    pub start: usize,
    pub end: usize,

    /// Original source lines; empty for nodes built via an empty constructor
    pub raw: Vec<String>,

    /// True iff the node was constructed fresh rather than parsed
    pub created: bool,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind, key: impl Into<String>) -> Self {
        NodeData {
            kind,
            key: key.into(),
            quote: '\'',
            parent: None,
            children: Vec::new(),
            start: 0,
            end: 0,
            raw: Vec::new(),
            created: true,
        }
    }

    /// True for node kinds that own an ordered child collection
    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. } | NodeKind::Section)
    }

    /// True for Comment and RichComment nodes
    pub fn is_comment(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Comment { .. } | NodeKind::RichComment { .. }
        )
    }

    /// Vertical padding applied above and below the node's content span
    pub fn padding(&self) -> usize {
        match self.kind {
            NodeKind::Section => 1,
            _ => 0,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self.kind {
            NodeKind::File { .. } => "file",
            NodeKind::Section => "section",
            NodeKind::Value { .. } => "value",
            NodeKind::Comment { .. } => "comment",
            NodeKind::RichComment { .. } => "rich_comment",
        }
    }
}

/// Flat inspection view of a node, used by callers for diffing and preview
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSummary {
    pub node_type: String,
    pub start: usize,
    pub end: usize,
    pub raw: Vec<String>,
    pub key: String,
    pub path: String,
    pub name: String,
    pub is_root: bool,
    pub is_sub_node: bool,
    pub parent_key: Option<String>,
    pub was_created: bool,
    pub is_dirty: bool,
    pub render: Vec<String>,
}
