//! Document tree and structural-mutation protocol.
//!
//! A [`Document`] owns every node of one parsed file in an arena and exposes
//! the whole editing surface: dotted-path selection with auto-creation,
//! soft/hard value assignment, the reordering protocol, cross-scope
//! cut/copy, comment binding, and reflow.
//!
//! Two rules hold everywhere:
//! - a parent's child vector is the document order; line ranges are derived
//!   from it by [`Document::reflow`], which runs after every structural or
//!   content-size change (positions are only comparable on a reflowed tree);
//! - mutations that cannot logically complete (moving past a boundary,
//!   targeting a foreign sibling) return silently with the tree unchanged.
//!   Callers confirm positions through [`Document::is_first_child`] and
//!   friends.

use std::collections::BTreeMap;

use crate::error::{DocError, DocResult};
use crate::node::{NodeData, NodeId, NodeKind, NodeSummary};
use crate::parser::{self, FlatKind, ParsedFile};
use crate::render;
use crate::value::{self, ValueKind};

/// An editable, line-addressable document tree over one configuration file
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
    prolog: Vec<String>,
    epilog: Vec<String>,
    comment_seq: u32,
}

impl Document {
    /// Parse raw file lines into a document tree.
    ///
    /// Content before and after the data block is kept verbatim and
    /// reattached by [`Document::to_lines`].
    pub fn parse(lines: &[String]) -> DocResult<Self> {
        Self::wrap(parser::parse(lines)?)
    }

    /// Fold a parsed flat node collection into a nested tree.
    ///
    /// Attachment is silent: parsed line ranges are kept as-is so an
    /// unmodified document renders back to its original lines without any
    /// reflow.
    pub fn wrap(parsed: ParsedFile) -> DocResult<Self> {
        let mut doc = Document {
            nodes: Vec::new(),
            root: NodeId::new(0),
            prolog: parsed.prolog,
            epilog: parsed.epilog,
            comment_seq: 0,
        };

        let mut root = NodeData::new(
            NodeKind::File {
                open: parsed.open,
                close: parsed.close,
            },
            "",
        );
        root.start = parsed.open_at;
        root.end = parsed.close_at;
        root.raw = parsed.raw_block;
        root.created = false;
        doc.root = doc.alloc(root);

        for flat in parsed.nodes {
            let (parent_path, key) = split_last(&flat.path);
            let parent = doc
                .find(parent_path)
                .filter(|&id| doc.node(id).is_container())
                .ok_or_else(|| {
                    DocError::parse(flat.start, format!("orphan node '{}'", flat.path))
                })?;

            let kind = match flat.kind {
                FlatKind::Section => NodeKind::Section,
                FlatKind::Value { payload } => NodeKind::Value { payload },
                FlatKind::Comment { label } => NodeKind::Comment { label },
                FlatKind::RichComment { label, description } => {
                    NodeKind::RichComment { label, description }
                }
            };

            let mut data = NodeData::new(kind, key);
            data.quote = flat.quote;
            data.start = flat.start;
            data.end = flat.end;
            data.raw = flat.raw;
            data.created = false;

            let is_comment = data.is_comment();
            let id = doc.alloc(data);
            doc.attach(parent, id);
            if is_comment {
                doc.comment_seq += 1;
            }
        }

        Ok(doc)
    }

    /// Create a document with an empty data block and no surrounding text.
    pub fn empty() -> Self {
        let mut doc = Document {
            nodes: Vec::new(),
            root: NodeId::new(0),
            prolog: Vec::new(),
            epilog: Vec::new(),
            comment_seq: 0,
        };
        let root = NodeData::new(
            NodeKind::File {
                open: "return [".to_string(),
                close: "];".to_string(),
            },
            "",
        );
        doc.root = doc.alloc(root);
        doc.reflow();
        doc
    }

    // -----------------------------------------------------------------------
    // Access
    // -----------------------------------------------------------------------

    /// The file root
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node's data
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    /// Lines preceding the data block, passed through unchanged
    pub fn prolog(&self) -> &[String] {
        &self.prolog
    }

    /// Lines following the data block, passed through unchanged
    pub fn epilog(&self) -> &[String] {
        &self.epilog
    }

    /// Ordered children of a node
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Direct child with the given key; comments are never addressable here
    pub fn get_child(&self, parent: NodeId, key: &str) -> Option<NodeId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&child| !self.node(child).is_comment() && self.node(child).key == key)
    }

    /// Resolve a dotted path without creating anything.
    ///
    /// The empty path resolves to the root.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        let mut current = self.root;
        for segment in path.split('.') {
            if segment.is_empty() {
                continue;
            }
            current = self.get_child(current, segment)?;
        }
        Some(current)
    }

    /// Dot-joined chain of ancestor keys.
    ///
    /// Fails with [`DocError::RootResolution`] when the node's parent chain
    /// does not reach the file root (a replicated node that was never
    /// attached, for example).
    pub fn path(&self, id: NodeId) -> DocResult<String> {
        let mut segments = Vec::new();
        let mut current = id;
        loop {
            let node = self.node(current);
            if matches!(node.kind, NodeKind::File { .. }) {
                break;
            }
            segments.push(node.key.clone());
            match node.parent {
                Some(parent) => current = parent,
                None => return Err(DocError::root_resolution(self.node(id).key.clone())),
            }
        }
        segments.reverse();
        Ok(segments.join("."))
    }

    /// Last path segment
    pub fn name(&self, id: NodeId) -> &str {
        &self.node(id).key
    }

    /// Nesting depth: number of ancestors above the node
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Total vertical footprint: content line count plus padding above and
    /// below
    pub fn scale(&self, id: NodeId) -> usize {
        render::content_height(self, id) + 2 * self.node(id).padding()
    }

    /// Payload text of a value node
    pub fn payload(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Value { payload } => payload.as_deref(),
            _ => None,
        }
    }

    /// Syntax classification of a value node's payload
    pub fn value_kind(&self, id: NodeId) -> Option<ValueKind> {
        match &self.node(id).kind {
            NodeKind::Value { payload: Some(text) } => Some(value::classify(text)),
            NodeKind::Value { payload: None } => Some(ValueKind::String),
            _ => None,
        }
    }

    /// Label of a comment or rich comment node
    pub fn comment_label(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Comment { label } => Some(label),
            NodeKind::RichComment { label, .. } => Some(label),
            _ => None,
        }
    }

    /// True iff the node was built fresh rather than parsed
    pub fn is_new(&self, id: NodeId) -> bool {
        self.node(id).created
    }

    /// True when re-rendering the node no longer matches its source lines
    pub fn is_dirty(&self, id: NodeId) -> bool {
        let node = self.node(id);
        if node.created {
            return true;
        }
        let rendered = self.render_content(id);
        if rendered.len() != node.raw.len() {
            return true;
        }
        rendered
            .iter()
            .zip(&node.raw)
            .any(|(a, b)| a.trim_end() != b.trim_end())
    }

    // -----------------------------------------------------------------------
    // Siblings and position
    // -----------------------------------------------------------------------

    /// All siblings of the node, in document order
    pub fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        match self.node(id).parent {
            Some(parent) => self
                .node(parent)
                .children
                .iter()
                .copied()
                .filter(|&child| child != id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Siblings positioned before the node
    pub fn siblings_before(&self, id: NodeId) -> Vec<NodeId> {
        match self.position(id) {
            Some((parent, idx)) => self.node(parent).children[..idx].to_vec(),
            None => Vec::new(),
        }
    }

    /// Siblings positioned after the node
    pub fn siblings_after(&self, id: NodeId) -> Vec<NodeId> {
        match self.position(id) {
            Some((parent, idx)) => self.node(parent).children[idx + 1..].to_vec(),
            None => Vec::new(),
        }
    }

    /// True when the node is the first child of its parent
    pub fn is_first_child(&self, id: NodeId) -> bool {
        matches!(self.position(id), Some((_, 0)))
    }

    /// True when the node is the last child of its parent
    pub fn is_last_child(&self, id: NodeId) -> bool {
        match self.position(id) {
            Some((parent, idx)) => idx + 1 == self.node(parent).children.len(),
            None => false,
        }
    }

    fn position(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.node(id).parent?;
        let idx = self
            .node(parent)
            .children
            .iter()
            .position(|&child| child == id)?;
        Some((parent, idx))
    }

    // -----------------------------------------------------------------------
    // Construction of fresh nodes
    // -----------------------------------------------------------------------

    /// Empty-constructor for a value node; unattached until added to a parent
    pub fn new_value(&mut self, key: &str, payload: Option<&str>) -> NodeId {
        self.alloc(NodeData::new(
            NodeKind::Value {
                payload: payload.map(String::from),
            },
            key,
        ))
    }

    /// Empty-constructor for a section node
    pub fn new_section(&mut self, key: &str) -> NodeId {
        self.alloc(NodeData::new(NodeKind::Section, key))
    }

    /// Empty-constructor for a comment node; the key is synthetic
    pub fn new_comment(&mut self, label: &str) -> NodeId {
        let key = self.next_comment_key();
        self.alloc(NodeData::new(
            NodeKind::Comment {
                label: label.to_string(),
            },
            key,
        ))
    }

    /// Empty-constructor for a rich comment node; the key is synthetic
    pub fn new_rich_comment(&mut self, label: &str, description: &[&str]) -> NodeId {
        let key = self.next_comment_key();
        self.alloc(NodeData::new(
            NodeKind::RichComment {
                label: label.to_string(),
                description: description.iter().map(|s| s.to_string()).collect(),
            },
            key,
        ))
    }

    fn next_comment_key(&mut self) -> String {
        let key = format!("#comment-{}", self.comment_seq);
        self.comment_seq += 1;
        key
    }

    // -----------------------------------------------------------------------
    // Child management
    // -----------------------------------------------------------------------

    /// Append a child to a container node.
    ///
    /// Unless `silent`, the tree is reflowed immediately. Silent appends are
    /// for tree assembly, where parsed ranges must survive.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId, silent: bool) -> DocResult<()> {
        if !self.node(parent).is_container() {
            return Err(DocError::unsupported(
                "add_child",
                self.node(parent).key.clone(),
            ));
        }
        if self.node(child).parent.is_some() {
            return Err(DocError::unsupported(
                "add_child",
                self.node(child).key.clone(),
            ));
        }
        self.attach(parent, child);
        if !silent {
            self.reflow();
        }
        Ok(())
    }

    /// Detach a child; returns the parent
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> NodeId {
        self.detach(child);
        self.reflow();
        parent
    }

    /// Detach the node from its parent; returns the parent
    pub fn remove(&mut self, id: NodeId) -> DocResult<NodeId> {
        let (parent, _) = self
            .position(id)
            .ok_or_else(|| DocError::unsupported("remove", self.node(id).key.clone()))?;
        Ok(self.remove_child(parent, id))
    }

    /// Exchange the positions of two children of the same parent
    pub fn swap_children(&mut self, parent: NodeId, a: NodeId, b: NodeId) {
        let children = &self.node(parent).children;
        let (Some(i), Some(j)) = (
            children.iter().position(|&c| c == a),
            children.iter().position(|&c| c == b),
        ) else {
            return;
        };
        self.nodes[parent.index()].children.swap(i, j);
        self.reflow();
    }

    /// Replace only the final path segment.
    ///
    /// Callers must re-select by the new path afterward; descendant paths
    /// follow automatically because paths are derived from the ancestor
    /// chain.
    pub fn rename(&mut self, id: NodeId, key: &str) -> DocResult<()> {
        if matches!(self.node(id).kind, NodeKind::File { .. }) {
            return Err(DocError::unsupported("rename", "root"));
        }
        self.nodes[id.index()].key = key.to_string();
        Ok(())
    }

    /// Deep value-copy of a subtree, including raw lines and ranges.
    ///
    /// The copy is unattached; insert it with [`Document::add_child`] or via
    /// [`Document::copy`].
    pub fn replicate(&mut self, id: NodeId) -> NodeId {
        let copy = self.clone_subtree(id);
        self.nodes[copy.index()].parent = None;
        copy
    }

    // -----------------------------------------------------------------------
    // Selection and assignment
    // -----------------------------------------------------------------------

    /// Resolve a dotted path to a section, creating missing intermediates.
    ///
    /// New sections are appended at the end of their parent's children.
    pub fn section(&mut self, path: &str) -> DocResult<NodeId> {
        let mut current = self.root;
        for segment in path.split('.') {
            if segment.is_empty() {
                continue;
            }
            current = match self.get_child(current, segment) {
                Some(child) if self.node(child).is_container() => child,
                Some(child) => {
                    let at = self.path(child).unwrap_or_else(|_| segment.to_string());
                    return Err(DocError::unsupported("descend", at));
                }
                None => {
                    let id = self.new_section(segment);
                    self.attach(current, id);
                    self.reflow();
                    id
                }
            };
        }
        Ok(current)
    }

    /// Resolve a dotted path to a value, creating missing nodes.
    ///
    /// With a literal supplied this is a soft set: an existing non-null
    /// payload is left untouched. Use [`Document::set`] to overwrite.
    pub fn value(&mut self, path: &str, literal: Option<&str>) -> DocResult<NodeId> {
        let (parent_path, key) = split_last(path);
        if key.is_empty() {
            return Err(DocError::unsupported("value", path));
        }
        let parent = self.section(parent_path)?;

        match self.get_child(parent, key) {
            Some(child) => {
                let is_empty_value =
                    matches!(self.node(child).kind, NodeKind::Value { payload: None });
                if !matches!(self.node(child).kind, NodeKind::Value { .. }) {
                    let at = self.path(child).unwrap_or_else(|_| key.to_string());
                    return Err(DocError::unsupported("value", at));
                }
                if is_empty_value {
                    if let Some(text) = literal {
                        self.nodes[child.index()].kind = NodeKind::Value {
                            payload: Some(text.to_string()),
                        };
                        self.reflow();
                    }
                }
                Ok(child)
            }
            None => {
                let id = self.new_value(key, literal);
                self.attach(parent, id);
                self.reflow();
                Ok(id)
            }
        }
    }

    /// Hard set: unconditionally overwrite a value node's payload
    pub fn set(&mut self, id: NodeId, literal: &str) -> DocResult<()> {
        match &self.node(id).kind {
            NodeKind::Value { .. } => {
                self.nodes[id.index()].kind = NodeKind::Value {
                    payload: Some(literal.to_string()),
                };
                self.reflow();
                Ok(())
            }
            _ => {
                let at = self.path(id).unwrap_or_else(|_| self.node(id).key.clone());
                Err(DocError::unsupported("set", at))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Reordering protocol
    // -----------------------------------------------------------------------

    /// Swap with the preceding sibling; silent no-op at the boundary
    pub fn move_up(&mut self, id: NodeId) {
        if let Some((parent, idx)) = self.position(id) {
            if idx > 0 {
                let prev = self.node(parent).children[idx - 1];
                self.swap_children(parent, prev, id);
            }
        }
    }

    /// Swap with the following sibling; silent no-op at the boundary
    pub fn move_down(&mut self, id: NodeId) {
        if let Some((parent, idx)) = self.position(id) {
            if idx + 1 < self.node(parent).children.len() {
                let next = self.node(parent).children[idx + 1];
                self.swap_children(parent, id, next);
            }
        }
    }

    /// Reorder until the node is the first child
    pub fn keep_start(&mut self, id: NodeId) {
        while matches!(self.position(id), Some((_, idx)) if idx > 0) {
            self.move_up(id);
        }
    }

    /// Reorder until the node is the last child
    pub fn keep_end(&mut self, id: NodeId) {
        while matches!(
            self.position(id),
            Some((parent, idx)) if idx + 1 < self.node(parent).children.len()
        ) {
            self.move_down(id);
        }
    }

    /// Step the node until it sits immediately before `target`.
    ///
    /// A foreign target (different parent) is a silent no-op; an unreachable
    /// one stops at the boundary rather than erroring.
    pub fn before(&mut self, id: NodeId, target: NodeId) {
        let (Some((p1, _)), Some((p2, _))) = (self.position(id), self.position(target)) else {
            return;
        };
        if p1 != p2 || id == target {
            return;
        }
        let limit = self.node(p1).children.len();
        for _ in 0..limit {
            let (Some((_, i)), Some((_, t))) = (self.position(id), self.position(target)) else {
                return;
            };
            if i + 1 == t {
                return;
            }
            if i > t {
                self.move_up(id);
            } else {
                self.move_down(id);
            }
        }
    }

    /// Step the node until it sits immediately after `target`.
    pub fn after(&mut self, id: NodeId, target: NodeId) {
        let (Some((p1, _)), Some((p2, _))) = (self.position(id), self.position(target)) else {
            return;
        };
        if p1 != p2 || id == target {
            return;
        }
        let limit = self.node(p1).children.len();
        for _ in 0..limit {
            let (Some((_, i)), Some((_, t))) = (self.position(id), self.position(target)) else {
                return;
            };
            if i == t + 1 {
                return;
            }
            if i < t {
                self.move_down(id);
            } else {
                self.move_up(id);
            }
        }
    }

    /// Detach the node and append it to the section at `dest_path`,
    /// auto-creating intermediates.
    ///
    /// Cutting into the node's own subtree is a silent no-op.
    pub fn cut(&mut self, id: NodeId, dest_path: &str) -> DocResult<NodeId> {
        if self.position(id).is_none() {
            return Err(DocError::unsupported("cut", self.node(id).key.clone()));
        }
        let dest = self.section(dest_path)?;
        if dest == id || self.is_descendant_of(dest, id) {
            return Ok(id);
        }
        self.detach(id);
        self.attach(dest, id);
        self.reflow();
        Ok(id)
    }

    /// Duplicate the node into the section at `dest_path`, auto-creating
    /// intermediates; returns the copy.
    pub fn copy(&mut self, id: NodeId, dest_path: &str) -> DocResult<NodeId> {
        let dest = self.section(dest_path)?;
        let copy = self.replicate(id);
        self.attach(dest, copy);
        self.reflow();
        Ok(copy)
    }

    // -----------------------------------------------------------------------
    // Comment binding
    // -----------------------------------------------------------------------

    /// The comment immediately preceding the node in sibling order, if any
    pub fn bound_comment(&self, id: NodeId) -> Option<NodeId> {
        let (parent, idx) = self.position(id)?;
        if idx == 0 {
            return None;
        }
        let prev = self.node(parent).children[idx - 1];
        self.node(prev).is_comment().then_some(prev)
    }

    /// Bind a plain comment to the node, replacing any existing one
    pub fn attach_comment(&mut self, id: NodeId, label: &str) -> DocResult<NodeId> {
        let comment = self.new_comment(label);
        self.bind_comment(id, comment)
    }

    /// Bind a rich comment block to the node, replacing any existing one
    pub fn attach_rich_comment(
        &mut self,
        id: NodeId,
        label: &str,
        description: &[&str],
    ) -> DocResult<NodeId> {
        let comment = self.new_rich_comment(label, description);
        self.bind_comment(id, comment)
    }

    fn bind_comment(&mut self, id: NodeId, comment: NodeId) -> DocResult<NodeId> {
        let (parent, mut idx) = self
            .position(id)
            .ok_or_else(|| DocError::unsupported("with_comment", self.node(id).key.clone()))?;

        if let Some(existing) = self.bound_comment(id) {
            self.nodes[parent.index()].children.remove(idx - 1);
            self.nodes[existing.index()].parent = None;
            idx -= 1;
        }

        self.nodes[comment.index()].parent = Some(parent);
        self.nodes[parent.index()].children.insert(idx, comment);
        self.reflow();
        Ok(comment)
    }

    // -----------------------------------------------------------------------
    // Layout and rendering
    // -----------------------------------------------------------------------

    /// Recompute every node's line range from the current child order.
    ///
    /// Idempotent: running it twice without an intervening mutation yields
    /// identical ranges. The root's start never moves; it anchors the block
    /// inside the host file.
    pub fn reflow(&mut self) {
        let root = self.root;
        self.reflow_container(root);
    }

    fn reflow_container(&mut self, id: NodeId) {
        let mut cursor = self.node(id).start + 1;
        let children = self.node(id).children.clone();
        for child in children {
            let pad = self.node(child).padding();
            let height = render::content_height(self, child);
            let start = cursor + pad;
            {
                let data = &mut self.nodes[child.index()];
                data.start = start;
                data.end = start + height - 1;
            }
            if self.node(child).is_container() {
                self.reflow_container(child);
            }
            cursor = start + height + pad;
        }
        self.nodes[id.index()].end = cursor;
    }

    /// Render a node recursively into absolute line number -> exact text
    pub fn render(&self, id: NodeId) -> BTreeMap<usize, String> {
        render::render_node(self, id)
    }

    /// Materialize a node's render over its own range; padding gaps become
    /// blank lines
    pub fn render_content(&self, id: NodeId) -> Vec<String> {
        let map = self.render(id);
        let node = self.node(id);
        (node.start..=node.end)
            .map(|line| map.get(&line).cloned().unwrap_or_default())
            .collect()
    }

    /// The full data block as output lines
    pub fn render_block(&self) -> Vec<String> {
        self.render_content(self.root)
    }

    /// The complete replacement file: prolog, data block, epilog
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = self.prolog.clone();
        lines.extend(self.render_block());
        lines.extend(self.epilog.iter().cloned());
        lines
    }

    /// Flat inspection view of a node for diffing and preview
    pub fn summary(&self, id: NodeId) -> NodeSummary {
        let node = self.node(id);
        NodeSummary {
            node_type: node.type_name().to_string(),
            start: node.start,
            end: node.end,
            raw: node.raw.clone(),
            key: node.key.clone(),
            path: self.path(id).unwrap_or_else(|_| node.key.clone()),
            name: node.key.clone(),
            is_root: id == self.root,
            is_sub_node: self.depth(id) > 1,
            parent_key: node.parent.map(|parent| self.node(parent).key.clone()),
            was_created: node.created,
            is_dirty: self.is_dirty(id),
            render: self.render_content(id),
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(data);
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.nodes[parent.index()].children.retain(|&c| c != id);
        }
        self.nodes[id.index()].parent = None;
    }

    fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let mut data = self.node(id).clone();
        let children = std::mem::take(&mut data.children);
        let new_id = self.alloc(data);
        let mut new_children = Vec::with_capacity(children.len());
        for child in children {
            let copy = self.clone_subtree(child);
            self.nodes[copy.index()].parent = Some(new_id);
            new_children.push(copy);
        }
        self.nodes[new_id.index()].children = new_children;
        new_id
    }
}

fn split_last(path: &str) -> (&str, &str) {
    match path.rfind('.') {
        Some(dot) => (&path[..dot], &path[dot + 1..]),
        None => ("", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let doc = Document::empty();
        assert_eq!(doc.render_block(), vec!["return [", "];"]);
    }

    #[test]
    fn test_value_auto_creation() {
        let mut doc = Document::empty();
        let id = doc.value("app.name", Some("'Demo'")).unwrap();
        assert_eq!(doc.path(id).unwrap(), "app.name");
        assert!(doc.is_new(id));
        assert!(doc.find("app").is_some());
    }

    #[test]
    fn test_soft_then_hard_assignment() {
        let mut doc = Document::empty();
        doc.value("a.b.c", Some("'x'")).unwrap();
        let id = doc.value("a.b.c", Some("'y'")).unwrap();
        assert_eq!(doc.payload(id), Some("'x'"));

        doc.set(id, "'y'").unwrap();
        assert_eq!(doc.payload(id), Some("'y'"));
    }

    #[test]
    fn test_reflow_assigns_contiguous_ranges() {
        let mut doc = Document::empty();
        doc.value("first", Some("1")).unwrap();
        doc.value("second", Some("2")).unwrap();

        let first = doc.find("first").unwrap();
        let second = doc.find("second").unwrap();
        assert_eq!(doc.node(first).start, 1);
        assert_eq!(doc.node(second).start, 2);
        assert_eq!(doc.node(doc.root()).end, 3);
    }

    #[test]
    fn test_section_padding() {
        let mut doc = Document::empty();
        doc.value("db.host", Some("'localhost'")).unwrap();

        let db = doc.find("db").unwrap();
        // one blank line above the section block
        assert_eq!(doc.node(db).start, 2);
        assert_eq!(doc.scale(db), 5);
    }

    #[test]
    fn test_rename_keeps_descendant_paths_consistent() {
        let mut doc = Document::empty();
        let host = doc.value("db.host", Some("'x'")).unwrap();
        let db = doc.find("db").unwrap();
        doc.rename(db, "database").unwrap();
        assert_eq!(doc.path(host).unwrap(), "database.host");
        assert!(doc.find("db").is_none());
    }

    #[test]
    fn test_replicate_is_unattached() {
        let mut doc = Document::empty();
        let id = doc.value("key", Some("1")).unwrap();
        let copy = doc.replicate(id);
        assert!(doc.node(copy).parent.is_none());
        assert!(doc.path(copy).is_err());
    }

    #[test]
    fn test_set_rejects_sections() {
        let mut doc = Document::empty();
        let section = doc.section("db").unwrap();
        assert!(doc.set(section, "1").is_err());
    }
}
