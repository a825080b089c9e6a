//! Rendering of nodes back to output lines.
//!
//! Every node renders into a map from absolute line number to exact text,
//! anchored at its own `start`. Rendering is purely a function of the tree's
//! current ranges plus each node's content; it never re-derives ranges (that
//! is reflow's job).

use std::collections::BTreeMap;

use crate::document::Document;
use crate::node::{NodeId, NodeKind};
use crate::value;

/// One indentation step
pub(crate) const INDENT: &str = "    ";

/// Banner line used by rich comment blocks (a bar plus 74 dashes)
pub(crate) const BANNER: &str =
    "|--------------------------------------------------------------------------";

/// Number of lines a node's content currently spans.
///
/// This is the size reflow allocates for the node; render output must always
/// agree with it.
pub(crate) fn content_height(doc: &Document, id: NodeId) -> usize {
    let node = doc.node(id);
    match &node.kind {
        NodeKind::Value { payload } => match payload {
            Some(text) if value::spans_block(text) => value::split_elements(text).len() + 2,
            _ => 1,
        },
        NodeKind::Comment { label } => label.split('\n').count(),
        NodeKind::RichComment { description, .. } => {
            if description.is_empty() {
                5
            } else {
                7 + description.len()
            }
        }
        NodeKind::Section | NodeKind::File { .. } => {
            let inner: usize = node.children.iter().map(|&child| doc.scale(child)).sum();
            inner + 2
        }
    }
}

/// Render a node (recursively) into absolute line number -> text.
pub(crate) fn render_node(doc: &Document, id: NodeId) -> BTreeMap<usize, String> {
    let node = doc.node(id);
    let indent = INDENT.repeat(doc.depth(id));
    let mut lines = BTreeMap::new();

    match &node.kind {
        NodeKind::Value { payload } => render_value(node, payload.as_deref(), &indent, &mut lines),
        NodeKind::Comment { label } => {
            for (offset, segment) in label.split('\n').enumerate() {
                let text = if segment.is_empty() {
                    format!("{}//", indent)
                } else {
                    format!("{}// {}", indent, segment)
                };
                lines.insert(node.start + offset, text);
            }
        }
        NodeKind::RichComment { label, description } => {
            render_rich_comment(node.start, label, description, &indent, &mut lines);
        }
        NodeKind::Section => {
            lines.insert(
                node.start,
                format!("{}{q}{}{q} => [", indent, node.key, q = node.quote),
            );
            for &child in &node.children {
                lines.extend(render_node(doc, child));
            }
            lines.insert(node.end, format!("{}],", indent));
        }
        NodeKind::File { open, close } => {
            lines.insert(node.start, open.clone());
            for &child in &node.children {
                lines.extend(render_node(doc, child));
            }
            lines.insert(node.end, close.clone());
        }
    }

    lines
}

fn render_value(
    node: &crate::node::NodeData,
    payload: Option<&str>,
    indent: &str,
    lines: &mut BTreeMap<usize, String>,
) {
    let q = node.quote;
    let payload = payload.unwrap_or("''");

    if value::spans_block(payload) {
        let elements = value::split_elements(payload);
        lines.insert(
            node.start,
            format!("{}{q}{}{q} => [", indent, node.key, q = q),
        );
        let last = elements.len() - 1;
        for (i, element) in elements.iter().enumerate() {
            let comma = if i == last { "" } else { "," };
            lines.insert(
                node.start + 1 + i,
                format!("{}{}{}{}", indent, INDENT, element, comma),
            );
        }
        lines.insert(node.end, format!("{}],", indent));
    } else {
        lines.insert(
            node.start,
            format!("{}{q}{}{q} => {},", indent, node.key, payload, q = q),
        );
    }
}

fn render_rich_comment(
    start: usize,
    label: &str,
    description: &[String],
    indent: &str,
    lines: &mut BTreeMap<usize, String>,
) {
    let mut at = start;
    let mut push = |lines: &mut BTreeMap<usize, String>, text: String| {
        lines.insert(at, text);
        at += 1;
    };

    push(lines, format!("{}/*", indent));
    push(lines, format!("{}{}", indent, BANNER));
    push(lines, format!("{}| {}", indent, label));
    push(lines, format!("{}{}", indent, BANNER));
    if !description.is_empty() {
        push(lines, format!("{}|", indent));
        for segment in description {
            let text = if segment.is_empty() {
                format!("{}|", indent)
            } else {
                format!("{}| {}", indent, segment)
            };
            push(lines, text);
        }
        push(lines, format!("{}|", indent));
    }
    push(lines, format!("{}*/", indent));
}
