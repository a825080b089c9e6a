//! Data-block extraction and the flat parsing stage.
//!
//! Parsing is two linear passes. The first locates the data block (the
//! `return [` line through its matching `];`) by running the scanner over
//! every line and counting nesting depth. The second walks the block's
//! interior with an explicit section stack, producing a flat, path-tagged
//! node collection that [`Document::wrap`](crate::Document::wrap) folds into
//! a tree.
//!
//! A `'key' => [` opener is a section when its direct interior holds mapped
//! entries or comments, and a plain-array value when it holds only bare
//! elements; plain arrays are reassembled into a single inline payload.

use crate::error::{DocError, DocResult};
use crate::scanner::{LineToken, classify_line};

/// Result of the flat parsing stage
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// Lines before the data block, preserved verbatim
    pub prolog: Vec<String>,

    /// The raw opening marker line (`return [`)
    pub open: String,

    /// The raw closing marker line (`];`)
    pub close: String,

    /// Absolute index of the opening marker
    pub open_at: usize,

    /// Absolute index of the closing marker
    pub close_at: usize,

    /// Every line of the block, opening and closing markers included
    pub raw_block: Vec<String>,

    /// Flat, path-tagged nodes in document order
    pub nodes: Vec<FlatNode>,

    /// Lines after the data block, preserved verbatim
    pub epilog: Vec<String>,
}

/// One parsed node before tree assembly
#[derive(Debug, Clone)]
pub struct FlatNode {
    /// Full dotted path, synthetic last segment for comments
    pub path: String,
    pub kind: FlatKind,
    pub quote: char,
    pub raw: Vec<String>,
    pub start: usize,
    pub end: usize,
}

/// Node kind as seen by the flat stage
#[derive(Debug, Clone)]
pub enum FlatKind {
    Section,
    Value { payload: Option<String> },
    Comment { label: String },
    RichComment {
        label: String,
        description: Vec<String>,
    },
}

/// Turn raw file lines into a flat node collection.
pub fn parse(lines: &[String]) -> DocResult<ParsedFile> {
    let tokens: Vec<LineToken> = lines.iter().map(|line| classify_line(line)).collect();

    let open_at = tokens
        .iter()
        .position(|token| *token == LineToken::ReturnOpen)
        .ok_or(DocError::StructureNotFound)?;

    let close_at = matching_close(&tokens, open_at, lines.len()).ok_or(DocError::StructureNotFound)?;

    let mut block = BlockParser {
        lines,
        tokens: &tokens,
        nodes: Vec::new(),
        stack: Vec::new(),
        comment_seq: 0,
    };
    block.run(open_at + 1, close_at)?;

    Ok(ParsedFile {
        prolog: lines[..open_at].to_vec(),
        open: lines[open_at].clone(),
        close: lines[close_at].clone(),
        open_at,
        close_at,
        raw_block: lines[open_at..=close_at].to_vec(),
        nodes: block.nodes,
        epilog: lines[close_at + 1..].to_vec(),
    })
}

/// Index of the close that balances the array opened at `open`.
fn matching_close(tokens: &[LineToken], open: usize, to: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, token) in tokens.iter().enumerate().take(to).skip(open + 1) {
        match token {
            LineToken::Entry {
                opens_array: true, ..
            } => depth += 1,
            LineToken::ArrayClose => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

struct BlockParser<'a> {
    lines: &'a [String],
    tokens: &'a [LineToken],
    nodes: Vec<FlatNode>,
    /// Open sections: (index into `nodes`, key)
    stack: Vec<(usize, String)>,
    comment_seq: u32,
}

impl BlockParser<'_> {
    fn run(&mut self, from: usize, to: usize) -> DocResult<()> {
        let mut idx = from;
        let mut pending: Option<(usize, Vec<String>)> = None;

        while idx < to {
            match &self.tokens[idx] {
                LineToken::Blank => self.flush_comment(&mut pending),
                LineToken::LineComment(text) => match &mut pending {
                    Some((_, segments)) => segments.push(text.clone()),
                    None => pending = Some((idx, vec![text.clone()])),
                },
                LineToken::BlockOpen => {
                    self.flush_comment(&mut pending);
                    idx = self.rich_comment(idx, to)?;
                    continue;
                }
                LineToken::Entry {
                    key,
                    quote,
                    payload,
                    opens_array,
                } => {
                    self.flush_comment(&mut pending);
                    if *opens_array {
                        idx = self.open_array(idx, to, key, *quote)?;
                        continue;
                    }
                    let payload = (!payload.is_empty()).then(|| payload.clone());
                    let path = self.path_for(key);
                    self.push_node(path, FlatKind::Value { payload }, *quote, idx, idx);
                }
                LineToken::ArrayClose => {
                    self.flush_comment(&mut pending);
                    self.close_section(idx)?;
                }
                LineToken::Element(_) => {
                    return Err(DocError::parse(idx, "bare element outside an array block"));
                }
                LineToken::BlockBar(_) | LineToken::BlockClose => {
                    return Err(DocError::parse(idx, "comment marker outside a block"));
                }
                LineToken::ReturnOpen => {
                    return Err(DocError::parse(idx, "unexpected data block opener"));
                }
            }
            idx += 1;
        }

        self.flush_comment(&mut pending);
        if self.stack.is_empty() {
            Ok(())
        } else {
            Err(DocError::StructureNotFound)
        }
    }

    /// Handle a `'key' => [` opener: section or plain-array value.
    fn open_array(&mut self, idx: usize, to: usize, key: &str, quote: char) -> DocResult<usize> {
        let close = matching_close(self.tokens, idx, to)
            .ok_or_else(|| DocError::parse(idx, "unbalanced array opener"))?;

        if self.is_plain_array(idx, close) {
            let mut elements = Vec::new();
            let mut depth = 1usize;
            for j in idx + 1..close {
                match &self.tokens[j] {
                    LineToken::Element(text) if depth == 1 => elements.push(text.clone()),
                    LineToken::Entry {
                        opens_array: true, ..
                    } => depth += 1,
                    LineToken::ArrayClose => depth -= 1,
                    _ => {}
                }
            }
            let payload = format!("[{}]", elements.join(", "));
            let path = self.path_for(key);
            self.push_node(path, FlatKind::Value { payload: Some(payload) }, quote, idx, close);
            Ok(close + 1)
        } else {
            let path = self.path_for(key);
            let flat_idx = self.nodes.len();
            self.nodes.push(FlatNode {
                path,
                kind: FlatKind::Section,
                quote,
                raw: Vec::new(),
                start: idx,
                end: idx,
            });
            self.stack.push((flat_idx, key.to_string()));
            Ok(idx + 1)
        }
    }

    /// A block is a plain array when its direct interior holds only bare
    /// elements (and blank lines). Mapped entries or comments make it a
    /// section; an empty block defaults to a section.
    fn is_plain_array(&self, open: usize, close: usize) -> bool {
        let mut depth = 1usize;
        let mut saw_element = false;
        for j in open + 1..close {
            match &self.tokens[j] {
                LineToken::Entry { .. } if depth == 1 => return false,
                LineToken::LineComment(_) | LineToken::BlockOpen if depth == 1 => return false,
                LineToken::Element(_) if depth == 1 => saw_element = true,
                LineToken::Entry {
                    opens_array: true, ..
                } => depth += 1,
                LineToken::ArrayClose => depth -= 1,
                _ => {}
            }
        }
        saw_element
    }

    fn close_section(&mut self, idx: usize) -> DocResult<()> {
        let (flat_idx, _) = self
            .stack
            .pop()
            .ok_or_else(|| DocError::parse(idx, "unbalanced array close"))?;
        let start = self.nodes[flat_idx].start;
        self.nodes[flat_idx].end = idx;
        self.nodes[flat_idx].raw = self.lines[start..=idx].to_vec();
        Ok(())
    }

    /// Consume a `/* ... */` banner block into a rich comment node.
    fn rich_comment(&mut self, idx: usize, to: usize) -> DocResult<usize> {
        let mut close = None;
        for j in idx + 1..to {
            match &self.tokens[j] {
                LineToken::BlockClose => {
                    close = Some(j);
                    break;
                }
                LineToken::BlockBar(_) => {}
                _ => return Err(DocError::parse(j, "unterminated comment block")),
            }
        }
        let close = close.ok_or_else(|| DocError::parse(idx, "unterminated comment block"))?;

        let mut banners = 0usize;
        let mut label = String::new();
        let mut description: Vec<String> = Vec::new();
        for j in idx + 1..close {
            if let LineToken::BlockBar(text) = &self.tokens[j] {
                if text.starts_with("--") {
                    banners += 1;
                } else if banners < 2 {
                    if label.is_empty() && !text.is_empty() {
                        label = text.trim().to_string();
                    }
                } else {
                    description.push(text.clone());
                }
            }
        }
        while description.first().is_some_and(|s| s.is_empty()) {
            description.remove(0);
        }
        while description.last().is_some_and(|s| s.is_empty()) {
            description.pop();
        }

        let path = self.comment_path();
        self.push_node(
            path,
            FlatKind::RichComment { label, description },
            '\'',
            idx,
            close,
        );
        Ok(close + 1)
    }

    fn flush_comment(&mut self, pending: &mut Option<(usize, Vec<String>)>) {
        if let Some((start, segments)) = pending.take() {
            let end = start + segments.len() - 1;
            let path = self.comment_path();
            self.push_node(
                path,
                FlatKind::Comment {
                    label: segments.join("\n"),
                },
                '\'',
                start,
                end,
            );
        }
    }

    fn push_node(&mut self, path: String, kind: FlatKind, quote: char, start: usize, end: usize) {
        self.nodes.push(FlatNode {
            path,
            kind,
            quote,
            raw: self.lines[start..=end].to_vec(),
            start,
            end,
        });
    }

    fn path_for(&self, key: &str) -> String {
        let mut segments: Vec<&str> = self.stack.iter().map(|(_, k)| k.as_str()).collect();
        segments.push(key);
        segments.join(".")
    }

    fn comment_path(&mut self) -> String {
        let key = format!("#comment-{}", self.comment_seq);
        self.comment_seq += 1;
        self.path_for(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(source: &str) -> Vec<String> {
        source.lines().map(String::from).collect()
    }

    #[test]
    fn test_missing_block_is_fatal() {
        let input = lines("<?php\n\n$x = 1;\n");
        assert!(matches!(parse(&input), Err(DocError::StructureNotFound)));
    }

    #[test]
    fn test_unbalanced_block_is_fatal() {
        let input = lines("return [\n    'a' => 1,\n");
        assert!(matches!(parse(&input), Err(DocError::StructureNotFound)));
    }

    #[test]
    fn test_flat_paths() {
        let input = lines(
            "return [\n    'name' => 'Demo',\n    'db' => [\n        'port' => 3306,\n    ],\n];",
        );
        let parsed = parse(&input).unwrap();
        let paths: Vec<&str> = parsed.nodes.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["name", "db", "db.port"]);
    }

    #[test]
    fn test_plain_array_reassembly() {
        let input = lines(
            "return [\n    'providers' => [\n        'a',\n        'b',\n    ],\n];",
        );
        let parsed = parse(&input).unwrap();
        assert_eq!(parsed.nodes.len(), 1);
        match &parsed.nodes[0].kind {
            FlatKind::Value { payload } => {
                assert_eq!(payload.as_deref(), Some("['a', 'b']"));
            }
            other => panic!("expected a value node, got {:?}", other),
        }
        assert_eq!(parsed.nodes[0].start, 1);
        assert_eq!(parsed.nodes[0].end, 4);
    }

    #[test]
    fn test_comment_run_folds_into_one_node() {
        let input = lines(
            "return [\n    // first line\n    // second line\n    'key' => 1,\n];",
        );
        let parsed = parse(&input).unwrap();
        match &parsed.nodes[0].kind {
            FlatKind::Comment { label } => assert_eq!(label, "first line\nsecond line"),
            other => panic!("expected a comment node, got {:?}", other),
        }
    }

    #[test]
    fn test_prolog_and_epilog_are_preserved() {
        let input = lines("<?php\n\nreturn [\n    'a' => 1,\n];\n// trailing");
        let parsed = parse(&input).unwrap();
        assert_eq!(parsed.prolog, vec!["<?php".to_string(), String::new()]);
        assert_eq!(parsed.epilog, vec!["// trailing".to_string()]);
    }
}
