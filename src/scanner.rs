//! Line scanner for the array-literal configuration subset.
//!
//! Each raw line is trimmed and classified into a [`LineToken`] by a small
//! pest grammar. The scanner never tracks nesting itself; the parser drives
//! an explicit depth stack over the token stream, which keeps the whole pass
//! single-pass and linear.

use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub(crate) struct ConfScanner;

/// Classification of a single source line
#[derive(Debug, Clone, PartialEq)]
pub enum LineToken {
    /// Empty (or whitespace-only) line
    Blank,

    /// Opening marker of the data block: `return [`
    ReturnOpen,

    /// `],` or `];` closing an array or the data block
    ArrayClose,

    /// `'key' => payload,` or `'key' => [` (a section or array opener)
    Entry {
        key: String,
        quote: char,
        payload: String,
        opens_array: bool,
    },

    /// `// text`
    LineComment(String),

    /// `/*` opening a block comment
    BlockOpen,

    /// `| text` inside a block comment
    BlockBar(String),

    /// `*/` closing a block comment
    BlockClose,

    /// Bare array element such as `'value',`
    Element(String),
}

/// Classify a single raw line.
///
/// Unrecognized lines fall back to [`LineToken::Element`] so that the parser
/// can decide what to do with them in context; the scanner itself never fails.
pub fn classify_line(line: &str) -> LineToken {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineToken::Blank;
    }

    let mut pairs = match ConfScanner::parse(Rule::line, trimmed) {
        Ok(pairs) => pairs,
        Err(_) => return LineToken::Element(strip_trailing_comma(trimmed)),
    };

    let line_pair = match pairs.next() {
        Some(pair) => pair,
        None => return LineToken::Element(strip_trailing_comma(trimmed)),
    };

    for inner in line_pair.into_inner() {
        match inner.as_rule() {
            Rule::return_open => return LineToken::ReturnOpen,
            Rule::array_close => return LineToken::ArrayClose,
            Rule::block_open => return LineToken::BlockOpen,
            Rule::block_close => return LineToken::BlockClose,
            Rule::block_bar => {
                let text = inner
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::bar_text)
                    .map(|p| p.as_str())
                    .unwrap_or_default();
                return LineToken::BlockBar(strip_one_space(text));
            }
            Rule::line_comment => {
                let text = inner
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::comment_text)
                    .map(|p| p.as_str())
                    .unwrap_or_default();
                return LineToken::LineComment(strip_one_space(text));
            }
            Rule::entry => return entry_token(inner),
            Rule::element => {
                let text = inner
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::element_text)
                    .map(|p| p.as_str())
                    .unwrap_or(trimmed);
                return LineToken::Element(strip_trailing_comma(text));
            }
            _ => {}
        }
    }

    LineToken::Element(strip_trailing_comma(trimmed))
}

fn entry_token(pair: pest::iterators::Pair<'_, Rule>) -> LineToken {
    let mut key = String::new();
    let mut quote = '\'';
    let mut payload = String::new();

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::sq_key => {
                quote = '\'';
                key = key_inner(part, Rule::sq_key_inner);
            }
            Rule::dq_key => {
                quote = '"';
                key = key_inner(part, Rule::dq_key_inner);
            }
            Rule::payload_text => payload = part.as_str().trim().to_string(),
            _ => {}
        }
    }

    let opens_array = payload == "[";
    if !opens_array {
        payload = strip_trailing_comma(&payload);
    }

    LineToken::Entry {
        key,
        quote,
        payload,
        opens_array,
    }
}

fn key_inner(pair: pest::iterators::Pair<'_, Rule>, rule: Rule) -> String {
    pair.into_inner()
        .find(|p| p.as_rule() == rule)
        .map(|p| p.as_str().to_string())
        .unwrap_or_default()
}

fn strip_trailing_comma(text: &str) -> String {
    text.trim().trim_end_matches(',').trim_end().to_string()
}

fn strip_one_space(text: &str) -> String {
    text.strip_prefix(' ').unwrap_or(text).to_string()
}
