//! Payload classification for leaf values.
//!
//! Payloads are opaque text; classification is purely syntax-driven and
//! nothing is ever evaluated. Associative arrays (containing `=>` pairs at
//! the top level) are not a value kind: they live in the tree as sections,
//! so an inline mapping falls back to [`ValueKind::String`].

use crate::scanner::{ConfScanner, Rule};
use pest::Parser;

/// Number of array elements at which a value switches from the inline form
/// to the multi-line block form when rendered.
pub const ARRAY_BLOCK_THRESHOLD: usize = 5;

/// Surface-syntax classification of a value payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Integer or float literal: `3306`, `0.9`, `-1`
    Number,

    /// `true` or `false`
    Boolean,

    /// The literal `null`
    Null,

    /// Quoted or bare text (the default)
    String,

    /// Bracket-delimited list with no key/value pairs: `['a', 'b']`
    Array,

    /// Call-shaped expression: `env('DB_HOST', 'localhost')`
    Function,

    /// Class reference: `User::class`, `App\Models\User::class`
    Class,
}

/// Classify a payload by its surface syntax.
pub fn classify(payload: &str) -> ValueKind {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return ValueKind::String;
    }

    let mut pairs = match ConfScanner::parse(Rule::value, trimmed) {
        Ok(pairs) => pairs,
        Err(_) => return ValueKind::String,
    };

    let value_pair = match pairs.next() {
        Some(pair) => pair,
        None => return ValueKind::String,
    };

    for inner in value_pair.into_inner() {
        return match inner.as_rule() {
            Rule::number => ValueKind::Number,
            Rule::boolean => ValueKind::Boolean,
            Rule::null_lit => ValueKind::Null,
            Rule::class_ref => ValueKind::Class,
            Rule::func_call => ValueKind::Function,
            Rule::array_lit => {
                // A bracket group with top-level pairs is associative data,
                // which belongs in a section, not a value payload.
                if has_top_level_arrow(trimmed) {
                    ValueKind::String
                } else {
                    ValueKind::Array
                }
            }
            _ => ValueKind::String,
        };
    }

    ValueKind::String
}

/// Split an inline array payload into its top-level elements.
///
/// Returns an empty vector when the payload is not an array literal.
/// Commas inside nested brackets, parentheses, or quoted strings do not
/// split.
pub fn split_elements(payload: &str) -> Vec<String> {
    let trimmed = payload.trim();
    if !(trimmed.starts_with('[') && trimmed.ends_with(']')) {
        return Vec::new();
    }

    let inner = &trimmed[1..trimmed.len() - 1];
    let mut elements = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in inner.chars() {
        match quote {
            Some(q) => {
                current.push(ch);
                if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '\'' | '"' => {
                    quote = Some(ch);
                    current.push(ch);
                }
                '[' | '(' => {
                    depth += 1;
                    current.push(ch);
                }
                ']' | ')' => {
                    depth = depth.saturating_sub(1);
                    current.push(ch);
                }
                ',' if depth == 0 => {
                    push_element(&mut elements, &mut current);
                }
                _ => current.push(ch),
            },
        }
    }
    push_element(&mut elements, &mut current);

    elements
}

/// True when the payload renders as a multi-line array block.
pub(crate) fn spans_block(payload: &str) -> bool {
    classify(payload) == ValueKind::Array
        && split_elements(payload).len() >= ARRAY_BLOCK_THRESHOLD
}

fn push_element(elements: &mut Vec<String>, current: &mut String) {
    let element = current.trim();
    if !element.is_empty() {
        elements.push(element.to_string());
    }
    current.clear();
}

fn has_top_level_arrow(payload: &str) -> bool {
    let trimmed = payload.trim();
    if !(trimmed.starts_with('[') && trimmed.ends_with(']')) {
        return false;
    }

    let inner: Vec<char> = trimmed[1..trimmed.len() - 1].chars().collect();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (i, &ch) in inner.iter().enumerate() {
        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '\'' | '"' => quote = Some(ch),
                '[' | '(' => depth += 1,
                ']' | ')' => depth = depth.saturating_sub(1),
                '=' if depth == 0 && inner.get(i + 1) == Some(&'>') => return true,
                _ => {}
            },
        }
    }

    false
}
