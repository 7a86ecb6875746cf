//! Shared tokenizer for multi-valued manifest headers.
//!
//! `Export-Package`, `Import-Package`, `Require-Bundle`, and friends all use
//! the same loose grammar: clauses separated by top-level commas, each clause
//! a primary value followed by semicolon-separated attributes. Version ranges
//! like `"[1.0,2)"` embed commas inside quotes or parentheses, so splitting
//! has to track both. One tokenizer here serves every header consumer.
//!
//! ```text
//! value := clause (',' clause)*
//! clause := primary (';' attr)*
//! attr := key (':=' | '=') ('"' text '"' | text)
//! ```

use std::collections::HashMap;

/// One comma-delimited item of a multi-valued header: the primary value plus
/// its semicolon-delimited attributes.
///
/// Transient — built and consumed inside the resolution pipeline, never part
/// of the finished descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderClause {
    /// The first semicolon-delimited segment, trimmed.
    pub primary_value: String,
    /// `key:=value` / `key=value` / `key="value"` segments, quotes stripped.
    /// Directive and attribute forms are not distinguished.
    pub attributes: HashMap<String, String>,
}

impl HeaderClause {
    /// Look up an attribute by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Split a raw header value into its top-level comma-separated clauses.
///
/// Commas inside a `"..."` quoted region or inside balanced `(...)` are not
/// split points. An unterminated quote or unbalanced parenthesis runs to the
/// end of input; manifests are frequently hand-edited, so this is a
/// best-effort parse rather than an error. Empty input (or input that trims
/// to nothing) yields no clauses.
pub fn split_clauses(raw: &str) -> Vec<String> {
    let mut clauses = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut paren_depth = 0usize;

    for ch in raw.chars() {
        match ch {
            '"' => {
                in_quote = !in_quote;
                current.push(ch);
            }
            '(' if !in_quote => {
                paren_depth += 1;
                current.push(ch);
            }
            ')' if !in_quote => {
                paren_depth = paren_depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if !in_quote && paren_depth == 0 => {
                push_clause(&mut clauses, &mut current);
            }
            _ => current.push(ch),
        }
    }
    push_clause(&mut clauses, &mut current);

    clauses
}

fn push_clause(clauses: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        clauses.push(trimmed.to_string());
    }
    current.clear();
}

/// Split one clause into its primary value and attribute map.
///
/// The clause is split on `;`, again respecting quoted regions (a `uses`
/// directive may carry a quoted comma-separated list). The first segment is
/// the primary value; each later segment of the form `key:=value` or
/// `key=value` becomes an attribute with surrounding quotes stripped. A bare
/// segment with no `=` is ignored.
pub fn split_clause(clause: &str) -> HeaderClause {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;

    for ch in clause.chars() {
        match ch {
            '"' => {
                in_quote = !in_quote;
                current.push(ch);
            }
            ';' if !in_quote => {
                segments.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    segments.push(current);

    let mut iter = segments.into_iter();
    let primary_value = iter.next().unwrap_or_default().trim().to_string();

    let mut attributes = HashMap::new();
    for segment in iter {
        let Some((key, value)) = segment.split_once('=') else {
            continue;
        };
        // `key:=value` directives share the attribute namespace here.
        let key = key.trim().trim_end_matches(':').trim().to_string();
        if key.is_empty() {
            continue;
        }
        let value = strip_quotes(value.trim()).to_string();
        attributes.insert(key, value);
    }

    HeaderClause {
        primary_value,
        attributes,
    }
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
