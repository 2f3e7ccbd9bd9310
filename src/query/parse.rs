//! Parser for the compiled query grammar
//!
//! ```text
//! query = "" | term (" and " term)*
//! term  = ["!"] (bareTag | "[[" path "]]" | "\"" path "\"" | "outgoing([[" path "]])")
//! ```
//!
//! This is the only serialized artifact the engine produces. Backends that
//! evaluate queries in-process (see [`crate::vault::VaultIndex`]) parse it
//! back into [`Term`]s.

use super::compile::{AND, NOT};
use super::error::QueryError;

/// What a term probes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    /// Bare tag, e.g. `#project`
    Tag,
    /// Quoted folder path
    Folder,
    /// `[[path]]`: documents linking to `path`
    Link,
    /// `outgoing([[path]])`: documents `path` links to
    Outgoing,
}

/// One parsed query term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub kind: TermKind,
    pub target: String,
    pub negated: bool,
}

impl Term {
    #[must_use]
    pub fn new(kind: TermKind, target: impl Into<String>, negated: bool) -> Self {
        Self {
            kind,
            target: target.into(),
            negated,
        }
    }
}

/// Parse a compiled query into its terms
///
/// The empty (or all-whitespace) query parses to no terms.
///
/// # Errors
/// Returns `QueryError::Syntax` with the byte offset of the offending term.
pub fn parse(query: &str) -> Result<Vec<Term>, QueryError> {
    let mut terms = Vec::new();
    if query.trim().is_empty() {
        return Ok(terms);
    }

    let mut rest = query;
    loop {
        let position = query.len() - rest.len();
        let (term, remaining) =
            parse_term(rest).map_err(|message| QueryError::Syntax { position, message })?;
        terms.push(term);

        if remaining.is_empty() {
            break;
        }
        rest = remaining.strip_prefix(AND).ok_or_else(|| QueryError::Syntax {
            position: query.len() - remaining.len(),
            message: "expected ' and ' between terms".to_string(),
        })?;
    }

    Ok(terms)
}

fn parse_term(input: &str) -> Result<(Term, &str), String> {
    let (negated, input) = match input.strip_prefix(NOT) {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    if let Some(inner) = input.strip_prefix("outgoing([[") {
        let (target, rest) = delimited(inner, "]])", "outgoing([[...]])")?;
        return Ok((Term::new(TermKind::Outgoing, target, negated), rest));
    }
    if let Some(inner) = input.strip_prefix("[[") {
        let (target, rest) = delimited(inner, "]]", "[[...]]")?;
        return Ok((Term::new(TermKind::Link, target, negated), rest));
    }
    if let Some(inner) = input.strip_prefix('"') {
        let (target, rest) = delimited(inner, "\"", "quoted folder")?;
        return Ok((Term::new(TermKind::Folder, target, negated), rest));
    }

    let end = input.find(AND).unwrap_or(input.len());
    let tag = &input[..end];
    if tag.is_empty() || tag.contains(char::is_whitespace) {
        return Err(format!("expected a tag, \"folder\", [[link]] or outgoing([[link]]), found '{tag}'"));
    }

    Ok((Term::new(TermKind::Tag, tag, negated), &input[end..]))
}

fn delimited<'a>(inner: &'a str, close: &str, what: &str) -> Result<(&'a str, &'a str), String> {
    let end = inner
        .find(close)
        .ok_or_else(|| format!("unterminated {what}"))?;
    let target = &inner[..end];
    if target.is_empty() {
        return Err(format!("empty target in {what}"));
    }
    Ok((target, &inner[end + close.len()..]))
}
