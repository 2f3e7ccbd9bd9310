//! Filter list to backend query compilation
//!
//! Each backend-expressible filter becomes one term:
//!
//! | kind       | term                  |
//! |------------|-----------------------|
//! | `tag`      | `#tag`                |
//! | `folder`   | `"path"`              |
//! | `link`     | `[[path]]`            |
//! | `backlink` | `outgoing([[path]])`  |
//!
//! Reversed filters get a leading `!`. Terms are joined with `" and "` in
//! filter order. Text filters are skipped; the pipeline applies them
//! against document bodies after the backend returns.

use super::error::QueryError;
use crate::filter::{Filter, FilterKind};

/// Separator between compiled terms
pub const AND: &str = " and ";

/// Negation operator prefix
pub const NOT: char = '!';

/// Render a single filter as a backend term
///
/// # Errors
/// Returns `QueryError::UnsupportedFilterKind` for text filters, which the
/// backend cannot express.
pub fn compile_term(filter: &Filter) -> Result<String, QueryError> {
    let body = match &filter.kind {
        FilterKind::Tag => filter.value.clone(),
        FilterKind::Folder => format!("\"{}\"", filter.value),
        FilterKind::Link { .. } => format!("[[{}]]", filter.value),
        FilterKind::Backlink => format!("outgoing([[{}]])", filter.value),
        FilterKind::Text => return Err(QueryError::UnsupportedFilterKind(filter.filter_type())),
    };

    if filter.reversed {
        Ok(format!("{NOT}{body}"))
    } else {
        Ok(body)
    }
}

/// Compile an ordered filter list into one conjunctive query
///
/// An empty list (or a list of only text filters) yields the empty string,
/// which the backend reads as "every document".
///
/// # Errors
/// Propagates `compile_term` failures; with the closed filter set and text
/// filters skipped this does not happen in practice.
///
/// # Examples
/// ```
/// use desk::filter::Filter;
/// use desk::query::compile;
///
/// let query = compile(&[Filter::tag("#project"), Filter::folder("/notes")]).unwrap();
/// assert_eq!(query, r#"#project and "/notes""#);
/// ```
pub fn compile(filters: &[Filter]) -> Result<String, QueryError> {
    let terms = filters
        .iter()
        .filter(|f| f.filter_type().is_backend_expressible())
        .map(compile_term)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(terms.join(AND))
}
