//! Local text matching
//!
//! Text filters cannot be expressed to the backend, so they are applied
//! against document bodies after the backend has narrowed the candidates.

use crate::filter::Filter;

/// Case-insensitive containment test for one text filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatcher {
    needle: String,
    reversed: bool,
}

impl TextMatcher {
    /// Build a matcher, or `None` if `filter` is not a text filter
    #[must_use]
    pub fn new(filter: &Filter) -> Option<Self> {
        filter.is_text().then(|| Self {
            needle: filter.value.to_lowercase(),
            reversed: filter.reversed,
        })
    }

    /// A body passes iff containment differs from `reversed`
    #[must_use]
    pub fn matches(&self, body: &str) -> bool {
        body.to_lowercase().contains(&self.needle) != self.reversed
    }
}

/// Test a body against every matcher; all must pass
#[must_use]
pub fn matches_all(body: &str, matchers: &[TextMatcher]) -> bool {
    if matchers.is_empty() {
        return true;
    }
    let lowered = body.to_lowercase();
    matchers
        .iter()
        .all(|m| lowered.contains(&m.needle) != m.reversed)
}

/// Test a body against a single text filter
///
/// Non-text filters always pass.
#[must_use]
pub fn matches(body: &str, filter: &Filter) -> bool {
    TextMatcher::new(filter).is_none_or(|m| m.matches(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_case_insensitive() {
        let filter = Filter::text("needle");
        assert!(matches("a NEEDLE here", &filter));
        assert!(!matches("haystack", &filter));
    }

    #[test]
    fn test_reversed_excludes() {
        let filter = Filter::text("Needle").negated();
        assert!(!matches("needle", &filter));
        assert!(matches("haystack", &filter));
    }

    #[test]
    fn test_empty_needle_matches_everything() {
        assert!(matches("anything", &Filter::text("")));
        assert!(matches("", &Filter::text("")));
        assert!(!matches("anything", &Filter::text("").negated()));
    }

    #[test]
    fn test_non_text_filter_has_no_matcher() {
        assert!(TextMatcher::new(&Filter::tag("#a")).is_none());
        assert!(matches("body", &Filter::tag("#a")));
    }

    #[test]
    fn test_matches_all_is_conjunction() {
        let matchers: Vec<TextMatcher> = [Filter::text("alpha"), Filter::text("beta").negated()]
            .iter()
            .filter_map(TextMatcher::new)
            .collect();

        assert!(matches_all("Alpha only", &matchers));
        assert!(!matches_all("alpha and beta", &matchers));
        assert!(!matches_all("gamma", &matchers));
        assert!(matches_all("anything", &[]));
    }
}
