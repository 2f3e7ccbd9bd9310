//! Tag and wiki-link extraction from markdown bodies

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[\s(\[,;])(#[\p{L}\p{N}_/\-]+)").expect("tag pattern is valid")
});

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\[\]|#]+)(?:#[^\[\]|]*)?(?:\|([^\[\]]+))?\]\]").expect("link pattern is valid")
});

/// A `[[target|alias]]` occurrence as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    pub target: String,
    pub alias: Option<String>,
}

/// Inline `#tags`, first occurrence order, without duplicates
///
/// Purely numeric tags (`#123`) are not tags, and a trailing `/` is dropped.
#[must_use]
pub fn extract_tags(body: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    TAG_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('/').to_string())
        .filter(|tag| tag[1..].chars().any(|c| !c.is_ascii_digit()))
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Wiki links in order of appearance; heading anchors are dropped
#[must_use]
pub fn extract_links(body: &str) -> Vec<RawLink> {
    LINK_RE
        .captures_iter(body)
        .filter_map(|caps| {
            let target = caps.get(1)?.as_str().trim();
            if target.is_empty() {
                return None;
            }
            let alias = caps
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|a| !a.is_empty())
                .map(str::to_string);
            Some(RawLink {
                target: target.to_string(),
                alias,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_tags() {
        let body = "#project kickoff\nsee #area/work, and (#x) but not a#b or #123\n#project again";
        assert_eq!(extract_tags(body), vec!["#project", "#area/work", "#x"]);
    }

    #[test]
    fn test_extract_tags_trailing_slash() {
        assert_eq!(extract_tags("#nested/"), vec!["#nested"]);
    }

    #[test]
    fn test_extract_links() {
        let body = "[[alpha]] and [[notes/beta.md|Beta]] plus [[gamma#Heading]] and [[ ]]";
        let links = extract_links(body);
        assert_eq!(
            links,
            vec![
                RawLink {
                    target: "alpha".into(),
                    alias: None
                },
                RawLink {
                    target: "notes/beta.md".into(),
                    alias: Some("Beta".into())
                },
                RawLink {
                    target: "gamma".into(),
                    alias: None
                },
            ]
        );
    }

    #[test]
    fn test_embeds_count_as_links() {
        let links = extract_links("![[diagram.png]]");
        assert_eq!(links[0].target, "diagram.png");
    }
}
