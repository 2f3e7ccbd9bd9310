//! Filter data structures
//!
//! A [`Filter`] is one predicate a document must (or, when `reversed`, must
//! not) satisfy. The kind-specific payload lives in [`FilterKind`]; the value
//! and negation flag are shared by every kind.
//!
//! Equality is structural: two filters are equal iff kind, payload, value
//! and `reversed` all match. [`FilterKey`] is the derived identity string
//! used for deduplication and stable list keys.

use super::error::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discriminant of a filter, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Tag,
    Folder,
    Link,
    Backlink,
    Text,
}

impl FilterType {
    /// All filter types, in the order they are offered to users
    pub const ALL: [Self; 5] = [Self::Tag, Self::Folder, Self::Link, Self::Backlink, Self::Text];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Folder => "folder",
            Self::Link => "link",
            Self::Backlink => "backlink",
            Self::Text => "text",
        }
    }

    /// Whether the page-query backend can evaluate this kind
    ///
    /// Text containment is the only kind that has to be applied locally
    /// against document bodies.
    #[must_use]
    pub const fn is_backend_expressible(self) -> bool {
        !matches!(self, Self::Text)
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| FilterError::UnknownKind(s.to_string()))
    }
}

/// Kind-specific part of a filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterKind {
    /// Document carries the tag
    Tag,
    /// Document resides under the folder path
    Folder,
    /// Document links to the target path
    Link {
        /// Whether the target currently resolves to a real document (display only)
        exists: bool,
        /// Optional human label for the target
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
    },
    /// Document is linked from the value path
    Backlink,
    /// Document body contains the value, case-insensitively
    Text,
}

impl FilterKind {
    #[must_use]
    pub const fn filter_type(&self) -> FilterType {
        match self {
            Self::Tag => FilterType::Tag,
            Self::Folder => FilterType::Folder,
            Self::Link { .. } => FilterType::Link,
            Self::Backlink => FilterType::Backlink,
            Self::Text => FilterType::Text,
        }
    }
}

/// A single predicate over documents
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    #[serde(flatten)]
    pub kind: FilterKind,
    pub value: String,
    #[serde(default)]
    pub reversed: bool,
}

impl Filter {
    #[must_use]
    pub fn new(kind: FilterKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            reversed: false,
        }
    }

    #[must_use]
    pub fn tag(value: impl Into<String>) -> Self {
        Self::new(FilterKind::Tag, value)
    }

    #[must_use]
    pub fn folder(value: impl Into<String>) -> Self {
        Self::new(FilterKind::Folder, value)
    }

    #[must_use]
    pub fn link(value: impl Into<String>, exists: bool) -> Self {
        Self::new(FilterKind::Link { exists, alias: None }, value)
    }

    #[must_use]
    pub fn link_with_alias(value: impl Into<String>, exists: bool, alias: impl Into<String>) -> Self {
        Self::new(
            FilterKind::Link {
                exists,
                alias: Some(alias.into()),
            },
            value,
        )
    }

    #[must_use]
    pub fn backlink(value: impl Into<String>) -> Self {
        Self::new(FilterKind::Backlink, value)
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(FilterKind::Text, value)
    }

    /// Same filter with `reversed` set
    #[must_use]
    pub fn negated(mut self) -> Self {
        self.reversed = true;
        self
    }

    /// Same filter with `reversed` flipped
    #[must_use]
    pub fn toggled(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    #[must_use]
    pub const fn filter_type(&self) -> FilterType {
        self.kind.filter_type()
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.kind, FilterKind::Text)
    }

    /// Whether both filters probe the same kind and value
    ///
    /// Ignores `reversed` and link display payload; used to hide
    /// suggestions that are already active in either polarity.
    #[must_use]
    pub fn same_target(&self, other: &Self) -> bool {
        self.filter_type() == other.filter_type() && self.value == other.value
    }

    /// Derived identity string
    #[must_use]
    pub fn key(&self) -> FilterKey {
        let negation = if self.reversed { "!" } else { "" };

        match &self.kind {
            FilterKind::Link { exists, alias } => {
                let exist_tag = if *exists { "" } else { "nofile:" };
                let alias_tag = alias
                    .as_ref()
                    .map(|alias| format!("alias:{alias}:"))
                    .unwrap_or_default();
                FilterKey(format!("{negation}link:{alias_tag}{exist_tag}{}", self.value))
            }
            kind => FilterKey(format!("{negation}{}:{}", kind.filter_type(), self.value)),
        }
    }

    /// One-line human description, e.g. `Has tag #project`
    #[must_use]
    pub fn describe(&self) -> String {
        let phrase = match (self.filter_type(), self.reversed) {
            (FilterType::Tag, false) => "Has tag",
            (FilterType::Tag, true) => "Does not have tag",
            (FilterType::Folder, false) => "Is inside folder",
            (FilterType::Folder, true) => "Is not inside folder",
            (FilterType::Link, false) => "Links to",
            (FilterType::Link, true) => "Does not link to",
            (FilterType::Backlink, false) => "Is linked by",
            (FilterType::Backlink, true) => "Is not linked by",
            (FilterType::Text, false) => "Contains text",
            (FilterType::Text, true) => "Does not contain text",
        };

        match &self.kind {
            FilterKind::Link {
                exists,
                alias: Some(alias),
            } => format!("{phrase} {alias} ({}){}", self.value, missing_marker(*exists)),
            FilterKind::Link { exists, alias: None } => {
                format!("{phrase} {}{}", self.value, missing_marker(*exists))
            }
            _ => format!("{phrase} {}", self.value),
        }
    }
}

const fn missing_marker(exists: bool) -> &'static str {
    if exists { "" } else { " (missing)" }
}

/// Textual form `[!]kind:value`, accepted back by `FromStr`
impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reversed {
            f.write_str("!")?;
        }
        write!(f, "{}:{}", self.filter_type(), self.value)?;
        if let FilterKind::Link {
            alias: Some(alias), ..
        } = &self.kind
        {
            write!(f, "|{alias}")?;
        }
        Ok(())
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    /// Parse `[!]kind:value`
    ///
    /// `tag:foo` is normalised to `#foo`. `link:path|alias` carries an
    /// alias. Link filters start out as existing; callers that can see the
    /// corpus resolve the flag afterwards.
    ///
    /// # Examples
    /// ```
    /// use desk::filter::Filter;
    ///
    /// let f: Filter = "!folder:notes/daily".parse().unwrap();
    /// assert!(f.reversed);
    /// assert_eq!(f.value, "notes/daily");
    /// ```
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let (reversed, body) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (kind, value) = body
            .split_once(':')
            .ok_or_else(|| FilterError::InvalidFormat(input.to_string()))?;
        let filter_type: FilterType = kind.trim().parse()?;
        let value = value.trim();

        if value.is_empty() && filter_type != FilterType::Text {
            return Err(FilterError::EmptyValue(filter_type));
        }

        if filter_type == FilterType::Tag && value.contains(char::is_whitespace) {
            return Err(FilterError::InvalidTag(value.to_string()));
        }

        let filter = match filter_type {
            FilterType::Tag if value.starts_with('#') => Self::tag(value),
            FilterType::Tag => Self::tag(format!("#{value}")),
            FilterType::Folder => Self::folder(value),
            FilterType::Link => match value.split_once('|') {
                Some((path, alias)) if !alias.trim().is_empty() => {
                    Self::link_with_alias(path.trim(), true, alias.trim())
                }
                Some((path, _)) => Self::link(path.trim(), true),
                None => Self::link(value, true),
            },
            FilterType::Backlink => Self::backlink(value),
            FilterType::Text => Self::text(value),
        };

        Ok(Self { reversed, ..filter })
    }
}

/// Derived identity of a filter
///
/// `"{type}:{value}"` for most kinds, prefixed with `!` when reversed. Link
/// keys also encode the alias and existence so that two link filters to the
/// same path with different labels stay distinct, as do equally labelled
/// links to different paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FilterKey(String);

impl FilterKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
