//! Search index records and their categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of documentation unit an entry represents.
///
/// The five generator-emitted kinds get their own variants. Anything else,
/// including the empty string, is kept verbatim in [`Category::Other`] so that
/// re-serializing an index reproduces its input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// A heading inside a page; carries no text
    Section,
    /// Page-level prose or an unevaluated block from the page source
    Page,
    /// A documented type
    Type,
    /// A documented function (all methods together)
    Function,
    /// A single documented method signature
    Method,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Section => "section",
            Self::Page => "page",
            Self::Type => "type",
            Self::Function => "function",
            Self::Method => "method",
            Self::Other(other) => other,
        }
    }

    /// Types, functions and methods: entries documenting a code symbol.
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Self::Type | Self::Function | Self::Method)
    }

    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        match value {
            "section" => Self::Section,
            "page" => Self::Page,
            "type" => Self::Type,
            "function" => Self::Function,
            "method" => Self::Method,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Other(_) => Self::Other(value),
            known => known,
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of the search index.
///
/// Field order matches the generator's output and is preserved on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocEntry {
    /// Relative URL with an optional `#anchor`, e.g. `api/#Pkg.Symbol`
    pub location: String,
    /// Human-readable page name
    pub page: String,
    pub title: String,
    /// Indexed text; empty for section headers
    pub text: String,
    pub category: Category,
}

impl DocEntry {
    pub fn new(
        location: impl Into<String>,
        page: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        category: impl Into<Category>,
    ) -> Self {
        Self {
            location: location.into(),
            page: page.into(),
            title: title.into(),
            text: text.into(),
            category: category.into(),
        }
    }

    /// The page path part of the location (everything before `#`).
    pub fn path(&self) -> &str {
        self.location
            .split_once('#')
            .map_or(self.location.as_str(), |(path, _)| path)
    }

    /// The anchor part of the location, if any.
    pub fn anchor(&self) -> Option<&str> {
        self.location.split_once('#').map(|(_, anchor)| anchor)
    }

    /// The first non-blank line of the text, trimmed.
    pub fn headline(&self) -> Option<&str> {
        self.text.lines().map(str::trim).find(|line| !line.is_empty())
    }
}
