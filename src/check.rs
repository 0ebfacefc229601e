//! Consistency checks over a loaded index.
//!
//! These are properties a well-formed generator output has, not load
//! requirements: an index that fails them still loads, and the checks report
//! what they found.

use crate::entry::Category;
use crate::index::SearchIndex;
use std::collections::HashMap;
use std::fmt;

/// A single consistency problem, tied to the entry it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Position of the entry in the index
    pub index: usize,
    pub location: String,
    pub kind: FindingKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindingKind {
    /// A section header with body text
    SectionWithText,
    /// A type, function or method with no docstring text
    EmptySymbolText,
    /// A symbol entry reusing the location of an earlier symbol entry
    DuplicateLocation { first: usize },
    EmptyPage,
    UnrecognizedCategory(String),
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SectionWithText => write!(f, "section entry has non-empty text"),
            Self::EmptySymbolText => write!(f, "symbol entry has empty text"),
            Self::DuplicateLocation { first } => {
                write!(f, "location already used by symbol entry #{}", first)
            }
            Self::EmptyPage => write!(f, "page name is empty"),
            Self::UnrecognizedCategory(category) => {
                write!(f, "unrecognized category '{}'", category)
            }
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({}): {}", self.index, self.location, self.kind)
    }
}

/// Runs every check and returns findings in entry order.
pub fn check(index: &SearchIndex) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut symbol_locations: HashMap<&str, usize> = HashMap::new();

    for (position, entry) in index.entries().iter().enumerate() {
        let mut report = |kind| {
            findings.push(Finding {
                index: position,
                location: entry.location.clone(),
                kind,
            });
        };

        if entry.page.is_empty() {
            report(FindingKind::EmptyPage);
        }

        if !entry.category.is_recognized() {
            report(FindingKind::UnrecognizedCategory(
                entry.category.as_str().to_string(),
            ));
        }

        if entry.category == Category::Section && !entry.text.is_empty() {
            report(FindingKind::SectionWithText);
        }

        if entry.category.is_symbol() {
            if entry.text.is_empty() {
                report(FindingKind::EmptySymbolText);
            }
            if let Some(&first) = symbol_locations.get(entry.location.as_str()) {
                report(FindingKind::DuplicateLocation { first });
            } else {
                symbol_locations.insert(&entry.location, position);
            }
        }
    }

    if !findings.is_empty() {
        tracing::debug!("Consistency check found {} problems", findings.len());
    }

    findings
}
