//! The script-assignment wrapper around a search index payload.
//!
//! Documentation sites ship the index as `var documenterSearchIndex = {...}` so a
//! `<script>` tag can define it without a fetch. The same payload may also be
//! served as bare JSON. Both shapes are accepted on load and can be produced on
//! export.

use crate::error::InvalidVariableName;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Variable name the documentation generator assigns the index to.
pub const DEFAULT_VARIABLE: &str = "documenterSearchIndex";

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:var|let|const)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*")
        .expect("assignment pattern is valid")
});

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
});

/// A validated script variable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptVariable(String);

impl ScriptVariable {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidVariableName> {
        let name = name.into();
        if IDENTIFIER.is_match(&name) {
            Ok(Self(name))
        } else {
            Err(InvalidVariableName(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ScriptVariable {
    fn default() -> Self {
        Self(DEFAULT_VARIABLE.to_string())
    }
}

impl fmt::Display for ScriptVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a payload is (or should be) wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Envelope {
    /// Bare `{"docs": [...]}` document
    #[default]
    Json,
    /// `var <name> = {"docs": [...]}` assignment
    Script(ScriptVariable),
}

impl Envelope {
    pub const fn variable(&self) -> Option<&ScriptVariable> {
        match self {
            Self::Json => None,
            Self::Script(variable) => Some(variable),
        }
    }
}

/// A raw payload split into its envelope and JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unwrapped<'a> {
    pub envelope: Envelope,
    pub payload: &'a str,
}

/// Splits off a leading script assignment, if present.
///
/// A trailing semicolon after the assignment is dropped. A leading byte order
/// mark is ignored in both shapes.
pub fn unwrap(raw: &str) -> Unwrapped<'_> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some(captures) = ASSIGNMENT.captures(raw) else {
        return Unwrapped {
            envelope: Envelope::Json,
            payload: raw,
        };
    };

    // Group 1 is always present when the pattern matches, and matches IDENTIFIER
    let variable = ScriptVariable(captures[1].to_string());
    let body = &raw[captures[0].len()..];
    let body = body.trim_end();
    let body = body.strip_suffix(';').unwrap_or(body).trim_end();

    Unwrapped {
        envelope: Envelope::Script(variable),
        payload: body,
    }
}
