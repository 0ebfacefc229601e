//! Loading, querying and emitting a documentation search index.
//!
//! A [`SearchIndex`] is built in one shot from a raw payload and is immutable
//! afterwards. Loading is strict: any deviation from the `{"docs": [...]}`
//! shape fails with [`LoadError::Malformed`] instead of yielding a partial
//! index.

use crate::entry::{Category, DocEntry};
use crate::envelope::{self, Envelope, ScriptVariable};
use crate::error::{LoadError, MalformedReason};
use crate::strict;
use anyhow::Context;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Origin label for payloads that did not come from a file.
const INPUT_ORIGIN: &str = "<input>";

/// An ordered, immutable table of documentation entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchIndex {
    entries: Vec<DocEntry>,
    /// Wrapper the payload was loaded with
    envelope: Envelope,
}

/// Borrowed view used for serialization, so emitting never clones entries.
#[derive(Serialize)]
struct DocsDocument<'a> {
    docs: &'a [DocEntry],
}

/// Entry counts per category and page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub entries: usize,
    /// Category name to entry count
    pub by_category: BTreeMap<String, usize>,
    /// Pages in first-seen order with their entry counts
    pub pages: Vec<(String, usize)>,
}

impl SearchIndex {
    /// Creates an index from already-validated entries.
    pub const fn new(entries: Vec<DocEntry>) -> Self {
        Self {
            entries,
            envelope: Envelope::Json,
        }
    }

    /// Parses a raw payload, either bare JSON or a script assignment.
    pub fn parse(raw: &str) -> Result<Self, LoadError> {
        Self::parse_named(raw, INPUT_ORIGIN)
    }

    /// Parses a raw payload, labelling errors with `origin`.
    pub fn parse_named(raw: &str, origin: &str) -> Result<Self, LoadError> {
        let malformed = |reason| LoadError::Malformed {
            origin: origin.to_string(),
            reason,
        };

        let unwrapped = envelope::unwrap(raw);
        if unwrapped.payload.trim().is_empty() {
            return Err(malformed(MalformedReason::EmptyPayload));
        }

        let value = strict::parse_value(unwrapped.payload).map_err(malformed)?;

        let entries = entries_from_value(value).map_err(malformed)?;
        tracing::debug!(
            "Parsed search index from {} ({} entries, {:?})",
            origin,
            entries.len(),
            unwrapped.envelope
        );

        Ok(Self {
            entries,
            envelope: unwrapped.envelope,
        })
    }

    /// Parses raw bytes, rejecting payloads that are not UTF-8.
    pub fn parse_bytes(raw: &[u8], origin: &str) -> Result<Self, LoadError> {
        let raw = std::str::from_utf8(raw).map_err(|_| LoadError::Malformed {
            origin: origin.to_string(),
            reason: MalformedReason::NotUtf8,
        })?;
        Self::parse_named(raw, origin)
    }

    /// Reads the raw bytes of an index file.
    pub async fn read_raw(path: &Path) -> Result<Vec<u8>, LoadError> {
        tokio::fs::read(path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
    }

    /// Reads and parses an index file.
    pub async fn load_file(path: &Path) -> Result<Self, LoadError> {
        let raw = Self::read_raw(path).await?;
        Self::parse_bytes(&raw, &path.display().to_string())
    }

    pub fn entries(&self) -> &[DocEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<DocEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The wrapper this index was loaded with (`Json` for constructed indexes).
    pub const fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// First entry at exactly `location`.
    pub fn get(&self, location: &str) -> Option<&DocEntry> {
        self.entries.iter().find(|entry| entry.location == location)
    }

    /// All entries at exactly `location`, in index order.
    pub fn at_location<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a DocEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.location == location)
    }

    /// All entries whose title is exactly `title`. Overloaded methods share a title.
    pub fn by_title<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a DocEntry> {
        self.entries.iter().filter(move |entry| entry.title == title)
    }

    pub fn by_category<'a>(
        &'a self,
        category: &'a Category,
    ) -> impl Iterator<Item = &'a DocEntry> {
        self.entries
            .iter()
            .filter(move |entry| &entry.category == category)
    }

    pub fn on_page<'a>(&'a self, page: &'a str) -> impl Iterator<Item = &'a DocEntry> {
        self.entries.iter().filter(move |entry| entry.page == page)
    }

    /// Distinct page names in first-seen order.
    pub fn pages(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|entry| entry.page.as_str())
            .filter(|page| seen.insert(*page))
            .collect()
    }

    pub fn summary(&self) -> IndexSummary {
        let mut by_category = BTreeMap::new();
        for entry in &self.entries {
            *by_category
                .entry(entry.category.as_str().to_string())
                .or_insert(0) += 1;
        }

        let pages = self
            .pages()
            .into_iter()
            .map(|page| (page.to_string(), self.on_page(page).count()))
            .collect();

        IndexSummary {
            entries: self.entries.len(),
            by_category,
            pages,
        }
    }

    /// Serializes as a bare `{"docs":[...]}` document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&DocsDocument {
            docs: &self.entries,
        })
    }

    /// Serializes as a script assignment in the generator's layout:
    /// `var <name> = {"docs":\n[...]\n}\n`.
    pub fn to_script(&self, variable: &ScriptVariable) -> serde_json::Result<String> {
        let docs = serde_json::to_string(&self.entries)?;
        Ok(format!("var {} = {{\"docs\":\n{}\n}}\n", variable, docs))
    }

    pub fn render(&self, envelope: &Envelope) -> serde_json::Result<String> {
        match envelope {
            Envelope::Json => self.to_json(),
            Envelope::Script(variable) => self.to_script(variable),
        }
    }

    /// Writes the index to `path`, creating parent directories if needed.
    /// Returns the number of bytes written.
    pub async fn write_file(&self, path: &Path, envelope: &Envelope) -> crate::error::Result<usize> {
        let content = self
            .render(envelope)
            .context("Failed to serialize search index")?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        tokio::fs::write(path, &content)
            .await
            .with_context(|| format!("Failed to write search index to {}", path.display()))?;
        tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());

        Ok(content.len())
    }
}

/// Validates the top-level shape and converts every entry.
fn entries_from_value(value: Value) -> Result<Vec<DocEntry>, MalformedReason> {
    let Value::Object(mut root) = value else {
        return Err(MalformedReason::RootNotObject);
    };

    let docs = root.remove("docs").ok_or(MalformedReason::MissingDocs)?;
    if let Some(key) = root.keys().next() {
        return Err(MalformedReason::UnexpectedRootKey(key.clone()));
    }

    let Value::Array(items) = docs else {
        return Err(MalformedReason::DocsNotArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| entry_from_value(index, item))
        .collect()
}

fn entry_from_value(index: usize, item: Value) -> Result<DocEntry, MalformedReason> {
    let Value::Object(mut fields) = item else {
        return Err(MalformedReason::EntryNotObject { index });
    };

    let entry = DocEntry {
        location: take_string(&mut fields, index, "location")?,
        page: take_string(&mut fields, index, "page")?,
        title: take_string(&mut fields, index, "title")?,
        text: take_string(&mut fields, index, "text")?,
        category: Category::from(take_string(&mut fields, index, "category")?),
    };

    if let Some(field) = fields.keys().next() {
        return Err(MalformedReason::UnexpectedField {
            index,
            field: field.clone(),
        });
    }

    Ok(entry)
}

fn take_string(
    fields: &mut Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<String, MalformedReason> {
    match fields.remove(field) {
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(MalformedReason::FieldNotString { index, field }),
        None => Err(MalformedReason::MissingField { index, field }),
    }
}
