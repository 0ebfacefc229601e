//! Paged entry listing filtered by page and category.

use crate::entry::Category;
use crate::error::Result;
use crate::state::IndexState;
use crate::tools::format::entry_line;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 500;

/// Entry kinds emitted by the documentation generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// Section headers
    Section,
    /// Page prose and page-level blocks
    Page,
    Type,
    Function,
    Method,
}

impl From<CategoryFilter> for Category {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::Section => Self::Section,
            CategoryFilter::Page => Self::Page,
            CategoryFilter::Type => Self::Type,
            CategoryFilter::Function => Self::Function,
            CategoryFilter::Method => Self::Method,
        }
    }
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListEntriesRequest {
    /// Only entries on this page (exact page name)
    #[serde(default)]
    pub page: Option<String>,
    /// Only entries of this category
    #[serde(default)]
    pub category: Option<CategoryFilter>,
    /// Number of matching entries to skip (default: 0)
    #[serde(default)]
    pub offset: Option<usize>,
    /// Maximum number of entries to return (default: 50, max: 500)
    #[serde(default)]
    pub limit: Option<usize>,
}

pub async fn handle_list_entries(state: &IndexState, request: ListEntriesRequest) -> Result<String> {
    let (_, index) = state.current().await?;
    let category = request.category.map(Category::from);

    let matching: Vec<_> = index
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| request.page.as_ref().is_none_or(|page| &entry.page == page))
        .filter(|(_, entry)| category.as_ref().is_none_or(|c| &entry.category == c))
        .collect();

    if matching.is_empty() {
        return Ok("No entries match the given filters.\n".to_string());
    }

    let offset = request.offset.unwrap_or(0);
    let limit = request.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let total = matching.len();

    if offset >= total {
        return Ok(format!(
            "Offset {} is past the end ({} matching entries).\n",
            offset, total
        ));
    }

    let end = (offset + limit).min(total);
    let mut output = format!("Entries {}-{} of {} matching:\n\n", offset + 1, end, total);
    for (position, entry) in &matching[offset..end] {
        let _ = writeln!(output, "{}", entry_line(*position, entry));
    }

    if end < total {
        let _ = writeln!(
            output,
            "\n... {} more (use offset {} to continue)",
            total - end,
            end
        );
    }

    Ok(output)
}
