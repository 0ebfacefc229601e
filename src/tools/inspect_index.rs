//! Index overview, optionally narrowed to one page.

use crate::error::Result;
use crate::state::IndexState;
use crate::tools::format::{entry_line, format_summary};
use anyhow::bail;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InspectIndexRequest {
    /// Page name to list (e.g. "API", "Home"). Omit for an overview of the whole index.
    #[serde(default)]
    pub page: Option<String>,
}

pub async fn handle_inspect_index(state: &IndexState, request: InspectIndexRequest) -> Result<String> {
    let (path, index) = state.current().await?;

    let Some(page) = request.page else {
        return Ok(format_summary(&path, &index));
    };

    let entries: Vec<_> = index
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.page == page)
        .collect();

    if entries.is_empty() {
        bail!(
            "Page '{}' not found. Available pages: {}",
            page,
            index.pages().join(", ")
        );
    }

    let mut output = format!("Page '{}' ({} entries):\n\n", page, entries.len());
    for (position, entry) in entries {
        let _ = writeln!(output, "{}", entry_line(position, entry));
    }
    Ok(output)
}
