use crate::discovery::find_in_dir;
use crate::error::Result;
use crate::paths::resolve_user_path;
use crate::state::IndexState;
use crate::tools::format::format_summary;
use anyhow::{Context, anyhow};
use rmcp::schemars;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Parameters for set_index tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetIndexRequest {
    /// Path to a search_index.js file, or a directory containing one (directly or under build/ or docs/build/)
    pub path: String,
}

/// Load a search index and make it the current selection.
pub async fn handle_set_index(state: &IndexState, request: SetIndexRequest) -> Result<String> {
    let path = resolve_index_path(&request.path)?;
    let previous = state.current_path().await;

    let (canonical, index) = state
        .select(&path)
        .await
        .with_context(|| format!("Failed to load search index from '{}'", request.path))?;

    let changed = previous.as_deref() != Some(canonical.as_path());
    Ok(format_response(&canonical, &index, previous.as_deref(), changed))
}

/// Expands `~`, anchors relative paths at the working directory and resolves
/// directories to the index file inside them. Parent directories are not searched.
pub fn resolve_index_path(raw: &str) -> Result<PathBuf> {
    let path = resolve_user_path(raw)?;

    if path.is_dir() {
        return find_in_dir(&path).ok_or_else(|| {
            anyhow!(
                "No search_index.js found in {} or its build/ and docs/build/ directories",
                path.display()
            )
        });
    }

    Ok(path)
}

/// Format a user-friendly response showing which index is now selected.
pub fn format_response(
    path: &Path,
    index: &crate::index::SearchIndex,
    previous: Option<&Path>,
    changed: bool,
) -> String {
    let mut response = if changed {
        format!("Search index set: {}\n", path.display())
    } else {
        format!("Search index reloaded: {}\n", path.display())
    };

    if changed && let Some(previous) = previous {
        response.push_str(&format!("Previously: {}\n", previous.display()));
    }

    response.push('\n');
    response.push_str(&format_summary(path, index));
    response
}
