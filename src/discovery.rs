//! Automatic index discovery for server startup.
//!
//! Looks for the generator's output file in the usual build directories,
//! starting at the process's working directory and walking up a bounded number
//! of parents.

use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name the documentation generator writes the index to.
pub const INDEX_FILE_NAME: &str = "search_index.js";

/// Directories (relative to each searched directory) checked in order.
const CANDIDATE_DIRS: [&str; 3] = ["", "build", "docs/build"];

/// How many parent directories above the start are searched.
const MAX_PARENT_DEPTH: usize = 2;

/// Detects an index file starting from the current working directory.
///
/// Returns the canonicalized path, or None if nothing was found.
pub async fn auto_detect_index() -> Option<PathBuf> {
    let cwd = match env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            debug!("Failed to get current working directory: {}", e);
            return None;
        }
    };

    debug!("Starting index auto-detection from: {}", cwd.display());
    let found = find_index_file(&cwd)?;

    match tokio::fs::canonicalize(&found).await {
        Ok(canonical) => {
            info!("✓ Auto-detected search index: {}", canonical.display());
            Some(canonical)
        }
        Err(e) => {
            warn!(
                "Found search index at {} but canonicalization failed: {}",
                found.display(),
                e
            );
            None
        }
    }
}

/// Finds `search_index.js` directly in `dir`, `dir/build` or `dir/docs/build`.
/// Parent directories are not searched.
pub fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    CANDIDATE_DIRS
        .iter()
        .map(|candidate| {
            if candidate.is_empty() {
                dir.join(INDEX_FILE_NAME)
            } else {
                dir.join(candidate).join(INDEX_FILE_NAME)
            }
        })
        .find(|path| path.is_file())
}

/// Like [`find_in_dir`], then retried in up to two parent directories.
pub fn find_index_file(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    for depth in 0..=MAX_PARENT_DEPTH {
        let dir = current?;

        if let Some(path) = find_in_dir(dir) {
            debug!("Found search index at: {} (depth {})", path.display(), depth);
            return Some(path);
        }

        current = dir.parent();
    }

    debug!(
        "No {} found within {} directories of {}",
        INDEX_FILE_NAME,
        MAX_PARENT_DEPTH,
        start.display()
    );
    None
}
