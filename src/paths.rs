//! Path handling for user-supplied paths.

use crate::error::Result;
use anyhow::Context;
use std::borrow::Cow;
use std::path::PathBuf;

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
///
/// Returns `Cow::Borrowed` if no expansion needed, `Cow::Owned` if expanded.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

/// Trims and tilde-expands `raw`, anchoring relative paths at the working directory.
pub fn resolve_user_path(raw: &str) -> Result<PathBuf> {
    let expanded = expand_tilde(raw.trim());
    let path = PathBuf::from(expanded.as_ref());

    if path.is_relative() {
        return Ok(std::env::current_dir()
            .context("Failed to get current working directory")?
            .join(path));
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_expand_tilde_leaves_other_paths() {
        check!(expand_tilde("/abs/search_index.js") == "/abs/search_index.js");
        check!(expand_tilde("docs/build") == "docs/build");
        check!(expand_tilde("a~/b") == "a~/b");
    }

    #[test]
    fn test_expand_tilde_home() {
        if let Some(home) = dirs::home_dir() {
            check!(expand_tilde("~") == home.display().to_string());
            check!(expand_tilde("~/docs") == home.join("docs").display().to_string());
        }
    }

    #[test]
    fn test_resolve_user_path() {
        check!(resolve_user_path(" /srv/site/search_index.js ").unwrap() == PathBuf::from("/srv/site/search_index.js"));

        let cwd = std::env::current_dir().unwrap();
        check!(resolve_user_path("docs/build").unwrap() == cwd.join("docs/build"));
    }
}
