//! Shared test fixtures and utilities for integration tests.
//!
//! # Test Isolation Strategy
//!
//! Each test gets its own temporary directory and its own `IndexState`, so the
//! LRU cache starts cold and tests can run in parallel.
//!
//! # Available Fixtures
//!
//! - `fixture_index`: the shipped `search_index.js` parsed in memory
//! - `isolated_index`: a temp directory holding a copy of the fixture, selected
//!   in a fresh `IndexState` (requires a multi-thread runtime)

use documenter_search_mcp::{IndexState, ScriptVariable, SearchIndex};
use rstest::fixture;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Number of entries in the shipped fixture.
#[allow(dead_code)]
pub const FIXTURE_ENTRIES: usize = 84;

/// Returns the project root directory (where Cargo.toml lives).
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Path of the shipped search index fixture.
pub fn fixture_path() -> PathBuf {
    project_root().join("tests/fixtures/search_index.js")
}

/// Raw contents of the shipped search index fixture.
pub fn fixture_raw() -> String {
    std::fs::read_to_string(fixture_path()).expect("Failed to read search_index.js fixture")
}

/// A temporary directory for test isolation, removed when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a directory (and all parent directories) within this workspace.
    pub fn create_dir(&self, path: &str) {
        let full_path = self.root.join(path);
        std::fs::create_dir_all(&full_path)
            .unwrap_or_else(|e| panic!("Failed to create directory '{}': {}", path, e));
    }

    /// Creates a file with the given content, creating parent directories as needed.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Copies the shipped fixture to `dest_relative` and returns its full path.
    pub fn copy_fixture(&self, dest_relative: &str) -> PathBuf {
        let content = fixture_raw();
        self.create_file(dest_relative, &content);
        self.root.join(dest_relative)
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// A temp directory with a copy of the fixture, selected in a fresh state.
#[allow(dead_code)] // Fields used across different integration test crates
pub struct IsolatedIndex {
    pub workspace: TempWorkspace,
    pub index_path: PathBuf,
    pub state: Arc<IndexState>,
}

#[allow(dead_code)]
impl IsolatedIndex {
    pub fn new() -> Self {
        documenter_search_mcp::logging::init();

        let workspace = TempWorkspace::new();
        let index_path = workspace.copy_fixture("docs/build/search_index.js");
        let state = Arc::new(IndexState::new(
            NonZeroUsize::new(4).unwrap(),
            ScriptVariable::default(),
        ));

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                state
                    .select(&index_path)
                    .await
                    .expect("Failed to select fixture index");
            });
        });

        Self {
            workspace,
            index_path,
            state,
        }
    }

    pub fn root(&self) -> &Path {
        self.workspace.path()
    }
}

/// The shipped fixture parsed in memory.
#[fixture]
pub fn fixture_index() -> SearchIndex {
    SearchIndex::parse(&fixture_raw()).expect("fixture must load")
}

/// A fresh state with the fixture selected. Use with `flavor = "multi_thread"`.
#[fixture]
pub fn isolated_index() -> IsolatedIndex {
    IsolatedIndex::new()
}

/// An empty state with nothing selected.
#[allow(dead_code)]
#[fixture]
pub fn empty_state() -> Arc<IndexState> {
    Arc::new(IndexState::new(
        NonZeroUsize::new(4).unwrap(),
        ScriptVariable::default(),
    ))
}
