//! Server configuration read from the environment at startup.

use crate::envelope::ScriptVariable;
use crate::paths::expand_tilde;
use anyhow::Context;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Path of the index to load on startup. Auto-detected when unset.
pub const INDEX_PATH_VAR: &str = "DOCUMENTER_SEARCH_INDEX";
/// Maximum number of parsed indexes kept in memory.
pub const CACHE_CAPACITY_VAR: &str = "DOCUMENTER_SEARCH_CACHE";
/// Default variable name for script exports.
pub const VARIABLE_VAR: &str = "DOCUMENTER_SEARCH_VARIABLE";

const DEFAULT_CACHE_CAPACITY: NonZeroUsize = NonZeroUsize::new(16).unwrap();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub index_path: Option<PathBuf>,
    pub cache_capacity: NonZeroUsize,
    pub variable: ScriptVariable,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            index_path: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            variable: ScriptVariable::default(),
        }
    }
}

impl ServerConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> crate::error::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> crate::error::Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(INDEX_PATH_VAR) {
            config.index_path = Some(PathBuf::from(expand_tilde(&path).as_ref()));
        }

        if let Some(capacity) = get(CACHE_CAPACITY_VAR) {
            config.cache_capacity = capacity
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive integer, got '{}'", CACHE_CAPACITY_VAR, capacity))?;
        }

        if let Some(variable) = get(VARIABLE_VAR) {
            config.variable = ScriptVariable::new(variable.trim())
                .with_context(|| format!("Invalid {}", VARIABLE_VAR))?;
        }

        Ok(config)
    }
}
