//! Load, check and re-emit the search index of a generated documentation site.
//!
//! The index is a flat table of [`DocEntry`] records wrapped in
//! `{"docs": [...]}`, optionally assigned to a script variable. Loading is
//! strict and all-or-nothing; see [`SearchIndex::parse`]. The [`server`]
//! module exposes a loaded index over MCP.

pub mod check;
pub mod config;
pub mod discovery;
pub mod entry;
pub mod envelope;
pub mod error;
pub mod index;
pub mod logging;
pub mod paths;
pub mod server;
pub mod state;
mod strict;
pub mod tools;

pub use check::{Finding, FindingKind, check};
pub use config::ServerConfig;
pub use entry::{Category, DocEntry};
pub use envelope::{DEFAULT_VARIABLE, Envelope, ScriptVariable};
pub use error::{InvalidVariableName, LoadError, MalformedReason};
pub use index::{IndexSummary, SearchIndex};
pub use server::IndexServer;
pub use state::IndexState;
