//! Re-emit the selected index as bare JSON or as a script assignment.

use crate::envelope::{Envelope, ScriptVariable};
use crate::error::Result;
use crate::paths::resolve_user_path;
use crate::state::IndexState;
use anyhow::bail;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Bare {"docs": [...]} document for fetch-based loaders
    Json,
    /// var <name> = {"docs": [...]} for <script> tags
    Script,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportIndexRequest {
    /// Destination file path
    pub path: String,
    pub format: ExportFormat,
    /// Variable name for script output. Defaults to the variable the index was loaded with, then the configured default.
    #[serde(default)]
    pub variable: Option<String>,
}

pub async fn handle_export_index(state: &IndexState, request: ExportIndexRequest) -> Result<String> {
    let (source, index) = state.current().await?;

    let destination = resolve_user_path(&request.path)?;

    if tokio::fs::canonicalize(&destination).await.ok().as_ref() == Some(&source) {
        bail!(
            "Refusing to overwrite the selected index {}; choose another destination",
            source.display()
        );
    }

    let envelope = match request.format {
        ExportFormat::Json => Envelope::Json,
        ExportFormat::Script => {
            let variable = match request.variable {
                Some(name) => ScriptVariable::new(name)?,
                None => index
                    .envelope()
                    .variable()
                    .unwrap_or_else(|| state.default_variable())
                    .clone(),
            };
            Envelope::Script(variable)
        }
    };

    let written = index.write_file(&destination, &envelope).await?;
    tracing::info!(
        "Exported {} entries to {} ({:?})",
        index.len(),
        destination.display(),
        request.format
    );

    Ok(format!(
        "Wrote {} entries ({} bytes) to {}\n",
        index.len(),
        written,
        destination.display()
    ))
}
