//! MCP server exposing a documentation search index as tools.

use crate::config::ServerConfig;
use crate::discovery::auto_detect_index;
use crate::state::IndexState;
use crate::tools::check_index::handle_check_index;
use crate::tools::export_index::{ExportIndexRequest, handle_export_index};
use crate::tools::get_entry::{GetEntryRequest, handle_get_entry};
use crate::tools::inspect_index::{InspectIndexRequest, handle_inspect_index};
use crate::tools::list_entries::{ListEntriesRequest, handle_list_entries};
use crate::tools::set_index::{SetIndexRequest, handle_set_index};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::path::PathBuf;
use std::sync::Arc;

/// MCP Server for documentation search index queries
#[derive(Clone)]
pub struct IndexServer {
    /// Shared index state (cache, current selection)
    state: Arc<IndexState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for IndexServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexServer")
            .field("state", &self.state)
            .finish()
    }
}

/// Render an error with its context chain for a tool response.
fn tool_error(error: &anyhow::Error) -> String {
    format!("{:#}", error)
}

#[tool_router]
impl IndexServer {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            state: Arc::new(IndexState::from_config(config)),
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the shared IndexState.
    pub fn index_state(&self) -> &Arc<IndexState> {
        &self.state
    }

    /// Select the startup index: the configured path if any, otherwise one
    /// detected from the working directory. Failures are logged, not fatal.
    pub async fn preload(&self, configured: Option<PathBuf>) {
        let path = match configured {
            Some(path) => path,
            None => match auto_detect_index().await {
                Some(path) => path,
                None => {
                    tracing::info!("No search index detected; waiting for set_index");
                    return;
                }
            },
        };

        if let Err(e) = self.state.select(&path).await {
            tracing::warn!("Failed to load search index {}: {:#}", path.display(), e);
        }
    }

    #[tool(
        description = "Select the documentation search index (search_index.js) to query. Accepts a file path or a directory containing the file directly or under build/ or docs/build/."
    )]
    async fn set_index(
        &self,
        Parameters(request): Parameters<SetIndexRequest>,
    ) -> std::result::Result<String, String> {
        handle_set_index(&self.state, request)
            .await
            .map_err(|e| tool_error(&e))
    }

    #[tool(
        description = "Summarize the selected search index: format, entry counts per category and per page. With a page name, lists that page's entries.",
        input_schema = inline_schema_for_type::<InspectIndexRequest>()
    )]
    async fn inspect_index(
        &self,
        Parameters(request): Parameters<InspectIndexRequest>,
    ) -> std::result::Result<String, String> {
        handle_inspect_index(&self.state, request)
            .await
            .map_err(|e| tool_error(&e))
    }

    #[tool(
        description = "List index entries in generation order, optionally filtered by exact page name and category (section, page, type, function, method). Paged with offset and limit.",
        input_schema = inline_schema_for_type::<ListEntriesRequest>()
    )]
    async fn list_entries(
        &self,
        Parameters(request): Parameters<ListEntriesRequest>,
    ) -> std::result::Result<String, String> {
        handle_list_entries(&self.state, request)
            .await
            .map_err(|e| tool_error(&e))
    }

    #[tool(
        description = "Show the full text of entries by exact location (e.g. 'api/#Pkg.Symbol') or exact title. A title returns every overload.",
        input_schema = inline_schema_for_type::<GetEntryRequest>()
    )]
    async fn get_entry(
        &self,
        Parameters(request): Parameters<GetEntryRequest>,
    ) -> std::result::Result<String, String> {
        handle_get_entry(&self.state, request)
            .await
            .map_err(|e| tool_error(&e))
    }

    #[tool(
        description = "Check the selected index for consistency problems: section headers with text, symbols without text, duplicate symbol locations, empty page names, unrecognized categories."
    )]
    async fn check_index(&self) -> std::result::Result<String, String> {
        handle_check_index(&self.state)
            .await
            .map_err(|e| tool_error(&e))
    }

    #[tool(
        description = "Write the selected index to a file, either as a bare JSON document or as a script assignment (var name = {...}).",
        input_schema = inline_schema_for_type::<ExportIndexRequest>()
    )]
    async fn export_index(
        &self,
        Parameters(request): Parameters<ExportIndexRequest>,
    ) -> std::result::Result<String, String> {
        handle_export_index(&self.state, request)
            .await
            .map_err(|e| tool_error(&e))
    }
}

#[tool_handler]
impl ServerHandler for IndexServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "documenter-search-mcp: browse the search index of a generated documentation site. \
                 An index is detected from the working directory on startup when possible. \
                 Use set_index to select one explicitly, then inspect_index, list_entries and get_entry."
                    .to_string(),
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Sets `inline_subschemas = true` so category and format enums appear inline
/// instead of as `$ref` definitions, which MCP clients render as dropdowns.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let json_object = match object {
        serde_json::Value::Object(object) => object,
        _ => panic!("Schema serialization produced non-object value"),
    };

    Arc::new(json_object)
}
