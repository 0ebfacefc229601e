use documenter_search_mcp::{IndexServer, ServerConfig, logging};
use rmcp::{ServiceExt, transport::stdio};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = ServerConfig::from_env()?;
    tracing::info!("Starting documenter-search-mcp MCP server");

    let server = IndexServer::new(&config);
    server.preload(config.index_path.clone()).await;

    // Serve over stdio
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;

    Ok(())
}
