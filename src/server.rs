//! Core MCP server implementation for mcp-bauplan.

use rmcp::{
    handler::server::wrapper::Parameters, model::*, tool, tool_handler, tool_router,
    transport::stdio, ErrorData as McpError, ServerHandler, ServiceExt,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::query::QueryExecutor;
use crate::tools::{self, GetSchemaParams, ListTablesParams, RunQueryParams};

/// Name the server reports in logs.
pub const SERVER_NAME: &str = "mcp-bauplan";

/// Error type for MCP server operations.
#[derive(Error, Debug)]
pub enum ServerError {
    /// MCP protocol or transport error
    #[error("MCP error: {0}")]
    Mcp(String),
}

/// MCP server exposing Bauplan tables, schemas and queries as tools.
#[derive(Clone)]
pub struct BauplanMcpServer {
    executor: QueryExecutor,
    read_only: bool,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<BauplanMcpServer>,
}

#[tool_router]
impl BauplanMcpServer {
    /// Create a new MCP server around the given executor.
    pub fn new(executor: QueryExecutor, server_config: &ServerConfig) -> Self {
        debug!(
            "Creating MCP server: branch={}, namespace={}, read_only={}",
            executor.config().branch,
            executor.config().namespace,
            server_config.read_only
        );

        Self {
            executor,
            read_only: server_config.read_only,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "List all tables in the configured Bauplan namespace. \
        Returns a JSON envelope whose 'data' holds one row per table with a 'table_name' column. \
        Pass 'namespace' to list another namespace. Use 'get_schema' to inspect a table's columns."
    )]
    async fn list_tables(
        &self,
        Parameters(params): Parameters<ListTablesParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: list_tables, namespace={:?}", params.namespace);
        Ok(tools::list_tables::execute(&self.executor, &params).await)
    }

    #[tool(description = "Get the schema of a Bauplan table. \
        Provide the table name (e.g., 'titanic'), optionally qualified with a namespace ('tpch.orders'). \
        Returns one row per column with 'column_name' and 'data_type', in column order. \
        Use 'list_tables' first to discover table names.")]
    async fn get_schema(
        &self,
        Parameters(params): Parameters<GetSchemaParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: get_schema, table={}", params.table);
        Ok(tools::get_schema::execute(&self.executor, &params).await)
    }

    #[tool(
        description = "Run a read-only SQL SELECT query on the configured Bauplan branch. \
        Returns a JSON envelope: 'status' ('success' or 'error'), 'data' (one object per row), \
        'metadata' (row_count, column_names, column_types, query_time, query) and 'error'. \
        Use 'get_schema' to check column names before querying, and add LIMIT for large tables."
    )]
    async fn run_query(
        &self,
        Parameters(params): Parameters<RunQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Tool: run_query, query={}", params.query);
        Ok(tools::run_query::execute(&self.executor, &params, self.read_only).await)
    }

    /// Serve MCP over stdio (stdin/stdout).
    ///
    /// This method blocks until the connection is closed.
    pub async fn serve_stdio(self) -> Result<(), ServerError> {
        info!("Starting {} on stdio", SERVER_NAME);
        let service = self
            .serve(stdio())
            .await
            .map_err(|e| ServerError::Mcp(format!("Failed to start server: {}", e)))?;
        service
            .waiting()
            .await
            .map_err(|e| ServerError::Mcp(format!("Server error: {}", e)))?;
        info!("Client disconnected, shutting down");
        Ok(())
    }
}

#[tool_handler]
impl ServerHandler for BauplanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Bauplan MCP server (branch '{}', namespace '{}'). \
                 Use list_tables to discover tables, get_schema to inspect columns, \
                 and run_query to run SELECT statements. Every tool answers with a JSON envelope.",
                self.executor.config().branch,
                self.executor.config().namespace
            )),
        }
    }
}
