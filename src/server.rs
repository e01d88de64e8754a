//! MCP Server implementation using rmcp

use crate::error::{self, ErrorKind};
use crate::pdf::{PdfiumExtractor, TextExtractor};
use crate::prompt::{render_feedback, render_rulebook_summary};
use crate::source::{DocumentRef, Resolver};
use crate::tools::{Arguments, GenerateFeedbackParams, SummarizeBgParams, ToolCall};
use rmcp::{model::*, service::RequestContext, RoleServer, ServerHandler, ServiceExt};
use schemars::JsonSchema;
use std::sync::Arc;
use std::time::Duration;

/// Resource configuration for the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum download size in bytes for URL sources (default: unlimited)
    pub max_download_bytes: Option<u64>,
    /// Timeout for a whole HTTP request (default: none)
    pub request_timeout: Option<Duration>,
    /// Honor HTTP(S)_PROXY environment variables (default: true)
    pub use_system_proxy: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_download_bytes: None,
            request_timeout: None,
            use_system_proxy: true,
        }
    }
}

/// mcp-kvn server
#[derive(Clone)]
pub struct KvnServer {
    resolver: Resolver,
    extractor: Arc<dyn TextExtractor>,
}

impl KvnServer {
    pub fn new() -> error::Result<Self> {
        Self::with_config(ServerConfig::default())
    }

    /// Create a server using PDFium for extraction
    pub fn with_config(config: ServerConfig) -> error::Result<Self> {
        Self::with_extractor(config, Arc::new(PdfiumExtractor))
    }

    /// Create a server with a custom text extractor
    pub fn with_extractor(
        config: ServerConfig,
        extractor: Arc<dyn TextExtractor>,
    ) -> error::Result<Self> {
        Ok(Self {
            resolver: Resolver::new(&config)?,
            extractor,
        })
    }

    /// Tool descriptors advertised by `tools/list`
    pub fn tool_definitions() -> error::Result<Vec<Tool>> {
        Ok(vec![
            Tool::new(
                ToolCall::SUMMARIZE_BG,
                "Summarize a board game rulebook PDF from local file or URL",
                input_schema::<SummarizeBgParams>()?,
            ),
            Tool::new(
                ToolCall::GENERATE_FEEDBACK,
                "Generate a peer feedback writeup from notes about a person",
                input_schema::<GenerateFeedbackParams>()?,
            ),
        ])
    }

    /// Decode and run a raw tool request, mapping failures to MCP results.
    ///
    /// Argument and unknown-tool errors become JSON-RPC `invalid_params`
    /// errors. Fetch and decode errors become a tool result flagged as an
    /// error.
    pub async fn handle_call(
        &self,
        name: &str,
        arguments: Option<Arguments>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let outcome = match ToolCall::parse(name, arguments) {
            Ok(call) => self.dispatch(call).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "tool call failed");
                match e.kind() {
                    ErrorKind::Argument | ErrorKind::UnknownTool => {
                        Err(ErrorData::invalid_params(e.client_message(), None))
                    }
                    ErrorKind::Fetch | ErrorKind::Decode => {
                        Ok(CallToolResult::error(vec![Content::text(e.client_message())]))
                    }
                    ErrorKind::Internal => Err(ErrorData::internal_error(e.client_message(), None)),
                }
            }
        }
    }

    /// Run a decoded tool call and return the rendered prompt
    pub async fn dispatch(&self, call: ToolCall) -> error::Result<String> {
        tracing::debug!(tool = call.name(), "dispatching tool call");

        match call {
            ToolCall::SummarizeBg(params) => self.summarize_bg(&params).await,
            ToolCall::GenerateFeedback(params) => Ok(Self::generate_feedback(&params)),
        }
    }

    async fn summarize_bg(&self, params: &SummarizeBgParams) -> error::Result<String> {
        let reference = DocumentRef::parse(&params.file)?;
        tracing::debug!(source = %reference.display_name(), "resolving rulebook");

        let resolved = self.resolver.resolve(&reference).await?;
        let source_name = resolved.source_name;

        // Move CPU-heavy PDF work to blocking thread pool
        let data = resolved.data;
        let extractor = Arc::clone(&self.extractor);
        let text = tokio::task::spawn_blocking(move || extractor.extract_text(&data))
            .await
            .map_err(|e| error::Error::Pdfium {
                reason: format!("Task join error: {}", e),
            })??;

        tracing::info!(source = %source_name, chars = text.len(), "rulebook text extracted");

        Ok(render_rulebook_summary(&text))
    }

    fn generate_feedback(params: &GenerateFeedbackParams) -> String {
        render_feedback(&params.name, &params.description)
    }
}

fn input_schema<T: JsonSchema>() -> error::Result<Arc<JsonObject>> {
    let schema = serde_json::to_value(schemars::schema_for!(T))?;
    let mut object: JsonObject = serde_json::from_value(schema)?;
    object.remove("$schema");
    Ok(Arc::new(object))
}

impl ServerHandler for KvnServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "mcp-kvn turns documents into prompts. `summarize-bg` extracts a board game \
                 rulebook PDF (path or http(s) URL) into a Setup/Guide summary prompt; \
                 `generate-feedback` turns notes about a person into a peer feedback prompt."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, ErrorData> {
        let tools = Self::tool_definitions().map_err(|e| {
            tracing::warn!(error = %e, "failed to build tool schemas");
            ErrorData::internal_error(e.client_message(), None)
        })?;

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
            meta: Default::default(),
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        self.handle_call(&request.name, request.arguments).await
    }
}

/// Run the MCP server with default configuration
pub async fn run_server() -> anyhow::Result<()> {
    run_server_with_config(ServerConfig::default()).await
}

/// Run the MCP server with full configuration
pub async fn run_server_with_config(config: ServerConfig) -> anyhow::Result<()> {
    let server = KvnServer::with_config(config)?;

    tracing::info!("mcp-kvn ready, waiting for connections...");

    let service = server.serve(rmcp::transport::io::stdio()).await?;
    service.waiting().await?;

    Ok(())
}
