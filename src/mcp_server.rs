//! MCP protocol server
//!
//! Thin wrapper around [`Analyzer`] exposing the four navigation tools
//! over stdio JSON-RPC.

use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{Context, Result};
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};

use crate::analyzer::Analyzer;
use crate::config::Config;
use crate::embedding::FastEmbedManager;
use crate::types::*;

const INSTRUCTIONS: &str = r#"
You have access to Sourcerer tools for efficient codebase navigation.
Sourcerer provides surgical precision - you can jump directly to specific functions,
classes, and code chunks without reading entire files or burning tokens on broad exploration.

SEARCH STRATEGY:
Sourcerer's semantic search understands concepts and relationships.
Describe what you're looking for conceptually and functionally:

Good queries:
- "user authentication and session management logic"
- "error handling and exception processing code"
- "file parsing and syntax analysis functionality"
- "database operations and data persistence"
- "configuration loading and environment setup"

Effective approaches:
- Describe the purpose/behavior you're seeking
- Use natural language to explain the concept
- Include context about what the code should accomplish

CHUNK IDs:
Chunks use stable addressing: path/to/file.ext::ClassName::methodName
- Classes: src/auth.js::AuthService
- Functions: src/auth.js::AuthService::login
- Top-level: src/utils.js::validateEmail
- Unnamed chunks, like imports: src/utils.js::af81a7ff

This addressing is persistent and won't break with minor code changes.
Use get_source_code with these precise ids to get exactly the code you need.

BATCHING:
Prefer batched operations - when you need multiple related chunks, collect the
chunk ids first then batch them in a single get_source_code call.
This is better than making separate requests which waste tokens and time.
"#;

/// MCP server exposing the workspace index
#[derive(Clone)]
pub struct SourcererServer {
    analyzer: Arc<Analyzer>,
    tool_router: ToolRouter<Self>,
}

impl SourcererServer {
    /// Create a server from the environment configuration
    pub fn new() -> Result<Self> {
        let config = Config::from_env();
        tracing::info!("Workspace root: {}", config.workspace_root.display());

        let embedder = Arc::new(
            FastEmbedManager::new().context("Failed to initialize embedding provider")?,
        );
        let analyzer = Analyzer::new(config.workspace_root, embedder)
            .context("Failed to create analyzer")?;

        Ok(Self::with_analyzer(analyzer))
    }

    /// Wrap an existing analyzer
    pub fn with_analyzer(analyzer: Arc<Analyzer>) -> Self {
        Self {
            analyzer,
            tool_router: Self::tool_router(),
        }
    }

    /// Serve over stdio until the client disconnects
    pub async fn serve_stdio() -> Result<()> {
        tracing::info!("Starting Sourcerer MCP server");

        let server = Self::new().context("Failed to create MCP server")?;
        let analyzer = Arc::clone(&server.analyzer);

        let transport = rmcp::transport::io::stdio();
        server.serve(transport).await?.waiting().await?;

        analyzer.close();
        Ok(())
    }
}

#[tool_router(router = tool_router)]
impl SourcererServer {
    #[tool(description = "Find relevant code using semantic understanding")]
    async fn semantic_search(
        &self,
        Parameters(req): Parameters<SemanticSearchRequest>,
    ) -> Result<String, String> {
        let cancel = self.analyzer.cancellation_token().child_token();
        let results = self
            .analyzer
            .semantic_search(&req.query, &cancel)
            .await
            .map_err(|e| e.to_user_string())?;

        if results.is_empty() {
            return Ok("No matching chunks found.".to_string());
        }
        Ok(results.join("\n"))
    }

    #[tool(description = "Get the actual code you need to examine/modify")]
    async fn get_source_code(
        &self,
        Parameters(req): Parameters<GetSourceCodeRequest>,
    ) -> Result<String, String> {
        let cancel = self.analyzer.cancellation_token().child_token();
        Ok(self.analyzer.get_chunk_sources(&req.ids, &cancel).await)
    }

    #[tool(description = "Reindex the workspace in the background")]
    async fn index_workspace(
        &self,
        Parameters(_req): Parameters<IndexWorkspaceRequest>,
    ) -> Result<String, String> {
        let analyzer = Arc::clone(&self.analyzer);
        tokio::spawn(async move {
            let cancel = analyzer.cancellation_token().clone();
            analyzer.index_workspace(&cancel).await;
        });

        Ok("Indexing in progress...".to_string())
    }

    #[tool(description = "Report how many files are waiting to be indexed")]
    async fn get_index_status(
        &self,
        Parameters(_req): Parameters<GetIndexStatusRequest>,
    ) -> Result<String, String> {
        let (pending, last_indexed) = self.analyzer.get_index_status();
        Ok(format_index_status(pending, last_indexed))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for SourcererServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "sourcerer".into(),
                title: Some("Sourcerer - Semantic Codebase Navigation".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}

fn format_index_status(pending: usize, last_indexed: Option<SystemTime>) -> String {
    let when = match last_indexed {
        Some(time) => chrono::DateTime::<chrono::Local>::from(time)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "in progress".to_string(),
    };

    format!("Number of pending files: {pending}, last indexed: {when}")
}
