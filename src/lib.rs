//! # Sourcerer - Semantic Codebase Navigation
//!
//! A local indexing service that lets an AI coding assistant navigate
//! a large source repository by conceptual meaning rather than by file
//! reading. The workspace is continuously parsed into *chunks* (named
//! syntactic units such as functions, methods, classes, and Markdown
//! sections), embedded into a persistent vector collection, and served
//! over an MCP stdio server.
//!
//! ## Architecture
//!
//! - **[`chunker`]**: tree-sitter extraction of path-addressed chunks
//!   with per-language specs (Go, Python, JavaScript, TypeScript,
//!   Markdown)
//! - **[`index`]**: freshness-aware adapter between parsed files and
//!   the vector store; stale results never reach a caller
//! - **[`store`]**: embedded persistent `{id, content, metadata,
//!   embedding}` collection under `.sourcerer/db/`
//! - **[`fs`]**: git-aware ignore filter, workspace walk, and the
//!   debounced filesystem watcher
//! - **[`analyzer`]**: orchestrator wiring walker, watcher, chunkers,
//!   and index together
//! - **[`mcp_server`]**: the stdio JSON-RPC tool surface
//!
//! ## Chunk addressing
//!
//! Every chunk has a stable id `file::path`, where `path` is a
//! `::`-separated in-file address (`Service::Count`) or a content hash
//! for unnamed regions. Ids survive unrelated edits and change only
//! when the addressed code itself moves or is renamed.
//!
//! ## Library usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use sourcerer::{Analyzer, embedding::FastEmbedManager};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let embedder = Arc::new(FastEmbedManager::new()?);
//!     let analyzer = Analyzer::new(".", embedder)?;
//!
//!     let cancel = CancellationToken::new();
//!     analyzer.index_workspace(&cancel).await;
//!
//!     for line in analyzer.semantic_search("session handling", &cancel).await? {
//!         println!("{line}");
//!     }
//!     Ok(())
//! }
//! ```

/// Workspace orchestration: walking, watching, searching, resolving
pub mod analyzer;

/// Structural chunking with per-language tree-sitter specs
pub mod chunker;

/// Environment configuration
pub mod config;

/// Embedding providers (fastembed and a deterministic mock)
pub mod embedding;

/// Error types and utilities
pub mod error;

/// Ignore filtering, workspace walking, and the debounced watcher
pub mod fs;

/// Freshness cache and typed retrieval over the vector store
pub mod index;

/// MCP stdio server
pub mod mcp_server;

/// Embedded persistent vector collection
pub mod store;

/// Tool request types
pub mod types;

pub use analyzer::Analyzer;
pub use chunker::{Chunk, Chunker, FileType, Language, SourceFile};
pub use config::Config;
pub use error::{Result, SourcererError};
pub use index::Index;
pub use mcp_server::SourcererServer;
