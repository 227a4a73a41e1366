//! Tool request types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request for semantic search over the chunk index
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SemanticSearchRequest {
    /// Your search; returns chunk ids and a small summary of each chunk
    pub query: String,
}

/// Request to resolve chunk ids back to exact source
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetSourceCodeRequest {
    /// Chunk ids, e.g. ["pkg/fs/files.go::File::IsDir", "src/utils.js::af81a7ff"]
    pub ids: Vec<String>,
}

/// Request to reindex the workspace in the background
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct IndexWorkspaceRequest {}

/// Request for the current indexing status
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetIndexStatusRequest {}
