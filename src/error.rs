/// Centralized error types for sourcerer using thiserror
///
/// Provides domain-specific error types for better error handling and user-facing messages.
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SourcererError>;

/// Main error type for the indexing service
#[derive(Error, Debug)]
pub enum SourcererError {
    #[error("Chunking error: {0}")]
    Chunk(#[from] ChunkError),

    #[error("Vector store error: {0}")]
    Store(#[from] StoreError),

    #[error("Chunk not found: {0}")]
    NotFound(String),

    #[error("Invalid chunk id: {0}")]
    InvalidId(String),

    #[error("Unsupported file: {0}")]
    UnsupportedFile(String),

    #[error("Operation was cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors related to parsing and chunk extraction
#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("couldn't parse {0}")]
    ParseFailed(String),

    #[error("query returned no usable capture: {0}")]
    QueryFailed(String),

    #[error("language spec error: {0}")]
    InvalidSpec(String),

    #[error("file {0} is marked as ignore")]
    IgnoredFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to the vector store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to open vector store: {0}")]
    OpenFailed(String),

    #[error("failed to add documents to vector store: {0}")]
    AddFailed(String),

    #[error("failed to delete documents from vector store: {0}")]
    DeleteFailed(String),

    #[error("failed to perform similarity search: {0}")]
    SearchFailed(String),

    #[error("failed to persist vector store: {0}")]
    PersistFailed(String),
}

// Conversion from anyhow::Error for application seams
impl From<anyhow::Error> for SourcererError {
    fn from(err: anyhow::Error) -> Self {
        SourcererError::Other(format!("{:#}", err))
    }
}

impl SourcererError {
    /// Convert to a single-line message suitable for MCP error results
    pub fn to_user_string(&self) -> String {
        format!("{}", self)
    }
}
