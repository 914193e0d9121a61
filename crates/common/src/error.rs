/// RagStore error types
#[derive(Debug, thiserror::Error)]
pub enum RagStoreError {
    /// Record cannot be converted to its storage representation
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Backing table cannot be reached
    #[error("Storage unavailable: {0}")]
    Storage(String),

    /// Stored vector length differs from the expected dimensionality
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Stored metadata blob is malformed
    #[error("Metadata decode error: {0}")]
    MetadataDecode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RagStoreError {
    /// Create encoding error
    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        Self::Encoding(msg.into())
    }

    /// Create storage-unavailable error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Create metadata decode error
    pub fn metadata_decode<S: Into<String>>(msg: S) -> Self {
        Self::MetadataDecode(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error fails the whole call rather than one item.
    ///
    /// Only an unreachable backing table is fatal; everything else is
    /// absorbed per item by batch-style operations.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
