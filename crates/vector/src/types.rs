use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Open metadata mapping carried with each record
///
/// The store never inspects it except to pass it through.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// One content chunk with its embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Record ID (generated at add when absent)
    pub id: Option<String>,

    /// Text payload
    pub content: String,

    /// Embedding, fixed dimensionality per store
    pub vector: Vec<f32>,

    /// Grouping key, typically the originating document
    ///
    /// Denormalized copy of the metadata `source` entry; the store does not
    /// keep the two in sync.
    #[serde(default)]
    pub source: String,

    /// Page number within the source
    #[serde(default)]
    pub page: u32,

    /// Caller metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl VectorRecord {
    /// Create a record with defaults for everything but content and vector
    pub fn new(content: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: None,
            content: content.into(),
            vector,
            source: String::new(),
            page: 0,
            metadata: Metadata::new(),
        }
    }

    /// Set an explicit id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the grouping key
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the metadata mapping
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Search result unit: content plus pass-through metadata
///
/// Internal attributes (id, vector, source, page) stay inside the store
/// unless the caller surfaced them through metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Text payload
    pub content: String,

    /// Metadata as stored
    pub metadata: Metadata,
}

/// Table statistics
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    /// Total stored records
    pub total: usize,

    /// Record count per source
    pub per_source: BTreeMap<String, usize>,
}
