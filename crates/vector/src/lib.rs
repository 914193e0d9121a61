//! RagStore Vector Core
//!
//! Embedding persistence and brute-force similarity search over a backing
//! table. The scan-and-score path is O(n) in stored records; the store
//! targets correctness for small-to-medium collections, not indexed
//! retrieval.

pub mod codec;
pub mod embedder;
pub mod engine;
pub mod similarity;
pub mod types;

// Re-export commonly used types
pub use embedder::Embedder;
pub use engine::{EmbeddingStore, MetricsSnapshot};
pub use types::{Document, Metadata, StoreStats, VectorRecord};
