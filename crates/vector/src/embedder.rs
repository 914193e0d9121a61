use async_trait::async_trait;
use ragstore_common::Result;

/// Common trait for text-to-vector generators
///
/// The model itself lives outside this crate; the store only assumes a
/// fixed output dimensionality.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for one text chunk
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Output dimensionality
    fn dimension(&self) -> usize;
}
