use async_trait::async_trait;
use ragstore_common::Result;

use crate::types::TableItem;

/// Common trait for backing table adapters
///
/// Each operation is atomic for a single item; nothing here coordinates
/// across items. `scan_all` presents the table as one logical sequence even
/// if an implementation pages internally.
#[async_trait]
pub trait BackingTable: Send + Sync {
    /// Insert or overwrite one item by primary key
    async fn put(&self, item: TableItem) -> Result<()>;

    /// Fetch one item by primary key
    async fn get_by_id(&self, id: &str) -> Result<Option<TableItem>>;

    /// Delete one item by primary key (an absent id is a no-op)
    async fn delete_by_id(&self, id: &str) -> Result<()>;

    /// Every item currently stored
    async fn scan_all(&self) -> Result<Vec<TableItem>>;

    /// Items whose `source` attribute equals the given value
    async fn query_by_source(&self, source: &str) -> Result<Vec<TableItem>>;
}
