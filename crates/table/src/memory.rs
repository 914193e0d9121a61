use std::collections::BTreeMap;

use async_trait::async_trait;
use ragstore_common::Result;
use tokio::sync::RwLock;

use crate::table_trait::BackingTable;
use crate::types::TableItem;

/// In-memory backing table
///
/// Items live in a `BTreeMap`, so scans come back in key order and stay
/// reproducible between runs. Stands in for a local table emulator and is
/// the test backend.
#[derive(Default)]
pub struct MemoryTable {
    items: RwLock<BTreeMap<String, TableItem>>,
}

impl MemoryTable {
    /// Create new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the table holds no items
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl BackingTable for MemoryTable {
    async fn put(&self, item: TableItem) -> Result<()> {
        self.items.write().await.insert(item.id.clone(), item);
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<TableItem>> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.items.write().await.remove(id);
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<TableItem>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn query_by_source(&self, source: &str) -> Result<Vec<TableItem>> {
        Ok(self
            .items
            .read()
            .await
            .values()
            .filter(|item| item.source == source)
            .cloned()
            .collect())
    }
}
