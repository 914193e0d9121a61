use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ragstore_common::{RagStoreError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::table_trait::BackingTable;
use crate::types::TableItem;

/// On-disk envelope for the JSON file table
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableEnvelope {
    /// Items map (id -> item)
    items: BTreeMap<String, TableItem>,

    /// Timestamp of the last write
    updated_at: DateTime<Utc>,
}

impl TableEnvelope {
    fn empty() -> Self {
        Self {
            items: BTreeMap::new(),
            updated_at: Utc::now(),
        }
    }
}

/// File-backed backing table
///
/// The whole table loads into memory at open; reads are served from memory
/// and the file is rewritten after every mutation. I/O failures surface as
/// storage-unavailable errors.
#[derive(Debug)]
pub struct JsonFileTable {
    path: PathBuf,
    envelope: RwLock<TableEnvelope>,
}

impl JsonFileTable {
    /// Open an existing table file or start an empty one
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let envelope = if path.exists() {
            let data = tokio::fs::read_to_string(&path).await.map_err(|e| {
                RagStoreError::storage(format!(
                    "failed to read table file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            serde_json::from_str(&data).map_err(|e| {
                RagStoreError::storage(format!(
                    "table file {} is not readable: {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            TableEnvelope::empty()
        };

        info!(
            "Backing table opened - {} items ({})",
            envelope.items.len(),
            path.display()
        );

        Ok(Self {
            path,
            envelope: RwLock::new(envelope),
        })
    }

    /// Rewrite the table file from the given envelope
    async fn save(&self, envelope: &mut TableEnvelope) -> Result<()> {
        envelope.updated_at = Utc::now();
        let data = serde_json::to_string_pretty(envelope)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    RagStoreError::storage(format!(
                        "failed to create table directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        tokio::fs::write(&self.path, data).await.map_err(|e| {
            RagStoreError::storage(format!(
                "failed to write table file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

#[async_trait]
impl BackingTable for JsonFileTable {
    async fn put(&self, item: TableItem) -> Result<()> {
        let mut envelope = self.envelope.write().await;
        envelope.items.insert(item.id.clone(), item);
        self.save(&mut envelope).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<TableItem>> {
        Ok(self.envelope.read().await.items.get(id).cloned())
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let mut envelope = self.envelope.write().await;
        if envelope.items.remove(id).is_some() {
            self.save(&mut envelope).await?;
        }
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<TableItem>> {
        Ok(self.envelope.read().await.items.values().cloned().collect())
    }

    async fn query_by_source(&self, source: &str) -> Result<Vec<TableItem>> {
        Ok(self
            .envelope
            .read()
            .await
            .items
            .values()
            .filter(|item| item.source == source)
            .cloned()
            .collect())
    }
}
