use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ragstore_common::{AppConfig, RagStoreError, Result};
use ragstore_table::{BackingTable, JsonFileTable, MemoryTable};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::codec;
use crate::embedder::Embedder;
use crate::similarity::rank_top_k;
use crate::types::{Document, Metadata, StoreStats, VectorRecord};

/// Diagnostic counters for absorbed per-item failures
#[derive(Debug, Default)]
struct StoreMetrics {
    failed_writes: AtomicU64,
    skipped_dimension: AtomicU64,
    corrupt_records: AtomicU64,
}

impl StoreMetrics {
    fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            failed_writes: self.failed_writes.load(Ordering::Relaxed),
            skipped_dimension: self.skipped_dimension.load(Ordering::Relaxed),
            corrupt_records: self.corrupt_records.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the store's diagnostic counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Records not persisted during add (dimension, encoding, write failure)
    pub failed_writes: u64,

    /// Records skipped during search because of dimension mismatch
    pub skipped_dimension: u64,

    /// Stored items that no longer decode
    pub corrupt_records: u64,
}

/// Embedding store over a backing table
///
/// Batch operations are best-effort: per-item failures are logged and
/// counted without aborting the batch, while an unreachable table fails the
/// whole call. The table is the single source of truth; no cross-item
/// coordination is attempted, so a concurrent add during `clear_all` may
/// leave the new record either present or absent.
pub struct EmbeddingStore {
    table: Arc<dyn BackingTable>,
    dimension: usize,
    metrics: StoreMetrics,
}

impl EmbeddingStore {
    /// Create a store over an existing table handle
    pub fn new(table: Arc<dyn BackingTable>, dimension: usize) -> Self {
        Self {
            table,
            dimension,
            metrics: StoreMetrics::default(),
        }
    }

    /// Create a store with the backend selected by configuration
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let table: Arc<dyn BackingTable> = match config.table_backend.as_str() {
            "memory" => Arc::new(MemoryTable::new()),
            "json" => Arc::new(JsonFileTable::open(&config.table_path).await?),
            other => {
                return Err(RagStoreError::config(format!(
                    "unknown table backend: {}",
                    other
                )))
            }
        };

        info!(
            "Embedding store initialized - backend={}, dimension={}",
            config.table_backend, config.embedding_dim
        );

        Ok(Self::new(table, config.embedding_dim))
    }

    /// Dimensionality every stored vector must have
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Current diagnostic counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Add records, generating ids where absent.
    ///
    /// Best-effort batch: a record that fails the dimension check, encoding,
    /// or a non-fatal write keeps its slot in the returned id list even
    /// though nothing was persisted for it. The list always matches the
    /// input in length and order. A put with an existing id overwrites.
    pub async fn add(&self, records: Vec<VectorRecord>) -> Result<Vec<String>> {
        let mut ids = Vec::with_capacity(records.len());

        for mut record in records {
            let id = record
                .id
                .take()
                .unwrap_or_else(|| Uuid::new_v4().to_string());
            record.id = Some(id.clone());

            if record.vector.len() != self.dimension {
                let err = RagStoreError::DimensionMismatch {
                    expected: self.dimension,
                    actual: record.vector.len(),
                };
                warn!("Rejecting record {}: {}", id, err);
                self.metrics.failed_writes.fetch_add(1, Ordering::Relaxed);
                ids.push(id);
                continue;
            }

            let item = match codec::encode(&record) {
                Ok(item) => item,
                Err(e) => {
                    warn!("Failed to encode record {}: {}", id, e);
                    self.metrics.failed_writes.fetch_add(1, Ordering::Relaxed);
                    ids.push(id);
                    continue;
                }
            };

            match self.table.put(item).await {
                Ok(()) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!("Failed to write record {}: {}", id, e);
                    self.metrics.failed_writes.fetch_add(1, Ordering::Relaxed);
                }
            }
            ids.push(id);
        }

        debug!("Add finished - {} records", ids.len());
        Ok(ids)
    }

    /// Embed chunks and add them in one pass.
    ///
    /// `source` and `page` are denormalized out of each chunk's metadata
    /// when present. A chunk whose embedding fails still occupies its slot
    /// in the returned id list; its empty vector fails the dimension check
    /// in `add` and is counted there.
    pub async fn add_texts(
        &self,
        embedder: &dyn Embedder,
        chunks: Vec<(String, Metadata)>,
    ) -> Result<Vec<String>> {
        let mut records = Vec::with_capacity(chunks.len());

        for (content, metadata) in chunks {
            let vector = match embedder.embed(&content).await {
                Ok(vector) => vector,
                Err(e) => {
                    warn!("Failed to embed chunk: {}", e);
                    Vec::new()
                }
            };

            let source = metadata
                .get("source")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let page = metadata
                .get("page")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32;

            records.push(VectorRecord {
                id: None,
                content,
                vector,
                source,
                page,
                metadata,
            });
        }

        self.add(records).await
    }

    /// Find the `k` most similar documents with scores.
    ///
    /// Brute-force: scans every stored record and scores it against the
    /// query, O(n) per call. Undecodable items and dimension mismatches are
    /// skipped and counted, never failing the query; an unreachable table
    /// fails the whole call. The scan is snapshot-less, so records added or
    /// removed mid-call may or may not appear.
    pub async fn similarity_search_with_score(
        &self,
        query: &[f32],
        k: usize,
    ) -> Result<Vec<(Document, f32)>> {
        debug!("Similarity search (k={}, dim={})", k, query.len());

        let items = self.table.scan_all().await?;
        let total_candidates = items.len();

        let mut records = Vec::with_capacity(items.len());
        for item in &items {
            match codec::decode(item) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Skipping undecodable record {}: {}", item.id, e);
                    self.metrics.corrupt_records.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        let ranking = rank_top_k(query, &records, k);
        if ranking.skipped_dimension > 0 {
            warn!(
                "Skipped {} records with dimension != {}",
                ranking.skipped_dimension,
                query.len()
            );
            self.metrics
                .skipped_dimension
                .fetch_add(ranking.skipped_dimension as u64, Ordering::Relaxed);
        }

        info!(
            "Search completed - {} results from {} candidates",
            ranking.hits.len(),
            total_candidates
        );
        Ok(ranking.hits)
    }

    /// Find the `k` most similar documents, dropping scores
    pub async fn similarity_search(&self, query: &[f32], k: usize) -> Result<Vec<Document>> {
        let hits = self.similarity_search_with_score(query, k).await?;
        Ok(hits.into_iter().map(|(doc, _)| doc).collect())
    }

    /// Fetch one record by id
    pub async fn get(&self, id: &str) -> Result<Option<VectorRecord>> {
        match self.table.get_by_id(id).await? {
            Some(item) => Ok(Some(codec::decode(&item)?)),
            None => Ok(None),
        }
    }

    /// Fetch every record for a source, skipping undecodable items
    pub async fn find_by_source(&self, source: &str) -> Result<Vec<VectorRecord>> {
        let items = self.table.query_by_source(source).await?;

        let mut records = Vec::with_capacity(items.len());
        for item in &items {
            match codec::decode(item) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Skipping undecodable record {}: {}", item.id, e);
                    self.metrics.corrupt_records.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        Ok(records)
    }

    /// Delete every record whose source matches.
    ///
    /// Idempotent: an unknown source deletes nothing and is not an error.
    /// Returns the number of records deleted.
    pub async fn delete_by_source(&self, source: &str) -> Result<usize> {
        let items = self.table.query_by_source(source).await?;
        let mut deleted = 0;

        for item in items {
            match self.table.delete_by_id(&item.id).await {
                Ok(()) => deleted += 1,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => warn!("Failed to delete record {}: {}", item.id, e),
            }
        }

        info!("Deleted {} records with source {:?}", deleted, source);
        Ok(deleted)
    }

    /// Delete every record in the table.
    ///
    /// Scan-then-delete-each, not atomic: a record added concurrently may
    /// survive the sweep. Returns the number of records deleted.
    pub async fn clear_all(&self) -> Result<usize> {
        let items = self.table.scan_all().await?;
        let mut deleted = 0;

        for item in items {
            match self.table.delete_by_id(&item.id).await {
                Ok(()) => deleted += 1,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => warn!("Failed to delete record {}: {}", item.id, e),
            }
        }

        info!("Cleared table - {} records deleted", deleted);
        Ok(deleted)
    }

    /// All stored ids, in storage order
    pub async fn list_ids(&self) -> Result<Vec<String>> {
        let items = self.table.scan_all().await?;
        Ok(items.into_iter().map(|item| item.id).collect())
    }

    /// Total and per-source record counts
    pub async fn stats(&self) -> Result<StoreStats> {
        let items = self.table.scan_all().await?;
        let total = items.len();

        let mut per_source: BTreeMap<String, usize> = BTreeMap::new();
        for item in items {
            *per_source.entry(item.source).or_default() += 1;
        }

        Ok(StoreStats { total, per_source })
    }
}
