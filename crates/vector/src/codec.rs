//! Conversion between in-memory records and persisted table items

use ragstore_common::{RagStoreError, Result};
use ragstore_table::TableItem;
use tracing::warn;

use crate::types::{Metadata, VectorRecord};

/// Convert a record to its persisted attribute form.
///
/// Vector components are rendered as decimal strings, the table's numeric
/// wire form. Rust prints the shortest decimal that round-trips, so the
/// encoding is lossless for every finite `f32`; non-finite components are
/// rejected. Metadata serializes as one JSON object blob.
pub fn encode(record: &VectorRecord) -> Result<TableItem> {
    let id = record
        .id
        .clone()
        .ok_or_else(|| RagStoreError::encoding("record has no id"))?;

    let mut vector = Vec::with_capacity(record.vector.len());
    for (i, component) in record.vector.iter().enumerate() {
        if !component.is_finite() {
            return Err(RagStoreError::encoding(format!(
                "vector component {} of record {} is not finite: {}",
                i, id, component
            )));
        }
        vector.push(component.to_string());
    }

    let metadata = serde_json::to_string(&record.metadata)?;

    Ok(TableItem {
        id,
        content: record.content.clone(),
        vector,
        source: record.source.clone(),
        page: record.page,
        metadata,
    })
}

/// Convert a persisted item back to a record.
///
/// Missing optional attributes default (`source` empty, `page` 0, metadata
/// empty). A malformed metadata blob degrades to an empty mapping instead
/// of failing the item; an unparseable vector component fails the whole
/// item.
pub fn decode(item: &TableItem) -> Result<VectorRecord> {
    let mut vector = Vec::with_capacity(item.vector.len());
    for (i, component) in item.vector.iter().enumerate() {
        let value: f32 = component.parse().map_err(|_| {
            RagStoreError::encoding(format!(
                "vector component {} of record {} is not a number: {:?}",
                i, item.id, component
            ))
        })?;
        vector.push(value);
    }

    Ok(VectorRecord {
        id: Some(item.id.clone()),
        content: item.content.clone(),
        vector,
        source: item.source.clone(),
        page: item.page,
        metadata: decode_metadata(&item.id, &item.metadata),
    })
}

/// Parse the metadata blob, degrading to an empty mapping when malformed
fn decode_metadata(id: &str, blob: &str) -> Metadata {
    if blob.is_empty() {
        return Metadata::new();
    }

    match serde_json::from_str(blob) {
        Ok(map) => map,
        Err(e) => {
            let err = RagStoreError::metadata_decode(format!("record {}: {}", id, e));
            warn!("Dropping malformed metadata: {}", err);
            Metadata::new()
        }
    }
}
