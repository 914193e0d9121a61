//! RagStore Backing Table
//!
//! Key-value table abstraction holding encoded vector records, keyed by id
//! with a secondary lookup on `source`. One adapter per real backend.

pub mod json_file;
pub mod memory;
pub mod table_trait;
pub mod types;

// Re-export commonly used types
pub use json_file::JsonFileTable;
pub use memory::MemoryTable;
pub use table_trait::BackingTable;
pub use types::TableItem;
