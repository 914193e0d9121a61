use crate::error::RagStoreError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// RagStore application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data base path
    pub data_dir: PathBuf,

    /// Backing table backend ("memory" or "json")
    pub table_backend: String,

    /// Table file path (json backend)
    pub table_path: PathBuf,

    /// Embedding dimension shared by every vector in the store
    pub embedding_dim: usize,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./db"),
            table_backend: "json".to_string(),
            table_path: PathBuf::from("./db/embeddings.json"),
            embedding_dim: 768,
            log_dir: PathBuf::from("./db/log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, RagStoreError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let config = Self {
            data_dir: Self::get_env_path("DATA_DIR")
                .unwrap_or_else(|| PathBuf::from("./db")),
            table_backend: std::env::var("TABLE_BACKEND")
                .unwrap_or_else(|_| "json".to_string()),
            table_path: Self::get_env_path("TABLE_PATH")
                .unwrap_or_else(|| PathBuf::from("./db/embeddings.json")),
            embedding_dim: std::env::var("EMBEDDING_DIM")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(768),
            log_dir: Self::get_env_path("LOG_DIR")
                .unwrap_or_else(|| PathBuf::from("./db/log")),
            log_level: std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string()),
        };

        // Ensure required directories exist
        config.ensure_directories()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), RagStoreError> {
        let dirs = vec![&self.data_dir, &self.log_dir];

        for dir in dirs {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    RagStoreError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), RagStoreError> {
        // Validate backend selector
        if self.table_backend != "memory" && self.table_backend != "json" {
            return Err(RagStoreError::config(format!(
                "Unknown table backend '{}', expected 'memory' or 'json'",
                self.table_backend
            )));
        }

        // Validate embedding dimension
        if self.embedding_dim == 0 {
            return Err(RagStoreError::config("Embedding dimension cannot be 0"));
        }

        Ok(())
    }
}
