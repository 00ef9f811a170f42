//! Error types for the ocsf-proto-mapper crate.
//!
//! Only I/O, parse, and lookup failures surface as [`Error`]. Data-quality
//! problems in the schema (unknown types, dangling object references,
//! conflicting enum labels) are logged and counted instead.

use std::path::PathBuf;

/// Errors that can occur while mapping an OCSF schema to proto files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read or parse the OCSF schema JSON.
    #[error("schema error: {0}")]
    Schema(String),

    /// A requested event class was not found in the schema.
    #[error("class '{name}' not found in schema (available: {available})")]
    ClassNotFound { name: String, available: String },

    /// Failed to write a generated file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read a file from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parse error with context.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Network error during schema download.
    #[cfg(feature = "download")]
    #[error("download failed: {0}")]
    Download(String),

    /// An output artifact could not be serialized.
    #[error("failed to encode {artifact}: {reason}")]
    Encode { artifact: String, reason: String },
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
