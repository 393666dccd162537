//! Error types shared across collaborator boundaries.

use std::path::PathBuf;

/// Errors raised while encoding outbound messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors reported by an [`AssetImporter`](crate::AssetImporter).
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Source file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("Imported mesh {0} has no vertices")]
    EmptyMesh(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
