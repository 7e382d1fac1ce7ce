//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed session payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unsupported session format version: {0}")]
    UnsupportedVersion(u32),
}

#[derive(Error, Debug)]
#[error("Failed to encode session: {0}")]
pub struct EncodeError(#[from] pub serde_json::Error);

/// Failures on the save path. Never surfaced past the store.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Storage error: {0}")]
    Storage(#[from] vela_storage::StorageError),
}
