//! Error types for the groupwatch engine.

use thiserror::Error;

/// Errors that can occur in groupwatch operations.
#[derive(Error, Debug)]
pub enum GroupWatchError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Push delivery error: {0}")]
    Delivery(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider '{0}' not found in PATH")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("Invalid time value: {0}")]
    InvalidTime(String),

    #[error("Unknown schedule item kind: {0}")]
    UnknownItemKind(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for groupwatch operations.
pub type GroupWatchResult<T> = Result<T, GroupWatchError>;
