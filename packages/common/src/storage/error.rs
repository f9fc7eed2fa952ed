use thiserror::Error;

/// Errors that can occur during blob storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested object was not found.
    #[error("object not found: {0}")]
    NotFound(String),
    /// An object already exists at the target path. Uploads never overwrite.
    #[error("object already exists: {0}")]
    AlreadyExists(String),
    /// Bucket name or object path failed validation.
    #[error("invalid storage path: {0}")]
    InvalidPath(String),
    /// The object exceeds the configured size limit.
    #[error("object exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The remote object store rejected the request.
    #[error("storage backend error: {0}")]
    Backend(String),
}
