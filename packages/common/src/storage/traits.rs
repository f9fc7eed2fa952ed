use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// An object found while listing a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    /// Path within the bucket, `/`-separated.
    pub path: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Named-bucket object storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` at `bucket/path`.
    ///
    /// Never overwrites: an existing object yields [`StorageError::AlreadyExists`].
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Public URL under which the object is served.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Retrieve an object as a streaming async reader.
    async fn get_stream(&self, bucket: &str, path: &str) -> Result<BoxReader, StorageError>;

    /// Retrieve all bytes of an object.
    async fn get(&self, bucket: &str, path: &str) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(bucket, path).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Remove objects. Paths that do not exist are ignored.
    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError>;

    /// List every object in a bucket.
    async fn list(&self, bucket: &str) -> Result<Vec<ObjectInfo>, StorageError>;
}
