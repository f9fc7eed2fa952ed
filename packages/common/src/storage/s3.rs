use std::io::Cursor;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::debug;

use super::error::StorageError;
use super::traits::{BlobStore, BoxReader, ObjectInfo};
use super::url::object_url;
use crate::config::S3Config;

/// S3-compatible object store (AWS, MinIO, R2, Supabase storage S3 endpoint).
pub struct S3BlobStore {
    region: Region,
    credentials: Credentials,
    path_style: bool,
    public_base_url: String,
    max_size: u64,
}

impl S3BlobStore {
    pub fn new(
        config: &S3Config,
        public_base_url: String,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Backend(format!("invalid S3 credentials: {e}")))?;

        Ok(Self {
            region: Region::Custom {
                region: config.region.clone(),
                endpoint: config.endpoint.clone(),
            },
            credentials,
            path_style: config.path_style,
            public_base_url,
            max_size,
        })
    }

    fn bucket(&self, name: &str) -> Result<Box<Bucket>, StorageError> {
        let bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())
            .map_err(backend_error)?;
        Ok(if self.path_style {
            bucket.with_path_style()
        } else {
            bucket
        })
    }
}

fn backend_error(err: s3::error::S3Error) -> StorageError {
    StorageError::Backend(err.to_string())
}

fn is_success(code: u16) -> bool {
    (200..300).contains(&code)
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let handle = self.bucket(bucket)?;

        let (_, head_status) = handle.head_object(path).await.map_err(backend_error)?;
        if is_success(head_status) {
            return Err(StorageError::AlreadyExists(format!("{bucket}/{path}")));
        }

        debug!(bucket, path, size = data.len(), "Uploading object to S3");
        let response = handle
            .put_object_with_content_type(path, data, content_type)
            .await
            .map_err(backend_error)?;
        if !is_success(response.status_code()) {
            return Err(StorageError::Backend(format!(
                "PUT {bucket}/{path} returned {}",
                response.status_code()
            )));
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        object_url(&self.public_base_url, bucket, path)
    }

    async fn get_stream(&self, bucket: &str, path: &str) -> Result<BoxReader, StorageError> {
        let response = self
            .bucket(bucket)?
            .get_object(path)
            .await
            .map_err(backend_error)?;
        match response.status_code() {
            404 => Err(StorageError::NotFound(format!("{bucket}/{path}"))),
            code if is_success(code) => Ok(Box::new(Cursor::new(response.bytes().to_vec()))),
            code => Err(StorageError::Backend(format!(
                "GET {bucket}/{path} returned {code}"
            ))),
        }
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        let handle = self.bucket(bucket)?;
        for path in paths {
            let response = handle.delete_object(path).await.map_err(backend_error)?;
            let code = response.status_code();
            if !is_success(code) && code != 404 {
                return Err(StorageError::Backend(format!(
                    "DELETE {bucket}/{path} returned {code}"
                )));
            }
        }
        Ok(())
    }

    async fn list(&self, bucket: &str) -> Result<Vec<ObjectInfo>, StorageError> {
        let pages = self
            .bucket(bucket)?
            .list(String::new(), None)
            .await
            .map_err(backend_error)?;

        Ok(pages
            .into_iter()
            .flat_map(|page| page.contents)
            .map(|object| ObjectInfo {
                last_modified: DateTime::parse_from_rfc3339(&object.last_modified)
                    .ok()
                    .map(|t| t.with_timezone(&Utc)),
                size: object.size,
                path: object.key,
            })
            .collect())
    }
}
