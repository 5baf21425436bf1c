//! Object storage client module
//!
//! Wraps the S3 calls the handler needs behind the `ObjectStore` trait.

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

use crate::errors::ProcessingError;

/// Storage collaborator: whole-object reads and overwriting writes.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `ProcessingError::StorageAccess` if the object is missing,
    /// unreadable, or the transfer fails.
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ProcessingError>;

    /// Writes `bytes` to `key`, replacing any existing object.
    ///
    /// # Errors
    ///
    /// Returns `ProcessingError::StorageAccess` if the upload fails.
    async fn store(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ProcessingError>;
}

/// `ObjectStore` backed by Amazon S3.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: S3Client,
}

impl S3Store {
    #[must_use]
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_conf(shared_config: &aws_config::SdkConfig) -> Self {
        Self::new(S3Client::new(shared_config))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ProcessingError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                ProcessingError::StorageAccess(format!(
                    "Failed to fetch s3://{bucket}/{key}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let data = output.body.collect().await.map_err(|e| {
            ProcessingError::StorageAccess(format!(
                "Failed to read body of s3://{bucket}/{key}: {e}"
            ))
        })?;
        let bytes = data.into_bytes().to_vec();
        debug!("Fetched {} bytes from s3://{}/{}", bytes.len(), bucket, key);
        Ok(bytes)
    }

    async fn store(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ProcessingError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| {
                ProcessingError::StorageAccess(format!(
                    "Failed to upload s3://{bucket}/{key}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}
