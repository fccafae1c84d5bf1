//! S3 object store implementation

use async_trait::async_trait;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::time::Duration;

use crate::adapters::storage::ObjectStore;
use crate::domain::{Result, StorageError, StratusError};

/// S3-backed object store
///
/// All operations target a single bucket; keys carry the `raw/` or `csv/`
/// prefix supplied by the caller.
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Creates a store bound to one bucket
    pub fn new(sdk_config: &aws_config::SdkConfig, bucket: impl Into<String>) -> Self {
        Self {
            client: S3Client::new(sdk_config),
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, key: &str, data: &[u8], content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data.to_vec()))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| match e {
                SdkError::ServiceError(err) => StorageError::PutFailed {
                    key: key.to_string(),
                    message: err.into_err().to_string(),
                },
                _ => StorageError::PutFailed {
                    key: key.to_string(),
                    message: e.to_string(),
                },
            })?;

        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| match e {
                SdkError::ServiceError(err) if err.err().is_no_such_key() => {
                    StorageError::NotFound(key.to_string())
                }
                SdkError::ServiceError(err) => StorageError::GetFailed {
                    key: key.to_string(),
                    message: err.into_err().to_string(),
                },
                _ => StorageError::GetFailed {
                    key: key.to_string(),
                    message: e.to_string(),
                },
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::GetFailed {
                key: key.to_string(),
                message: e.to_string(),
            })?
            .into_bytes()
            .to_vec();

        Ok(data)
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);

            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|e| match e {
                SdkError::ServiceError(err) => StorageError::ListFailed {
                    prefix: prefix.to_string(),
                    message: err.into_err().to_string(),
                },
                _ => StorageError::ListFailed {
                    prefix: prefix.to_string(),
                    message: e.to_string(),
                },
            })?;

            if let Some(contents) = response.contents {
                for object in contents {
                    if let Some(key) = object.key {
                        keys.push(key);
                    }
                }
            }

            continuation_token = response.next_continuation_token;
            if continuation_token.is_none() {
                break;
            }
        }

        Ok(keys)
    }

    async fn latest_key(&self, prefix: &str) -> Result<Option<String>> {
        let mut latest: Option<(String, (i64, u32))> = None;
        let mut continuation_token = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);

            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|e| match e {
                SdkError::ServiceError(err) => StorageError::ListFailed {
                    prefix: prefix.to_string(),
                    message: err.into_err().to_string(),
                },
                _ => StorageError::ListFailed {
                    prefix: prefix.to_string(),
                    message: e.to_string(),
                },
            })?;

            if let Some(contents) = response.contents {
                for object in contents {
                    let (Some(key), Some(modified)) = (object.key, object.last_modified) else {
                        continue;
                    };
                    let stamp = (modified.secs(), modified.subsec_nanos());
                    let newer = latest
                        .as_ref()
                        .map(|(_, current)| stamp > *current)
                        .unwrap_or(true);
                    if newer {
                        latest = Some((key, stamp));
                    }
                }
            }

            continuation_token = response.next_continuation_token;
            if continuation_token.is_none() {
                break;
            }
        }

        Ok(latest.map(|(key, _)| key))
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| match e {
                SdkError::ServiceError(err) => StorageError::DeleteFailed {
                    key: key.to_string(),
                    message: err.into_err().to_string(),
                },
                _ => StorageError::DeleteFailed {
                    key: key.to_string(),
                    message: e.to_string(),
                },
            })?;

        Ok(())
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| StratusError::LinkGeneration(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| StratusError::LinkGeneration(e.to_string()))?;

        Ok(request.uri().to_string())
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
