//! Object storage abstraction
//!
//! Staged raw observations and export artifacts both live in one bucket,
//! separated by key prefix. The trait keeps the core components testable
//! with an in-memory store.

pub mod s3;

pub use s3::S3ObjectStore;

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::Result;

/// Put/get/list/delete for named byte blobs plus presigned retrieval links
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores an object under the given key
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the write fails.
    async fn put_object(&self, key: &str, data: &[u8], content_type: &str) -> Result<()>;

    /// Reads an object's bytes
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the object is missing or unreadable.
    async fn get_object(&self, key: &str) -> Result<Vec<u8>>;

    /// Lists every key under a prefix
    ///
    /// Pagination is followed to completion; callers can rely on the full
    /// listing (the key generator undercounts sequences otherwise).
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;

    /// Most recently modified key under a prefix, if any
    async fn latest_key(&self, prefix: &str) -> Result<Option<String>>;

    /// Deletes an object
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the delete fails. Deleting a missing
    /// object is not an error.
    async fn delete_object(&self, key: &str) -> Result<()>;

    /// Generates a time-limited signed download URL for a stored object
    ///
    /// # Errors
    ///
    /// Returns a link-generation error, distinct from storage errors; the
    /// object may exist even when this fails.
    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String>;

    /// Bucket this store operates on
    fn bucket(&self) -> &str;
}
