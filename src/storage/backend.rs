use crate::models::StorageResponse;
use anyhow::Result;
use async_trait::async_trait;

/// Canned ACL sent with every upload
pub const PUBLIC_READ: &str = "public-read";

/// Cache directive sent with every upload: one year, never revalidated
pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// A single object write
#[derive(Debug, Clone, PartialEq)]
pub struct PutObjectRequest {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    pub acl: &'static str,
    pub cache_control: &'static str,
    pub content_type: Option<String>,
}

/// Trait defining the object operations the provider needs from a storage client
#[async_trait]
pub trait ObjectClient: Send + Sync {
    /// Whatever the underlying client returns for a delete
    type DeleteOutput: Send;

    /// Create or overwrite one object
    async fn put_object(&self, request: PutObjectRequest) -> Result<StorageResponse>;

    /// Remove one object
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<Self::DeleteOutput>;
}
