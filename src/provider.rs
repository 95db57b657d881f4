use crate::config::SpacesConfig;
use crate::error::ProviderError;
use crate::models::{FileRecord, ProviderInfo, StorageKey, StorageResponse};
use crate::resolver::FileLocationResolver;
use crate::storage::{ObjectClient, PutObjectRequest, IMMUTABLE_CACHE_CONTROL, PUBLIC_READ};
use std::sync::Arc;

#[cfg(feature = "s3")]
use crate::storage::S3Client;

/// Upload provider bound to one Spaces bucket.
///
/// The host builds one instance at plugin load and shares it between file
/// events. Operations hold no locks; two calls on the same key race at the
/// storage provider.
pub struct SpacesProvider<C: ObjectClient> {
    config: Arc<SpacesConfig>,
    resolver: FileLocationResolver,
    client: C,
}

#[cfg(feature = "s3")]
impl SpacesProvider<S3Client> {
    /// Validate the host options and connect an S3 client to the endpoint
    pub async fn init(config: SpacesConfig) -> Result<Self, ProviderError> {
        config.validate()?;
        let client = S3Client::new(&config).await?;

        tracing::info!(
            "Initialized {} provider for space {} at {}",
            ProviderInfo::spaces().name,
            config.space,
            config.endpoint
        );

        Ok(Self::with_client(config, client))
    }
}

impl<C: ObjectClient> SpacesProvider<C> {
    pub fn with_client(config: SpacesConfig, client: C) -> Self {
        let config = Arc::new(config);
        SpacesProvider {
            resolver: FileLocationResolver::new(config.clone()),
            config,
            client,
        }
    }

    pub fn info() -> ProviderInfo {
        ProviderInfo::spaces()
    }

    pub fn config(&self) -> &SpacesConfig {
        &self.config
    }

    pub fn resolver(&self) -> &FileLocationResolver {
        &self.resolver
    }

    pub fn key_for(&self, file: &FileRecord) -> Result<StorageKey, ProviderError> {
        file.validate()?;
        Ok(self.resolver.key(file))
    }

    pub fn url_for(&self, response: &StorageResponse) -> Result<String, ProviderError> {
        self.resolver.url(response)
    }

    /// Store the file publicly readable and record its public URL on it.
    /// The content is moved into the request, so `file.buffer` is empty afterwards.
    pub async fn upload(&self, file: &mut FileRecord) -> Result<(), ProviderError> {
        let key = self.key_for(file)?;

        let request = PutObjectRequest {
            bucket: self.config.space.clone(),
            key: key.into_string(),
            body: std::mem::take(&mut file.buffer),
            acl: PUBLIC_READ,
            cache_control: IMMUTABLE_CACHE_CONTROL,
            content_type: Some(file.mime.clone()).filter(|mime| !mime.is_empty()),
        };

        tracing::debug!(
            "Uploading {} bytes to {}/{}",
            request.body.len(),
            request.bucket,
            request.key
        );

        let response = self.client.put_object(request).await.map_err(|e| {
            tracing::error!("Failed to upload file {}: {}", file.hash, e);
            e
        })?;

        file.url = Some(self.resolver.url(&response)?);
        tracing::info!("Uploaded {} to {}", response.key, file.url.as_deref().unwrap_or_default());

        Ok(())
    }

    /// Remove the file's object and hand back the client's own result
    pub async fn delete(&self, file: &FileRecord) -> Result<C::DeleteOutput, ProviderError> {
        let key = self.key_for(file)?;

        tracing::debug!("Deleting {}/{}", self.config.space, key);

        let output = self
            .client
            .delete_object(&self.config.space, key.as_str())
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete {}: {}", key, e);
                e
            })?;

        tracing::info!("Deleted {}", key);
        Ok(output)
    }
}
