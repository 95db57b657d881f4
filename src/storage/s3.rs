use super::backend::{ObjectClient, PutObjectRequest};
use crate::config::SpacesConfig;
use crate::models::StorageResponse;
use anyhow::Result;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::operation::delete_object::DeleteObjectOutput;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client,
};
use url::Url;

/// Spaces objects are addressed by endpoint. The SDK still needs a region to
/// sign with, and Spaces accepts this one for every datacenter.
const SIGNING_REGION: &str = "us-east-1";

pub struct S3Client {
    client: Client,
    endpoint: Url,
    host: String,
}

impl S3Client {
    pub async fn new(config: &SpacesConfig) -> Result<Self> {
        let endpoint = config.endpoint_url()?;
        let host = endpoint_host(&endpoint)?;

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(Credentials::new(
                &config.key,
                &config.secret,
                None,
                None,
                "static",
            ))
            .endpoint_url(endpoint.as_str().trim_end_matches('/'))
            .region(Region::new(SIGNING_REGION))
            .load()
            .await;

        tracing::debug!("Created S3 client for endpoint {}", endpoint);

        Ok(S3Client {
            client: Client::new(&sdk_config),
            endpoint,
            host,
        })
    }
}

/// Host part of the endpoint, including the port when one is given
fn endpoint_host(endpoint: &Url) -> Result<String> {
    let host = endpoint
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Endpoint {} has no host", endpoint))?;

    Ok(match endpoint.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Virtual-hosted URL of an object, e.g. `https://space.fra1.digitaloceanspaces.com/key`
fn object_location(scheme: &str, host: &str, bucket: &str, key: &str) -> String {
    format!("{}://{}.{}/{}", scheme, bucket, host, key)
}

#[async_trait]
impl ObjectClient for S3Client {
    type DeleteOutput = DeleteObjectOutput;

    async fn put_object(&self, request: PutObjectRequest) -> Result<StorageResponse> {
        self.client
            .put_object()
            .bucket(&request.bucket)
            .key(&request.key)
            .body(ByteStream::from(request.body))
            .acl(ObjectCannedAcl::from(request.acl))
            .cache_control(request.cache_control)
            .set_content_type(request.content_type)
            .send()
            .await?;

        Ok(StorageResponse {
            location: object_location(
                self.endpoint.scheme(),
                &self.host,
                &request.bucket,
                &request.key,
            ),
            key: request.key,
        })
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<DeleteObjectOutput> {
        let output = self
            .client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await?;

        Ok(output)
    }
}
