use anyhow::Result;
use async_trait::async_trait;
use spaces_provider::{
    FileRecord, ObjectClient, PutObjectRequest, SpacesConfig, SpacesProvider, StorageResponse,
};
use std::sync::Mutex;

#[derive(Default)]
struct RecordingClient {
    keys: Mutex<Vec<String>>,
}

#[async_trait]
impl ObjectClient for RecordingClient {
    type DeleteOutput = ();

    async fn put_object(&self, request: PutObjectRequest) -> Result<StorageResponse> {
        self.keys.lock().unwrap().push(request.key.clone());
        Ok(StorageResponse {
            location: format!("https://{}.fra1.digitaloceanspaces.com/{}", request.bucket, request.key),
            key: request.key,
        })
    }

    async fn delete_object(&self, _bucket: &str, key: &str) -> Result<()> {
        self.keys.lock().unwrap().retain(|stored| stored != key);
        Ok(())
    }
}

fn host_config(options: serde_json::Value) -> SpacesConfig {
    let config: SpacesConfig = serde_json::from_value(options).unwrap();
    config.validate().unwrap();
    config
}

#[tokio::test]
async fn test_upload_then_delete_through_cdn() {
    let config = host_config(serde_json::json!({
        "key": "DO00EXAMPLE",
        "secret": "secret",
        "endpoint": "fra1.digitaloceanspaces.com",
        "space": "bucket1",
        "directory": "uploads",
        "cdn": "https://cdn.x.com"
    }));
    let provider = SpacesProvider::with_client(config, RecordingClient::default());

    let mut file: FileRecord = serde_json::from_value(serde_json::json!({
        "hash": "abc123",
        "ext": ".png",
        "mime": "image/png",
        "buffer": [1, 2, 3]
    }))
    .unwrap();

    provider.upload(&mut file).await.unwrap();
    assert_eq!(file.url.as_deref(), Some("https://cdn.x.com/uploads/abc123.png"));
    assert_eq!(provider.key_for(&file).unwrap().as_str(), "uploads/abc123.png");

    provider.delete(&file).await.unwrap();
}

#[tokio::test]
async fn test_upload_without_directory_or_cdn() {
    let config = host_config(serde_json::json!({
        "key": "DO00EXAMPLE",
        "secret": "secret",
        "endpoint": "fra1.digitaloceanspaces.com",
        "Spaces": "bucket1"
    }));
    let provider = SpacesProvider::with_client(config, RecordingClient::default());

    let mut file: FileRecord = serde_json::from_value(serde_json::json!({ "hash": "zz" })).unwrap();

    provider.upload(&mut file).await.unwrap();
    assert_eq!(
        file.url.as_deref(),
        Some("https://bucket1.fra1.digitaloceanspaces.com/zz")
    );
}
