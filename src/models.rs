use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One file handed over by the host for an upload or delete event
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileRecord {
    pub hash: String,
    #[serde(default)]
    pub ext: String,
    #[serde(default, skip_serializing)]
    pub buffer: Vec<u8>,
    #[serde(default)]
    pub mime: String,
    /// Public URL, filled in after a successful upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl FileRecord {
    /// Build a record whose hash is the hex SHA256 of its content
    pub fn from_bytes(buffer: Vec<u8>, ext: impl Into<String>, mime: impl Into<String>) -> Self {
        FileRecord {
            hash: Self::calculate_hash(&buffer),
            ext: ext.into(),
            buffer,
            mime: mime.into(),
            url: None,
        }
    }

    /// Calculate SHA256 hash of file bytes
    pub fn calculate_hash(bytes: &[u8]) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        hex::encode(hasher.finalize())
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.hash.is_empty() {
            return Err(ProviderError::InvalidFile { field: "hash" });
        }
        Ok(())
    }
}

/// Object key inside the bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(key: impl Into<String>) -> Self {
        StorageKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the storage client reports after a successful write
#[derive(Debug, Clone, PartialEq)]
pub struct StorageResponse {
    pub key: String,
    /// Provider default URL of the object
    pub location: String,
}

/// Identity and configuration form declared to the host
#[derive(Debug, Clone, Serialize)]
pub struct ProviderInfo {
    pub provider: &'static str,
    pub name: &'static str,
    pub auth: Vec<AuthField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthField {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub field_type: &'static str,
}

impl AuthField {
    const fn text(name: &'static str, label: &'static str) -> Self {
        AuthField {
            name,
            label,
            field_type: "text",
        }
    }
}

impl ProviderInfo {
    pub fn spaces() -> Self {
        ProviderInfo {
            provider: "do",
            name: "Digital Ocean Spaces",
            auth: vec![
                AuthField::text("key", "Key"),
                AuthField::text("secret", "Secret"),
                AuthField::text("endpoint", "Endpoint (e.g. 'fra1.digitaloceanspaces.com')"),
                AuthField::text("cdn", "CDN Endpoint (Optional - e.g. 'https://cdn.space.com')"),
                AuthField::text("space", "Space (e.g. myspace)"),
                AuthField::text(
                    "directory",
                    "Directory (Optional - e.g. directory - place when you want to save files)",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_hashes_content() {
        let file = FileRecord::from_bytes(b"hello".to_vec(), ".txt", "text/plain");
        assert_eq!(
            file.hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(file.ext, ".txt");
        assert!(file.validate().is_ok());
    }

    #[test]
    fn test_missing_ext_defaults_to_empty() {
        let file: FileRecord =
            serde_json::from_value(serde_json::json!({ "hash": "zz", "mime": "image/png" }))
                .unwrap();
        assert_eq!(file.ext, "");
        assert!(file.url.is_none());
    }

    #[test]
    fn test_empty_hash_is_rejected() {
        let file = FileRecord::default();
        assert!(matches!(
            file.validate(),
            Err(ProviderError::InvalidFile { field: "hash" })
        ));
    }

    #[test]
    fn test_provider_info_serializes_auth_fields() {
        let value = serde_json::to_value(ProviderInfo::spaces()).unwrap();
        assert_eq!(value["provider"], "do");
        assert_eq!(value["auth"].as_array().unwrap().len(), 6);
        assert_eq!(value["auth"][4]["name"], "space");
        assert_eq!(value["auth"][4]["type"], "text");
    }
}
