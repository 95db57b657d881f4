use crate::error::ProviderError;
use serde::Deserialize;
use std::env;
use url::Url;

/// Options collected by the host for one Spaces provider instance.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SpacesConfig {
    pub key: String,
    pub secret: String,
    pub endpoint: String,
    #[serde(default)]
    pub cdn: Option<String>,
    #[serde(alias = "Spaces")]
    pub space: String,
    #[serde(default)]
    pub directory: Option<String>,
}

impl SpacesConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(SpacesConfig {
            key: env::var("SPACES_KEY")
                .map_err(|_| anyhow::anyhow!("SPACES_KEY must be set"))?,
            secret: env::var("SPACES_SECRET")
                .map_err(|_| anyhow::anyhow!("SPACES_SECRET must be set"))?,
            endpoint: env::var("SPACES_ENDPOINT")
                .map_err(|_| anyhow::anyhow!("SPACES_ENDPOINT must be set"))?,
            cdn: env::var("SPACES_CDN").ok(),
            space: env::var("SPACES_BUCKET")
                .map_err(|_| anyhow::anyhow!("SPACES_BUCKET must be set"))?,
            directory: env::var("SPACES_DIRECTORY").ok(),
        })
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        let required = [
            ("key", &self.key),
            ("secret", &self.secret),
            ("endpoint", &self.endpoint),
            ("space", &self.space),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ProviderError::Config(format!("{} must not be empty", name)));
            }
        }

        self.cdn_url()?;
        self.endpoint_url()?;

        Ok(())
    }

    /// CDN base, treating an empty option as unset
    pub fn cdn(&self) -> Option<&str> {
        self.cdn.as_deref().filter(|cdn| !cdn.is_empty())
    }

    /// CDN base as a URL. A value without a host, such as `cdn.example.com:8080`
    /// (read as scheme `cdn.example.com`), is rejected.
    pub fn cdn_url(&self) -> Result<Option<Url>, ProviderError> {
        let Some(cdn) = self.cdn() else {
            return Ok(None);
        };

        let url = Url::parse(cdn)?;
        if url.cannot_be_a_base() || url.host_str().map_or(true, str::is_empty) {
            return Err(ProviderError::InvalidCdn(url::ParseError::EmptyHost));
        }
        Ok(Some(url))
    }

    /// Key prefix, treating an empty option as unset
    pub fn directory(&self) -> Option<&str> {
        self.directory.as_deref().filter(|dir| !dir.is_empty())
    }

    /// Endpoint as an absolute URL. A bare host such as
    /// `fra1.digitaloceanspaces.com` is addressed over https.
    pub fn endpoint_url(&self) -> Result<Url, ProviderError> {
        let endpoint = self.endpoint.trim();
        let url = if endpoint.contains("://") {
            Url::parse(endpoint)
        } else {
            Url::parse(&format!("https://{}", endpoint))
        };
        let url = url
            .map_err(|e| ProviderError::Config(format!("Invalid endpoint {}: {}", endpoint, e)))?;
        if url.host_str().map_or(true, str::is_empty) {
            return Err(ProviderError::Config(format!(
                "Invalid endpoint {}: no host",
                endpoint
            )));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SpacesConfig {
        SpacesConfig {
            key: "key".to_string(),
            secret: "secret".to_string(),
            endpoint: "fra1.digitaloceanspaces.com".to_string(),
            cdn: None,
            space: "bucket1".to_string(),
            directory: None,
        }
    }

    #[test]
    fn test_deserialize_accepts_spaces_alias() {
        let config: SpacesConfig = serde_json::from_value(serde_json::json!({
            "key": "k",
            "secret": "s",
            "endpoint": "ams3.digitaloceanspaces.com",
            "Spaces": "media",
            "directory": "uploads"
        }))
        .unwrap();

        assert_eq!(config.space, "media");
        assert_eq!(config.directory(), Some("uploads"));
        assert_eq!(config.cdn(), None);
    }

    #[test]
    fn test_empty_optional_values_are_unset() {
        let mut config = sample();
        config.cdn = Some(String::new());
        config.directory = Some(String::new());

        assert_eq!(config.cdn(), None);
        assert_eq!(config.directory(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_defaults_to_https() {
        let config = sample();
        let url = config.endpoint_url().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("fra1.digitaloceanspaces.com"));

        let mut local = sample();
        local.endpoint = "http://127.0.0.1:9000".to_string();
        assert_eq!(local.endpoint_url().unwrap().scheme(), "http");
    }

    #[test]
    fn test_validate_rejects_missing_values() {
        let mut config = sample();
        config.space = String::new();
        assert!(matches!(config.validate(), Err(ProviderError::Config(_))));

        let mut config = sample();
        config.cdn = Some("not a url".to_string());
        assert!(matches!(config.validate(), Err(ProviderError::InvalidCdn(_))));
    }

    #[test]
    fn test_validate_rejects_cdn_host_port_without_scheme() {
        let mut config = sample();
        config.cdn = Some("cdn.example.com:8080".to_string());
        assert!(matches!(
            config.validate(),
            Err(ProviderError::InvalidCdn(url::ParseError::EmptyHost))
        ));
    }

    #[test]
    fn test_endpoint_without_host_is_rejected() {
        let mut config = sample();
        config.endpoint = "unix:///var/run/s3.sock".to_string();
        assert!(matches!(config.endpoint_url(), Err(ProviderError::Config(_))));
        assert!(config.validate().is_err());
    }
}
