use crate::config::SpacesConfig;
use crate::error::ProviderError;
use crate::models::{FileRecord, StorageKey, StorageResponse};
use std::sync::Arc;
use url::Url;

/// Computes object keys and public URLs without touching the network
#[derive(Debug, Clone)]
pub struct FileLocationResolver {
    config: Arc<SpacesConfig>,
}

impl FileLocationResolver {
    pub fn new(config: Arc<SpacesConfig>) -> Self {
        FileLocationResolver { config }
    }

    /// `hash + ext`, under `directory/` when a directory is configured.
    /// Slashes inside the directory are kept as given.
    pub fn key(&self, file: &FileRecord) -> StorageKey {
        let filename = format!("{}{}", file.hash, file.ext);
        match self.config.directory() {
            Some(directory) => StorageKey::new(format!("{}/{}", directory, filename)),
            None => StorageKey::new(filename),
        }
    }

    /// Public URL of a stored object. Without a CDN this is the provider
    /// location; with one, the CDN origin over https with the key as path.
    pub fn url(&self, response: &StorageResponse) -> Result<String, ProviderError> {
        let Some(mut url) = self.config.cdn_url()? else {
            return Ok(response.location.clone());
        };

        if url.set_scheme("https").is_err() {
            // set_scheme refuses special <-> non-special switches; the host is
            // known to be present here, so only the scheme is swapped
            url = Url::parse(&format!("https{}", &url[url::Position::AfterScheme..]))?;
        }
        url.set_path(&response.key);
        url.set_query(None);
        url.set_fragment(None);

        Ok(url.to_string())
    }
}
