//! DigitalOcean Spaces upload provider.
//!
//! Stores host file records as public objects in an S3-compatible bucket and
//! derives their public URLs, optionally through a CDN.

pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod resolver;
pub mod storage;

pub use config::SpacesConfig;
pub use error::ProviderError;
pub use models::{AuthField, FileRecord, ProviderInfo, StorageKey, StorageResponse};
pub use provider::SpacesProvider;
pub use resolver::FileLocationResolver;
pub use storage::{ObjectClient, PutObjectRequest};
