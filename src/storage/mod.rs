pub mod backend;
#[cfg(feature = "s3")]
pub mod s3;

pub use backend::{ObjectClient, PutObjectRequest, IMMUTABLE_CACHE_CONTROL, PUBLIC_READ};
#[cfg(feature = "s3")]
pub use s3::S3Client;
