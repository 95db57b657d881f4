use clap::{Parser, Subcommand};
use spaces_provider::{
    FileLocationResolver, FileRecord, ProviderInfo, SpacesConfig, StorageResponse,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Upload and delete files in a DigitalOcean Space the way the host would
#[derive(Debug, Parser)]
#[command(name = "spaces-provider", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the provider metadata as JSON
    Describe,
    /// Print the key (and CDN url, if configured) a file would get, without uploading
    Key { path: PathBuf },
    /// Upload a file and print its public URL
    Upload {
        path: PathBuf,
        #[arg(long, default_value = "application/octet-stream")]
        mime: String,
    },
    /// Delete the object stored for a file
    Delete { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Variables may also come straight from the environment
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spaces_provider=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Describe => {
            println!("{}", serde_json::to_string_pretty(&ProviderInfo::spaces())?);
        }
        Command::Key { path } => {
            let config = load_config()?;
            let file = read_file(&path, String::new()).await?;
            file.validate()?;
            let has_cdn = config.cdn().is_some();
            let resolver = FileLocationResolver::new(Arc::new(config));
            let key = resolver.key(&file);
            if has_cdn {
                let url = resolver.url(&StorageResponse {
                    key: key.to_string(),
                    location: String::new(),
                })?;
                println!("{}\t{}", key, url);
            } else {
                println!("{}", key);
            }
        }
        Command::Upload { path, mime } => {
            let config = load_config()?;
            let mut file = read_file(&path, mime).await?;
            s3::upload(config, &mut file).await?;
            println!("{}", file.url.unwrap_or_default());
        }
        Command::Delete { path } => {
            let config = load_config()?;
            let file = read_file(&path, String::new()).await?;
            s3::delete(config, &file).await?;
        }
    }

    Ok(())
}

fn load_config() -> anyhow::Result<SpacesConfig> {
    let config = SpacesConfig::from_env()?;
    config.validate()?;
    tracing::debug!("Using space {} at {}", config.space, config.endpoint);
    Ok(config)
}

/// Build the record the host would hand over for a file on disk
async fn read_file(path: &Path, mime: String) -> anyhow::Result<FileRecord> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))?;

    let ext = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    Ok(FileRecord::from_bytes(bytes, ext, mime))
}

#[cfg(feature = "s3")]
mod s3 {
    use spaces_provider::{FileRecord, SpacesConfig, SpacesProvider};

    pub async fn upload(config: SpacesConfig, file: &mut FileRecord) -> anyhow::Result<()> {
        let provider = SpacesProvider::init(config).await?;
        provider.upload(file).await?;
        Ok(())
    }

    pub async fn delete(config: SpacesConfig, file: &FileRecord) -> anyhow::Result<()> {
        let provider = SpacesProvider::init(config).await?;
        let output = provider.delete(file).await?;
        tracing::debug!("Delete response: {:?}", output);
        Ok(())
    }
}

#[cfg(not(feature = "s3"))]
mod s3 {
    use spaces_provider::{FileRecord, SpacesConfig};

    pub async fn upload(_config: SpacesConfig, _file: &mut FileRecord) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("S3 feature not enabled"))
    }

    pub async fn delete(_config: SpacesConfig, _file: &FileRecord) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("S3 feature not enabled"))
    }
}
