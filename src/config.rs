use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;

/// Process-wide configuration, loaded once at startup.
///
/// The one required setting is the credential descriptor: either a literal
/// credential JSON document or a `file://` path to one on disk.
#[derive(Debug)]
pub struct Settings {
    pub google_client_credentials: String,
}

impl Settings {
    /// Loads settings from the environment, reading a `.env` file in the
    /// working directory first if one exists.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let google_client_credentials = std::env::var("GOOGLE_CLIENT_CREDENTIALS")
            .context("GOOGLE_CLIENT_CREDENTIALS environment variable not set")?;
        debug!("Loaded credential descriptor from environment");

        Ok(Self {
            google_client_credentials,
        })
    }

    /// Loads settings from an explicit env file.
    pub fn from_env_file(path: &str) -> Result<Self> {
        info!("Importing settings from env file: {}", path);

        if !Path::new(path).exists() {
            anyhow::bail!("Environment file not found: {}", path);
        }

        dotenvy::from_path(path)
            .with_context(|| format!("Failed to load env file '{}'", path))?;

        let google_client_credentials = std::env::var("GOOGLE_CLIENT_CREDENTIALS")
            .with_context(|| format!("GOOGLE_CLIENT_CREDENTIALS not found in env file: {}", path))?;

        Ok(Self {
            google_client_credentials,
        })
    }
}
