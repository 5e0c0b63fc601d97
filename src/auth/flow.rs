//! Installed-app OAuth flow for the `authorize` subcommand.
//!
//! Standard three-legged OAuth: yup-oauth2 prints the consent URL, listens on
//! the fixed local port for the redirect, and exchanges the code. We convert
//! its token cache into the credential document `resolve` accepts.

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::json;
use yup_oauth2::{ApplicationSecret, InstalledFlowAuthenticator, InstalledFlowReturnMethod};

use super::credentials::SCOPES;
use crate::api::constants::{AUTH_PROVIDER_CERT_URL, AUTH_URI, OAUTH_REDIRECT_PORT, TOKEN_URI};

/// Inline installed-app OAuth client configuration with the fixed Google
/// endpoints.
pub struct InstalledAppConfig {
    pub project_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl InstalledAppConfig {
    /// The client config in the shape Google Cloud Console exports.
    pub fn to_application_secret(&self) -> ApplicationSecret {
        ApplicationSecret {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            project_id: Some(self.project_id.clone()),
            auth_uri: AUTH_URI.to_string(),
            token_uri: TOKEN_URI.to_string(),
            auth_provider_x509_cert_url: Some(AUTH_PROVIDER_CERT_URL.to_string()),
            redirect_uris: vec![
                "urn:ietf:wg:oauth:2.0:oob".to_string(),
                "http://localhost".to_string(),
            ],
            ..Default::default()
        }
    }
}

/// Drives the browser grant on the fixed local port and returns the
/// credential JSON the operator should store into
/// `GOOGLE_CLIENT_CREDENTIALS`.
pub async fn run_flow(config: &InstalledAppConfig) -> Result<serde_json::Value> {
    let cache_path =
        std::env::temp_dir().join(format!("gdrive-cli-oauth-{}.json", std::process::id()));

    let auth = InstalledFlowAuthenticator::builder(
        config.to_application_secret(),
        InstalledFlowReturnMethod::HTTPPortRedirect(OAUTH_REDIRECT_PORT),
    )
    .persist_tokens_to_disk(cache_path.clone())
    .build()
    .await
    .context("Failed to set up the OAuth listener")?;

    info!("Waiting for the browser grant on port {}", OAUTH_REDIRECT_PORT);
    auth.token(SCOPES)
        .await
        .context("OAuth flow did not complete")?;

    let credentials = credentials_from_cache(config, &cache_path);
    let _ = std::fs::remove_file(&cache_path);
    credentials
}

/// Converts yup-oauth2's on-disk token cache into the authorized-user
/// document that `resolve` accepts.
fn credentials_from_cache(
    config: &InstalledAppConfig,
    path: &Path,
) -> Result<serde_json::Value> {
    let cache: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(path).context("Token cache missing after the grant")?,
    )?;
    let entry = cache
        .get(0)
        .and_then(|e| e.get("token"))
        .context("Token cache is empty after the grant")?;

    debug!("Read token cache entry");
    Ok(json!({
        "type": "authorized_user",
        "client_id": config.client_id,
        "client_secret": config.client_secret,
        "token": entry.get("access_token").and_then(|v| v.as_str()),
        "refresh_token": entry.get("refresh_token").and_then(|v| v.as_str()),
        "scopes": SCOPES,
        "expiry": entry.get("expires_at").and_then(|v| v.as_str()),
    }))
}
