//! Credential resolution: turns a configured descriptor string into an
//! authenticated identity, refreshing it once if it is no longer valid.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::api::constants::TOKEN_URI;

/// Scopes requested for every identity, regardless of which subcommand runs.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets.readonly",
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive.metadata.readonly",
    "https://www.googleapis.com/auth/drive.metadata",
    "https://www.googleapis.com/auth/drive.file",
    "https://www.googleapis.com/auth/drive",
];

const FILE_PREFIX: &str = "file://";

/// Lifetime claimed by self-signed service-account tokens.
const JWT_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Google credentials file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Google credentials are not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),
    #[error("unsupported credential shape: {0}")]
    UnsupportedShape(String),
    #[error("failed to refresh Google API credentials: {0}")]
    RefreshFailed(String),
}

/// A service-account key file as exported by Google Cloud Console. Only the
/// fields needed to mint a self-signed assertion are read.
#[derive(Debug, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
}

/// An authorized-user credential document: the shape printed by `authorize`
/// and by google-auth's `to_json()`.
#[derive(Debug, Deserialize)]
pub struct AuthorizedUserInfo {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

/// Token endpoint response, shared by the refresh and authorization-code
/// grants.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Resolved authentication context for one CLI invocation. Never persisted.
#[derive(Debug)]
pub enum Identity {
    /// Self-signed service-account assertion, valid from construction.
    ServiceAccount { token: String },
    /// OAuth2 user token plus the material needed to refresh it.
    AuthorizedUser {
        token: String,
        expiry: Option<DateTime<Utc>>,
        client_id: String,
        client_secret: String,
        refresh_token: String,
    },
}

impl Identity {
    /// The string used to sign outgoing Drive requests.
    pub fn bearer_token(&self) -> &str {
        match self {
            Identity::ServiceAccount { token } => token,
            Identity::AuthorizedUser { token, .. } => token,
        }
    }

    /// Whether the identity can sign requests as-is. Missing expiry on a
    /// user token means not-yet-expired, matching google-auth.
    pub fn is_valid(&self) -> bool {
        match self {
            Identity::ServiceAccount { .. } => true,
            Identity::AuthorizedUser { token, expiry, .. } => {
                !token.is_empty() && expiry.map_or(true, |expiry| expiry > Utc::now())
            }
        }
    }

    fn from_service_account(key: &ServiceAccountKey) -> Result<Self, CredentialError> {
        #[derive(Serialize)]
        struct Claims<'a> {
            iss: &'a str,
            sub: &'a str,
            aud: &'a str,
            scope: String,
            iat: i64,
            exp: i64,
        }

        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: &key.client_email,
            sub: &key.client_email,
            aud: "https://www.googleapis.com/",
            scope: SCOPES.join(" "),
            iat: now,
            exp: now + JWT_LIFETIME_SECS,
        };

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| CredentialError::UnsupportedShape(format!("bad service account key: {}", e)))?;
        let token = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| {
                CredentialError::UnsupportedShape(format!("cannot sign service account assertion: {}", e))
            })?;

        debug!("Minted self-signed service account token for {}", key.client_email);
        Ok(Identity::ServiceAccount { token })
    }

    fn from_authorized_user(info: AuthorizedUserInfo) -> Self {
        Identity::AuthorizedUser {
            token: info.token.unwrap_or_default(),
            expiry: info.expiry,
            client_id: info.client_id,
            client_secret: info.client_secret,
            refresh_token: info.refresh_token,
        }
    }

    /// Exactly one refresh attempt against the token endpoint. Any failure is
    /// terminal; there is no retry loop.
    async fn refresh(self) -> Result<Self, CredentialError> {
        let (client_id, client_secret, refresh_token) = match self {
            identity @ Identity::ServiceAccount { .. } => return Ok(identity),
            Identity::AuthorizedUser {
                client_id,
                client_secret,
                refresh_token,
                ..
            } => (client_id, client_secret, refresh_token),
        };

        info!("Refreshing Google API access token");

        let client = reqwest::Client::new();
        let response = client
            .post(TOKEN_URI)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", &client_id),
                ("client_secret", &client_secret),
                ("refresh_token", &refresh_token),
            ])
            .send()
            .await
            .map_err(|e| CredentialError::RefreshFailed(e.to_string()))?;

        debug!("Token refresh status: {}", response.status());

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(CredentialError::RefreshFailed(error_text));
        }

        let token_data: TokenResponse = response
            .json()
            .await
            .map_err(|e| CredentialError::RefreshFailed(e.to_string()))?;
        let expiry = token_data
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs));

        Ok(Identity::AuthorizedUser {
            token: token_data.access_token,
            expiry,
            client_id,
            client_secret,
            refresh_token,
        })
    }
}

/// Materializes the configured credential descriptor into an [`Identity`].
///
/// The descriptor is either a literal JSON document or a `file://` path to
/// one. Service-account descriptors resolve without any network call; an
/// authorized-user descriptor triggers at most one refresh.
pub async fn resolve(descriptor: &str) -> Result<Identity, CredentialError> {
    let descriptor = if let Some(raw_path) = descriptor.strip_prefix(FILE_PREFIX) {
        let path = Path::new(raw_path);
        if !path.is_file() {
            return Err(CredentialError::FileNotFound(path.to_path_buf()));
        }
        std::fs::read_to_string(path)
            .map_err(|_| CredentialError::FileNotFound(path.to_path_buf()))?
    } else {
        descriptor.to_string()
    };

    let json: serde_json::Value =
        serde_json::from_str(&descriptor).map_err(CredentialError::MalformedJson)?;

    let identity = if json.get("type").and_then(|t| t.as_str()) == Some("service_account") {
        let key: ServiceAccountKey = serde_json::from_value(json)
            .map_err(|e| CredentialError::UnsupportedShape(e.to_string()))?;
        Identity::from_service_account(&key)?
    } else {
        let info: AuthorizedUserInfo = serde_json::from_value(json)
            .map_err(|e| CredentialError::UnsupportedShape(e.to_string()))?;
        Identity::from_authorized_user(info)
    };

    if identity.is_valid() {
        return Ok(identity);
    }
    identity.refresh().await
}
