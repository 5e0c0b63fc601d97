use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;
use serde_json::json;

use super::constants::{self, DRIVE_API_BASE, LIST_PAGE_SIZE};
use super::error::RemoteError;
use super::models::{FileListing, PermissionRequest, PermissionTarget};
use crate::auth::Identity;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    files: Vec<super::models::DriveFile>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Google Drive v3 client bound to one resolved identity.
///
/// Each operation is a single remote call; no state is carried across calls
/// beyond the shared connection pool and bearer token.
pub struct DriveClient {
    http_client: reqwest::Client,
    identity: Identity,
    base_url: String,
}

impl DriveClient {
    pub fn new(identity: Identity) -> Self {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("gdrive-cli/1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            identity,
            base_url: DRIVE_API_BASE.to_string(),
        }
    }

    /// Creates a client issuing requests against a custom base URL.
    pub fn with_base_url(identity: Identity, base_url: String) -> Self {
        let mut client = Self::new(identity);
        client.base_url = base_url;
        client
    }

    /// Creates an empty file in the folder. The new file inherits the
    /// folder's sharing permissions server-side; nothing to do here.
    ///
    /// A success response without an id yields `Ok(None)` — a soft failure
    /// the caller decides about.
    pub async fn create_file(
        &self,
        title: &str,
        mime_type: &str,
        folder_id: &str,
    ) -> Result<Option<String>, RemoteError> {
        info!("Creating '{}' in folder {}", title, folder_id);

        let body = json!({
            "name": title,
            "mimeType": mime_type,
            "parents": [folder_id],
        });
        let response = self
            .http_client
            .post(constants::files_endpoint(&self.base_url))
            .query(&[("fields", "id")])
            .bearer_auth(self.identity.bearer_token())
            .json(&body)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let value: serde_json::Value = response.json().await?;
        Ok(value
            .get("id")
            .and_then(|id| id.as_str())
            .map(str::to_string))
    }

    /// Grants `role` on the file to the target. One direct request; failures
    /// propagate exactly like `create_file`'s.
    pub async fn set_permission(
        &self,
        file_id: &str,
        role: &str,
        target: &PermissionTarget,
    ) -> Result<String, RemoteError> {
        info!("Sharing file {} as {} with {:?}", file_id, role, target);

        let body = PermissionRequest::new(role, target);
        let response = self
            .http_client
            .post(constants::permissions_endpoint(&self.base_url, file_id))
            .query(&[("fields", "id")])
            .bearer_auth(self.identity.bearer_token())
            .json(&body)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let value: serde_json::Value = response.json().await?;
        value
            .get("id")
            .and_then(|id| id.as_str())
            .map(str::to_string)
            .ok_or(RemoteError::MissingPermissionId)
    }

    /// Single-page listing of a folder's direct, non-trashed children. The
    /// `truncated` flag tells the caller more pages exist; they are not
    /// fetched.
    pub async fn list_files(&self, folder_id: &str) -> Result<FileListing, RemoteError> {
        info!("Listing files in folder {}", folder_id);

        let response = self
            .http_client
            .get(constants::files_endpoint(&self.base_url))
            .query(&[
                ("q", constants::folder_query(folder_id)),
                ("pageSize", LIST_PAGE_SIZE.to_string()),
                (
                    "fields",
                    "nextPageToken,files(id,name,mimeType,createdTime)".to_string(),
                ),
            ])
            .bearer_auth(self.identity.bearer_token())
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let listing: ListResponse = response.json().await?;
        Ok(FileListing {
            files: listing.files,
            truncated: listing.next_page_token.is_some(),
        })
    }

    /// Maps a non-success response to [`RemoteError::Api`], pulling the
    /// message out of Google's error envelope when present.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        debug!("Drive response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|value| {
                value
                    .pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or(text);

        Err(RemoteError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
