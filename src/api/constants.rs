//! API constants for the Google Drive v3 surface.

/// Base URL for Drive v3 requests
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// MIME type of a Google Sheets spreadsheet
pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// OAuth2 authorization endpoint
pub const AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";

/// OAuth2 token endpoint
pub const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// x509 cert URL included in installed-app client configs
pub const AUTH_PROVIDER_CERT_URL: &str = "https://www.googleapis.com/oauth2/v1/certs";

/// Page cap for list requests; further pages are reported, never fetched
pub const LIST_PAGE_SIZE: u32 = 100;

/// Fixed local port for the one-shot OAuth redirect listener
pub const OAUTH_REDIRECT_PORT: u16 = 50200;

/// Build the files endpoint URL
pub fn files_endpoint(base_url: &str) -> String {
    format!("{}/files", base_url)
}

/// Build the permission-create endpoint URL for a file
pub fn permissions_endpoint(base_url: &str, file_id: &str) -> String {
    format!("{}/files/{}/permissions", base_url, file_id)
}

/// Build the list query for the direct, non-trashed children of a folder
pub fn folder_query(folder_id: &str) -> String {
    format!("'{}' in parents and trashed=false", folder_id)
}

/// Build the browser link for a created spreadsheet
pub fn spreadsheet_link(file_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{}/edit", file_id)
}
