//! Drive gateway tests against a local one-shot HTTP server: each test
//! asserts both the value returned to the caller and the request actually
//! sent on the wire.

use anyhow::Result;
use gdrive_cli::api::constants::SPREADSHEET_MIME_TYPE;
use gdrive_cli::api::{DriveClient, PermissionTarget, RemoteError};
use gdrive_cli::auth::Identity;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

fn test_identity() -> Identity {
    Identity::AuthorizedUser {
        token: "test-token".to_string(),
        expiry: None,
        client_id: "cid".to_string(),
        client_secret: "cs".to_string(),
        refresh_token: "rt".to_string(),
    }
}

/// Serves exactly one request with the canned response and hands back the
/// raw request it saw.
async fn mock_drive(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if request_complete(&request) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;

        String::from_utf8_lossy(&request).to_string()
    });

    (base_url, handle)
}

/// Headers finished and any Content-Length worth of body received.
fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    match text.split_once("\r\n\r\n") {
        Some((head, tail)) => tail.len() >= content_length(head),
        None => false,
    }
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

fn request_line(request: &str) -> &str {
    request.lines().next().unwrap_or_default()
}

fn body_json(request: &str) -> serde_json::Value {
    let body = request.split_once("\r\n\r\n").map(|(_, b)| b).unwrap_or_default();
    serde_json::from_str(body).unwrap()
}

/// Query pairs from the request line, form-decoded.
fn query_pairs(request: &str) -> Vec<(String, String)> {
    let target = request_line(request)
        .split_whitespace()
        .nth(1)
        .unwrap_or_default();
    let query = target.split_once('?').map(|(_, q)| q).unwrap_or_default();

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(s: &str) -> String {
    urlencoding::decode(&s.replace('+', "%20"))
        .unwrap()
        .into_owned()
}

#[tokio::test]
async fn create_file_returns_the_id_from_the_service() -> Result<()> {
    let (base_url, server) = mock_drive("200 OK", r#"{"id": "F1"}"#).await;
    let drive = DriveClient::with_base_url(test_identity(), base_url);

    let file_id = drive
        .create_file("Q3", SPREADSHEET_MIME_TYPE, "folder123")
        .await?;
    assert_eq!(file_id.as_deref(), Some("F1"));

    let request = server.await?;
    assert!(request_line(&request).starts_with("POST /files?fields=id"));
    assert!(request.to_lowercase().contains("authorization: bearer test-token"));
    assert_eq!(
        body_json(&request),
        json!({
            "name": "Q3",
            "mimeType": "application/vnd.google-apps.spreadsheet",
            "parents": ["folder123"],
        })
    );
    Ok(())
}

#[tokio::test]
async fn create_file_without_id_is_a_soft_failure() -> Result<()> {
    let (base_url, _server) = mock_drive("200 OK", "{}").await;
    let drive = DriveClient::with_base_url(test_identity(), base_url);

    let file_id = drive
        .create_file("Q3", SPREADSHEET_MIME_TYPE, "folder123")
        .await?;
    assert_eq!(file_id, None);
    Ok(())
}

#[tokio::test]
async fn set_permission_sends_the_exact_domain_body() -> Result<()> {
    let (base_url, server) = mock_drive("200 OK", r#"{"id": "P1"}"#).await;
    let drive = DriveClient::with_base_url(test_identity(), base_url);

    let target = PermissionTarget::Domain("example.com".to_string());
    let permission_id = drive.set_permission("F1", "commenter", &target).await?;
    assert_eq!(permission_id, "P1");

    let request = server.await?;
    assert!(request_line(&request).starts_with("POST /files/F1/permissions?fields=id"));
    assert_eq!(
        body_json(&request),
        json!({"type": "domain", "role": "commenter", "domain": "example.com"})
    );
    Ok(())
}

#[tokio::test]
async fn set_permission_without_id_is_an_error() {
    let (base_url, _server) = mock_drive("200 OK", "{}").await;
    let drive = DriveClient::with_base_url(test_identity(), base_url);

    let target = PermissionTarget::User("someone@example.com".to_string());
    let err = drive
        .set_permission("F1", "writer", &target)
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::MissingPermissionId), "{err:?}");
}

#[tokio::test]
async fn list_files_sends_the_folder_query_and_page_cap() -> Result<()> {
    let (base_url, server) = mock_drive(
        "200 OK",
        r#"{"files": [
            {"id": "a", "name": "Alpha", "mimeType": "text/csv", "createdTime": "2026-01-01T00:00:00Z"},
            {"id": "b", "name": "Beta"}
        ]}"#,
    )
    .await;
    let drive = DriveClient::with_base_url(test_identity(), base_url);

    let listing = drive.list_files("folder123").await?;
    assert_eq!(listing.files.len(), 2);
    assert_eq!(listing.files[0].name, "Alpha");
    assert_eq!(listing.files[1].name, "Beta");
    assert!(!listing.truncated);

    let request = server.await?;
    let pairs = query_pairs(&request);
    assert!(pairs.contains(&(
        "q".to_string(),
        "'folder123' in parents and trashed=false".to_string()
    )));
    assert!(pairs.contains(&("pageSize".to_string(), "100".to_string())));
    Ok(())
}

#[tokio::test]
async fn list_files_flags_a_second_page_as_truncation() -> Result<()> {
    let (base_url, _server) = mock_drive(
        "200 OK",
        r#"{"files": [{"id": "a", "name": "Alpha"}], "nextPageToken": "page2"}"#,
    )
    .await;
    let drive = DriveClient::with_base_url(test_identity(), base_url);

    let listing = drive.list_files("folder123").await?;
    assert!(listing.truncated);
    Ok(())
}

#[tokio::test]
async fn api_error_carries_status_and_service_message() {
    let (base_url, _server) = mock_drive(
        "403 Forbidden",
        r#"{"error": {"code": 403, "message": "insufficient permissions"}}"#,
    )
    .await;
    let drive = DriveClient::with_base_url(test_identity(), base_url);

    let err = drive
        .create_file("Q3", SPREADSHEET_MIME_TYPE, "folder123")
        .await
        .unwrap_err();
    match err {
        RemoteError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "insufficient permissions");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}
