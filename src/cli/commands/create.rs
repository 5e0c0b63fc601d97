use anyhow::Result;

use crate::api::constants::{spreadsheet_link, SPREADSHEET_MIME_TYPE};
use crate::api::DriveClient;
use crate::auth;
use crate::config::Settings;

pub async fn create_command(settings: &Settings, title: String, folder_id: String) -> Result<()> {
    let identity = auth::resolve(&settings.google_client_credentials).await?;
    let drive = DriveClient::new(identity);

    let file_id = drive
        .create_file(&title, SPREADSHEET_MIME_TYPE, &folder_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Drive did not return an id for the new file"))?;

    println!("✓ Created '{}' in folder {}", title, folder_id);
    println!("{}", file_id);
    println!("{}", spreadsheet_link(&file_id));
    Ok(())
}
