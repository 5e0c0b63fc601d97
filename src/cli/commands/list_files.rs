use anyhow::Result;

use crate::api::constants::LIST_PAGE_SIZE;
use crate::api::DriveClient;
use crate::auth;
use crate::config::Settings;

pub async fn list_files_command(settings: &Settings, folder_id: String) -> Result<()> {
    let identity = auth::resolve(&settings.google_client_credentials).await?;
    let drive = DriveClient::new(identity);

    let listing = drive.list_files(&folder_id).await?;

    println!("Found {} file(s) in {}", listing.files.len(), folder_id);
    for file in &listing.files {
        println!(
            "  {} ({}) {} {}",
            file.name, file.id, file.mime_type, file.created_time
        );
    }
    if listing.truncated {
        println!(
            "⚠ Folder has more than {} files; this listing is truncated",
            LIST_PAGE_SIZE
        );
    }
    Ok(())
}
