use anyhow::Result;

use crate::api::{DriveClient, PermissionTarget};
use crate::auth;
use crate::config::Settings;

pub async fn share_command(
    settings: &Settings,
    file_id: String,
    role: String,
    domain: Option<String>,
    user: Option<String>,
) -> Result<()> {
    // Target validation happens before credentials are touched or any
    // request goes out.
    let target = PermissionTarget::from_options(domain, user)?;

    let identity = auth::resolve(&settings.google_client_credentials).await?;
    let drive = DriveClient::new(identity);

    let permission_id = drive.set_permission(&file_id, &role, &target).await?;

    println!("✓ Shared file {} ({} access)", file_id, role);
    println!("{}", permission_id);
    Ok(())
}
