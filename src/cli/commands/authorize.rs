use anyhow::Result;
use log::info;

use crate::auth::flow;
use crate::auth::InstalledAppConfig;

pub async fn authorize_command(
    project_id: String,
    client_id: String,
    client_secret: String,
) -> Result<()> {
    info!("Starting OAuth authorization flow for project {}", project_id);

    let config = InstalledAppConfig {
        project_id,
        client_id,
        client_secret,
    };
    let credentials = flow::run_flow(&config).await?;

    println!("\n✓ Authorization complete");
    println!("\nSave the credentials to your GOOGLE_CLIENT_CREDENTIALS configuration:\n");
    println!("{}", credentials);
    Ok(())
}
