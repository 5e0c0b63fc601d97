use anyhow::Result;
use clap::Parser;
use log::info;

use gdrive_cli::cli::commands::{
    authorize_command, create_command, list_files_command, share_command,
};
use gdrive_cli::cli::{Cli, Commands};
use gdrive_cli::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();

    let cli = Cli::parse();
    info!("Starting gdrive-cli");

    match cli.command {
        Commands::Authorize {
            project_id,
            client_id,
            client_secret,
        } => authorize_command(project_id, client_id, client_secret).await,
        Commands::Create { title, folder_id } => {
            let settings = load_settings(cli.env_file.as_deref())?;
            create_command(&settings, title, folder_id).await
        }
        Commands::Share {
            file_id,
            role,
            domain,
            user,
        } => {
            let settings = load_settings(cli.env_file.as_deref())?;
            share_command(&settings, file_id, role, domain, user).await
        }
        Commands::ListFiles { folder_id } => {
            let settings = load_settings(cli.env_file.as_deref())?;
            list_files_command(&settings, folder_id).await
        }
    }
}

fn load_settings(env_file: Option<&str>) -> Result<Settings> {
    match env_file {
        Some(path) => Settings::from_env_file(path),
        None => Settings::load(),
    }
}
