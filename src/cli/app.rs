use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gdrive-cli")]
#[command(about = "A CLI tool for working with Google Drive v3")]
pub struct Cli {
    /// Read GOOGLE_CLIENT_CREDENTIALS from this env file instead of .env
    #[arg(long, global = true)]
    pub env_file: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Obtain OAuth credentials for calling Google APIs
    Authorize {
        /// Google Cloud project id
        project_id: String,
        /// OAuth client id
        client_id: String,
        /// OAuth client secret
        client_secret: String,
    },
    /// Create a new empty spreadsheet in the specified folder
    Create {
        /// Title of the new sheet
        title: String,
        /// Folder location of the new sheet
        folder_id: String,
    },
    /// Share a file with a domain or a user
    Share {
        /// File ID
        file_id: String,
        /// reader, writer or commenter
        #[arg(default_value = "commenter")]
        role: String,
        /// Domain to share with
        #[arg(long, conflicts_with = "user")]
        domain: Option<String>,
        /// User to share with
        #[arg(long)]
        user: Option<String>,
    },
    /// List the files in the specified folder
    ListFiles {
        /// Folder ID
        folder_id: String,
    },
}
