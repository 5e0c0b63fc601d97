pub mod credentials;
pub mod flow;

pub use credentials::{resolve, CredentialError, Identity, SCOPES};
pub use flow::InstalledAppConfig;
